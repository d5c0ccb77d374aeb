//! Integration tests for `LimitOrderHandlers`.
//!
//! The order API is served by `httpmock`; provider capabilities are a single
//! in-memory wallet that records what it was asked to do.
//!
//! Run with:
//! ```bash
//! RUST_LOG=limit_orders_sdk=debug cargo test --test handlers_integration
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use httpmock::prelude::*;
use serde_json::{json, Value};

use limit_orders_sdk::prelude::*;

const CHAIN_ID: u64 = 1;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn table() -> ContractAddresses {
    ContractAddresses {
        swapper: Address::repeat_byte(0x5a),
        token_transfer_proxy: Address::repeat_byte(0x77),
        rfq: Address::repeat_byte(0xfe),
    }
}

fn maker() -> Address {
    Address::repeat_byte(0x01)
}

fn input() -> BuildLimitOrderInput {
    BuildLimitOrderInput::new(
        maker(),
        Address::repeat_byte(0xaa),
        Address::repeat_byte(0xbb),
        U256::from(100u64),
        U256::from(200u64),
    )
    .with_nonce(U256::from(7u64))
}

/// Order fields the builder produces for `input()` against `table()`.
fn expected_fields() -> LimitOrderFields {
    LimitOrderFields {
        nonce_and_meta: U256::from(7u64) << 160,
        expiry: 0,
        maker_asset: Address::repeat_byte(0xaa),
        taker_asset: Address::repeat_byte(0xbb),
        maker: maker(),
        taker: table().swapper,
        maker_amount: U256::from(100u64),
        taker_amount: U256::from(200u64),
    }
}

/// API record for a stored order built from `payload`.
fn api_order(payload: &Value, order_hash: B256) -> Value {
    let mut order = payload.clone();
    order["orderHash"] = json!(order_hash);
    order["chainId"] = json!(CHAIN_ID);
    order["type"] = json!("LIMIT");
    order["state"] = json!("PENDING");
    order["fillableBalance"] = order["makerAmount"].clone();
    order
}

// ─── Mock wallet ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct MockWallet {
    signed: Mutex<Vec<TypedData>>,
    transactions: Mutex<Vec<ContractCall>>,
    static_calls: Mutex<Vec<ContractCall>>,
    static_result: Mutex<Value>,
    log_filters: Mutex<Vec<LogFilter>>,
    logs: Mutex<Vec<LogEntry>>,
    reject_signing: bool,
}

#[async_trait]
impl SignTypedData for MockWallet {
    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Signature, CapabilityError> {
        if self.reject_signing {
            return Err(CapabilityError::Rejected("user denied".to_string()));
        }
        self.signed.lock().unwrap().push(typed_data.clone());
        Ok(Signature::from("0xsig"))
    }
}

#[async_trait]
impl TransactCall<String> for MockWallet {
    async fn transact(&self, call: ContractCall) -> Result<String, CapabilityError> {
        let mut txs = self.transactions.lock().unwrap();
        txs.push(call);
        Ok(format!("0xtx{}", txs.len()))
    }
}

#[async_trait]
impl StaticCall for MockWallet {
    async fn static_call(&self, call: ContractCall) -> Result<Value, CapabilityError> {
        self.static_calls.lock().unwrap().push(call);
        Ok(self.static_result.lock().unwrap().clone())
    }
}

#[async_trait]
impl GetLogsCall for MockWallet {
    async fn get_logs(&self, filter: LogFilter) -> Result<Vec<LogEntry>, CapabilityError> {
        self.log_filters.lock().unwrap().push(filter);
        Ok(self.logs.lock().unwrap().clone())
    }
}

fn full_options(server: &MockServer, wallet: &Arc<MockWallet>) -> ProviderOptions<String> {
    ProviderOptions::<String>::builder()
        .api_url(&server.base_url())
        .chain_id(CHAIN_ID)
        .read_retry(RetryPolicy::None)
        .signer(wallet.clone())
        .transactor(wallet.clone())
        .static_caller(wallet.clone())
        .log_reader(wallet.clone())
        .build()
        .expect("options should build")
}

async fn mock_contracts(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/adapters/contracts")
                .query_param("network", CHAIN_ID.to_string());
            then.status(200).json_body(serde_json::to_value(table()).unwrap());
        })
        .await
}

// ─── Construction ────────────────────────────────────────────────────────────

#[test]
fn construct_all_fails_fast_on_missing_capability() {
    let wallet = Arc::new(MockWallet::default());
    let options = ProviderOptions::<String>::builder()
        .signer(wallet.clone())
        .static_caller(wallet.clone())
        .log_reader(wallet)
        .build()
        .unwrap();

    let err = construct_all_limit_orders_handlers(&options).err().unwrap();
    assert_eq!(err.capability, Capability::Transact);
    assert_eq!(err.module, "cancel");
}

#[test]
fn construct_submit_needs_only_a_signer() {
    let bare = ProviderOptions::<String>::builder().build().unwrap();
    let err = construct_submit_limit_order(&bare).err().unwrap();
    assert_eq!(err.capability, Capability::SignTypedData);

    let options = ProviderOptions::<String>::builder()
        .signer(Arc::new(MockWallet::default()))
        .build()
        .unwrap();
    assert!(construct_submit_limit_order(&options).is_ok());
}

// ─── Submit ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn submit_builds_signs_and_posts() {
    init_tracing();
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let handlers = construct_all_limit_orders_handlers(&full_options(&server, &wallet)).unwrap();

    let mut payload = serde_json::to_value(expected_fields()).unwrap();
    payload["permitMakerAsset"] = json!("0xpermit");
    payload["signature"] = json!("0xsig");
    let order_hash = B256::repeat_byte(0x42);

    let contracts = mock_contracts(&server).await;
    let post = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/ft/orders/{}/", CHAIN_ID))
                .json_body(payload.clone());
            then.status(200)
                .json_body(json!({ "order": api_order(&payload, order_hash) }));
        })
        .await;

    let order = handlers
        .submit_limit_order(&input(), Some(OrderExtra::permit_maker_asset("0xpermit")), None)
        .await
        .unwrap();

    contracts.assert_async().await;
    post.assert_async().await;
    assert_eq!(order.order_hash, order_hash);
    assert_eq!(order.state, OrderState::Pending);
    assert_eq!(order.permit_maker_asset.as_deref(), Some("0xpermit"));

    let signed = wallet.signed.lock().unwrap();
    assert_eq!(signed.len(), 1);
    assert_eq!(signed[0].domain.verifying_contract, table().rfq);
    assert_eq!(signed[0].domain.chain_id, CHAIN_ID);
    assert_eq!(signed[0].message, serde_json::to_value(expected_fields()).unwrap());
}

#[tokio::test]
async fn submit_does_not_post_when_signing_is_rejected() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet {
        reject_signing: true,
        ..Default::default()
    });
    let options = ProviderOptions::<String>::builder()
        .api_url(&server.base_url())
        .contracts(table())
        .signer(wallet)
        .build()
        .unwrap();
    let submitter = construct_submit_limit_order(&options).unwrap();

    let post = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200);
        })
        .await;

    let err = submitter
        .submit_limit_order(&input(), None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Sign(CapabilityError::Rejected(_))));
    post.assert_hits_async(0).await;
}

#[tokio::test]
async fn submit_surfaces_server_error_without_retry() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let options = ProviderOptions::<String>::builder()
        .api_url(&server.base_url())
        .contracts(table())
        .read_retry(RetryPolicy::Idempotent)
        .signer(wallet)
        .build()
        .unwrap();
    let submitter = construct_submit_limit_order(&options).unwrap();

    let post = server
        .mock_async(|when, then| {
            when.method(POST).path(format!("/ft/orders/{}/", CHAIN_ID));
            then.status(503).body("unavailable");
        })
        .await;

    let err = submitter
        .submit_limit_order(&input(), None, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SdkError::Post(PostError::Http(HttpError::ServerError { status: 503, .. }))
    ));
    post.assert_hits_async(1).await;
}

#[tokio::test]
async fn submit_cancelled_while_posting() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let options = ProviderOptions::<String>::builder()
        .api_url(&server.base_url())
        .contracts(table())
        .signer(wallet.clone())
        .build()
        .unwrap();
    let submitter = construct_submit_limit_order(&options).unwrap();

    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200)
                .delay(Duration::from_secs(10))
                .json_body(json!({}));
        })
        .await;

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let err = tokio::time::timeout(
        Duration::from_secs(5),
        submitter.submit_limit_order(&input(), None, Some(&token)),
    )
    .await
    .expect("cancellation should end the submit early")
    .unwrap_err();

    assert!(matches!(err, SdkError::Post(PostError::Cancelled)));
    assert_eq!(wallet.signed.lock().unwrap().len(), 1);
}

// ─── REST getters ────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_limit_orders_by_maker() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let handlers = construct_all_limit_orders_handlers(&full_options(&server, &wallet)).unwrap();

    let mut payload = serde_json::to_value(expected_fields()).unwrap();
    payload["signature"] = json!("0xsig");
    let listing = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/ft/orders/{}/maker/{}", CHAIN_ID, maker()))
                .query_param("type", "LIMIT");
            then.status(200).json_body(json!({
                "orders": [
                    api_order(&payload, B256::repeat_byte(1)),
                    api_order(&payload, B256::repeat_byte(2)),
                ],
                "total": 2
            }));
        })
        .await;

    let orders = handlers
        .get_limit_orders(UserRole::Maker, maker(), OrderKind::Limit)
        .await
        .unwrap();

    listing.assert_async().await;
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[1].order_hash, B256::repeat_byte(2));
    assert_eq!(orders[0].fields(), expected_fields());
}

#[tokio::test]
async fn get_limit_order_by_hash_maps_not_found() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let handlers = construct_all_limit_orders_handlers(&full_options(&server, &wallet)).unwrap();

    let hash = B256::repeat_byte(0x99);
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/ft/order/{}/{}", CHAIN_ID, hash));
            then.status(404).body("order not found");
        })
        .await;

    let err = handlers.get_limit_order_by_hash(hash).await.unwrap_err();
    assert!(matches!(err, SdkError::Http(HttpError::NotFound(ref body)) if body == "order not found"));
}

#[tokio::test]
async fn contract_table_is_fetched_once() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let handlers = construct_all_limit_orders_handlers(&full_options(&server, &wallet)).unwrap();
    let contracts = mock_contracts(&server).await;

    assert_eq!(handlers.get_contracts().await.unwrap(), table());
    handlers.build_limit_order(&input()).await.unwrap();
    handlers.cancel_limit_order(B256::ZERO).await.unwrap();

    contracts.assert_hits_async(1).await;
}

// ─── Contract-backed operations ──────────────────────────────────────────────

#[tokio::test]
async fn status_and_amount_filled_decodes_remaining_balances() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    *wallet.static_result.lock().unwrap() = json!(["0", "1", "51"]);
    let options = ProviderOptions::<String>::builder()
        .api_url(&server.base_url())
        .contracts(table())
        .signer(wallet.clone())
        .transactor(wallet.clone())
        .static_caller(wallet.clone())
        .log_reader(wallet.clone())
        .build()
        .unwrap();
    let handlers = construct_all_limit_orders_handlers(&options).unwrap();

    let hashes = [B256::repeat_byte(1), B256::repeat_byte(2), B256::repeat_byte(3)];
    let statuses = handlers
        .get_limit_order_status_and_amount_filled(maker(), &hashes)
        .await
        .unwrap();

    assert_eq!(
        statuses.iter().map(|s| s.status).collect::<Vec<_>>(),
        vec![
            OrderStatus::Unfilled,
            OrderStatus::FilledOrCancelled,
            OrderStatus::PartiallyFilled {
                remaining: U256::from(50u64)
            },
        ]
    );
    let calls = wallet.static_calls.lock().unwrap();
    assert_eq!(calls[0].to, table().rfq);
    assert_eq!(calls[0].method, "getRemainingOrderBalance(address,bytes32[])");
    assert_eq!(calls[0].args[1], json!(hashes));
}

#[tokio::test]
async fn cancelled_hashes_come_from_maker_logs() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let mut args = serde_json::Map::new();
    args.insert("orderHash".to_string(), json!(B256::repeat_byte(0x0c)));
    args.insert("maker".to_string(), json!(maker()));
    wallet.logs.lock().unwrap().push(LogEntry {
        block_number: 10,
        transaction_hash: B256::repeat_byte(0xee),
        args,
    });
    let options = ProviderOptions::<String>::builder()
        .api_url(&server.base_url())
        .contracts(table())
        .signer(wallet.clone())
        .transactor(wallet.clone())
        .static_caller(wallet.clone())
        .log_reader(wallet.clone())
        .build()
        .unwrap();
    let handlers = construct_all_limit_orders_handlers(&options).unwrap();

    let hashes = handlers
        .get_cancelled_order_hashes(maker(), Some(5))
        .await
        .unwrap();

    assert_eq!(hashes, vec![B256::repeat_byte(0x0c)]);
    let filters = wallet.log_filters.lock().unwrap();
    assert_eq!(filters[0].address, table().rfq);
    assert_eq!(filters[0].event, "OrderCancelled(bytes32,address)");
    assert_eq!(filters[0].topics, vec![None, Some(maker().into_word())]);
    assert_eq!(filters[0].from_block, Some(5));
}

#[tokio::test]
async fn cancel_fill_and_approve_target_the_right_contracts() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let options = ProviderOptions::<String>::builder()
        .api_url(&server.base_url())
        .contracts(table())
        .signer(wallet.clone())
        .transactor(wallet.clone())
        .static_caller(wallet.clone())
        .log_reader(wallet.clone())
        .build()
        .unwrap();
    let handlers = construct_all_limit_orders_handlers(&options).unwrap();

    let token = Address::repeat_byte(0xaa);
    let hashes = [B256::repeat_byte(1), B256::repeat_byte(2)];

    assert_eq!(handlers.cancel_limit_orders_bulk(&hashes).await.unwrap(), "0xtx1");
    handlers
        .approve_maker_token_for_limit_order(U256::from(100u64), token)
        .await
        .unwrap();
    handlers
        .approve_taker_token_for_limit_order(U256::from(200u64), token)
        .await
        .unwrap();

    let mut payload = serde_json::to_value(expected_fields()).unwrap();
    payload["signature"] = json!("0xsig");
    let open: OpenLimitOrder =
        serde_json::from_value(api_order(&payload, B256::repeat_byte(3))).unwrap();
    handlers
        .fill_limit_order(&open, Some(U256::from(50u64)))
        .await
        .unwrap();

    let txs = wallet.transactions.lock().unwrap();
    assert_eq!(txs.len(), 4);

    assert_eq!(txs[0].to, table().rfq);
    assert_eq!(txs[0].method, "cancelOrders(bytes32[])");

    assert_eq!(txs[1].to, token);
    assert_eq!(txs[1].method, "approve(address,uint256)");
    assert_eq!(txs[1].args, vec![json!(table().rfq), json!("100")]);

    assert_eq!(txs[2].args[0], json!(table().token_transfer_proxy));

    assert_eq!(txs[3].to, table().rfq);
    assert!(txs[3].method.starts_with("partialFillOrder("));
    assert_eq!(txs[3].args[1], json!("0xsig"));
    assert_eq!(txs[3].args[2], json!("50"));
}

#[tokio::test]
async fn empty_bulk_cancel_is_rejected_before_sending() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let handlers = construct_all_limit_orders_handlers(&full_options(&server, &wallet)).unwrap();

    let err = handlers.cancel_limit_orders_bulk(&[]).await.unwrap_err();
    assert!(matches!(err, SdkError::Validation(_)));
    assert!(wallet.transactions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn filled_hashes_come_from_maker_logs() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let mut args = serde_json::Map::new();
    args.insert("orderHash".to_string(), json!(B256::repeat_byte(0x0f)));
    args.insert("maker".to_string(), json!(maker()));
    wallet.logs.lock().unwrap().push(LogEntry {
        block_number: 12,
        transaction_hash: B256::repeat_byte(0xed),
        args,
    });
    let options = ProviderOptions::<String>::builder()
        .api_url(&server.base_url())
        .contracts(table())
        .signer(wallet.clone())
        .transactor(wallet.clone())
        .static_caller(wallet.clone())
        .log_reader(wallet.clone())
        .build()
        .unwrap();
    let handlers = construct_all_limit_orders_handlers(&options).unwrap();

    let hashes = handlers.get_filled_order_hashes(maker(), None).await.unwrap();

    assert_eq!(hashes, vec![B256::repeat_byte(0x0f)]);
    let filters = wallet.log_filters.lock().unwrap();
    assert_eq!(filters[0].address, table().rfq);
    assert_eq!(
        filters[0].event,
        "OrderFilled(bytes32,address,address,uint256,address,address,uint256)"
    );
    assert_eq!(filters[0].topics, vec![None, Some(maker().into_word())]);
    assert_eq!(filters[0].from_block, None);
}

#[tokio::test]
async fn single_cancel_and_full_fill_send_their_calls() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let options = ProviderOptions::<String>::builder()
        .api_url(&server.base_url())
        .contracts(table())
        .signer(wallet.clone())
        .transactor(wallet.clone())
        .static_caller(wallet.clone())
        .log_reader(wallet.clone())
        .build()
        .unwrap();
    let handlers = construct_all_limit_orders_handlers(&options).unwrap();

    let order_hash = B256::repeat_byte(0x21);
    assert_eq!(handlers.cancel_limit_order(order_hash).await.unwrap(), "0xtx1");

    let mut payload = serde_json::to_value(expected_fields()).unwrap();
    payload["signature"] = json!("0xsig");
    let open: OpenLimitOrder =
        serde_json::from_value(api_order(&payload, B256::repeat_byte(3))).unwrap();
    assert_eq!(handlers.fill_limit_order(&open, None).await.unwrap(), "0xtx2");

    let txs = wallet.transactions.lock().unwrap();
    assert_eq!(txs.len(), 2);

    assert_eq!(txs[0].to, table().rfq);
    assert_eq!(txs[0].method, "cancelOrder(bytes32)");
    assert_eq!(txs[0].args, vec![json!(order_hash)]);

    assert_eq!(txs[1].to, table().rfq);
    assert_eq!(
        txs[1].method,
        "fillOrder((uint256,uint128,address,address,address,address,uint256,uint256),bytes)"
    );
    assert_eq!(
        txs[1].args,
        vec![serde_json::to_value(expected_fields()).unwrap(), json!("0xsig")]
    );
}

#[tokio::test]
async fn partial_fill_outside_taker_amount_is_rejected() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let options = ProviderOptions::<String>::builder()
        .api_url(&server.base_url())
        .contracts(table())
        .signer(wallet.clone())
        .transactor(wallet.clone())
        .static_caller(wallet.clone())
        .log_reader(wallet.clone())
        .build()
        .unwrap();
    let handlers = construct_all_limit_orders_handlers(&options).unwrap();

    let mut payload = serde_json::to_value(expected_fields()).unwrap();
    payload["signature"] = json!("0xsig");
    let open: OpenLimitOrder =
        serde_json::from_value(api_order(&payload, B256::repeat_byte(3))).unwrap();

    for amount in [U256::ZERO, open.taker_amount + U256::from(1u64)] {
        let err = handlers
            .fill_limit_order(&open, Some(amount))
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)), "{err}");
    }
    handlers
        .fill_limit_order(&open, Some(open.taker_amount))
        .await
        .unwrap();

    let txs = wallet.transactions.lock().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].args[2], json!("200"));
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn build_limit_order_tx_posts_fill_request() {
    let server = MockServer::start_async().await;
    let wallet = Arc::new(MockWallet::default());
    let handlers = construct_all_limit_orders_handlers(&full_options(&server, &wallet)).unwrap();

    let mut payload = serde_json::to_value(expected_fields()).unwrap();
    payload["signature"] = json!("0xsig");
    let open: OpenLimitOrder =
        serde_json::from_value(api_order(&payload, B256::repeat_byte(3))).unwrap();

    let taker = Address::repeat_byte(0x02);
    let request = BuildLimitOrderTxInput {
        src_token: open.taker_asset,
        dest_token: open.maker_asset,
        src_amount: open.taker_amount,
        dest_amount: open.maker_amount,
        user_address: taker,
        receiver: None,
        price_route: None,
        orders: vec![OrderToFill::full(&open)],
    };

    let tx = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/transactions/{}", CHAIN_ID))
                .json_body(serde_json::to_value(&request).unwrap());
            then.status(200).json_body(json!({
                "from": taker,
                "to": table().swapper,
                "value": "0",
                "data": "0xabcdef",
                "chainId": CHAIN_ID
            }));
        })
        .await;

    let params = handlers.build_limit_order_tx(&request).await.unwrap();

    tx.assert_async().await;
    assert_eq!(params.to, table().swapper);
    assert_eq!(params.data, "0xabcdef");
    assert!(params.value.is_zero());
}

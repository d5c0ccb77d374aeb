//! High-level handler bundle: every limit order operation behind one value.
//!
//! Each sub-module lives in `limit_orders/<name>.rs` and is constructed on its
//! own from the shared [`ProviderOptions`]. This module assembles them and
//! exposes one method per operation, so a name can only ever map to one
//! implementation.

use tokio_util::sync::CancellationToken;

use crate::error::{ConstructionError, SdkError};
use crate::limit_orders::{
    BuildLimitOrderInput, BuildLimitOrderTxInput, ContractAddresses, LimitOrderApprover,
    LimitOrderBuilder, LimitOrderCanceller, LimitOrderContractGetters, LimitOrderFiller,
    LimitOrderGetters, LimitOrderPoster, LimitOrderSigner, LimitOrderSubmitter,
    LimitOrderToSend, LimitOrderTxBuilder, OpenLimitOrder, OrderData, OrderExtra,
    OrderStatusAndAmount, TransactionParams,
};
use crate::options::ProviderOptions;
use crate::shared::{Address, OrderKind, Signature, UserRole, B256, U256};

/// The default submit workflow: REST-backed build and post around the host signer.
pub type DefaultSubmitter = LimitOrderSubmitter<LimitOrderBuilder, LimitOrderSigner, LimitOrderPoster>;

/// Construct only the submit workflow. Requires `SignTypedData`.
pub fn construct_submit_limit_order<T>(
    options: &ProviderOptions<T>,
) -> Result<DefaultSubmitter, ConstructionError> {
    Ok(LimitOrderSubmitter::new(
        LimitOrderBuilder::new(options),
        LimitOrderSigner::new(options)?,
        LimitOrderPoster::new(options),
    ))
}

/// Construct every limit order sub-module.
///
/// Fails on the first sub-module whose required capability is missing from
/// `options`, naming both.
pub fn construct_all_limit_orders_handlers<T>(
    options: &ProviderOptions<T>,
) -> Result<LimitOrderHandlers<T>, ConstructionError> {
    LimitOrderHandlers::new(options)
}

/// Every limit order operation, sharing one set of [`ProviderOptions`].
pub struct LimitOrderHandlers<T> {
    submitter: DefaultSubmitter,
    builder: LimitOrderBuilder,
    signer: LimitOrderSigner,
    poster: LimitOrderPoster,
    getters: LimitOrderGetters,
    contract_getters: LimitOrderContractGetters,
    canceller: LimitOrderCanceller<T>,
    filler: LimitOrderFiller<T>,
    approver: LimitOrderApprover<T>,
    tx_builder: LimitOrderTxBuilder,
}

impl<T> LimitOrderHandlers<T> {
    pub fn new(options: &ProviderOptions<T>) -> Result<Self, ConstructionError> {
        let handlers = Self {
            getters: LimitOrderGetters::new(options),
            contract_getters: LimitOrderContractGetters::new(options)?,
            submitter: construct_submit_limit_order(options)?,
            builder: LimitOrderBuilder::new(options),
            signer: LimitOrderSigner::new(options)?,
            poster: LimitOrderPoster::new(options),
            canceller: LimitOrderCanceller::new(options)?,
            filler: LimitOrderFiller::new(options)?,
            approver: LimitOrderApprover::new(options)?,
            tx_builder: LimitOrderTxBuilder::new(options),
        };
        tracing::debug!(chain_id = options.chain_id(), "Constructed limit order handlers");
        Ok(handlers)
    }

    // ── Submit ───────────────────────────────────────────────────────────

    /// Build, sign and post in one call. See [`LimitOrderSubmitter::submit_limit_order`].
    pub async fn submit_limit_order(
        &self,
        input: &BuildLimitOrderInput,
        extra: Option<OrderExtra>,
        cancel: Option<&CancellationToken>,
    ) -> Result<OpenLimitOrder, SdkError> {
        self.submitter.submit_limit_order(input, extra, cancel).await
    }

    // ── Build / sign / post ──────────────────────────────────────────────

    pub async fn build_limit_order(&self, input: &BuildLimitOrderInput) -> Result<OrderData, SdkError> {
        Ok(self.builder.build_limit_order(input).await?)
    }

    pub async fn sign_limit_order(&self, order: &OrderData) -> Result<Signature, SdkError> {
        self.signer.sign_limit_order(order).await
    }

    pub async fn post_limit_order(
        &self,
        order: &LimitOrderToSend,
        cancel: Option<&CancellationToken>,
    ) -> Result<OpenLimitOrder, SdkError> {
        Ok(self.poster.post_limit_order(order, cancel).await?)
    }

    // ── REST getters ─────────────────────────────────────────────────────

    pub async fn get_limit_orders(
        &self,
        role: UserRole,
        user: Address,
        kind: OrderKind,
    ) -> Result<Vec<OpenLimitOrder>, SdkError> {
        self.getters.get_limit_orders(role, user, kind).await
    }

    pub async fn get_limit_order_by_hash(&self, order_hash: B256) -> Result<OpenLimitOrder, SdkError> {
        self.getters.get_limit_order_by_hash(order_hash).await
    }

    pub async fn get_contracts(&self) -> Result<ContractAddresses, SdkError> {
        self.getters.get_contracts().await
    }

    // ── Contract getters ─────────────────────────────────────────────────

    pub async fn get_limit_order_status_and_amount_filled(
        &self,
        maker: Address,
        order_hashes: &[B256],
    ) -> Result<Vec<OrderStatusAndAmount>, SdkError> {
        self.contract_getters
            .get_limit_order_status_and_amount_filled(maker, order_hashes)
            .await
    }

    pub async fn get_cancelled_order_hashes(
        &self,
        maker: Address,
        from_block: Option<u64>,
    ) -> Result<Vec<B256>, SdkError> {
        self.contract_getters
            .get_cancelled_order_hashes(maker, from_block)
            .await
    }

    pub async fn get_filled_order_hashes(
        &self,
        maker: Address,
        from_block: Option<u64>,
    ) -> Result<Vec<B256>, SdkError> {
        self.contract_getters
            .get_filled_order_hashes(maker, from_block)
            .await
    }

    // ── Transactions ─────────────────────────────────────────────────────

    pub async fn cancel_limit_order(&self, order_hash: B256) -> Result<T, SdkError> {
        self.canceller.cancel_limit_order(order_hash).await
    }

    pub async fn cancel_limit_orders_bulk(&self, order_hashes: &[B256]) -> Result<T, SdkError> {
        self.canceller.cancel_limit_orders_bulk(order_hashes).await
    }

    pub async fn fill_limit_order(
        &self,
        order: &OpenLimitOrder,
        taker_fill_amount: Option<U256>,
    ) -> Result<T, SdkError> {
        self.filler.fill_limit_order(order, taker_fill_amount).await
    }

    pub async fn approve_maker_token_for_limit_order(
        &self,
        amount: U256,
        token: Address,
    ) -> Result<T, SdkError> {
        self.approver
            .approve_maker_token_for_limit_order(amount, token)
            .await
    }

    pub async fn approve_taker_token_for_limit_order(
        &self,
        amount: U256,
        token: Address,
    ) -> Result<T, SdkError> {
        self.approver
            .approve_taker_token_for_limit_order(amount, token)
            .await
    }

    pub async fn build_limit_order_tx(
        &self,
        input: &BuildLimitOrderTxInput,
    ) -> Result<TransactionParams, SdkError> {
        self.tx_builder.build_limit_order_tx(input).await
    }
}

impl<T> Clone for LimitOrderHandlers<T> {
    fn clone(&self) -> Self {
        Self {
            submitter: self.submitter.clone(),
            builder: self.builder.clone(),
            signer: self.signer.clone(),
            poster: self.poster.clone(),
            getters: self.getters.clone(),
            contract_getters: self.contract_getters.clone(),
            canceller: self.canceller.clone(),
            filler: self.filler.clone(),
            approver: self.approver.clone(),
            tx_builder: self.tx_builder.clone(),
        }
    }
}

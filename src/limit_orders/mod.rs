//! Limit order domain: order types plus one sub-module per operation group.
//!
//! Each sub-module is constructed independently from
//! [`ProviderOptions`](crate::options::ProviderOptions) and pulls out only the
//! capabilities it needs. [`LimitOrderHandlers`](crate::client::LimitOrderHandlers)
//! assembles all of them.

pub mod approve;
pub mod build;
pub mod cancel;
pub mod contract_getters;
pub mod contracts;
pub mod fill;
pub mod get;
pub mod post;
pub mod sign;
pub mod submit;
pub mod transaction;
pub mod wire;

use std::collections::BTreeMap;

use alloy::sol;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capability::{TypedData, TypedDataDomain, TypedDataField};
use crate::error::SdkError;
use crate::shared::{serde_util, Address, OrderKind, Signature, B256, U256};

pub use approve::LimitOrderApprover;
pub use build::LimitOrderBuilder;
pub use cancel::LimitOrderCanceller;
pub use contract_getters::{LimitOrderContractGetters, OrderStatus, OrderStatusAndAmount};
pub use contracts::ContractAddresses;
pub use fill::LimitOrderFiller;
pub use get::LimitOrderGetters;
pub use post::LimitOrderPoster;
pub use sign::LimitOrderSigner;
pub use submit::{BuildOrder, LimitOrderSubmitter, PostOrder, SignOrder};
pub use transaction::{BuildLimitOrderTxInput, LimitOrderTxBuilder, OrderToFill, TransactionParams};

sol! {
    /// On-chain order layout of the RFQ settlement contract.
    #[derive(Debug)]
    struct OrderRFQ {
        uint256 nonceAndMeta;
        uint128 expiry;
        address makerAsset;
        address takerAsset;
        address maker;
        address taker;
        uint256 makerAmount;
        uint256 takerAmount;
    }
}

/// EIP-712 primary type name of a limit order.
pub const ORDER_PRIMARY_TYPE: &str = "OrderRFQ";

// ─── BuildLimitOrderInput ────────────────────────────────────────────────────

/// User parameters for a new limit order.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildLimitOrderInput {
    pub maker: Address,
    /// Restricts who receives the fill. `None` lets anyone take the order.
    pub taker: Option<Address>,
    /// Address allowed to call the settlement contract. Defaults to the
    /// swapper contract so fills are routed through it.
    pub contract_taker: Option<Address>,
    pub maker_asset: Address,
    pub taker_asset: Address,
    pub maker_amount: U256,
    pub taker_amount: U256,
    /// Unix seconds; `0` never expires.
    pub expiry: i64,
    /// Random when absent.
    pub nonce: Option<U256>,
}

impl BuildLimitOrderInput {
    pub fn new(
        maker: Address,
        maker_asset: Address,
        taker_asset: Address,
        maker_amount: U256,
        taker_amount: U256,
    ) -> Self {
        Self {
            maker,
            taker: None,
            contract_taker: None,
            maker_asset,
            taker_asset,
            maker_amount,
            taker_amount,
            expiry: 0,
            nonce: None,
        }
    }

    pub fn with_taker(mut self, taker: Address) -> Self {
        self.taker = Some(taker);
        self
    }

    pub fn with_contract_taker(mut self, contract_taker: Address) -> Self {
        self.contract_taker = Some(contract_taker);
        self
    }

    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = expiry.timestamp();
        self
    }

    pub fn with_nonce(mut self, nonce: U256) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn kind(&self) -> OrderKind {
        match self.taker {
            Some(t) if t != Address::ZERO => OrderKind::P2P,
            _ => OrderKind::Limit,
        }
    }
}

// ─── LimitOrderFields ────────────────────────────────────────────────────────

/// The signed fields of an order, in the order API's JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrderFields {
    #[serde(with = "serde_util::u256_decimal")]
    pub nonce_and_meta: U256,
    pub expiry: i64,
    pub maker_asset: Address,
    pub taker_asset: Address,
    pub maker: Address,
    pub taker: Address,
    #[serde(with = "serde_util::u256_decimal")]
    pub maker_amount: U256,
    #[serde(with = "serde_util::u256_decimal")]
    pub taker_amount: U256,
}

impl LimitOrderFields {
    pub(crate) fn to_sol(&self) -> OrderRFQ {
        OrderRFQ {
            nonceAndMeta: self.nonce_and_meta,
            expiry: self.expiry.max(0) as u128,
            makerAsset: self.maker_asset,
            takerAsset: self.taker_asset,
            maker: self.maker,
            taker: self.taker,
            makerAmount: self.maker_amount,
            takerAmount: self.taker_amount,
        }
    }
}

// ─── OrderData ───────────────────────────────────────────────────────────────

/// An unsigned order ready for signing.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderData {
    pub domain: TypedDataDomain,
    pub data: LimitOrderFields,
    /// EIP-712 signing hash; the order's identity on-chain and in the API.
    pub order_hash: B256,
    pub kind: OrderKind,
}

impl OrderData {
    /// Typed-data payload for `eth_signTypedData_v4`-style signers.
    pub fn typed_data(&self) -> Result<TypedData, SdkError> {
        Ok(TypedData {
            types: order_types(),
            primary_type: ORDER_PRIMARY_TYPE.to_string(),
            domain: self.domain.clone(),
            message: serde_json::to_value(&self.data)?,
        })
    }
}

fn order_types() -> BTreeMap<String, Vec<TypedDataField>> {
    let mut types = BTreeMap::new();
    types.insert(
        "EIP712Domain".to_string(),
        vec![
            TypedDataField::new("name", "string"),
            TypedDataField::new("version", "string"),
            TypedDataField::new("chainId", "uint256"),
            TypedDataField::new("verifyingContract", "address"),
        ],
    );
    types.insert(
        ORDER_PRIMARY_TYPE.to_string(),
        vec![
            TypedDataField::new("nonceAndMeta", "uint256"),
            TypedDataField::new("expiry", "uint128"),
            TypedDataField::new("makerAsset", "address"),
            TypedDataField::new("takerAsset", "address"),
            TypedDataField::new("maker", "address"),
            TypedDataField::new("taker", "address"),
            TypedDataField::new("makerAmount", "uint256"),
            TypedDataField::new("takerAmount", "uint256"),
        ],
    );
    types
}

// ─── OrderExtra ──────────────────────────────────────────────────────────────

/// Additional top-level fields merged into the submitted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderExtra(serde_json::Map<String, serde_json::Value>);

impl OrderExtra {
    pub fn new() -> Self {
        Self::default()
    }

    /// EIP-2612 permit letting the settlement contract pull the maker asset.
    pub fn permit_maker_asset(permit: impl Into<String>) -> Self {
        Self::new().with("permitMakerAsset", serde_json::Value::String(permit.into()))
    }

    pub fn with(mut self, key: &str, value: serde_json::Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ─── LimitOrderToSend ────────────────────────────────────────────────────────

/// Body of the order submission request.
///
/// A flat JSON object: the order fields, then `extra`, then `signature`. Later
/// sources replace earlier keys, so `signature` always wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LimitOrderToSend(serde_json::Map<String, serde_json::Value>);

impl LimitOrderToSend {
    pub fn merge(
        data: &LimitOrderFields,
        extra: &OrderExtra,
        signature: &Signature,
    ) -> Result<Self, SdkError> {
        let mut merged = match serde_json::to_value(data)? {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(SdkError::Validation(format!(
                    "order fields serialized to a non-object: {}",
                    other
                )))
            }
        };
        for (key, value) in &extra.0 {
            merged.insert(key.clone(), value.clone());
        }
        merged.insert(
            "signature".to_string(),
            serde_json::Value::String(signature.as_str().to_string()),
        );
        Ok(Self(merged))
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.0
    }
}

// ─── OpenLimitOrder ──────────────────────────────────────────────────────────

/// Lifecycle state reported by the order API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderState {
    Pending,
    Fulfilled,
    Cancelled,
    Expired,
}

/// An order record as stored by the order API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenLimitOrder {
    pub order_hash: B256,
    pub chain_id: u64,
    #[serde(with = "serde_util::u256_decimal")]
    pub nonce_and_meta: U256,
    pub expiry: i64,
    pub maker: Address,
    pub taker: Address,
    #[serde(default)]
    pub taker_from_meta: Option<Address>,
    pub maker_asset: Address,
    pub taker_asset: Address,
    #[serde(with = "serde_util::u256_decimal")]
    pub maker_amount: U256,
    #[serde(with = "serde_util::u256_decimal")]
    pub taker_amount: U256,
    #[serde(with = "serde_util::u256_decimal_opt", default)]
    pub fillable_balance: Option<U256>,
    pub signature: Signature,
    #[serde(default)]
    pub permit_maker_asset: Option<String>,
    #[serde(rename = "type")]
    pub kind: OrderKind,
    pub state: OrderState,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub transaction_hash: Option<B256>,
}

impl OpenLimitOrder {
    /// The order's signed fields, for filling or re-verification.
    pub fn fields(&self) -> LimitOrderFields {
        LimitOrderFields {
            nonce_and_meta: self.nonce_and_meta,
            expiry: self.expiry,
            maker_asset: self.maker_asset,
            taker_asset: self.taker_asset,
            maker: self.maker,
            taker: self.taker,
            maker_amount: self.maker_amount,
            taker_amount: self.taker_amount,
        }
    }
}

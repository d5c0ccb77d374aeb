//! Build-transaction sub-module: router calldata for filling limit orders.

use serde::{Deserialize, Serialize};

use crate::error::SdkError;
use crate::limit_orders::{LimitOrderFields, OpenLimitOrder};
use crate::options::{ApiContext, ProviderOptions};
use crate::shared::{serde_util, Address, Signature, U256};

/// One order to fill, with the taker amount to spend on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderToFill {
    #[serde(flatten)]
    pub order: LimitOrderFields,
    pub signature: Signature,
    #[serde(with = "serde_util::u256_decimal")]
    pub taker_token_fill_amount: U256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_maker_asset: Option<String>,
}

impl OrderToFill {
    /// Fill the whole order.
    pub fn full(order: &OpenLimitOrder) -> Self {
        Self {
            order: order.fields(),
            signature: order.signature.clone(),
            taker_token_fill_amount: order.taker_amount,
            permit_maker_asset: order.permit_maker_asset.clone(),
        }
    }

    pub fn partial(order: &OpenLimitOrder, taker_token_fill_amount: U256) -> Self {
        Self {
            taker_token_fill_amount,
            ..Self::full(order)
        }
    }
}

/// Request for router calldata that fills one or more limit orders.
///
/// `src_*` is what the taker pays (the orders' taker asset), `dest_*` what the
/// taker receives (the orders' maker asset).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildLimitOrderTxInput {
    pub src_token: Address,
    pub dest_token: Address,
    #[serde(with = "serde_util::u256_decimal")]
    pub src_amount: U256,
    #[serde(with = "serde_util::u256_decimal")]
    pub dest_amount: U256,
    pub user_address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Address>,
    /// Route previously quoted by the pricing endpoint, forwarded untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_route: Option<serde_json::Value>,
    pub orders: Vec<OrderToFill>,
}

impl BuildLimitOrderTxInput {
    fn validate(&self) -> Result<(), SdkError> {
        if self.orders.is_empty() {
            return Err(SdkError::Validation("no orders to fill".to_string()));
        }
        for fill in &self.orders {
            if fill.order.taker_asset != self.src_token || fill.order.maker_asset != self.dest_token
            {
                return Err(SdkError::Validation(format!(
                    "order for {} -> {} does not match {} -> {}",
                    fill.order.taker_asset, fill.order.maker_asset, self.src_token, self.dest_token
                )));
            }
            if fill.taker_token_fill_amount.is_zero()
                || fill.taker_token_fill_amount > fill.order.taker_amount
            {
                return Err(SdkError::Validation(format!(
                    "fill amount {} outside (0, {}]",
                    fill.taker_token_fill_amount, fill.order.taker_amount
                )));
            }
        }
        let total = self
            .orders
            .iter()
            .fold(U256::ZERO, |acc, f| acc.saturating_add(f.taker_token_fill_amount));
        if total != self.src_amount {
            return Err(SdkError::Validation(format!(
                "src amount {} differs from summed fill amounts {}",
                self.src_amount, total
            )));
        }
        Ok(())
    }
}

/// Ready-to-send transaction returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionParams {
    pub from: Address,
    pub to: Address,
    #[serde(with = "serde_util::u256_decimal")]
    pub value: U256,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    pub chain_id: u64,
}

/// Sub-module for router transactions. Needs no capabilities.
#[derive(Clone)]
pub struct LimitOrderTxBuilder {
    api: ApiContext,
}

impl LimitOrderTxBuilder {
    pub fn new<T>(options: &ProviderOptions<T>) -> Self {
        Self {
            api: options.api.clone(),
        }
    }

    pub async fn build_limit_order_tx(
        &self,
        input: &BuildLimitOrderTxInput,
    ) -> Result<TransactionParams, SdkError> {
        input.validate()?;
        Ok(self
            .api
            .http
            .build_transaction(self.api.chain_id, input)
            .await?)
    }
}

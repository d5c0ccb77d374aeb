//! Fill sub-module: direct fills against the settlement contract.

use std::sync::Arc;

use serde_json::json;

use crate::capability::{ContractCall, TransactCall};
use crate::error::{ConstructionError, SdkError};
use crate::limit_orders::{LimitOrderFields, OpenLimitOrder};
use crate::options::{ApiContext, ProviderOptions};
use crate::shared::{Signature, U256};

const ORDER_TUPLE: &str = "(uint256,uint128,address,address,address,address,uint256,uint256)";

/// Sub-module for filling orders. Requires `Transact`.
pub struct LimitOrderFiller<T> {
    api: ApiContext,
    transactor: Arc<dyn TransactCall<T>>,
}

impl<T> LimitOrderFiller<T> {
    pub fn new(options: &ProviderOptions<T>) -> Result<Self, ConstructionError> {
        Ok(Self {
            api: options.api.clone(),
            transactor: options.require_transactor("fill")?,
        })
    }

    /// Fill `order`, fully when `taker_fill_amount` is `None`.
    ///
    /// Only works for orders whose contract taker is the caller (P2P orders
    /// addressed to the caller); open limit orders are filled through the
    /// swapper via [`build_limit_order_tx`](crate::limit_orders::LimitOrderTxBuilder::build_limit_order_tx).
    pub async fn fill_limit_order(
        &self,
        order: &OpenLimitOrder,
        taker_fill_amount: Option<U256>,
    ) -> Result<T, SdkError> {
        self.fill(&order.fields(), &order.signature, taker_fill_amount)
            .await
    }

    pub async fn fill(
        &self,
        fields: &LimitOrderFields,
        signature: &Signature,
        taker_fill_amount: Option<U256>,
    ) -> Result<T, SdkError> {
        let contracts = self.api.contracts().await?;
        let order = serde_json::to_value(fields)?;

        let call = match taker_fill_amount {
            None => ContractCall::new(
                contracts.rfq,
                &format!("fillOrder({},bytes)", ORDER_TUPLE),
                vec![order, json!(signature)],
            ),
            Some(amount) => {
                if amount.is_zero() || amount > fields.taker_amount {
                    return Err(SdkError::Validation(format!(
                        "fill amount {} outside (0, {}]",
                        amount, fields.taker_amount
                    )));
                }
                ContractCall::new(
                    contracts.rfq,
                    &format!("partialFillOrder({},bytes,uint256)", ORDER_TUPLE),
                    vec![order, json!(signature), json!(amount.to_string())],
                )
            }
        };

        tracing::debug!(method = %call.method, "Filling limit order");
        self.transactor.transact(call).await.map_err(SdkError::Contract)
    }
}

impl<T> Clone for LimitOrderFiller<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            transactor: self.transactor.clone(),
        }
    }
}

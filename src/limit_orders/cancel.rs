//! Cancel sub-module: on-chain order cancellation.

use std::sync::Arc;

use serde_json::json;

use crate::capability::{ContractCall, TransactCall};
use crate::error::{ConstructionError, SdkError};
use crate::options::{ApiContext, ProviderOptions};
use crate::shared::B256;

const CANCEL_ORDER: &str = "cancelOrder(bytes32)";
const CANCEL_ORDERS: &str = "cancelOrders(bytes32[])";

/// Sub-module for cancelling orders. Requires `Transact`.
pub struct LimitOrderCanceller<T> {
    api: ApiContext,
    transactor: Arc<dyn TransactCall<T>>,
}

impl<T> LimitOrderCanceller<T> {
    pub fn new(options: &ProviderOptions<T>) -> Result<Self, ConstructionError> {
        Ok(Self {
            api: options.api.clone(),
            transactor: options.require_transactor("cancel")?,
        })
    }

    /// Cancel one order. Must be sent by the order's maker.
    pub async fn cancel_limit_order(&self, order_hash: B256) -> Result<T, SdkError> {
        let contracts = self.api.contracts().await?;
        let call = ContractCall::new(contracts.rfq, CANCEL_ORDER, vec![json!(order_hash)]);
        self.transactor.transact(call).await.map_err(SdkError::Contract)
    }

    /// Cancel several orders in one transaction.
    pub async fn cancel_limit_orders_bulk(&self, order_hashes: &[B256]) -> Result<T, SdkError> {
        if order_hashes.is_empty() {
            return Err(SdkError::Validation(
                "no order hashes to cancel".to_string(),
            ));
        }
        let contracts = self.api.contracts().await?;
        let call = ContractCall::new(contracts.rfq, CANCEL_ORDERS, vec![json!(order_hashes)]);
        self.transactor.transact(call).await.map_err(SdkError::Contract)
    }
}

impl<T> Clone for LimitOrderCanceller<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            transactor: self.transactor.clone(),
        }
    }
}

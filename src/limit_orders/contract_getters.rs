//! Contract getters sub-module: order status read straight from the
//! settlement contract.

use std::sync::Arc;

use serde_json::json;

use crate::capability::{ContractCall, GetLogsCall, LogEntry, LogFilter, StaticCall};
use crate::error::{ConstructionError, SdkError};
use crate::options::{ApiContext, ProviderOptions};
use crate::shared::{serde_util, Address, B256, U256};

const REMAINING_BALANCES: &str = "getRemainingOrderBalance(address,bytes32[])";
const ORDER_CANCELLED: &str = "OrderCancelled(bytes32,address)";
const ORDER_FILLED: &str =
    "OrderFilled(bytes32,address,address,uint256,address,address,uint256)";

/// Fill state of a single order as tracked on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Never touched: the full maker amount is still available.
    Unfilled,
    PartiallyFilled { remaining: U256 },
    /// Fully filled or cancelled; the contract does not distinguish the two.
    FilledOrCancelled,
}

impl OrderStatus {
    /// Decode the contract's `remaining` slot: `0` untouched, `1` closed,
    /// otherwise `remaining + 1`.
    pub fn from_remaining(raw: U256) -> Self {
        if raw.is_zero() {
            OrderStatus::Unfilled
        } else if raw == U256::from(1u64) {
            OrderStatus::FilledOrCancelled
        } else {
            OrderStatus::PartiallyFilled {
                remaining: raw - U256::from(1u64),
            }
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, OrderStatus::FilledOrCancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatusAndAmount {
    pub order_hash: B256,
    pub status: OrderStatus,
}

/// Sub-module for on-chain order state. Requires `StaticCall` and `GetLogs`.
#[derive(Clone)]
pub struct LimitOrderContractGetters {
    api: ApiContext,
    static_caller: Arc<dyn StaticCall>,
    log_reader: Arc<dyn GetLogsCall>,
}

impl LimitOrderContractGetters {
    pub fn new<T>(options: &ProviderOptions<T>) -> Result<Self, ConstructionError> {
        Ok(Self {
            api: options.api.clone(),
            static_caller: options.require_static_caller("getOrdersContract")?,
            log_reader: options.require_log_reader("getOrdersContract")?,
        })
    }

    /// Status of each order in `order_hashes`, in the same order.
    pub async fn get_limit_order_status_and_amount_filled(
        &self,
        maker: Address,
        order_hashes: &[B256],
    ) -> Result<Vec<OrderStatusAndAmount>, SdkError> {
        if order_hashes.is_empty() {
            return Ok(Vec::new());
        }

        let contracts = self.api.contracts().await?;
        let call = ContractCall::new(
            contracts.rfq,
            REMAINING_BALANCES,
            vec![json!(maker), json!(order_hashes)],
        );
        let result = self
            .static_caller
            .static_call(call)
            .await
            .map_err(SdkError::Contract)?;

        let raw = match result {
            serde_json::Value::Array(values) => values,
            other => {
                return Err(SdkError::Validation(format!(
                    "expected an array of balances, got {}",
                    other
                )))
            }
        };
        if raw.len() != order_hashes.len() {
            return Err(SdkError::Validation(format!(
                "asked for {} balances, got {}",
                order_hashes.len(),
                raw.len()
            )));
        }

        order_hashes
            .iter()
            .zip(raw)
            .map(|(hash, value)| -> Result<OrderStatusAndAmount, SdkError> {
                let remaining = serde_util::u256_decimal::deserialize(value)?;
                Ok(OrderStatusAndAmount {
                    order_hash: *hash,
                    status: OrderStatus::from_remaining(remaining),
                })
            })
            .collect()
    }

    /// Hashes of orders `maker` cancelled on-chain since `from_block`.
    pub async fn get_cancelled_order_hashes(
        &self,
        maker: Address,
        from_block: Option<u64>,
    ) -> Result<Vec<B256>, SdkError> {
        let logs = self
            .maker_logs(ORDER_CANCELLED, vec![None, Some(maker.into_word())], from_block)
            .await?;
        logs.iter().map(order_hash_of).collect()
    }

    /// Hashes of `maker`'s orders filled (fully or partially) since `from_block`.
    pub async fn get_filled_order_hashes(
        &self,
        maker: Address,
        from_block: Option<u64>,
    ) -> Result<Vec<B256>, SdkError> {
        let logs = self
            .maker_logs(ORDER_FILLED, vec![None, Some(maker.into_word())], from_block)
            .await?;
        logs.iter().map(order_hash_of).collect()
    }

    async fn maker_logs(
        &self,
        event: &str,
        topics: Vec<Option<B256>>,
        from_block: Option<u64>,
    ) -> Result<Vec<LogEntry>, SdkError> {
        let contracts = self.api.contracts().await?;
        let filter = LogFilter {
            address: contracts.rfq,
            event: event.to_string(),
            topics,
            from_block,
            to_block: None,
        };
        self.log_reader
            .get_logs(filter)
            .await
            .map_err(SdkError::Contract)
    }
}

fn order_hash_of(entry: &LogEntry) -> Result<B256, SdkError> {
    let raw = entry.args.get("orderHash").cloned().ok_or_else(|| {
        SdkError::Validation(format!(
            "log in tx {} has no orderHash argument",
            entry.transaction_hash
        ))
    })?;
    Ok(serde_json::from_value(raw)?)
}

//! Approve sub-module: ERC-20 allowances for makers and takers.

use std::sync::Arc;

use serde_json::json;

use crate::capability::{ContractCall, TransactCall};
use crate::error::{ConstructionError, SdkError};
use crate::options::{ApiContext, ProviderOptions};
use crate::shared::{Address, U256};

const APPROVE: &str = "approve(address,uint256)";

/// Sub-module for token approvals. Requires `Transact`.
pub struct LimitOrderApprover<T> {
    api: ApiContext,
    transactor: Arc<dyn TransactCall<T>>,
}

impl<T> LimitOrderApprover<T> {
    pub fn new(options: &ProviderOptions<T>) -> Result<Self, ConstructionError> {
        Ok(Self {
            api: options.api.clone(),
            transactor: options.require_transactor("approve")?,
        })
    }

    /// Let the settlement contract pull `amount` of the maker asset.
    pub async fn approve_maker_token_for_limit_order(
        &self,
        amount: U256,
        token: Address,
    ) -> Result<T, SdkError> {
        let spender = self.api.contracts().await?.rfq;
        self.approve(token, spender, amount).await
    }

    /// Let the router's transfer proxy pull `amount` of the taker asset.
    pub async fn approve_taker_token_for_limit_order(
        &self,
        amount: U256,
        token: Address,
    ) -> Result<T, SdkError> {
        let spender = self.api.contracts().await?.token_transfer_proxy;
        self.approve(token, spender, amount).await
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<T, SdkError> {
        tracing::debug!(%token, %spender, %amount, "Approving token");
        let call = ContractCall::new(token, APPROVE, vec![json!(spender), json!(amount.to_string())]);
        self.transactor.transact(call).await.map_err(SdkError::Contract)
    }
}

impl<T> Clone for LimitOrderApprover<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            transactor: self.transactor.clone(),
        }
    }
}

//! Getters sub-module: order lookups through the order API.

use crate::error::SdkError;
use crate::limit_orders::OpenLimitOrder;
use crate::options::{ApiContext, ProviderOptions};
use crate::shared::{Address, OrderKind, UserRole, B256};

/// Sub-module for REST order queries. Needs no capabilities.
#[derive(Clone)]
pub struct LimitOrderGetters {
    api: ApiContext,
}

impl LimitOrderGetters {
    pub fn new<T>(options: &ProviderOptions<T>) -> Self {
        Self {
            api: options.api.clone(),
        }
    }

    /// Orders where `user` is maker or taker, filtered by order kind.
    pub async fn get_limit_orders(
        &self,
        role: UserRole,
        user: Address,
        kind: OrderKind,
    ) -> Result<Vec<OpenLimitOrder>, SdkError> {
        let resp = self
            .api
            .http
            .get_orders(self.api.chain_id, role, user, kind)
            .await?;
        Ok(resp.orders)
    }

    pub async fn get_limit_order_by_hash(&self, order_hash: B256) -> Result<OpenLimitOrder, SdkError> {
        let resp = self
            .api
            .http
            .get_order_by_hash(self.api.chain_id, order_hash)
            .await?;
        Ok(resp.order)
    }

    /// Contract table for the configured chain.
    pub async fn get_contracts(&self) -> Result<crate::limit_orders::ContractAddresses, SdkError> {
        Ok(self.api.contracts().await?)
    }
}

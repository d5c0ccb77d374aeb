//! Post sub-module: submits signed orders to the order API.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{PostError, SdkError};
use crate::limit_orders::submit::PostOrder;
use crate::limit_orders::{LimitOrderToSend, OpenLimitOrder};
use crate::options::{ApiContext, ProviderOptions};

/// Sub-module for order submission. Needs no capabilities.
#[derive(Clone)]
pub struct LimitOrderPoster {
    api: ApiContext,
}

impl LimitOrderPoster {
    pub fn new<T>(options: &ProviderOptions<T>) -> Self {
        Self {
            api: options.api.clone(),
        }
    }

    /// Submit a signed order.
    ///
    /// If `cancel` fires before the API answers, the in-flight request is
    /// dropped and [`PostError::Cancelled`] is returned. A token that is
    /// already cancelled prevents the request from being sent.
    pub async fn post_limit_order(
        &self,
        order: &LimitOrderToSend,
        cancel: Option<&CancellationToken>,
    ) -> Result<OpenLimitOrder, PostError> {
        let request = self.api.http.post_order(self.api.chain_id, order);

        let response = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(PostError::Cancelled),
                res = request => res?,
            },
            None => request.await?,
        };

        Ok(response.order)
    }
}

#[async_trait]
impl PostOrder for LimitOrderPoster {
    async fn post_limit_order(
        &self,
        order: &LimitOrderToSend,
        cancel: Option<&CancellationToken>,
    ) -> Result<OpenLimitOrder, SdkError> {
        Ok(LimitOrderPoster::post_limit_order(self, order, cancel).await?)
    }
}

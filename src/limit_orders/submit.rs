//! Submit workflow: build, sign, then post a limit order in one call.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::SdkError;
use crate::limit_orders::{
    BuildLimitOrderInput, LimitOrderToSend, OpenLimitOrder, OrderData, OrderExtra,
};
use crate::shared::Signature;

/// Step 1: parameters to unsigned order.
#[async_trait]
pub trait BuildOrder: Send + Sync {
    async fn build_limit_order(&self, input: &BuildLimitOrderInput) -> Result<OrderData, SdkError>;
}

/// Step 2: unsigned order to signature.
#[async_trait]
pub trait SignOrder: Send + Sync {
    async fn sign_limit_order(&self, order: &OrderData) -> Result<Signature, SdkError>;
}

/// Step 3: signed payload to stored order.
#[async_trait]
pub trait PostOrder: Send + Sync {
    async fn post_limit_order(
        &self,
        order: &LimitOrderToSend,
        cancel: Option<&CancellationToken>,
    ) -> Result<OpenLimitOrder, SdkError>;
}

/// Runs [`BuildOrder`] → [`SignOrder`] → [`PostOrder`] for one order.
///
/// Holds no per-order state; concurrent submissions are independent as long
/// as the three steps are.
#[derive(Clone)]
pub struct LimitOrderSubmitter<B, S, P> {
    builder: B,
    signer: S,
    poster: P,
}

impl<B, S, P> LimitOrderSubmitter<B, S, P>
where
    B: BuildOrder,
    S: SignOrder,
    P: PostOrder,
{
    pub fn new(builder: B, signer: S, poster: P) -> Self {
        Self {
            builder,
            signer,
            poster,
        }
    }

    /// Build, sign and post a limit order.
    ///
    /// `extra` fields are merged over the order fields and under the
    /// signature. `cancel` only affects the post step: building and signing
    /// always run to completion. The first failing step's error is returned
    /// as-is.
    pub async fn submit_limit_order(
        &self,
        input: &BuildLimitOrderInput,
        extra: Option<OrderExtra>,
        cancel: Option<&CancellationToken>,
    ) -> Result<OpenLimitOrder, SdkError> {
        let order_data = self.builder.build_limit_order(input).await?;
        let signature = self.signer.sign_limit_order(&order_data).await?;

        let extra = extra.unwrap_or_default();
        let order_with_signature = LimitOrderToSend::merge(&order_data.data, &extra, &signature)?;

        let new_order = self
            .poster
            .post_limit_order(&order_with_signature, cancel)
            .await?;

        tracing::info!(
            order_hash = %new_order.order_hash,
            maker = %new_order.maker,
            state = ?new_order.state,
            "Limit order created"
        );
        Ok(new_order)
    }
}

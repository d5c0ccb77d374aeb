//! Sign sub-module: delegates to the host's typed-data signer.

use std::sync::Arc;

use async_trait::async_trait;

use crate::capability::SignTypedData;
use crate::error::{ConstructionError, SdkError};
use crate::limit_orders::submit::SignOrder;
use crate::limit_orders::OrderData;
use crate::options::ProviderOptions;
use crate::shared::Signature;

/// Sub-module for order signing. Requires `SignTypedData`.
#[derive(Clone)]
pub struct LimitOrderSigner {
    signer: Arc<dyn SignTypedData>,
}

impl LimitOrderSigner {
    pub fn new<T>(options: &ProviderOptions<T>) -> Result<Self, ConstructionError> {
        Ok(Self {
            signer: options.require_signer("sign")?,
        })
    }

    pub async fn sign_limit_order(&self, order: &OrderData) -> Result<Signature, SdkError> {
        let typed_data = order.typed_data()?;
        self.signer
            .sign_typed_data(&typed_data)
            .await
            .map_err(SdkError::Sign)
    }
}

#[async_trait]
impl SignOrder for LimitOrderSigner {
    async fn sign_limit_order(&self, order: &OrderData) -> Result<Signature, SdkError> {
        LimitOrderSigner::sign_limit_order(self, order).await
    }
}

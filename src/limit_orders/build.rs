//! Build sub-module: turns user parameters into an unsigned order.

use alloy::sol_types::{eip712_domain, SolStruct};
use async_trait::async_trait;

use crate::capability::TypedDataDomain;
use crate::error::{BuildError, SdkError};
use crate::limit_orders::submit::BuildOrder;
use crate::limit_orders::{BuildLimitOrderInput, LimitOrderFields, OrderData};
use crate::network::{RFQ_DOMAIN_NAME, RFQ_DOMAIN_VERSION};
use crate::options::{ApiContext, ProviderOptions};
use crate::shared::{pack_nonce_and_meta, Address, U256};

/// Sub-module for order construction. Needs no capabilities.
#[derive(Clone)]
pub struct LimitOrderBuilder {
    api: ApiContext,
}

impl LimitOrderBuilder {
    pub fn new<T>(options: &ProviderOptions<T>) -> Self {
        Self {
            api: options.api.clone(),
        }
    }

    /// Build the typed-data domain, order fields and order hash.
    ///
    /// Resolves the settlement contract from the contract table (fetched once
    /// per options). The order hash is computed locally and matches what the
    /// settlement contract derives.
    pub async fn build_limit_order(
        &self,
        input: &BuildLimitOrderInput,
    ) -> Result<OrderData, BuildError> {
        validate(input)?;

        let contracts = self.api.contracts().await.map_err(BuildError::Contracts)?;
        let nonce = input.nonce.unwrap_or_else(random_nonce);
        let meta_taker = input.taker.unwrap_or(Address::ZERO);

        let data = LimitOrderFields {
            nonce_and_meta: pack_nonce_and_meta(nonce, meta_taker),
            expiry: input.expiry,
            maker_asset: input.maker_asset,
            taker_asset: input.taker_asset,
            maker: input.maker,
            taker: input.contract_taker.unwrap_or(contracts.swapper),
            maker_amount: input.maker_amount,
            taker_amount: input.taker_amount,
        };

        let domain = TypedDataDomain {
            name: RFQ_DOMAIN_NAME.to_string(),
            version: RFQ_DOMAIN_VERSION.to_string(),
            chain_id: self.api.chain_id(),
            verifying_contract: contracts.rfq,
        };
        let order_hash = data.to_sol().eip712_signing_hash(&eip712_domain! {
            name: RFQ_DOMAIN_NAME,
            version: RFQ_DOMAIN_VERSION,
            chain_id: self.api.chain_id(),
            verifying_contract: contracts.rfq,
        });

        tracing::debug!(%order_hash, maker = %input.maker, "Built limit order");

        Ok(OrderData {
            domain,
            data,
            order_hash,
            kind: input.kind(),
        })
    }
}

#[async_trait]
impl BuildOrder for LimitOrderBuilder {
    async fn build_limit_order(&self, input: &BuildLimitOrderInput) -> Result<OrderData, SdkError> {
        Ok(LimitOrderBuilder::build_limit_order(self, input).await?)
    }
}

fn validate(input: &BuildLimitOrderInput) -> Result<(), BuildError> {
    if input.maker_amount.is_zero() {
        return Err(BuildError::ZeroMakerAmount);
    }
    if input.taker_amount.is_zero() {
        return Err(BuildError::ZeroTakerAmount);
    }
    if input.maker_asset == input.taker_asset {
        return Err(BuildError::SameAsset(input.maker_asset));
    }
    if input.expiry < 0 {
        return Err(BuildError::NegativeExpiry(input.expiry));
    }
    Ok(())
}

/// Random nonce, at most 53 bits wide.
fn random_nonce() -> U256 {
    U256::from(rand::random::<u64>() & ((1u64 << 53) - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limit_orders::ContractAddresses;
    use crate::shared::OrderKind;

    fn table() -> ContractAddresses {
        ContractAddresses {
            swapper: Address::repeat_byte(0x5a),
            token_transfer_proxy: Address::repeat_byte(0x77),
            rfq: Address::repeat_byte(0xfe),
        }
    }

    fn builder() -> LimitOrderBuilder {
        let options = ProviderOptions::<()>::builder()
            .api_url("http://127.0.0.1:1")
            .chain_id(137)
            .contracts(table())
            .build()
            .unwrap();
        LimitOrderBuilder::new(&options)
    }

    fn input() -> BuildLimitOrderInput {
        BuildLimitOrderInput::new(
            Address::repeat_byte(0x01),
            Address::repeat_byte(0xaa),
            Address::repeat_byte(0xbb),
            U256::from(100u64),
            U256::from(200u64),
        )
    }

    #[tokio::test]
    async fn test_build_fills_domain_from_contract_table() {
        let order = builder()
            .build_limit_order(&input().with_nonce(U256::from(9u64)))
            .await
            .unwrap();
        assert_eq!(order.domain.chain_id, 137);
        assert_eq!(order.domain.verifying_contract, table().rfq);
        assert_eq!(order.domain.name, RFQ_DOMAIN_NAME);
        assert_eq!(order.data.taker, table().swapper);
        assert_eq!(order.data.nonce_and_meta, U256::from(9u64) << 160);
        assert_eq!(order.kind, OrderKind::Limit);
    }

    #[tokio::test]
    async fn test_build_is_deterministic_for_fixed_nonce() {
        let b = builder();
        let i = input().with_nonce(U256::from(1u64));
        let first = b.build_limit_order(&i).await.unwrap();
        let second = b.build_limit_order(&i).await.unwrap();
        assert_eq!(first.order_hash, second.order_hash);

        let other = b
            .build_limit_order(&i.clone().with_nonce(U256::from(2u64)))
            .await
            .unwrap();
        assert_ne!(first.order_hash, other.order_hash);
    }

    #[tokio::test]
    async fn test_build_p2p_packs_taker_into_meta() {
        let taker = Address::repeat_byte(0x33);
        let order = builder()
            .build_limit_order(&input().with_taker(taker).with_nonce(U256::ZERO))
            .await
            .unwrap();
        assert_eq!(order.kind, OrderKind::P2P);
        assert_eq!(order.data.nonce_and_meta, U256::from_be_slice(taker.as_slice()));
    }

    #[tokio::test]
    async fn test_build_random_nonce_fits_53_bits() {
        let order = builder().build_limit_order(&input()).await.unwrap();
        let nonce = order.data.nonce_and_meta >> 160;
        assert!(nonce < U256::from(1u64 << 53));
    }

    #[tokio::test]
    async fn test_build_rejects_invalid_input() {
        let b = builder();

        let mut zero = input();
        zero.maker_amount = U256::ZERO;
        assert!(matches!(
            b.build_limit_order(&zero).await,
            Err(BuildError::ZeroMakerAmount)
        ));

        let mut same = input();
        same.taker_asset = same.maker_asset;
        assert!(matches!(
            b.build_limit_order(&same).await,
            Err(BuildError::SameAsset(_))
        ));

        let mut expired = input();
        expired.expiry = -1;
        assert!(matches!(
            b.build_limit_order(&expired).await,
            Err(BuildError::NegativeExpiry(-1))
        ));
    }

    #[tokio::test]
    async fn test_build_typed_data_carries_message() {
        let order = builder()
            .build_limit_order(&input().with_nonce(U256::from(3u64)))
            .await
            .unwrap();
        let typed = order.typed_data().unwrap();
        assert_eq!(typed.primary_type, "OrderRFQ");
        assert_eq!(typed.types["OrderRFQ"].len(), 8);
        assert_eq!(typed.message["makerAmount"], "100");
    }
}

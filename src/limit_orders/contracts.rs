//! Per-chain contract address table.

use serde::{Deserialize, Serialize};

use crate::shared::Address;

/// Addresses of the contracts limit orders interact with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    /// Router that fills orders on behalf of takers.
    #[serde(rename = "AugustusSwapper")]
    pub swapper: Address,
    /// Spender takers approve when filling through the router.
    #[serde(rename = "TokenTransferProxy")]
    pub token_transfer_proxy: Address,
    /// Settlement contract: verifies signatures, tracks fills and cancels.
    #[serde(rename = "AugustusRFQ")]
    pub rfq: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contracts_deserialize_api_names() {
        let raw = format!(
            r#"{{"AugustusSwapper":"{}","TokenTransferProxy":"{}","AugustusRFQ":"{}","Executors":{{}}}}"#,
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            Address::repeat_byte(3)
        );
        let table: ContractAddresses = serde_json::from_str(&raw).unwrap();
        assert_eq!(table.swapper, Address::repeat_byte(1));
        assert_eq!(table.token_transfer_proxy, Address::repeat_byte(2));
        assert_eq!(table.rfq, Address::repeat_byte(3));
    }
}

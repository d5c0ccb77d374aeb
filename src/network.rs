//! Network constants for the limit orders SDK.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.paraswap.io";

/// Ethereum mainnet.
pub const MAINNET: u64 = 1;

/// Polygon PoS.
pub const POLYGON: u64 = 137;

/// EIP-712 domain name of the RFQ settlement contract.
pub const RFQ_DOMAIN_NAME: &str = "AUGUSTUS RFQ";

/// EIP-712 domain version of the RFQ settlement contract.
pub const RFQ_DOMAIN_VERSION: &str = "1";

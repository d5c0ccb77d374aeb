//! Unified SDK error types.

use thiserror::Error;

use crate::capability::Capability;

/// Top-level SDK error.
///
/// Each variant records which step of a workflow produced the failure. Errors
/// returned by injected capabilities are wrapped as-is.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("Sign error: {0}")]
    Sign(#[source] CapabilityError),

    #[error("Post error: {0}")]
    Post(#[from] PostError),

    #[error("Construction error: {0}")]
    Construction(#[from] ConstructionError),

    #[error("Contract call error: {0}")]
    Contract(#[source] CapabilityError),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Invalid or incomplete order parameters.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("maker amount must be greater than zero")]
    ZeroMakerAmount,

    #[error("taker amount must be greater than zero")]
    ZeroTakerAmount,

    #[error("maker and taker assets are the same: {0}")]
    SameAsset(alloy::primitives::Address),

    #[error("expiry {0} is negative")]
    NegativeExpiry(i64),

    #[error("failed to resolve contract addresses: {0}")]
    Contracts(#[source] HttpError),
}

/// Submission of a signed order failed or was abandoned.
#[derive(Error, Debug)]
pub enum PostError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("order submission cancelled")]
    Cancelled,
}

/// A sub-module was constructed from options that lack a capability it needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{module} requires the {capability} capability")]
pub struct ConstructionError {
    pub module: &'static str,
    pub capability: Capability,
}

/// Failure reported by an injected capability (signer, provider, ...).
#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("rejected by user: {0}")]
    Rejected(String),

    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Provider(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

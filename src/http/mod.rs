//! HTTP client layer: `OrderApiHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::OrderApiHttp;
pub use retry::{RetryConfig, RetryPolicy};

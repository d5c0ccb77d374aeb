//! # Limit Orders SDK
//!
//! Client-side SDK for RFQ limit orders: build, sign, post, query, cancel,
//! fill and approve, plus a one-call submit workflow.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Shared newtypes, order types, capability traits
//! 2. **HTTP API**: `OrderApiHttp` with per-endpoint retry policies
//! 3. **Sub-modules**: one per operation group, each built from `ProviderOptions`
//! 4. **Handlers**: `LimitOrderHandlers` bundling every operation
//!
//! The SDK never signs or encodes calldata itself. The host supplies those as
//! capabilities (`SignTypedData`, `TransactCall`, `StaticCall`, `GetLogsCall`).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use limit_orders_sdk::prelude::*;
//!
//! let options = ProviderOptions::<TxHash>::builder()
//!     .chain_id(137)
//!     .signer(wallet.clone())
//!     .transactor(wallet.clone())
//!     .static_caller(rpc.clone())
//!     .log_reader(rpc)
//!     .build()?;
//!
//! let handlers = construct_all_limit_orders_handlers(&options)?;
//! let order = handlers.submit_limit_order(&input, None, None).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all sub-modules.
pub mod shared;

/// Provider capabilities injected by the host.
pub mod capability;

/// Unified SDK error types.
pub mod error;

/// Network constants.
pub mod network;

/// Shared configuration record.
pub mod options;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
pub mod http;

// ── Layer 3: Sub-modules ─────────────────────────────────────────────────────

/// Limit order types and per-operation sub-modules.
pub mod limit_orders;

// ── Layer 4: Handlers ────────────────────────────────────────────────────────

/// `LimitOrderHandlers`, the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Address, OrderKind, Signature, UserRole, B256, U256};

    // Capabilities
    pub use crate::capability::{
        Capability, ContractCall, GetLogsCall, LogEntry, LogFilter, SignTypedData, StaticCall,
        TransactCall, TypedData, TypedDataDomain,
    };

    // Order types
    pub use crate::limit_orders::{
        BuildLimitOrderInput, BuildLimitOrderTxInput, ContractAddresses, LimitOrderFields,
        LimitOrderToSend, OpenLimitOrder, OrderData, OrderExtra, OrderState, OrderStatus,
        OrderStatusAndAmount, OrderToFill, TransactionParams,
    };

    // Submit workflow seams
    pub use crate::limit_orders::{BuildOrder, LimitOrderSubmitter, PostOrder, SignOrder};

    // Errors
    pub use crate::error::{
        BuildError, CapabilityError, ConstructionError, HttpError, PostError, SdkError,
    };

    // Network
    pub use crate::network::{DEFAULT_API_URL, MAINNET, POLYGON};

    // Configuration
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
    pub use crate::options::{ProviderOptions, ProviderOptionsBuilder};

    // Handlers
    pub use crate::client::{
        construct_all_limit_orders_handlers, construct_submit_limit_order, DefaultSubmitter,
        LimitOrderHandlers,
    };

    pub use tokio_util::sync::CancellationToken;
}

//! Provider capabilities injected into the SDK.
//!
//! The SDK never signs, encodes calldata, or talks to a node on its own. Each
//! capability is a trait the host application implements on top of its wallet
//! or RPC stack (alloy, ethers, a browser wallet bridge, ...). Sub-modules
//! declare which capabilities they need and pull them out of
//! [`ProviderOptions`](crate::options::ProviderOptions) at construction time.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CapabilityError;
use crate::shared::{Address, Signature, B256};

/// Named provider ability a sub-module can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    SignTypedData,
    Transact,
    StaticCall,
    GetLogs,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignTypedData => "signTypedData",
            Self::Transact => "transact",
            Self::StaticCall => "staticCall",
            Self::GetLogs => "getLogs",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Typed data ──────────────────────────────────────────────────────────────

/// One member of an EIP-712 struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataField {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
}

impl TypedDataField {
    pub fn new(name: &str, r#type: &str) -> Self {
        Self {
            name: name.to_string(),
            r#type: r#type.to_string(),
        }
    }
}

/// EIP-712 domain in its JSON-RPC (`eth_signTypedData_v4`) shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

/// Full typed-data payload handed to a [`SignTypedData`] capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    pub types: BTreeMap<String, Vec<TypedDataField>>,
    pub primary_type: String,
    pub domain: TypedDataDomain,
    pub message: serde_json::Value,
}

// ─── Contract calls ──────────────────────────────────────────────────────────

/// A contract invocation described by Solidity signature and JSON arguments.
///
/// The capability implementation owns ABI encoding and decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractCall {
    pub to: Address,
    /// Solidity function signature, e.g. `cancelOrder(bytes32)`.
    pub method: String,
    pub args: Vec<serde_json::Value>,
}

impl ContractCall {
    pub fn new(to: Address, method: &str, args: Vec<serde_json::Value>) -> Self {
        Self {
            to,
            method: method.to_string(),
            args,
        }
    }
}

/// Event log query against a single contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    pub address: Address,
    /// Solidity event signature, e.g. `OrderCancelled(bytes32,address)`.
    pub event: String,
    /// Indexed topic filters after the event selector; `None` matches anything.
    pub topics: Vec<Option<B256>>,
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
}

/// A decoded log entry returned by a [`GetLogsCall`] capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub block_number: u64,
    pub transaction_hash: B256,
    /// Decoded event arguments keyed by parameter name.
    pub args: serde_json::Map<String, serde_json::Value>,
}

// ─── Capability traits ───────────────────────────────────────────────────────

/// Produces a signature over EIP-712 typed data.
#[async_trait]
pub trait SignTypedData: Send + Sync {
    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Signature, CapabilityError>;
}

/// Sends a state-changing transaction and returns the host's receipt/response type.
#[async_trait]
pub trait TransactCall<T>: Send + Sync {
    async fn transact(&self, call: ContractCall) -> Result<T, CapabilityError>;
}

/// Executes a read-only contract call and returns the decoded result.
#[async_trait]
pub trait StaticCall: Send + Sync {
    async fn static_call(&self, call: ContractCall) -> Result<serde_json::Value, CapabilityError>;
}

/// Queries contract event logs.
#[async_trait]
pub trait GetLogsCall: Send + Sync {
    async fn get_logs(&self, filter: LogFilter) -> Result<Vec<LogEntry>, CapabilityError>;
}

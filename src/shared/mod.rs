//! Shared newtypes and utilities used across all sub-modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the order API sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

pub use alloy::primitives::{Address, B256, U256};

// ─── Signature ───────────────────────────────────────────────────────────────

/// A typed-data signature as a `0x`-prefixed hex string.
///
/// Opaque to the SDK: produced by a [`SignTypedData`](crate::capability::SignTypedData)
/// capability and forwarded untouched to the order API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Signature {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Signature {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for Signature {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Signature(s.to_string()))
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Signature(s))
    }
}

// ─── OrderKind ───────────────────────────────────────────────────────────────

/// Limit orders are open to any taker; P2P orders name a single taker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderKind {
    #[default]
    Limit,
    P2P,
}

impl OrderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::P2P => "P2P",
        }
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── UserRole ────────────────────────────────────────────────────────────────

/// Which side of an order a queried address is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Maker,
    Taker,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maker => "maker",
            Self::Taker => "taker",
        }
    }
}

// ─── Utilities ───────────────────────────────────────────────────────────────

/// Pack a nonce and the intended taker into the `nonceAndMeta` order field.
///
/// Layout: `nonce << 160 | taker`. The low 160 bits hold the taker address
/// (zero when anyone may fill).
pub fn pack_nonce_and_meta(nonce: U256, taker: Address) -> U256 {
    (nonce << 160) | U256::from_be_slice(taker.as_slice())
}

//! Custom serde helpers for order API wire formats.

/// Serializes a `U256` as a base-10 string.
///
/// The order API sends and expects token amounts and `nonceAndMeta` as decimal
/// strings, not the `0x` hex form alloy uses by default. Deserialization
/// accepts either form, and bare JSON integers.
pub mod u256_decimal {
    use alloy::primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            Num(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Str(s) => U256::from_str(&s)
                .map_err(|e| serde::de::Error::custom(format!("Invalid uint256 {}: {}", s, e))),
            Raw::Num(n) => Ok(U256::from(n)),
        }
    }
}

/// `Option<U256>` variant of [`u256_decimal`].
pub mod u256_decimal_opt {
    use alloy::primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<U256>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "super::u256_decimal")] U256);

        Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
    }
}

//! Decoder
//!
//! Parses upstream JSON into typed values. Lenient about missing fields,
//! strict about malformed payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::{excerpt, DecodeError};
use crate::upstream::ResourceKind;

/// Decodes `body` as the shape expected for `kind`.
///
/// Unknown fields are ignored. Fields that are absent or `null` fall back to
/// their defaults when the target type marks them `#[serde(default)]`.
pub fn decode<V: DeserializeOwned>(kind: ResourceKind, body: &[u8]) -> Result<V, DecodeError> {
    serde_json::from_slice(body).map_err(|source| DecodeError {
        kind,
        excerpt: excerpt(body),
        source,
    })
}

/// Deserializes `null` as `T::default()`.
///
/// Use together with `#[serde(default)]` so both absent and null fields read
/// as empty.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Accepts a JSON string or number and yields it as a string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Str(s)) => s,
        Some(Raw::Int(n)) => n.to_string(),
        Some(Raw::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

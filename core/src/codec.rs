//! JSON encoding and decoding of entity bodies.
//!
//! Decoding ignores unknown fields and fails on type mismatches for known
//! ones. List endpoints return a JSON array, singular endpoints an object;
//! a `null` list body decodes as empty.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, Result};

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| ApiError::Encode(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

pub fn decode_list<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    decode::<Option<Vec<T>>>(bytes).map(Option::unwrap_or_default)
}

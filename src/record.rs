//! On-disk record encoding.
//!
//! Records are stored as pretty-printed JSON so that corrupt or foreign
//! content fails to parse instead of being silently misread. Decoding
//! tolerates unknown fields: newer fields added to a record do not brick
//! older cache files, and vice versa.

use crate::error::{FormatError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encode a value for storage.
///
/// # Errors
///
/// Returns an error if the value fails to serialize. For the cache's own
/// types this does not happen with valid in-memory values.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(value)?)
}

/// Decode stored bytes back into a value.
///
/// # Errors
///
/// Returns a [`FormatError`] if the bytes are not well-formed JSON or do not
/// match the expected shape (missing required fields, wrong field types).
/// Unknown extra fields are ignored.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> std::result::Result<T, FormatError> {
    Ok(serde_json::from_slice(bytes)?)
}

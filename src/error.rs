//! Error types for the timeline cache.

use std::io;
use thiserror::Error;

/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the cache.
///
/// A missing or undecodable record is not an error — loads report it as a
/// miss (`Ok(None)`). Only I/O failures and encode failures propagate.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage I/O error (permissions, disk full, path issues).
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    /// A value failed to serialize at save time.
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A stored record failed to decode.
///
/// Internal to the read path: the coordinator converts this into a miss
/// after deleting the offending file, so it never crosses the public API.
#[derive(Debug, Error)]
#[error("Malformed cache record: {0}")]
pub struct FormatError(#[from] serde_json::Error);

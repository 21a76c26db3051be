//! Storage trait definitions.

use crate::error::Result;
use async_trait::async_trait;

/// Byte-level storage under a single root.
///
/// Keys are relative, slash-separated paths (e.g. `session-list.json`,
/// `traces/s-1.json`). The store does not interpret key contents; all
/// key-to-record mapping lives in the coordinator.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the full contents for a key. An absent key is `Ok(None)`,
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails for any reason other than the
    /// key being absent.
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write the full contents for a key atomically: a concurrent reader
    /// observes either the old bytes or the new bytes, never a partial
    /// write.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, path
    /// issues). A failed write never leaves a partial record at the key.
    async fn write(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Remove a key if present. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails for any reason other than
    /// the key being absent.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Enumerate keys under a directory-style prefix (e.g. `traces/`).
    /// An absent prefix yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the enumeration fails.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Size in bytes of the record at a key, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails for any reason other than the
    /// key being absent.
    async fn size(&self, key: &str) -> Result<Option<u64>>;

    /// Create the root (and intermediate directories) if missing.
    /// Idempotent; safe to call before every write.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be created.
    async fn ensure_root(&self) -> Result<()>;
}

//! Timeline cache coordinator.
//!
//! Single owner of the mapping from logical keys (the session-list key, or a
//! session id for a trace) to files under one root directory. All reads and
//! writes for a key are queued through a per-key lock, so a save in progress
//! always completes before a later load or save on the same key touches the
//! filesystem. Distinct keys proceed independently.
//!
//! Cached data is derived and reconstructible: a record that fails to decode
//! is deleted and reported as a miss, never surfaced as an error or a
//! partial value.

use crate::config;
use crate::error::{FormatError, Result};
use crate::record;
use crate::storage::{BlobStore, FileStore};
use crate::timeline::{CacheMetrics, SessionList, Trace, TraceEvent};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Key the session list is stored under, relative to the root.
pub const SESSION_LIST_KEY: &str = "session-list.json";

/// Key prefix for per-session traces.
const TRACE_PREFIX: &str = "traces/";

fn trace_key(session_id: &str) -> String {
    format!("{TRACE_PREFIX}{session_id}.json")
}

fn session_id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(TRACE_PREFIX)?.strip_suffix(".json")
}

/// Disk-backed cache for a session list and per-session event traces.
///
/// One instance per cache root. Operations are async and may be issued
/// concurrently; the cache serializes operations on the same logical key in
/// FIFO order and leaves operations on distinct keys free to interleave.
pub struct TimelineCache<S: BlobStore = FileStore> {
    store: S,
    root: PathBuf,
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TimelineCache<FileStore> {
    /// Create a cache under the default platform root
    /// (see [`config::default_cache_root`]). The directory is created
    /// lazily on first save.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(config::default_cache_root())
    }

    /// Create a cache under an explicit root directory. Primarily for
    /// isolation in tests.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        let store = FileStore::new(root.clone());
        Self::with_store(store, root)
    }
}

impl Default for TimelineCache<FileStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BlobStore> TimelineCache<S> {
    /// Create a cache over an injected storage backend. `root` is what
    /// [`TimelineCache::metrics`] reports as the cache location.
    #[must_use]
    pub fn with_store(store: S, root: PathBuf) -> Self {
        Self {
            store,
            root,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Load the cached session list.
    ///
    /// Returns `Ok(None)` on a miss: the list has never been saved, or the
    /// stored record was undecodable and has been dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails at the I/O level.
    pub async fn load_session_list(&self) -> Result<Option<SessionList>> {
        self.load(SESSION_LIST_KEY).await
    }

    /// Save the session list, replacing any previous list.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the atomic write fails. A failed
    /// save leaves the previously stored list intact.
    pub async fn save_session_list(&self, list: &SessionList) -> Result<()> {
        self.save(SESSION_LIST_KEY, list).await
    }

    /// Load the cached trace for a session.
    ///
    /// Returns `Ok(None)` on a miss, under the same contract as
    /// [`TimelineCache::load_session_list`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails at the I/O level.
    pub async fn load_trace(&self, session_id: &str) -> Result<Option<Trace>> {
        self.load(&trace_key(session_id)).await
    }

    /// Save the full event sequence for a session, replacing any prior
    /// trace for that session.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the atomic write fails.
    pub async fn save_trace(&self, session_id: &str, events: &[TraceEvent]) -> Result<()> {
        let trace = Trace {
            events: events.to_vec(),
        };
        self.save(&trace_key(session_id), &trace).await
    }

    /// Delete every trace whose session id is not in `keep_ids`.
    ///
    /// This is the only reconciliation between session-list membership and
    /// on-disk traces; it runs only when explicitly invoked (typically after
    /// a fresh session list arrives from upstream). Returns the number of
    /// traces removed.
    ///
    /// # Errors
    ///
    /// Returns an error if enumeration or a deletion fails at the I/O
    /// level. Traces already removed stay removed.
    pub async fn evict_stale_traces(&self, keep_ids: &HashSet<String>) -> Result<usize> {
        let keys = self.store.list_keys(TRACE_PREFIX).await?;
        let mut removed = 0;

        for key in keys {
            let Some(session_id) = session_id_from_key(&key) else {
                continue;
            };
            if keep_ids.contains(session_id) {
                continue;
            }

            let lock = self.key_lock(&key);
            let _guard = lock.lock().await;
            self.store.delete(&key).await?;
            removed += 1;
            debug!(session_id, "evicted stale trace");
        }

        Ok(removed)
    }

    /// Snapshot the cache's disk location and best-effort size statistics.
    ///
    /// Never fails: when statistics cannot be gathered the counts are zero,
    /// and the root path is always reported.
    pub async fn metrics(&self) -> CacheMetrics {
        let mut file_count = 0;
        let mut total_bytes = 0;

        let mut keys = vec![SESSION_LIST_KEY.to_string()];
        if let Ok(trace_keys) = self.store.list_keys(TRACE_PREFIX).await {
            keys.extend(trace_keys);
        }
        for key in keys {
            if let Ok(Some(len)) = self.store.size(&key).await {
                file_count += 1;
                total_bytes += len;
            }
        }

        CacheMetrics {
            root: self.root.clone(),
            file_count,
            total_bytes,
        }
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let lock = self.key_lock(key);
        let _guard = lock.lock().await;

        let Some(bytes) = self.store.read(key).await? else {
            return Ok(None);
        };
        match record::decode(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                self.recover_corrupt(key, &err).await;
                Ok(None)
            }
        }
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = record::encode(value)?;

        let lock = self.key_lock(key);
        let _guard = lock.lock().await;

        self.store.ensure_root().await?;
        self.store.write(key, &bytes).await
    }

    /// Drop an undecodable record and treat the read as a miss. The delete
    /// is best-effort: a failure here must not turn a recoverable miss into
    /// an error.
    async fn recover_corrupt(&self, key: &str, err: &FormatError) {
        warn!(key, error = %err, "dropping undecodable cache record");
        if let Err(delete_err) = self.store.delete(key).await {
            warn!(key, error = %delete_err, "failed to delete undecodable cache record");
        }
    }

    fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(key.to_string()).or_default().clone()
    }
}

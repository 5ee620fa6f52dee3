//! Theme persistence behind a small key-value port.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser hands extensions a tiny async key-value store. [`KvStore`]
//! is that seam: the coordinator reads and writes the theme record through
//! it and never touches a backend directly. [`MemoryStore`] backs tests
//! and ephemeral runs; [`JsonFileStore`] persists across restarts.
//!
//! ERROR HANDLING
//! ==============
//! Loads never fail the caller: a missing, unreadable, or malformed record
//! falls back to the default theme with a warning. Saves propagate their
//! error so the coordinator can reject the triggering request.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::theme::Theme;

/// Storage key of the persisted theme record.
pub const THEME_KEY: &str = "theme";

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

// =============================================================================
// KV PORT
// =============================================================================

/// Async key-value port over the host's local storage area.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    /// Read one record. `Ok(None)` when the key was never written.
    ///
    /// # Errors
    /// Backend failures: unreadable file, corrupt payload.
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Write one record, replacing any previous value.
    ///
    /// # Errors
    /// Backend write failures.
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Volatile store for tests and runs without a profile file.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.write().await.insert(key.to_owned(), value);
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// One JSON object per file, read-modify-written under a lock so writes to
/// different keys cannot clobber each other. Reads of a corrupt file fail;
/// the next write replaces it wholesale.
pub struct JsonFileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), guard: Mutex::new(()) }
    }
}

#[async_trait::async_trait]
impl KvStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let _guard = self.guard.lock().await;
        let mut entries = read_entries(&self.path).await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.guard.lock().await;
        let mut entries = match read_entries(&self.path).await {
            Ok(entries) => entries,
            Err(StorageError::Malformed(e)) => {
                warn!(path = %self.path.display(), error = %e, "storage: corrupt store file, rewriting");
                HashMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_owned(), value);
        write_entries(&self.path, &entries).await
    }
}

async fn read_entries(path: &Path) -> Result<HashMap<String, Value>, StorageError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
        Err(e) => Err(e.into()),
    }
}

async fn write_entries(path: &Path, entries: &HashMap<String, Value>) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let bytes = serde_json::to_vec_pretty(entries)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

// =============================================================================
// THEME RECORD
// =============================================================================

/// Load the persisted theme, falling back to [`Theme::default`] whenever
/// the record is missing, unreadable, or fails the shape check.
pub async fn load_theme(store: &dyn KvStore) -> Theme {
    match store.get(THEME_KEY).await {
        Ok(Some(value)) => match serde_json::from_value::<Theme>(value) {
            Ok(theme) => theme,
            Err(e) => {
                warn!(error = %e, "storage: stored theme failed the shape check, using default");
                Theme::default()
            }
        },
        Ok(None) => {
            debug!("storage: no saved theme, using default");
            Theme::default()
        }
        Err(e) => {
            warn!(error = %e, "storage: theme load failed, using default");
            Theme::default()
        }
    }
}

/// Persist the theme under [`THEME_KEY`].
///
/// # Errors
/// Propagates backend write failures; callers decide whether that fails
/// the surrounding operation.
pub async fn save_theme(store: &dyn KvStore, theme: &Theme) -> Result<(), StorageError> {
    let value = serde_json::to_value(theme)?;
    store.set(THEME_KEY, value).await
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;

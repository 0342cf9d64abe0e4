// --- File: crates/ledgerbridge_quickbooks/src/store.rs ---
//! Persistence for the OAuth token record.
//!
//! Handlers only see the [`TokenStore`] trait, so the JSON file used in
//! production can be swapped for [`InMemoryTokenStore`] in tests or for any
//! other backend.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::models::TokenRecord;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on token file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored payload is not a JSON object we can read.
    #[error("Malformed token file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize token record: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Load/save contract for the token record.
///
/// `save` replaces the stored record in full. `load` returns an empty record
/// when nothing has been saved yet.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<TokenRecord, StoreError>;

    async fn save(&self, record: &TokenRecord) -> Result<(), StoreError>;
}

/// Token record kept as a single JSON file.
///
/// Saves go through a sibling temp file that is fsynced and renamed over the
/// target, so concurrent readers see either the old or the new record.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "tokens.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<TokenRecord, StoreError> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Token file does not exist: {:?}", self.path);
                return Ok(TokenRecord::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_slice(&data).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, record: &TokenRecord) -> Result<(), StoreError> {
        let data = serde_json::to_vec(record).map_err(StoreError::Serialize)?;

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }

        let temp_path = self.temp_path();
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(&data).await.map_err(|e| self.io_error(e))?;
        file.sync_all().await.map_err(|e| self.io_error(e))?;
        drop(file);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!("Persisted token record to {:?} ({} bytes)", self.path, data.len());
        Ok(())
    }
}

/// Process-local store, mainly for tests.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    record: RwLock<Option<TokenRecord>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: TokenRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
        }
    }

    /// The saved record, `None` if nothing was ever saved.
    pub async fn snapshot(&self) -> Option<TokenRecord> {
        self.record.read().await.clone()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<TokenRecord, StoreError> {
        Ok(self.record.read().await.clone().unwrap_or_default())
    }

    async fn save(&self, record: &TokenRecord) -> Result<(), StoreError> {
        *self.record.write().await = Some(record.clone());
        Ok(())
    }
}

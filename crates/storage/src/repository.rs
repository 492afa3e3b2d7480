use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the single persisted progress document.
///
/// The engine stores one JSON document per installation under a fixed key;
/// adapters only need get/put semantics. Implementations must tolerate
/// concurrent saves (last write observed wins).
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the stored document, `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backing store cannot be read.
    async fn load_document(&self) -> Result<Option<String>, StorageError>;

    /// Persist the full document, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backing store cannot be written.
    async fn save_document(&self, json: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    document: Arc<Mutex<Option<String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at the stored document without going through the trait.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        self.document.lock().expect("repository lock poisoned").clone()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_document(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .document
            .lock()
            .map_err(|_| StorageError::Connection("lock poisoned".into()))?
            .clone())
    }

    async fn save_document(&self, json: &str) -> Result<(), StorageError> {
        *self
            .document
            .lock()
            .map_err(|_| StorageError::Connection("lock poisoned".into()))? =
            Some(json.to_string());
        Ok(())
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

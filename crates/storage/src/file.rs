use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::repository::{ProgressRepository, StorageError};

/// Secondary store: the progress document as a plain JSON file.
///
/// Consulted only when the primary `SQLite` store is unavailable, so it
/// favors simplicity over durability tuning.
#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl ProgressRepository for FileRepository {
    async fn load_document(&self) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Unavailable(err.to_string())),
        }
    }

    async fn save_document(&self, json: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|err| StorageError::Unavailable(err.to_string()))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

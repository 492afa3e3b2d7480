//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted when importing a progress document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("import payload is not a valid progress document: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Errors emitted by `TranslationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranslateError {
    #[error("translation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("translation service returned no translation")]
    EmptyResponse,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while loading the static dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

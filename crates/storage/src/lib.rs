#![forbid(unsafe_code)]

//! Persistence for the single progress document: the repository contract,
//! a `SQLite` key-value primary store, a JSON-file secondary store, and the
//! `ProgressStore` facade implementing the load/save fallback policy.

pub mod file;
pub mod repository;
pub mod sqlite;
pub mod store;

pub use file::FileRepository;
pub use repository::{InMemoryRepository, ProgressRepository, StorageError};
pub use sqlite::{SqliteInitError, SqliteRepository};
pub use store::ProgressStore;

// ABOUTME: Data layer and persistence for Proposer
// ABOUTME: Shared storage error type plus SQLite pool creation and migrations

pub mod db;

pub use db::{connect, connect_in_memory, run_migrations};

use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Caller does not own this record")]
    NotOwner,
    #[error("Record not found or caller is not its owner")]
    NotFoundOrNotOwner,
    #[error("Duplicate value: {0}")]
    Duplicate(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Map a unique-constraint violation to [`StorageError::Duplicate`]
pub fn map_unique_violation(err: sqlx::Error, what: &str) -> StorageError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StorageError::Duplicate(what.to_string())
        }
        _ => StorageError::Sqlx(err),
    }
}

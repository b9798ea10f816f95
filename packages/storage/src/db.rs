// ABOUTME: SQLite connection management and schema migrations
// ABOUTME: Creates the pool used by every storage layer and applies embedded migrations

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::StorageError;

/// Open (creating if needed) the database at `database_path` and migrate it
pub async fn connect(database_path: &Path) -> Result<SqlitePool, StorageError> {
    // Ensure parent directory exists
    if let Some(parent) = database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database_url = format!("sqlite:{}", database_path.display());
    debug!("Connecting to database: {}", database_url);

    let options = SqliteConnectOptions::from_str(&database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await?;

    info!("Database connection established");

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Single-connection in-memory database, migrated. Used by tests.
///
/// The pool holds exactly one connection that never expires, since every
/// new in-memory connection would see an empty database.
pub async fn connect_in_memory() -> Result<SqlitePool, StorageError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Apply embedded migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    debug!("Database migrations completed");
    Ok(())
}

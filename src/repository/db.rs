//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations. The connection is the sole
//! shared mutable resource; repositories share it behind one async mutex.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Shared connection handle used by all repositories
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
pub struct DbState {
    conn: SharedConnection,
}

impl DbState {
    /// Handle to the shared connection
    pub fn connection(&self) -> SharedConnection {
        self.conn.clone()
    }
}

/// Open (or create) the database at `db_path` and run migrations.
///
/// Pass `:memory:` for an in-memory database (used by tests).
pub fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Internal(format!("Failed to open database: {}", e)))?;

    run_migrations(&conn)?;

    Ok(DbState {
        conn: Arc::new(Mutex::new(Some(conn))),
    })
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS user_collections (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL,
            name TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS collection_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            collection_id INTEGER NOT NULL,
            component_type TEXT NOT NULL,
            component_path TEXT NOT NULL,
            component_name TEXT NOT NULL,
            component_category TEXT,
            added_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // Index for owner-scoped collection queries
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_collections_owner ON user_collections(owner_id)",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // Index for collection-scoped item queries
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_items_collection ON collection_items(collection_id)",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // Schema-level backstop: a component path appears at most once per collection
    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_items_collection_path
            ON collection_items(collection_id, component_path)",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(())
}

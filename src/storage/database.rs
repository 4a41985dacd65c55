//! Database
//!
//! SQLite connection pooling and schema initialization.
//! Uses r2d2 with the rusqlite connection manager.

use gigmatch_core::{AppError, AppResult};
use r2d2_sqlite::SqliteConnectionManager;

/// Shared SQLite connection pool
pub type DbPool = r2d2::Pool<SqliteConnectionManager>;

/// Owns the connection pool and the schema
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open (or create) the database file at the given path
    pub fn open(path: &str) -> AppResult<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = r2d2::Pool::builder()
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to build pool: {}", e)))?;
        Ok(Self { pool })
    }

    /// Open an in-memory database (used in tests)
    pub fn open_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        // A single connection so every caller sees the same in-memory db
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to build pool: {}", e)))?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Create the profile and task tables if they do not exist
    pub fn init_schema(&self) -> AppResult<()> {
        let conn = self
            .pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                chat_id INTEGER NOT NULL UNIQUE,
                name TEXT NOT NULL DEFAULT '',
                skills TEXT NOT NULL DEFAULT '{}',
                interests TEXT NOT NULL DEFAULT '[]',
                goals TEXT NOT NULL DEFAULT '[]',
                soft_skills TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| AppError::database(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                required_skills TEXT NOT NULL DEFAULT '{}',
                budget INTEGER NOT NULL DEFAULT 0,
                deadline TEXT NOT NULL,
                owner_id TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'open',
                created_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| AppError::database(e.to_string()))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status)",
            [],
        )
        .map_err(|e| AppError::database(e.to_string()))?;

        Ok(())
    }
}

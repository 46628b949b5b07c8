//! Database connection pool management.
//!
//! This module provides connection pooling for SQLite using r2d2.

use std::path::PathBuf;
use std::time::Duration;

use awesome_common::{Error, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde::{Deserialize, Serialize};

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Connection pool settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolConfig {
    /// SQLite database file.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Maximum number of open connections.
    #[serde(default = "default_max_size")]
    pub max_size: u32,

    /// Connections kept open while idle.
    #[serde(default = "default_min_idle")]
    pub min_idle: u32,

    /// How long a statement waits on a locked database, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_path() -> PathBuf {
    PathBuf::from("awesome.db")
}

fn default_max_size() -> u32 {
    10
}

fn default_min_idle() -> u32 {
    1
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            max_size: default_max_size(),
            min_idle: default_min_idle(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

/// Create a connection pool for the configured database file.
///
/// The file is created if it doesn't exist. Every connection gets the
/// configured busy timeout and has foreign key constraints enabled.
///
/// A zero `max_size` or a `min_idle` above `max_size` is rejected with
/// [`Error::InvalidInput`].
///
/// # Example
///
/// ```no_run
/// use awesome_orm::pool::{create_pool, PoolConfig};
///
/// let pool = create_pool(&PoolConfig::default()).unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn create_pool(config: &PoolConfig) -> Result<DbPool> {
    if config.max_size == 0 {
        return Err(Error::invalid_input("pool max_size must be positive"));
    }
    if config.min_idle > config.max_size {
        return Err(Error::invalid_input(format!(
            "pool min_idle ({}) cannot exceed max_size ({})",
            config.min_idle, config.max_size
        )));
    }

    tracing::info!("create database connection pool...");

    let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
    let manager = SqliteConnectionManager::file(&config.path).with_init(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    });

    let pool = Pool::builder()
        .max_size(config.max_size)
        .min_idle(Some(config.min_idle))
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {}", e)))?;

    tracing::debug!(
        "pool ready: {} (max {}, idle {})",
        config.path.display(),
        config.max_size,
        config.min_idle
    );
    Ok(pool)
}

/// Initialize an in-memory database pool for testing.
///
/// Every SQLite in-memory connection is its own database, so the pool holds
/// a single connection. The database is lost when the pool is dropped.
///
/// ```
/// use awesome_orm::pool::init_memory_pool;
///
/// let pool = init_memory_pool().unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create in-memory pool: {}", e)))
}

/// Get a connection from the pool.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {}", e)))
}

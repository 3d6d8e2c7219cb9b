//! Database connection manager backed by the SQLite pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use flyball_domain::{DatabaseConfig, PlannerError, Result};
use rusqlite::params;
use tracing::info;

use super::error::StorageError;
use super::pool::{PoolConfig, SqliteConnection, SqlitePool};
use crate::errors::{map_sql_error, InfraError};

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Database manager that wraps an [`SqlitePool`].
pub struct DbManager {
    pool: Arc<SqlitePool>,
    path: PathBuf,
}

impl DbManager {
    /// Create a new manager with the given pool configuration.
    pub fn new<P: AsRef<Path>>(db_path: P, config: PoolConfig) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        let pool = SqlitePool::new(&path, config).map(Arc::new).map_err(map_storage_error)?;

        info!(
            db_path = %path.display(),
            max_connections = pool.config().max_size,
            "sqlite pool initialised"
        );

        Ok(Self { pool, path })
    }

    /// Create a manager from the application's database section.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::new(&config.path, PoolConfig::from(config))
    }

    /// Borrow the underlying pool.
    pub fn pool(&self) -> &Arc<SqlitePool> {
        &self.pool
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get().map_err(map_storage_error)
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        create_schema(&conn)?;
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Perform a health check to verify database connectivity.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0))
            .map_err(map_sql_error)?;
        Ok(())
    }
}

fn create_schema(conn: &SqliteConnection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, CAST(strftime('%s','now') AS INTEGER))",
        params![SCHEMA_VERSION],
    )
    .map_err(map_sql_error)?;

    let found: i32 = conn
        .query_row("SELECT MAX(version) FROM schema_version", params![], |row| row.get(0))
        .map_err(map_sql_error)?;
    if found != SCHEMA_VERSION {
        return Err(map_storage_error(StorageError::SchemaVersionMismatch {
            expected: SCHEMA_VERSION,
            found,
        }));
    }
    Ok(())
}

fn map_storage_error(err: StorageError) -> PlannerError {
    PlannerError::from(InfraError::from(err))
}

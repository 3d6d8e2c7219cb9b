//! SQLite connection pool
//!
//! r2d2 pool of rusqlite connections. Every connection handed out has the
//! same pragmas applied, most importantly `foreign_keys=ON`: referential
//! integrity is what turns an unknown dog in an attendance batch into a
//! failed (and rolled back) write.

use std::path::Path;
use std::time::Duration;

use flyball_domain::DatabaseConfig;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::{debug, info, instrument, warn};

use super::error::{StorageError, StorageResult};

/// Pooled SQLite connection.
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,

    /// How long `get` waits for a free connection
    pub connection_timeout: Duration,

    /// Busy timeout for SQLite lock contention
    pub busy_timeout: Duration,

    /// Enable WAL journal mode
    pub enable_wal: bool,

    /// Enable foreign key constraints
    pub enable_foreign_keys: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 8,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(5_000),
            enable_wal: true,
            enable_foreign_keys: true,
        }
    }
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_size: config.pool_size.max(1),
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
            ..Self::default()
        }
    }
}

/// Connection pool over one database file
#[derive(Debug)]
pub struct SqlitePool {
    pool: Pool<SqliteConnectionManager>,
    config: PoolConfig,
}

impl SqlitePool {
    /// Open (creating if needed) the database at `path`.
    ///
    /// r2d2 opens the idle connections while building, so a bad path fails
    /// here rather than on the first request.
    #[instrument(skip(config), fields(db_path = ?path, pool_size = config.max_size))]
    pub fn new(path: &Path, config: PoolConfig) -> StorageResult<Self> {
        if config.max_size == 0 {
            return Err(StorageError::InvalidConfig("pool size must be at least 1".into()));
        }

        let pragma_config = config.clone();
        let manager = SqliteConnectionManager::file(path)
            .with_init(move |conn| apply_connection_pragmas(conn, &pragma_config));

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|e| {
                warn!("Failed to create connection pool: {}", e);
                StorageError::Connection(format!("Failed to create pool: {e}"))
            })?;

        info!("SQLite pool created with {} connections", config.max_size);
        Ok(Self { pool, config })
    }

    /// Check out a connection.
    #[instrument(skip(self), fields(pool_size = self.config.max_size))]
    pub fn get(&self) -> StorageResult<SqliteConnection> {
        let start = std::time::Instant::now();
        let conn = self.pool.get().map_err(|e| {
            warn!(error = %e, "Failed to acquire connection");
            StorageError::Connection(format!("Failed to acquire connection: {e}"))
        })?;
        debug!("Connection acquired in {}ms", start.elapsed().as_millis());
        Ok(conn)
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Connections currently open (idle plus checked out).
    pub fn connections(&self) -> u32 {
        self.pool.state().connections
    }
}

/// Apply connection-level pragmas
///
/// - WAL journal with autocheckpoint
/// - NORMAL synchronous mode
/// - Foreign key constraints
/// - Busy timeout for lock contention, set first so the journal switch
///   waits out concurrent openers
pub fn apply_connection_pragmas(conn: &Connection, config: &PoolConfig) -> rusqlite::Result<()> {
    conn.busy_timeout(config.busy_timeout)?;

    let mut pragma_sql = String::new();

    if config.enable_wal {
        pragma_sql.push_str("PRAGMA journal_mode=WAL;\n");
        pragma_sql.push_str("PRAGMA wal_autocheckpoint=1000;\n");
    }

    pragma_sql.push_str("PRAGMA synchronous=NORMAL;\n");

    if config.enable_foreign_keys {
        pragma_sql.push_str("PRAGMA foreign_keys=ON;\n");
    }

    conn.execute_batch(&pragma_sql)
}

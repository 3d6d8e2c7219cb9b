//! SQLite-backed implementation of the `PlannerStore` port.

use std::sync::Arc;

use flyball_core::{PlannerStore, StoreTransaction, TxMode};
use flyball_domain::Result;

use super::manager::DbManager;
use super::transaction::SqliteTransaction;

/// Planner store over the shared SQLite pool.
#[derive(Clone)]
pub struct SqliteStore {
    db: Arc<DbManager>,
}

impl SqliteStore {
    /// Create a store backed by the shared pool.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Arc<DbManager> {
        &self.db
    }
}

impl PlannerStore for SqliteStore {
    fn begin(&self, mode: TxMode) -> Result<Box<dyn StoreTransaction + '_>> {
        let conn = self.db.get_connection()?;
        Ok(Box::new(SqliteTransaction::begin(conn, mode)?))
    }
}

//! Shared harness for SQLite-backed integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use flyball_core::{DirectoryStore, FixedClock, PlannerStore, StoreTransaction, TxMode};
use flyball_domain::{Club, ClubId, Dog};
use flyball_infra::database::{DbManager, PoolConfig, SqliteStore};
use tempfile::TempDir;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    pub store: SqliteStore,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a migrated database in a fresh temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("planner.db");

        let manager = Arc::new(
            DbManager::new(&db_path, PoolConfig { max_size: 4, ..PoolConfig::default() })
                .expect("db manager should be created"),
        );
        manager.run_migrations().expect("schema migrations should apply");

        let store = SqliteStore::new(Arc::clone(&manager));
        Self { manager, store, _temp_dir: temp_dir }
    }

    /// The store as the components consume it.
    pub fn shared(&self) -> Arc<dyn PlannerStore> {
        Arc::new(self.store.clone())
    }

    pub fn seed_club(&self, name: &str) -> Club {
        let club = Club::new(name);
        let mut tx = self.store.begin(TxMode::Write).expect("transaction should open");
        tx.insert_club(&club).expect("club should insert");
        tx.commit().expect("commit should succeed");
        club
    }

    pub fn seed_dog(&self, club_id: ClubId, name: &str) -> Dog {
        let dog = Dog::new(club_id, name);
        let mut tx = self.store.begin(TxMode::Write).expect("transaction should open");
        tx.insert_dog(&dog).expect("dog should insert");
        tx.commit().expect("commit should succeed");
        dog
    }

    /// Row count of a table, read outside any component.
    pub fn count_rows(&self, table: &str) -> i64 {
        let conn = self.manager.get_connection().expect("connection should be available");
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .expect("count query should succeed")
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// The instant every test treats as "now".
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 9, 0, 0).single().expect("valid test instant")
}

pub fn days_from_now(days: i64) -> DateTime<Utc> {
    now() + Duration::days(days)
}

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(now()))
}

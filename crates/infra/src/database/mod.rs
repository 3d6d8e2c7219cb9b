//! SQLite persistence for the planner
//!
//! One [`SqliteTransaction`] implements every store port; the per-entity
//! repository modules each contribute one port's `impl` block.

mod attendance_repository;
mod club_repository;
mod error;
mod manager;
mod pool;
mod practice_repository;
mod resource_repository;
mod set_repository;
mod store;
mod transaction;

pub use error::{StorageError, StorageResult};
pub use manager::DbManager;
pub use pool::{apply_connection_pragmas, PoolConfig, SqliteConnection, SqlitePool};
pub use store::SqliteStore;
pub use transaction::SqliteTransaction;

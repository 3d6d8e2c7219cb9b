//! # Flyball Infrastructure
//!
//! Implementations of the `flyball-core` store ports plus configuration
//! loading.
//!
//! - `database`: r2d2 pool of rusqlite connections, schema, repositories
//! - `config`: environment and file based [`Config`](flyball_domain::Config) loading
//! - `errors`: mapping of storage failures onto `PlannerError`

pub mod config;
pub mod database;
pub mod errors;

pub use database::{DbManager, PoolConfig, SqlitePool, SqliteStore, StorageError};
pub use errors::InfraError;

//! # Flyball App
//!
//! Application layer for the practice planner.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - Logging initialisation and error labels for the boundary layer
//! - Health reporting
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires configuration into the store and the scheduling components

pub mod context;
pub mod utils;

pub use context::AppContext;
pub use utils::{health, logging};

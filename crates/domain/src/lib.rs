//! # Flyball Domain
//!
//! Business domain types for the flyball practice planner.
//!
//! This crate contains:
//! - Entity types (Resource, Practice, PracticeSet, SetDog, PracticeAttendance)
//! - Typed identifiers and partial-update payloads
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other flyball crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

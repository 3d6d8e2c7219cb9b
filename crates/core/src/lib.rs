//! # Flyball Core
//!
//! Scheduling rules for club practices, with no infrastructure dependencies.
//!
//! This crate contains:
//! - `ResourcePool`: the one-default-resource-per-club invariant
//! - `PracticeScheduler`: practice lifecycle fields and the practice cascade
//! - `SetOrderingEngine`: caller-supplied ordering of sets and set dogs
//! - `AttendanceLedger`: per-dog attendance with atomic batch upserts
//! - Port traits (`PlannerStore`, `Clock`) implemented by infrastructure
//!
//! ## Architecture Principles
//! - Only depends on `flyball-domain`
//! - No database or HTTP code
//! - Every invariant-bearing read-decide-write runs inside one store
//!   transaction

pub mod attendance;
pub mod clock;
pub mod practices;
pub mod resources;
pub mod sets;
pub mod store;

pub use attendance::AttendanceLedger;
pub use clock::{Clock, FixedClock, SystemClock};
pub use practices::PracticeScheduler;
pub use resources::ResourcePool;
pub use sets::SetOrderingEngine;
pub use store::{
    AttendanceStore, DirectoryStore, PlannerStore, PracticeStore, ResourceStore, SetStore,
    StoreTransaction, TxMode,
};

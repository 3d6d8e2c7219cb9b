//! Shared test helpers for `flyball-core` integration tests.
//!
//! Each test file pulls in only what it uses.
#![allow(dead_code)]

pub mod memory_store;

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use flyball_core::{FixedClock, PlannerStore};

pub use memory_store::MemoryStore;

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

pub fn shared(store: &MemoryStore) -> Arc<dyn PlannerStore> {
    Arc::new(store.clone())
}

//! Caller-supplied linear orderings
//!
//! Sets and set dogs are displayed ascending by `order`. Values may repeat or
//! leave gaps; ties keep insertion order.

use serde::{Deserialize, Serialize};

use super::ids::{DogId, SetId};

/// A requested `(key, order)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate<K> {
    pub id: K,
    pub order: i32,
}

impl<K> OrderUpdate<K> {
    pub const fn new(id: K, order: i32) -> Self {
        Self { id, order }
    }
}

/// What happened to one requested pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderOutcome<K> {
    pub id: K,
    pub order: i32,
    /// `false` when the key did not match the owning practice/set.
    pub applied: bool,
}

pub type SetOrderUpdate = OrderUpdate<SetId>;
pub type SetDogOrderUpdate = OrderUpdate<DogId>;

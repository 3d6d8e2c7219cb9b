//! Typed identifiers
//!
//! Every primary entity is keyed by a generated UUID. Wrapping each in its own
//! newtype keeps a practice id from being passed where a set id is expected.

use crate::define_entity_id;

define_entity_id!(
    /// Identity root owning resources, dogs and practices.
    ClubId,
    "club"
);
define_entity_id!(
    /// A location or room in a club's resource pool.
    ResourceId,
    "resource"
);
define_entity_id!(PracticeId, "practice");
define_entity_id!(SetId, "set");
define_entity_id!(DogId, "dog");
define_entity_id!(AttendanceId, "attendance");

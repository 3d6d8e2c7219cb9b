//! Practice sets and their dog rosters

use serde::{Deserialize, Serialize};

use super::ids::{DogId, PracticeId, ResourceId, SetId};

/// An ordered grouping of dog-lane assignments within a practice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSet {
    pub id: SetId,
    pub practice_id: PracticeId,
    pub resource_id: ResourceId,
    pub order: i32,
}

impl PracticeSet {
    pub fn new(practice_id: PracticeId, resource_id: ResourceId, order: i32) -> Self {
        Self { id: SetId::new(), practice_id, resource_id, order }
    }
}

/// A dog's place within a set, keyed by `(set_id, dog_id)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDog {
    pub set_id: SetId,
    pub dog_id: DogId,
    pub order: i32,
    pub lane: String,
}

/// One entry of a roster replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDogAssignment {
    pub dog_id: DogId,
    pub order: i32,
    #[serde(default)]
    pub lane: String,
}

impl SetDogAssignment {
    pub fn new(dog_id: DogId, order: i32, lane: impl Into<String>) -> Self {
        Self { dog_id, order, lane: lane.into() }
    }

    pub fn into_set_dog(self, set_id: SetId) -> SetDog {
        SetDog { set_id, dog_id: self.dog_id, order: self.order, lane: self.lane }
    }
}

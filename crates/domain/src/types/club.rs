//! Club directory types
//!
//! Clubs and dogs are plain records here; their CRUD lives outside the
//! scheduling core. The core only needs to know they exist.

use serde::{Deserialize, Serialize};

use super::ids::{ClubId, DogId};

/// A club
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: ClubId,
    pub name: String,
}

/// A dog registered with a club
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    pub id: DogId,
    pub club_id: ClubId,
    pub name: String,
}

impl Club {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: ClubId::new(), name: name.into() }
    }
}

impl Dog {
    pub fn new(club_id: ClubId, name: impl Into<String>) -> Self {
        Self { id: DogId::new(), club_id, name: name.into() }
    }
}

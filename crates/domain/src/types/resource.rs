//! Resource pool types
//!
//! A resource is either a location or a room; the club picks which concept it
//! uses, the shape is identical. At most one resource per club carries
//! `is_default`, and exactly one does whenever the club has any.

use serde::{Deserialize, Serialize};

use super::ids::{ClubId, ResourceId};
use crate::constants::{DEFAULT_IS_DOUBLE_LANE, MAX_RESOURCE_NAME_LENGTH};
use crate::{PlannerError, Result};

/// A physical resource (location or room) owned by a club
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub club_id: ClubId,
    pub name: String,
    pub is_default: bool,
    pub is_double_lane: bool,
}

/// Creation payload for a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    pub name: String,
    #[serde(default = "default_double_lane")]
    pub is_double_lane: bool,
    /// Promote the new resource even when the club already has a default.
    #[serde(default)]
    pub make_default: bool,
}

impl NewResource {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_double_lane: DEFAULT_IS_DOUBLE_LANE, make_default: false }
    }

    pub fn as_default(mut self) -> Self {
        self.make_default = true;
        self
    }
}

/// Partial update for a resource; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourcePatch {
    #[serde(deserialize_with = "super::patch::present", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "super::patch::present", skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(deserialize_with = "super::patch::present", skip_serializing_if = "Option::is_none")]
    pub is_double_lane: Option<bool>,
}

impl ResourcePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.is_default.is_none() && self.is_double_lane.is_none()
    }

    /// Apply the non-default fields to `resource`. Default promotion is the
    /// pool's job, not the patch's.
    pub fn apply_fields(&self, resource: &mut Resource) {
        if let Some(name) = &self.name {
            resource.name = name.trim().to_string();
        }
        if let Some(double_lane) = self.is_double_lane {
            resource.is_double_lane = double_lane;
        }
    }
}

/// Trim and check a resource name.
pub fn validate_resource_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::Validation("resource name must not be blank".into()));
    }
    if trimmed.chars().count() > MAX_RESOURCE_NAME_LENGTH {
        return Err(PlannerError::Validation(format!(
            "resource name exceeds {MAX_RESOURCE_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn default_double_lane() -> bool {
    DEFAULT_IS_DOUBLE_LANE
}

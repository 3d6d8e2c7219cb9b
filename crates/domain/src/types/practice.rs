//! Practice scheduling types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ClubId, PracticeId};
use crate::impl_domain_status_conversions;

/// Lifecycle status of a practice. Either value may be written at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum PracticeStatus {
    #[default]
    Draft,
    Ready,
}

impl_domain_status_conversions!(PracticeStatus {
    Draft => "Draft",
    Ready => "Ready",
});

/// A scheduled practice session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practice {
    pub id: PracticeId,
    pub club_id: ClubId,
    pub scheduled_at: DateTime<Utc>,
    pub status: PracticeStatus,
}

impl Practice {
    /// A fresh draft practice.
    pub fn draft(club_id: ClubId, scheduled_at: DateTime<Utc>) -> Self {
        Self { id: PracticeId::new(), club_id, scheduled_at, status: PracticeStatus::Draft }
    }
}

/// Partial update for a practice.
///
/// A field that is `None` was omitted by the caller and is left unchanged;
/// presence is never inferred from zero values. Neither field is nullable,
/// so an explicit `null` is rejected rather than read as omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PracticePatch {
    #[serde(deserialize_with = "super::patch::present", skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "super::patch::present", skip_serializing_if = "Option::is_none")]
    pub status: Option<PracticeStatus>,
}

impl PracticePatch {
    pub fn status(status: PracticeStatus) -> Self {
        Self { status: Some(status), ..Self::default() }
    }

    pub fn scheduled_at(scheduled_at: DateTime<Utc>) -> Self {
        Self { scheduled_at: Some(scheduled_at), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled_at.is_none() && self.status.is_none()
    }

    /// Write the present fields onto `practice`.
    pub fn apply(&self, practice: &mut Practice) {
        if let Some(scheduled_at) = self.scheduled_at {
            practice.scheduled_at = scheduled_at;
        }
        if let Some(status) = self.status {
            practice.status = status;
        }
    }
}

/// Aggregated view of a practice used by club dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSummary {
    pub id: PracticeId,
    pub club_id: ClubId,
    pub scheduled_at: DateTime<Utc>,
    pub status: PracticeStatus,
    pub sets_count: usize,
    pub attending_count: usize,
    pub not_attending_count: usize,
    pub unconfirmed_count: usize,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn status_only_patch_keeps_schedule() {
        let when = Utc.with_ymd_and_hms(2030, 5, 1, 18, 0, 0).unwrap();
        let mut practice = Practice::draft(ClubId::new(), when);

        let patch: PracticePatch = serde_json::from_str(r#"{"status": "Ready"}"#).unwrap();
        patch.apply(&mut practice);

        assert_eq!(practice.status, PracticeStatus::Ready);
        assert_eq!(practice.scheduled_at, when);
    }

    #[test]
    fn unknown_patch_fields_are_rejected() {
        let result = serde_json::from_str::<PracticePatch>(r#"{"clubId": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn null_patch_fields_are_rejected() {
        let both = serde_json::from_str::<PracticePatch>(r#"{"scheduledAt": null, "status": null}"#);
        assert!(both.is_err());

        let err = serde_json::from_str::<PracticePatch>(r#"{"status": null}"#).unwrap_err();
        assert!(err.to_string().contains("not null"));

        let schedule_only: PracticePatch =
            serde_json::from_str(r#"{"scheduledAt": "2030-05-01T18:00:00Z"}"#).unwrap();
        assert!(schedule_only.status.is_none());
        assert!(serde_json::from_str::<PracticePatch>("{}").unwrap().is_empty());
    }

    #[test]
    fn status_accepts_any_case() {
        let patch: PracticePatch = serde_json::from_str(r#"{"status": "ready"}"#).unwrap();
        assert_eq!(patch.status, Some(PracticeStatus::Ready));
    }

    #[test]
    fn status_strings() {
        assert_eq!(PracticeStatus::Draft.to_string(), "Draft");
        assert_eq!("ready".parse::<PracticeStatus>().unwrap(), PracticeStatus::Ready);
    }
}

//! Practice attendance types
//!
//! Attendance is tracked per `(practice, dog)`. A dog without a row is
//! implicitly `Unknown`; rows are only written when someone records a value.

use serde::{Deserialize, Serialize};

use super::ids::{AttendanceId, DogId, PracticeId};
use crate::{impl_domain_status_conversions, PlannerError, Result};

/// Whether a dog is coming to a practice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum AttendanceStatus {
    #[default]
    Unknown,
    No,
    Yes,
}

impl_domain_status_conversions!(AttendanceStatus {
    Unknown => "Unknown",
    No => "No" | "NotAttending",
    Yes => "Yes" | "Attending",
});

impl AttendanceStatus {
    /// Storage code.
    pub const fn code(self) -> i64 {
        match self {
            Self::Unknown => 0,
            Self::No => 1,
            Self::Yes => 2,
        }
    }

    /// Decode a storage code.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::No),
            2 => Ok(Self::Yes),
            other => Err(PlannerError::Validation(format!("invalid attendance code: {other}"))),
        }
    }
}

/// A recorded attendance answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeAttendance {
    pub id: AttendanceId,
    pub practice_id: PracticeId,
    pub dog_id: DogId,
    pub attending: AttendanceStatus,
}

impl PracticeAttendance {
    pub fn new(practice_id: PracticeId, dog_id: DogId, attending: AttendanceStatus) -> Self {
        Self { id: AttendanceId::new(), practice_id, dog_id, attending }
    }
}

/// One element of a batch attendance write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUpdate {
    pub dog_id: DogId,
    pub attending: AttendanceStatus,
}

impl AttendanceUpdate {
    pub const fn new(dog_id: DogId, attending: AttendanceStatus) -> Self {
        Self { dog_id, attending }
    }
}

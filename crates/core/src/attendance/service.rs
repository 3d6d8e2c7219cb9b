//! Attendance ledger service
//!
//! One row per `(practice, dog)`, kept unique by looking the pair up before
//! every write inside the writing transaction. Dogs without a row are
//! implicitly `Unknown`; reads never materialise rows for them.

use std::collections::BTreeMap;
use std::sync::Arc;

use flyball_domain::{
    AttendanceStatus, AttendanceUpdate, DogId, PlannerError, PracticeAttendance, PracticeId,
    Result,
};
use tracing::{info, warn};

use crate::store::{run_in_transaction, PlannerStore, StoreTransaction, TxMode};

/// Records per-dog attendance for practices
pub struct AttendanceLedger {
    store: Arc<dyn PlannerStore>,
}

impl AttendanceLedger {
    pub fn new(store: Arc<dyn PlannerStore>) -> Self {
        Self { store }
    }

    /// Recorded answers of a practice keyed by dog.
    pub async fn get_all(&self, practice_id: PracticeId) -> Result<BTreeMap<DogId, AttendanceStatus>> {
        let rows = self.list(practice_id).await?;
        Ok(rows.into_iter().map(|row| (row.dog_id, row.attending)).collect())
    }

    /// Recorded rows of a practice.
    pub async fn list(&self, practice_id: PracticeId) -> Result<Vec<PracticeAttendance>> {
        run_in_transaction(&self.store, TxMode::Read, move |tx| {
            if tx.find_practice_by_id(practice_id)?.is_none() {
                return Err(PlannerError::NotFound(format!("practice {practice_id}")));
            }
            tx.list_attendance(practice_id)
        })
        .await
    }

    /// Record one dog's answer and return the resulting row.
    pub async fn upsert_one(
        &self,
        practice_id: PracticeId,
        dog_id: DogId,
        attending: AttendanceStatus,
    ) -> Result<PracticeAttendance> {
        let row = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            upsert_row(tx, practice_id, dog_id, attending)
        })
        .await
        .inspect_err(|err| warn!(%practice_id, %dog_id, error = %err, "attendance write failed"))?;

        info!(%practice_id, %dog_id, attending = %row.attending, "recorded attendance");
        Ok(row)
    }

    /// Record many answers as one unit.
    ///
    /// Either every update lands or none does. Rows are returned in input
    /// order; a dog listed twice ends with its last value.
    pub async fn upsert_batch(
        &self,
        practice_id: PracticeId,
        updates: Vec<AttendanceUpdate>,
    ) -> Result<Vec<PracticeAttendance>> {
        let requested = updates.len();

        let rows = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            updates
                .into_iter()
                .map(|update| upsert_row(tx, practice_id, update.dog_id, update.attending))
                .collect::<Result<Vec<_>>>()
        })
        .await
        .inspect_err(|err| {
            warn!(%practice_id, requested, error = %err, "attendance batch rolled back");
        })?;

        info!(%practice_id, rows = rows.len(), "recorded attendance batch");
        Ok(rows)
    }
}

/// Update the existing row for the pair, or insert one.
fn upsert_row(
    tx: &mut dyn StoreTransaction,
    practice_id: PracticeId,
    dog_id: DogId,
    attending: AttendanceStatus,
) -> Result<PracticeAttendance> {
    match tx.find_attendance(practice_id, dog_id)? {
        Some(mut row) => {
            tx.update_attendance_status(row.id, attending)?;
            row.attending = attending;
            Ok(row)
        }
        None => {
            let row = PracticeAttendance::new(practice_id, dog_id, attending);
            tx.insert_attendance(&row)?;
            Ok(row)
        }
    }
}

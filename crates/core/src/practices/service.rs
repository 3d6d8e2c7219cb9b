//! Practice scheduler service

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use flyball_domain::{
    AttendanceStatus, ClubId, PlannerError, Practice, PracticeId, PracticePatch, PracticeSummary,
    Result,
};
use tracing::{info, warn};

use crate::clock::Clock;
use crate::store::{run_in_transaction, PlannerStore, StoreTransaction, TxMode};

/// Validates practice scheduling fields and owns the practice cascade
pub struct PracticeScheduler {
    store: Arc<dyn PlannerStore>,
    clock: Arc<dyn Clock>,
}

impl PracticeScheduler {
    pub fn new(store: Arc<dyn PlannerStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Schedule a new draft practice. `scheduled_at` must be strictly in the
    /// future.
    pub async fn create(&self, club_id: ClubId, scheduled_at: DateTime<Utc>) -> Result<Practice> {
        ensure_future(scheduled_at, self.clock.now())
            .inspect_err(|err| warn!(%club_id, error = %err, "practice rejected"))?;

        let practice = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            if !tx.club_exists(club_id)? {
                return Err(PlannerError::NotFound(format!("club {club_id}")));
            }
            let practice = Practice::draft(club_id, scheduled_at);
            tx.insert_practice(&practice)?;
            Ok(practice)
        })
        .await?;

        info!(%club_id, practice_id = %practice.id, %scheduled_at, "scheduled practice");
        Ok(practice)
    }

    pub async fn get(&self, id: PracticeId, club_id: ClubId) -> Result<Practice> {
        run_in_transaction(&self.store, TxMode::Read, move |tx| require_practice(tx, id, club_id))
            .await
    }

    /// Practices of the club, earliest first.
    pub async fn list(&self, club_id: ClubId) -> Result<Vec<Practice>> {
        run_in_transaction(&self.store, TxMode::Read, move |tx| tx.list_practices(club_id)).await
    }

    /// Apply the fields present in `patch` and return the updated practice.
    ///
    /// Omitted fields are left alone. A present `scheduled_at` must be in the
    /// future at the time of the call; a present `status` is written as-is.
    pub async fn update(
        &self,
        id: PracticeId,
        club_id: ClubId,
        patch: PracticePatch,
    ) -> Result<Practice> {
        if let Some(scheduled_at) = patch.scheduled_at {
            ensure_future(scheduled_at, self.clock.now())
                .inspect_err(|err| warn!(practice_id = %id, error = %err, "update rejected"))?;
        }

        let practice = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            let mut practice = require_practice(tx, id, club_id)?;
            if patch.is_empty() {
                return Ok(practice);
            }
            tx.update_practice(id, club_id, &patch)?;
            patch.apply(&mut practice);
            Ok(practice)
        })
        .await?;

        info!(
            %club_id,
            practice_id = %id,
            status = %practice.status,
            scheduled_at = %practice.scheduled_at,
            "updated practice"
        );
        Ok(practice)
    }

    /// Delete the practice with its sets, their dogs and its attendance.
    pub async fn delete(&self, id: PracticeId, club_id: ClubId) -> Result<()> {
        let (sets, set_dogs, attendance) =
            run_in_transaction(&self.store, TxMode::Write, move |tx| {
                require_practice(tx, id, club_id)?;

                let set_dogs = tx.delete_set_dogs_for_practice(id)?;
                let sets = tx.delete_sets_for_practice(id)?;
                let attendance = tx.delete_attendance_for_practice(id)?;
                tx.delete_practice(id, club_id)?;

                Ok((sets, set_dogs, attendance))
            })
            .await?;

        info!(%club_id, practice_id = %id, sets, set_dogs, attendance, "deleted practice");
        Ok(())
    }

    /// Set count and attendance tally over the club's dogs.
    pub async fn summary(&self, id: PracticeId, club_id: ClubId) -> Result<PracticeSummary> {
        run_in_transaction(&self.store, TxMode::Read, move |tx| {
            let practice = require_practice(tx, id, club_id)?;
            let sets_count = tx.count_sets(id)?;

            let answers: HashMap<_, _> = tx
                .list_attendance(id)?
                .into_iter()
                .map(|row| (row.dog_id, row.attending))
                .collect();

            let mut summary = PracticeSummary {
                id: practice.id,
                club_id: practice.club_id,
                scheduled_at: practice.scheduled_at,
                status: practice.status,
                sets_count,
                attending_count: 0,
                not_attending_count: 0,
                unconfirmed_count: 0,
            };

            for dog in tx.list_club_dogs(club_id)? {
                match answers.get(&dog.id).copied().unwrap_or_default() {
                    AttendanceStatus::Yes => summary.attending_count += 1,
                    AttendanceStatus::No => summary.not_attending_count += 1,
                    AttendanceStatus::Unknown => summary.unconfirmed_count += 1,
                }
            }

            Ok(summary)
        })
        .await
    }
}

fn ensure_future(scheduled_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<()> {
    if scheduled_at <= now {
        return Err(PlannerError::Validation(format!(
            "practice time {} must be after {}",
            scheduled_at.to_rfc3339(),
            now.to_rfc3339()
        )));
    }
    Ok(())
}

fn require_practice(
    tx: &mut dyn StoreTransaction,
    id: PracticeId,
    club_id: ClubId,
) -> Result<Practice> {
    tx.find_practice(id, club_id)?
        .ok_or_else(|| PlannerError::NotFound(format!("practice {id} in club {club_id}")))
}

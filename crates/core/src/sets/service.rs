//! Set ordering service
//!
//! Orders are caller-supplied and free-form: gaps and duplicates are allowed,
//! ties display in insertion order. A reorder pair that does not belong to
//! the stated practice or set is skipped and reported as not applied. Each
//! call is one transaction, so a failing batch leaves no partial reorder.

use std::collections::HashSet;
use std::sync::Arc;

use flyball_domain::{
    DogId, OrderUpdate, PlannerError, Practice, PracticeId, PracticeSet, ReorderOutcome, ResourceId,
    Result, SetDog, SetDogAssignment, SetDogOrderUpdate, SetId, SetOrderUpdate,
};
use tracing::{info, warn};

use crate::store::{run_in_transaction, PlannerStore, StoreTransaction, TxMode};

/// Applies caller-supplied ordering to sets and set dogs
pub struct SetOrderingEngine {
    store: Arc<dyn PlannerStore>,
}

impl SetOrderingEngine {
    pub fn new(store: Arc<dyn PlannerStore>) -> Self {
        Self { store }
    }

    /// Add a set to a practice, bound to one of the club's resources.
    pub async fn create_set(
        &self,
        practice_id: PracticeId,
        resource_id: ResourceId,
        order: i32,
    ) -> Result<PracticeSet> {
        let set = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            let practice = require_practice(tx, practice_id)?;
            if tx.find_resource(resource_id, practice.club_id)?.is_none() {
                return Err(PlannerError::NotFound(format!(
                    "resource {resource_id} in club {}",
                    practice.club_id
                )));
            }

            let set = PracticeSet::new(practice_id, resource_id, order);
            tx.insert_set(&set)?;
            Ok(set)
        })
        .await?;

        info!(%practice_id, set_id = %set.id, %resource_id, order, "created set");
        Ok(set)
    }

    /// Sets of the practice in display order.
    pub async fn list_sets(&self, practice_id: PracticeId) -> Result<Vec<PracticeSet>> {
        run_in_transaction(&self.store, TxMode::Read, move |tx| {
            require_practice(tx, practice_id)?;
            tx.list_sets(practice_id)
        })
        .await
    }

    /// Delete a set and its dogs.
    pub async fn delete_set(&self, set_id: SetId, practice_id: PracticeId) -> Result<()> {
        let dogs = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            require_set_in_practice(tx, set_id, practice_id)?;
            let dogs = tx.delete_set_dogs(set_id)?;
            tx.delete_set(set_id, practice_id)?;
            Ok(dogs)
        })
        .await?;

        info!(%practice_id, %set_id, dogs, "deleted set");
        Ok(())
    }

    /// Replace the set's dog roster.
    ///
    /// Every dog must belong to the practice's club and appear once. The old
    /// roster is removed and the new one written in the same transaction.
    pub async fn assign_dogs(
        &self,
        set_id: SetId,
        assignments: Vec<SetDogAssignment>,
    ) -> Result<Vec<SetDog>> {
        let count = assignments.len();

        let roster = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            let set = require_set(tx, set_id)?;
            let practice = require_practice(tx, set.practice_id)?;

            let members: HashSet<_> =
                tx.list_club_dogs(practice.club_id)?.into_iter().map(|dog| dog.id).collect();
            let mut seen = HashSet::with_capacity(assignments.len());
            for assignment in &assignments {
                if !seen.insert(assignment.dog_id) {
                    return Err(PlannerError::Validation(format!(
                        "dog {} is assigned to set {set_id} more than once",
                        assignment.dog_id
                    )));
                }
                if !members.contains(&assignment.dog_id) {
                    return Err(PlannerError::NotFound(format!(
                        "dog {} in club {}",
                        assignment.dog_id, practice.club_id
                    )));
                }
            }

            tx.delete_set_dogs(set_id)?;
            for assignment in assignments {
                tx.insert_set_dog(&assignment.into_set_dog(set_id))?;
            }
            tx.list_set_dogs(set_id)
        })
        .await
        .inspect_err(|err| warn!(%set_id, error = %err, "roster assignment rejected"))?;

        info!(%set_id, dogs = count, "assigned set roster");
        Ok(roster)
    }

    /// Dogs of the set in display order.
    pub async fn list_set_dogs(&self, set_id: SetId) -> Result<Vec<SetDog>> {
        run_in_transaction(&self.store, TxMode::Read, move |tx| {
            require_set(tx, set_id)?;
            tx.list_set_dogs(set_id)
        })
        .await
    }

    /// Write `order` onto each set of the practice named in `updates`.
    ///
    /// Outcomes are returned in input order.
    pub async fn reorder_sets(
        &self,
        practice_id: PracticeId,
        updates: Vec<SetOrderUpdate>,
    ) -> Result<Vec<ReorderOutcome<SetId>>> {
        let outcomes = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            apply_orders(updates, |id, order| tx.update_set_order(id, practice_id, order))
        })
        .await?;

        log_outcomes("sets", &practice_id.to_string(), &outcomes);
        Ok(outcomes)
    }

    /// Write `order` onto each dog of the set named in `updates`.
    ///
    /// Only dogs already on the roster are reordered; others are skipped.
    pub async fn reorder_set_dogs(
        &self,
        set_id: SetId,
        updates: Vec<SetDogOrderUpdate>,
    ) -> Result<Vec<ReorderOutcome<DogId>>> {
        let outcomes = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            apply_orders(updates, |dog_id, order| tx.update_set_dog_order(set_id, dog_id, order))
        })
        .await?;

        log_outcomes("set dogs", &set_id.to_string(), &outcomes);
        Ok(outcomes)
    }
}

// ============================================================================
// Transaction helpers
// ============================================================================

/// Run one filtered update per pair. Zero affected rows marks a skip.
fn apply_orders<K: Copy>(
    updates: Vec<OrderUpdate<K>>,
    mut update: impl FnMut(K, i32) -> Result<usize>,
) -> Result<Vec<ReorderOutcome<K>>> {
    updates
        .into_iter()
        .map(|pair| {
            let affected = update(pair.id, pair.order)?;
            Ok(ReorderOutcome { id: pair.id, order: pair.order, applied: affected > 0 })
        })
        .collect()
}

fn log_outcomes<K>(what: &str, scope: &str, outcomes: &[ReorderOutcome<K>]) {
    let skipped = outcomes.iter().filter(|outcome| !outcome.applied).count();
    if skipped > 0 {
        warn!(scope, skipped, "skipped {what} outside the requested scope");
    }
    info!(scope, applied = outcomes.len() - skipped, "reordered {what}");
}

fn require_practice(tx: &mut dyn StoreTransaction, id: PracticeId) -> Result<Practice> {
    tx.find_practice_by_id(id)?.ok_or_else(|| PlannerError::NotFound(format!("practice {id}")))
}

fn require_set(tx: &mut dyn StoreTransaction, id: SetId) -> Result<PracticeSet> {
    tx.find_set(id)?.ok_or_else(|| PlannerError::NotFound(format!("set {id}")))
}

fn require_set_in_practice(
    tx: &mut dyn StoreTransaction,
    id: SetId,
    practice_id: PracticeId,
) -> Result<PracticeSet> {
    match tx.find_set(id)? {
        Some(set) if set.practice_id == practice_id => Ok(set),
        _ => Err(PlannerError::NotFound(format!("set {id} in practice {practice_id}"))),
    }
}

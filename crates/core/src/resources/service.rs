//! Resource pool service
//!
//! For a club with at least one resource, exactly one resource carries
//! `is_default`. Every operation that could disturb that runs its count
//! checks and flag changes inside one write transaction, so concurrent
//! promotions or deletions serialise on the store.

use std::sync::Arc;

use flyball_domain::{
    validate_resource_name, ClubId, DefaultDeletionPolicy, NewResource, PlannerError, Resource,
    ResourceId, ResourceKind, ResourcePatch, Result, SchedulingConfig,
};
use tracing::{info, warn};

use crate::store::{run_in_transaction, PlannerStore, StoreTransaction, TxMode};

/// Keeps one default resource per club
pub struct ResourcePool {
    store: Arc<dyn PlannerStore>,
    kind: ResourceKind,
    default_deletion: DefaultDeletionPolicy,
}

impl ResourcePool {
    /// Create a pool over `store` using the club-wide scheduling policy.
    pub fn new(store: Arc<dyn PlannerStore>, config: SchedulingConfig) -> Self {
        Self { store, kind: config.resource_kind, default_deletion: config.default_deletion }
    }

    /// Whether this pool manages locations or rooms.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn default_deletion(&self) -> DefaultDeletionPolicy {
        self.default_deletion
    }

    /// Add a resource to the club.
    ///
    /// The first resource of a club becomes the default. Later ones are
    /// created non-default unless `make_default` is set, in which case the
    /// promotion happens in the same transaction as the insert.
    pub async fn create(&self, club_id: ClubId, new: NewResource) -> Result<Resource> {
        let name = validate_resource_name(&new.name)?;
        let noun = self.kind.noun();

        let resource = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            if !tx.club_exists(club_id)? {
                return Err(PlannerError::NotFound(format!("club {club_id}")));
            }

            let existing = tx.count_resources(club_id)?;
            let resource = Resource {
                id: ResourceId::new(),
                club_id,
                name,
                is_default: existing == 0 || new.make_default,
                is_double_lane: new.is_double_lane,
            };
            tx.insert_resource(&resource)?;

            if resource.is_default && existing > 0 {
                tx.clear_default_resources(club_id, resource.id)?;
            }

            Ok(resource)
        })
        .await
        .inspect_err(|err| warn!(%club_id, error = %err, "failed to create {noun}"))?;

        info!(
            %club_id,
            resource_id = %resource.id,
            is_default = resource.is_default,
            "created {noun}"
        );
        Ok(resource)
    }

    /// Fetch one resource of the club.
    pub async fn get(&self, id: ResourceId, club_id: ClubId) -> Result<Resource> {
        let noun = self.kind.noun();
        run_in_transaction(&self.store, TxMode::Read, move |tx| {
            require_resource(tx, id, club_id, noun)
        })
        .await
    }

    /// All resources of the club ordered by name.
    pub async fn list(&self, club_id: ClubId) -> Result<Vec<Resource>> {
        run_in_transaction(&self.store, TxMode::Read, move |tx| tx.list_resources(club_id)).await
    }

    /// Make `id` the club's only default.
    pub async fn set_as_default(&self, id: ResourceId, club_id: ClubId) -> Result<Resource> {
        let noun = self.kind.noun();

        let resource = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            let mut resource = require_resource(tx, id, club_id, noun)?;
            promote(tx, &mut resource)?;
            Ok(resource)
        })
        .await
        .inspect_err(|err| warn!(%club_id, resource_id = %id, error = %err, "promotion failed"))?;

        info!(%club_id, resource_id = %id, "{noun} promoted to default");
        Ok(resource)
    }

    /// Apply the fields present in `patch`.
    ///
    /// `is_default = true` promotes the resource atomically. `is_default =
    /// false` on the current default is a `Conflict`: the club would be left
    /// without one.
    pub async fn update(
        &self,
        id: ResourceId,
        club_id: ClubId,
        mut patch: ResourcePatch,
    ) -> Result<Resource> {
        if let Some(name) = patch.name.take() {
            patch.name = Some(validate_resource_name(&name)?);
        }
        let noun = self.kind.noun();

        let resource = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            let mut resource = require_resource(tx, id, club_id, noun)?;

            if patch.is_default == Some(false) && resource.is_default {
                return Err(PlannerError::Conflict(format!(
                    "cannot unset the default {noun}; promote another {noun} instead"
                )));
            }

            patch.apply_fields(&mut resource);
            if patch.is_default == Some(true) {
                promote(tx, &mut resource)?;
            } else {
                tx.update_resource(&resource)?;
            }

            Ok(resource)
        })
        .await
        .inspect_err(|err| warn!(%club_id, resource_id = %id, error = %err, "update rejected"))?;

        info!(%club_id, resource_id = %id, is_default = resource.is_default, "updated {noun}");
        Ok(resource)
    }

    /// Remove a resource from the club.
    ///
    /// Returns the resource promoted in its place when the default was
    /// deleted under [`DefaultDeletionPolicy::Reassign`].
    pub async fn delete(&self, id: ResourceId, club_id: ClubId) -> Result<Option<Resource>> {
        let noun = self.kind.noun();
        let policy = self.default_deletion;

        let promoted = run_in_transaction(&self.store, TxMode::Write, move |tx| {
            let target = require_resource(tx, id, club_id, noun)?;

            if tx.count_resources(club_id)? <= 1 {
                return Err(PlannerError::Conflict(format!("cannot delete the last {noun}")));
            }

            let in_use = tx.count_sets_using_resource(id)?;
            if in_use > 0 {
                return Err(PlannerError::Conflict(format!(
                    "{noun} is used by {in_use} set(s)"
                )));
            }

            let promoted = if target.is_default {
                match policy {
                    DefaultDeletionPolicy::Reject => {
                        return Err(PlannerError::Conflict(format!(
                            "cannot delete the default {noun}"
                        )));
                    }
                    DefaultDeletionPolicy::Reassign => Some(reassign_default(tx, &target, noun)?),
                }
            } else {
                None
            };

            tx.delete_resource(id, club_id)?;
            Ok(promoted)
        })
        .await
        .inspect_err(|err| warn!(%club_id, resource_id = %id, error = %err, "delete rejected"))?;

        match &promoted {
            Some(next) => info!(
                %club_id,
                resource_id = %id,
                promoted_id = %next.id,
                "deleted default {noun} and promoted a replacement"
            ),
            None => info!(%club_id, resource_id = %id, "deleted {noun}"),
        }
        Ok(promoted)
    }
}

// ============================================================================
// Transaction helpers
// ============================================================================

fn require_resource(
    tx: &mut dyn StoreTransaction,
    id: ResourceId,
    club_id: ClubId,
    noun: &str,
) -> Result<Resource> {
    tx.find_resource(id, club_id)?
        .ok_or_else(|| PlannerError::NotFound(format!("{noun} {id} in club {club_id}")))
}

/// Clear every other default of the club, then flag `resource`.
fn promote(tx: &mut dyn StoreTransaction, resource: &mut Resource) -> Result<()> {
    tx.clear_default_resources(resource.club_id, resource.id)?;
    resource.is_default = true;
    tx.update_resource(resource)?;
    Ok(())
}

/// Promote the remaining resource with the lowest name.
fn reassign_default(
    tx: &mut dyn StoreTransaction,
    leaving: &Resource,
    noun: &str,
) -> Result<Resource> {
    let mut next = tx
        .list_resources(leaving.club_id)?
        .into_iter()
        .find(|candidate| candidate.id != leaving.id)
        .ok_or_else(|| {
            PlannerError::Internal(format!("no {noun} left to take over the default"))
        })?;
    promote(tx, &mut next)?;
    Ok(next)
}

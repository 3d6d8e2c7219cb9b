//! Port interfaces for planner persistence
//!
//! These traits define the boundary between the scheduling components and
//! the relational store. Every operation runs inside a [`StoreTransaction`];
//! the components decide what to read and write, the store guarantees that a
//! transaction either commits as a unit or leaves no trace.
//!
//! Methods are synchronous. Components call them from a blocking task so a
//! transaction never spans an `.await`.

use flyball_domain::{
    AttendanceId, AttendanceStatus, Club, ClubId, Dog, DogId, Practice, PracticeAttendance,
    PracticeId, PracticePatch, PracticeSet, Resource, ResourceId, Result, SetDog, SetId,
};

/// Isolation requested when opening a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    /// Read-only work; may run alongside other readers.
    Read,
    /// Read-decide-write work; serialised against every other writer.
    Write,
}

/// Entry point to the transactional store.
pub trait PlannerStore: Send + Sync {
    /// Open a transaction. Dropping it without [`StoreTransaction::commit`]
    /// rolls it back.
    fn begin(&self, mode: TxMode) -> Result<Box<dyn StoreTransaction + '_>>;
}

/// A scoped unit of work over every entity family.
pub trait StoreTransaction:
    DirectoryStore + ResourceStore + PracticeStore + SetStore + AttendanceStore
{
    /// Make every write of this transaction visible to other readers.
    fn commit(self: Box<Self>) -> Result<()>;
}

/// Clubs and dogs, as far as scheduling needs to know about them.
pub trait DirectoryStore {
    fn insert_club(&mut self, club: &Club) -> Result<()>;

    fn insert_dog(&mut self, dog: &Dog) -> Result<()>;

    fn club_exists(&mut self, club_id: ClubId) -> Result<bool>;

    /// Dogs registered with the club.
    fn list_club_dogs(&mut self, club_id: ClubId) -> Result<Vec<Dog>>;
}

/// Resource pool rows.
pub trait ResourceStore {
    fn count_resources(&mut self, club_id: ClubId) -> Result<usize>;

    /// Point lookup scoped to the owning club.
    fn find_resource(&mut self, id: ResourceId, club_id: ClubId) -> Result<Option<Resource>>;

    /// All resources of a club ordered by name.
    fn list_resources(&mut self, club_id: ClubId) -> Result<Vec<Resource>>;

    fn insert_resource(&mut self, resource: &Resource) -> Result<()>;

    /// Overwrite name, default flag and lane mode. Returns affected rows.
    fn update_resource(&mut self, resource: &Resource) -> Result<usize>;

    /// Clear `is_default` on every resource of the club except `keep`.
    fn clear_default_resources(&mut self, club_id: ClubId, keep: ResourceId) -> Result<usize>;

    fn delete_resource(&mut self, id: ResourceId, club_id: ClubId) -> Result<usize>;

    /// Number of sets bound to the resource.
    fn count_sets_using_resource(&mut self, id: ResourceId) -> Result<usize>;
}

/// Practice rows.
pub trait PracticeStore {
    fn insert_practice(&mut self, practice: &Practice) -> Result<()>;

    /// Point lookup scoped to the owning club.
    fn find_practice(&mut self, id: PracticeId, club_id: ClubId) -> Result<Option<Practice>>;

    fn find_practice_by_id(&mut self, id: PracticeId) -> Result<Option<Practice>>;

    /// Practices of a club ordered by scheduled time.
    fn list_practices(&mut self, club_id: ClubId) -> Result<Vec<Practice>>;

    /// Write only the fields present in `patch`. Returns affected rows.
    fn update_practice(
        &mut self,
        id: PracticeId,
        club_id: ClubId,
        patch: &PracticePatch,
    ) -> Result<usize>;

    fn delete_practice(&mut self, id: PracticeId, club_id: ClubId) -> Result<usize>;
}

/// Sets and their dog rosters.
pub trait SetStore {
    fn insert_set(&mut self, set: &PracticeSet) -> Result<()>;

    fn find_set(&mut self, id: SetId) -> Result<Option<PracticeSet>>;

    /// Sets of a practice ascending by order, ties in insertion order.
    fn list_sets(&mut self, practice_id: PracticeId) -> Result<Vec<PracticeSet>>;

    fn count_sets(&mut self, practice_id: PracticeId) -> Result<usize>;

    /// Filtered update on `(id, practice_id)`. Zero rows means no match.
    fn update_set_order(&mut self, id: SetId, practice_id: PracticeId, order: i32)
        -> Result<usize>;

    fn delete_set(&mut self, id: SetId, practice_id: PracticeId) -> Result<usize>;

    fn delete_sets_for_practice(&mut self, practice_id: PracticeId) -> Result<usize>;

    fn insert_set_dog(&mut self, set_dog: &SetDog) -> Result<()>;

    /// Dogs of a set ascending by order, ties in insertion order.
    fn list_set_dogs(&mut self, set_id: SetId) -> Result<Vec<SetDog>>;

    /// Filtered update on `(set_id, dog_id)`. Zero rows means no match.
    fn update_set_dog_order(&mut self, set_id: SetId, dog_id: DogId, order: i32)
        -> Result<usize>;

    fn delete_set_dogs(&mut self, set_id: SetId) -> Result<usize>;

    fn delete_set_dogs_for_practice(&mut self, practice_id: PracticeId) -> Result<usize>;
}

/// Attendance rows.
pub trait AttendanceStore {
    /// Lookup by the logical key `(practice_id, dog_id)`.
    fn find_attendance(
        &mut self,
        practice_id: PracticeId,
        dog_id: DogId,
    ) -> Result<Option<PracticeAttendance>>;

    fn list_attendance(&mut self, practice_id: PracticeId) -> Result<Vec<PracticeAttendance>>;

    fn insert_attendance(&mut self, attendance: &PracticeAttendance) -> Result<()>;

    /// Update only the `attending` field.
    fn update_attendance_status(
        &mut self,
        id: AttendanceId,
        attending: AttendanceStatus,
    ) -> Result<usize>;

    fn delete_attendance_for_practice(&mut self, practice_id: PracticeId) -> Result<usize>;
}

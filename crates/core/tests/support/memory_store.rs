//! In-memory `PlannerStore` for component tests
//!
//! A transaction takes the store lock, works on a copy of the state and
//! publishes it on commit. Dropping an uncommitted transaction discards the
//! copy. Foreign keys are checked the way SQLite checks them, so a write that
//! references a missing row fails with `NotFound`.

use std::sync::Arc;

use flyball_core::{
    AttendanceStore, DirectoryStore, PlannerStore, PracticeStore, ResourceStore, SetStore,
    StoreTransaction, TxMode,
};
use flyball_domain::{
    AttendanceId, AttendanceStatus, Club, ClubId, Dog, DogId, Practice, PracticeAttendance,
    PracticeId, PracticePatch, PracticeSet, PlannerError, Resource, ResourceId, Result, SetDog,
    SetId,
};
use parking_lot::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
struct State {
    clubs: Vec<Club>,
    dogs: Vec<Dog>,
    resources: Vec<Resource>,
    practices: Vec<Practice>,
    sets: Vec<PracticeSet>,
    set_dogs: Vec<SetDog>,
    attendance: Vec<PracticeAttendance>,
}

/// Shared in-memory store. Clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
    fail_after_writes: Arc<Mutex<Option<usize>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later transaction fail on its `n + 1`-th write.
    pub fn fail_after_writes(&self, n: usize) {
        *self.fail_after_writes.lock() = Some(n);
    }

    pub fn clear_failures(&self) {
        *self.fail_after_writes.lock() = None;
    }

    pub fn seed_club(&self, name: &str) -> Club {
        let club = Club::new(name);
        self.state.lock().clubs.push(club.clone());
        club
    }

    pub fn seed_dog(&self, club_id: ClubId, name: &str) -> Dog {
        let dog = Dog::new(club_id, name);
        self.state.lock().dogs.push(dog.clone());
        dog
    }

    /// Committed resources of a club in insertion order.
    pub fn resources(&self, club_id: ClubId) -> Vec<Resource> {
        self.state.lock().resources.iter().filter(|r| r.club_id == club_id).cloned().collect()
    }

    pub fn practices(&self) -> Vec<Practice> {
        self.state.lock().practices.clone()
    }

    pub fn sets(&self) -> Vec<PracticeSet> {
        self.state.lock().sets.clone()
    }

    pub fn set_dogs(&self) -> Vec<SetDog> {
        self.state.lock().set_dogs.clone()
    }

    pub fn attendance(&self) -> Vec<PracticeAttendance> {
        self.state.lock().attendance.clone()
    }
}

impl PlannerStore for MemoryStore {
    fn begin(&self, _mode: TxMode) -> Result<Box<dyn StoreTransaction + '_>> {
        let guard = self.state.lock();
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction {
            guard,
            working,
            writes: 0,
            fail_after: *self.fail_after_writes.lock(),
        }))
    }
}

struct MemoryTransaction<'a> {
    guard: MutexGuard<'a, State>,
    working: State,
    writes: usize,
    fail_after: Option<usize>,
}

impl MemoryTransaction<'_> {
    fn write(&mut self) -> Result<()> {
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(PlannerError::Database("injected write failure".into()));
        }
        self.writes += 1;
        Ok(())
    }

    fn require(&self, present: bool) -> Result<()> {
        if present {
            Ok(())
        } else {
            Err(PlannerError::NotFound("referenced entity does not exist".into()))
        }
    }
}

impl StoreTransaction for MemoryTransaction<'_> {
    fn commit(mut self: Box<Self>) -> Result<()> {
        *self.guard = std::mem::take(&mut self.working);
        Ok(())
    }
}

impl DirectoryStore for MemoryTransaction<'_> {
    fn insert_club(&mut self, club: &Club) -> Result<()> {
        self.write()?;
        self.working.clubs.push(club.clone());
        Ok(())
    }

    fn insert_dog(&mut self, dog: &Dog) -> Result<()> {
        self.write()?;
        self.require(self.working.clubs.iter().any(|c| c.id == dog.club_id))?;
        self.working.dogs.push(dog.clone());
        Ok(())
    }

    fn club_exists(&mut self, club_id: ClubId) -> Result<bool> {
        Ok(self.working.clubs.iter().any(|c| c.id == club_id))
    }

    fn list_club_dogs(&mut self, club_id: ClubId) -> Result<Vec<Dog>> {
        Ok(self.working.dogs.iter().filter(|d| d.club_id == club_id).cloned().collect())
    }
}

impl ResourceStore for MemoryTransaction<'_> {
    fn count_resources(&mut self, club_id: ClubId) -> Result<usize> {
        Ok(self.working.resources.iter().filter(|r| r.club_id == club_id).count())
    }

    fn find_resource(&mut self, id: ResourceId, club_id: ClubId) -> Result<Option<Resource>> {
        Ok(self.working.resources.iter().find(|r| r.id == id && r.club_id == club_id).cloned())
    }

    fn list_resources(&mut self, club_id: ClubId) -> Result<Vec<Resource>> {
        let mut rows: Vec<_> =
            self.working.resources.iter().filter(|r| r.club_id == club_id).cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    fn insert_resource(&mut self, resource: &Resource) -> Result<()> {
        self.write()?;
        self.require(self.working.clubs.iter().any(|c| c.id == resource.club_id))?;
        self.working.resources.push(resource.clone());
        Ok(())
    }

    fn update_resource(&mut self, resource: &Resource) -> Result<usize> {
        self.write()?;
        let mut affected = 0;
        for row in self.working.resources.iter_mut().filter(|r| r.id == resource.id) {
            row.name.clone_from(&resource.name);
            row.is_default = resource.is_default;
            row.is_double_lane = resource.is_double_lane;
            affected += 1;
        }
        Ok(affected)
    }

    fn clear_default_resources(&mut self, club_id: ClubId, keep: ResourceId) -> Result<usize> {
        self.write()?;
        let mut affected = 0;
        for row in self
            .working
            .resources
            .iter_mut()
            .filter(|r| r.club_id == club_id && r.id != keep && r.is_default)
        {
            row.is_default = false;
            affected += 1;
        }
        Ok(affected)
    }

    fn delete_resource(&mut self, id: ResourceId, club_id: ClubId) -> Result<usize> {
        self.write()?;
        self.require(!self.working.sets.iter().any(|s| s.resource_id == id))?;
        let before = self.working.resources.len();
        self.working.resources.retain(|r| !(r.id == id && r.club_id == club_id));
        Ok(before - self.working.resources.len())
    }

    fn count_sets_using_resource(&mut self, id: ResourceId) -> Result<usize> {
        Ok(self.working.sets.iter().filter(|s| s.resource_id == id).count())
    }
}

impl PracticeStore for MemoryTransaction<'_> {
    fn insert_practice(&mut self, practice: &Practice) -> Result<()> {
        self.write()?;
        self.require(self.working.clubs.iter().any(|c| c.id == practice.club_id))?;
        self.working.practices.push(practice.clone());
        Ok(())
    }

    fn find_practice(&mut self, id: PracticeId, club_id: ClubId) -> Result<Option<Practice>> {
        Ok(self.working.practices.iter().find(|p| p.id == id && p.club_id == club_id).cloned())
    }

    fn find_practice_by_id(&mut self, id: PracticeId) -> Result<Option<Practice>> {
        Ok(self.working.practices.iter().find(|p| p.id == id).cloned())
    }

    fn list_practices(&mut self, club_id: ClubId) -> Result<Vec<Practice>> {
        let mut rows: Vec<_> =
            self.working.practices.iter().filter(|p| p.club_id == club_id).cloned().collect();
        rows.sort_by_key(|p| p.scheduled_at);
        Ok(rows)
    }

    fn update_practice(
        &mut self,
        id: PracticeId,
        club_id: ClubId,
        patch: &PracticePatch,
    ) -> Result<usize> {
        self.write()?;
        let mut affected = 0;
        for row in
            self.working.practices.iter_mut().filter(|p| p.id == id && p.club_id == club_id)
        {
            patch.apply(row);
            affected += 1;
        }
        Ok(affected)
    }

    fn delete_practice(&mut self, id: PracticeId, club_id: ClubId) -> Result<usize> {
        self.write()?;
        self.require(
            !self.working.sets.iter().any(|s| s.practice_id == id)
                && !self.working.attendance.iter().any(|a| a.practice_id == id),
        )?;
        let before = self.working.practices.len();
        self.working.practices.retain(|p| !(p.id == id && p.club_id == club_id));
        Ok(before - self.working.practices.len())
    }
}

impl SetStore for MemoryTransaction<'_> {
    fn insert_set(&mut self, set: &PracticeSet) -> Result<()> {
        self.write()?;
        self.require(
            self.working.practices.iter().any(|p| p.id == set.practice_id)
                && self.working.resources.iter().any(|r| r.id == set.resource_id),
        )?;
        self.working.sets.push(set.clone());
        Ok(())
    }

    fn find_set(&mut self, id: SetId) -> Result<Option<PracticeSet>> {
        Ok(self.working.sets.iter().find(|s| s.id == id).cloned())
    }

    fn list_sets(&mut self, practice_id: PracticeId) -> Result<Vec<PracticeSet>> {
        let mut rows: Vec<_> =
            self.working.sets.iter().filter(|s| s.practice_id == practice_id).cloned().collect();
        rows.sort_by_key(|row| row.order);
        Ok(rows)
    }

    fn count_sets(&mut self, practice_id: PracticeId) -> Result<usize> {
        Ok(self.working.sets.iter().filter(|s| s.practice_id == practice_id).count())
    }

    fn update_set_order(
        &mut self,
        id: SetId,
        practice_id: PracticeId,
        order: i32,
    ) -> Result<usize> {
        self.write()?;
        let mut affected = 0;
        for row in
            self.working.sets.iter_mut().filter(|s| s.id == id && s.practice_id == practice_id)
        {
            row.order = order;
            affected += 1;
        }
        Ok(affected)
    }

    fn delete_set(&mut self, id: SetId, practice_id: PracticeId) -> Result<usize> {
        self.write()?;
        self.require(!self.working.set_dogs.iter().any(|d| d.set_id == id))?;
        let before = self.working.sets.len();
        self.working.sets.retain(|s| !(s.id == id && s.practice_id == practice_id));
        Ok(before - self.working.sets.len())
    }

    fn delete_sets_for_practice(&mut self, practice_id: PracticeId) -> Result<usize> {
        self.write()?;
        let owned: Vec<_> = self
            .working
            .sets
            .iter()
            .filter(|s| s.practice_id == practice_id)
            .map(|s| s.id)
            .collect();
        self.require(!self.working.set_dogs.iter().any(|d| owned.contains(&d.set_id)))?;
        self.working.sets.retain(|s| s.practice_id != practice_id);
        Ok(owned.len())
    }

    fn insert_set_dog(&mut self, set_dog: &SetDog) -> Result<()> {
        self.write()?;
        self.require(
            self.working.sets.iter().any(|s| s.id == set_dog.set_id)
                && self.working.dogs.iter().any(|d| d.id == set_dog.dog_id),
        )?;
        if self
            .working
            .set_dogs
            .iter()
            .any(|d| d.set_id == set_dog.set_id && d.dog_id == set_dog.dog_id)
        {
            return Err(PlannerError::Conflict("set dog already exists".into()));
        }
        self.working.set_dogs.push(set_dog.clone());
        Ok(())
    }

    fn list_set_dogs(&mut self, set_id: SetId) -> Result<Vec<SetDog>> {
        let mut rows: Vec<_> =
            self.working.set_dogs.iter().filter(|d| d.set_id == set_id).cloned().collect();
        rows.sort_by_key(|row| row.order);
        Ok(rows)
    }

    fn update_set_dog_order(&mut self, set_id: SetId, dog_id: DogId, order: i32) -> Result<usize> {
        self.write()?;
        let mut affected = 0;
        for row in
            self.working.set_dogs.iter_mut().filter(|d| d.set_id == set_id && d.dog_id == dog_id)
        {
            row.order = order;
            affected += 1;
        }
        Ok(affected)
    }

    fn delete_set_dogs(&mut self, set_id: SetId) -> Result<usize> {
        self.write()?;
        let before = self.working.set_dogs.len();
        self.working.set_dogs.retain(|d| d.set_id != set_id);
        Ok(before - self.working.set_dogs.len())
    }

    fn delete_set_dogs_for_practice(&mut self, practice_id: PracticeId) -> Result<usize> {
        self.write()?;
        let owned: Vec<_> = self
            .working
            .sets
            .iter()
            .filter(|s| s.practice_id == practice_id)
            .map(|s| s.id)
            .collect();
        let before = self.working.set_dogs.len();
        self.working.set_dogs.retain(|d| !owned.contains(&d.set_id));
        Ok(before - self.working.set_dogs.len())
    }
}

impl AttendanceStore for MemoryTransaction<'_> {
    fn find_attendance(
        &mut self,
        practice_id: PracticeId,
        dog_id: DogId,
    ) -> Result<Option<PracticeAttendance>> {
        Ok(self
            .working
            .attendance
            .iter()
            .find(|a| a.practice_id == practice_id && a.dog_id == dog_id)
            .cloned())
    }

    fn list_attendance(&mut self, practice_id: PracticeId) -> Result<Vec<PracticeAttendance>> {
        Ok(self.working.attendance.iter().filter(|a| a.practice_id == practice_id).cloned().collect())
    }

    fn insert_attendance(&mut self, attendance: &PracticeAttendance) -> Result<()> {
        self.write()?;
        self.require(
            self.working.practices.iter().any(|p| p.id == attendance.practice_id)
                && self.working.dogs.iter().any(|d| d.id == attendance.dog_id),
        )?;
        self.working.attendance.push(attendance.clone());
        Ok(())
    }

    fn update_attendance_status(
        &mut self,
        id: AttendanceId,
        attending: AttendanceStatus,
    ) -> Result<usize> {
        self.write()?;
        let mut affected = 0;
        for row in self.working.attendance.iter_mut().filter(|a| a.id == id) {
            row.attending = attending;
            affected += 1;
        }
        Ok(affected)
    }

    fn delete_attendance_for_practice(&mut self, practice_id: PracticeId) -> Result<usize> {
        self.write()?;
        let before = self.working.attendance.len();
        self.working.attendance.retain(|a| a.practice_id != practice_id);
        Ok(before - self.working.attendance.len())
    }
}

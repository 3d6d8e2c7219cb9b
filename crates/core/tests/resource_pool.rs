//! ResourcePool behaviour against the in-memory store

mod support;

use std::sync::Arc;

use flyball_core::ResourcePool;
use flyball_domain::{
    ClubId, DefaultDeletionPolicy, ErrorKind, NewResource, PracticeSet, ResourceKind,
    ResourcePatch, SchedulingConfig,
};
use support::{days_from_now, shared, MemoryStore};

fn pool(store: &MemoryStore) -> ResourcePool {
    ResourcePool::new(shared(store), SchedulingConfig::default())
}

fn reassigning_pool(store: &MemoryStore) -> ResourcePool {
    ResourcePool::new(
        shared(store),
        SchedulingConfig {
            resource_kind: ResourceKind::Room,
            default_deletion: DefaultDeletionPolicy::Reassign,
        },
    )
}

fn default_count(store: &MemoryStore, club_id: ClubId) -> usize {
    store.resources(club_id).iter().filter(|r| r.is_default).count()
}

#[tokio::test]
async fn first_resource_becomes_default() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = pool(&store);

    let first = pool.create(club.id, NewResource::named("Barn")).await.expect("create first");
    let second = pool.create(club.id, NewResource::named("Park")).await.expect("create second");

    assert!(first.is_default);
    assert!(!second.is_default);
    assert!(first.is_double_lane);
    assert_eq!(default_count(&store, club.id), 1);
}

#[tokio::test]
async fn promotion_scenario_keeps_one_default() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = pool(&store);

    let l1 = pool.create(club.id, NewResource::named("L1")).await.expect("create L1");
    let l2 = pool.create(club.id, NewResource::named("L2")).await.expect("create L2");
    assert!(!l2.is_default);

    let promoted = pool.set_as_default(l2.id, club.id).await.expect("promote L2");
    assert!(promoted.is_default);
    assert!(!pool.get(l1.id, club.id).await.expect("get L1").is_default);

    pool.delete(l1.id, club.id).await.expect("delete L1");

    let err = pool.delete(l2.id, club.id).await.expect_err("last resource must stay");
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(err.message().contains("last location"));

    let remaining = store.resources(club.id);
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].is_default);
}

#[tokio::test]
async fn deleting_the_default_is_rejected_by_default() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = pool(&store);

    let main = pool.create(club.id, NewResource::named("Main")).await.expect("create");
    pool.create(club.id, NewResource::named("Annex")).await.expect("create");

    let err = pool.delete(main.id, club.id).await.expect_err("default is protected");
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(store.resources(club.id).len(), 2);
    assert_eq!(default_count(&store, club.id), 1);
}

#[tokio::test]
async fn reassign_policy_promotes_lowest_name_before_delete() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = reassigning_pool(&store);

    let main = pool.create(club.id, NewResource::named("Main")).await.expect("create");
    pool.create(club.id, NewResource::named("Zeta")).await.expect("create");
    let annex = pool.create(club.id, NewResource::named("Annex")).await.expect("create");

    let promoted = pool
        .delete(main.id, club.id)
        .await
        .expect("delete default")
        .expect("a replacement is promoted");

    assert_eq!(promoted.id, annex.id);
    assert!(promoted.is_default);
    assert_eq!(store.resources(club.id).len(), 2);
    assert_eq!(default_count(&store, club.id), 1);
}

#[tokio::test]
async fn deleting_a_non_default_returns_no_promotion() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = reassigning_pool(&store);

    pool.create(club.id, NewResource::named("Main")).await.expect("create");
    let other = pool.create(club.id, NewResource::named("Other")).await.expect("create");

    assert!(pool.delete(other.id, club.id).await.expect("delete").is_none());
}

#[tokio::test]
async fn make_default_on_create_moves_the_flag() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = pool(&store);

    let old = pool.create(club.id, NewResource::named("Old")).await.expect("create");
    let new = pool
        .create(club.id, NewResource::named("New").as_default())
        .await
        .expect("create default");

    assert!(new.is_default);
    assert!(!pool.get(old.id, club.id).await.expect("get").is_default);
    assert_eq!(default_count(&store, club.id), 1);
}

#[tokio::test]
async fn update_with_is_default_promotes_and_applies_fields() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = pool(&store);

    pool.create(club.id, NewResource::named("Main")).await.expect("create");
    let side = pool.create(club.id, NewResource::named("Side")).await.expect("create");

    let patch = ResourcePatch {
        name: Some("  Side Hall ".into()),
        is_default: Some(true),
        is_double_lane: Some(false),
    };
    let updated = pool.update(side.id, club.id, patch).await.expect("update");

    assert_eq!(updated.name, "Side Hall");
    assert!(updated.is_default);
    assert!(!updated.is_double_lane);
    assert_eq!(default_count(&store, club.id), 1);
}

#[tokio::test]
async fn unsetting_the_default_is_a_conflict() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = pool(&store);

    let main = pool.create(club.id, NewResource::named("Main")).await.expect("create");
    let patch = ResourcePatch { is_default: Some(false), ..ResourcePatch::default() };

    let err = pool.update(main.id, club.id, patch).await.expect_err("would leave no default");
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(store.resources(club.id)[0].is_default);
}

#[tokio::test]
async fn name_only_update_leaves_default_alone() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = pool(&store);

    let main = pool.create(club.id, NewResource::named("Main")).await.expect("create");
    let patch = ResourcePatch { name: Some("Arena".into()), ..ResourcePatch::default() };

    let updated = pool.update(main.id, club.id, patch).await.expect("rename");
    assert_eq!(updated.name, "Arena");
    assert!(updated.is_default);
}

#[tokio::test]
async fn resources_are_scoped_to_their_club() {
    let store = MemoryStore::new();
    let mine = store.seed_club("Mine");
    let theirs = store.seed_club("Theirs");
    let pool = pool(&store);

    let barn = pool.create(mine.id, NewResource::named("Barn")).await.expect("create");
    pool.create(mine.id, NewResource::named("Yard")).await.expect("create");

    let err = pool.set_as_default(barn.id, theirs.id).await.expect_err("wrong club");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = pool.delete(barn.id, theirs.id).await.expect_err("wrong club");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(store.resources(mine.id).len(), 2);
}

#[tokio::test]
async fn create_validates_name_and_club() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = pool(&store);

    let err = pool.create(club.id, NewResource::named("   ")).await.expect_err("blank name");
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = pool
        .create(ClubId::new(), NewResource::named("Barn"))
        .await
        .expect_err("unknown club");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert!(store.resources(club.id).is_empty());
}

#[tokio::test]
async fn list_is_ordered_by_name() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = pool(&store);

    for name in ["Yard", "Arena", "Meadow"] {
        pool.create(club.id, NewResource::named(name)).await.expect("create");
    }

    let names: Vec<_> =
        pool.list(club.id).await.expect("list").into_iter().map(|r| r.name).collect();
    assert_eq!(names, ["Arena", "Meadow", "Yard"]);
}

#[tokio::test]
async fn resource_in_use_by_a_set_cannot_be_deleted() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = pool(&store);
    let scheduler =
        flyball_core::PracticeScheduler::new(shared(&store), support::clock());
    let engine = flyball_core::SetOrderingEngine::new(shared(&store));

    pool.create(club.id, NewResource::named("Main")).await.expect("create");
    let side = pool.create(club.id, NewResource::named("Side")).await.expect("create");
    let practice = scheduler.create(club.id, days_from_now(3)).await.expect("practice");
    let set: PracticeSet = engine.create_set(practice.id, side.id, 1).await.expect("set");

    let err = pool.delete(side.id, club.id).await.expect_err("resource in use");
    assert_eq!(err.kind(), ErrorKind::Conflict);

    engine.delete_set(set.id, practice.id).await.expect("delete set");
    pool.delete(side.id, club.id).await.expect("delete now unused resource");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_promotions_leave_exactly_one_default() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = Arc::new(pool(&store));

    let mut ids = Vec::new();
    for name in ["A", "B", "C", "D", "E"] {
        ids.push(pool.create(club.id, NewResource::named(name)).await.expect("create").id);
    }

    let mut handles = Vec::new();
    for round in 0..20 {
        let pool = Arc::clone(&pool);
        let id = ids[round % ids.len()];
        let club_id = club.id;
        handles.push(tokio::spawn(async move { pool.set_as_default(id, club_id).await }));
    }
    for handle in handles {
        handle.await.expect("join").expect("promote");
    }

    assert_eq!(default_count(&store, club.id), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deletes_never_empty_the_pool() {
    let store = MemoryStore::new();
    let club = store.seed_club("Zoomies");
    let pool = Arc::new(reassigning_pool(&store));

    let a = pool.create(club.id, NewResource::named("A")).await.expect("create");
    let b = pool.create(club.id, NewResource::named("B")).await.expect("create");

    let first = {
        let pool = Arc::clone(&pool);
        let club_id = club.id;
        tokio::spawn(async move { pool.delete(a.id, club_id).await })
    };
    let second = {
        let pool = Arc::clone(&pool);
        let club_id = club.id;
        tokio::spawn(async move { pool.delete(b.id, club_id).await })
    };

    let results = [first.await.expect("join"), second.await.expect("join")];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);

    let remaining = store.resources(club.id);
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].is_default);
}

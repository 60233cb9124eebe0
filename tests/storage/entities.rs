//! Integration tests for entity storage
//!
//! Tests entity spawning, destruction, generational indices, and raw-id lookup.

use tether_foundation::{EntityId, ErrorKind};
use tether_storage::EntityStore;

// =============================================================================
// Entity Spawning
// =============================================================================

#[test]
fn spawn_multiple_entities() {
    let mut store = EntityStore::new();
    let e1 = store.spawn();
    let e2 = store.spawn();
    let e3 = store.spawn();

    assert!(store.exists(e1));
    assert!(store.exists(e2));
    assert!(store.exists(e3));
    assert_eq!(store.len(), 3);

    assert_ne!(e1.index, e2.index);
    assert_ne!(e2.index, e3.index);
}

#[test]
fn iterate_live_entities() {
    let mut store = EntityStore::new();
    let e1 = store.spawn();
    let e2 = store.spawn();
    store.destroy(e1).unwrap();

    assert_eq!(store.iter().collect::<Vec<_>>(), vec![e2]);
}

// =============================================================================
// Entity Destruction
// =============================================================================

#[test]
fn destroy_entity() {
    let mut store = EntityStore::new();
    let e = store.spawn();
    store.destroy(e).unwrap();

    assert!(!store.exists(e));
    assert!(store.is_empty());
}

#[test]
fn destroy_twice_is_stale() {
    let mut store = EntityStore::new();
    let e = store.spawn();
    store.destroy(e).unwrap();

    let err = store.destroy(e).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleEntity(_)));
}

#[test]
fn reused_index_bumps_generation() {
    let mut store = EntityStore::new();
    let old = store.spawn();
    store.destroy(old).unwrap();
    let new = store.spawn();

    assert!(old.same_slot(new));
    assert!(new.generation > old.generation);
    assert!(!store.exists(old));
    assert!(matches!(
        store.validate(old).unwrap_err().kind,
        ErrorKind::StaleEntity(_)
    ));
}

#[test]
fn validate_unknown_index() {
    let store = EntityStore::new();
    let err = store.validate(EntityId::new(5, 1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EntityNotFound(_)));
}

// =============================================================================
// Raw-id Lookup
// =============================================================================

#[test]
fn latest_follows_allocation() {
    let mut store = EntityStore::new();
    let e = store.spawn();

    assert_eq!(store.latest(e.index), Some(e));
    assert_eq!(store.latest(1), None);
}

#[test]
fn latest_still_names_destroyed_entity() {
    let mut store = EntityStore::new();
    let e = store.spawn();
    store.destroy(e).unwrap();

    assert_eq!(store.latest(e.index), Some(e));

    let replacement = store.spawn();
    assert_eq!(store.latest(e.index), Some(replacement));
}

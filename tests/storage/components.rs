//! Integration tests for component storage
//!
//! Tests schema registration, field validation, and in-place component edits.

use tether_foundation::{EntityId, ErrorKind, Interner, KeywordId, Type, Value};
use tether_storage::{ComponentSchema, ComponentStore, EntityStore, FieldSchema, LinkPolicy};

struct Follower {
    name: KeywordId,
    target: KeywordId,
    allies: KeywordId,
    owner_id: KeywordId,
}

fn follower(interner: &mut Interner) -> (Follower, ComponentSchema) {
    let names = Follower {
        name: interner.intern_keyword("follower"),
        target: interner.intern_keyword("target"),
        allies: interner.intern_keyword("allies"),
        owner_id: interner.intern_keyword("owner-id"),
    };
    let schema = ComponentSchema::new(names.name)
        .with_field(FieldSchema::optional_nil(names.target, Type::EntityRef))
        .with_field(FieldSchema::optional(
            names.allies,
            Type::vec(Type::EntityRef),
            Value::from(Vec::<EntityId>::new()),
        ))
        .with_field(FieldSchema::required(names.owner_id, Type::Int));
    (names, schema)
}

// =============================================================================
// Schemas
// =============================================================================

#[test]
fn register_and_lookup_schema() {
    let mut interner = Interner::new();
    let (names, schema) = follower(&mut interner);
    let mut store = ComponentStore::new();

    store.register_schema(schema.clone()).unwrap();
    assert_eq!(store.schema(names.name), Some(&schema));
    assert_eq!(store.schemas().count(), 1);
}

#[test]
fn duplicate_registration_fails() {
    let mut interner = Interner::new();
    let (_, schema) = follower(&mut interner);
    let mut store = ComponentStore::new();

    store.register_schema(schema.clone()).unwrap();
    assert!(store.register_schema(schema).is_err());
}

#[test]
fn replace_schema_returns_previous() {
    let mut interner = Interner::new();
    let (names, schema) = follower(&mut interner);
    let cached = interner.intern_keyword("cached-target-id");
    let mut store = ComponentStore::new();
    store.register_schema(schema.clone()).unwrap();

    let v2 = schema.clone().with_field(
        FieldSchema::optional_nil(cached, Type::Int)
            .with_entity_id()
            .with_link_policy(LinkPolicy::Skip),
    );
    let previous = store.replace_schema(v2).unwrap();

    assert_eq!(previous, schema);
    assert_eq!(store.schema(names.name).unwrap().fields.len(), 4);
}

// =============================================================================
// Component Values
// =============================================================================

#[test]
fn set_and_get_component() {
    let mut interner = Interner::new();
    let (names, schema) = follower(&mut interner);
    let mut entities = EntityStore::new();
    let (e, boss) = (entities.spawn(), entities.spawn());
    let mut store = ComponentStore::new();
    store.register_schema(schema).unwrap();

    let value = Value::component()
        .with_field(names.target, Value::EntityRef(boss))
        .unwrap()
        .with_field(names.owner_id, Value::Int(7))
        .unwrap();
    store.set(e, names.name, value).unwrap();

    assert!(store.has(e, names.name));
    assert_eq!(
        store.get_field(e, names.name, names.target),
        Some(&Value::EntityRef(boss))
    );
    assert_eq!(store.with_component(names.name).collect::<Vec<_>>(), vec![e]);
}

#[test]
fn missing_required_field_fails() {
    let mut interner = Interner::new();
    let (names, schema) = follower(&mut interner);
    let mut store = ComponentStore::new();
    store.register_schema(schema).unwrap();

    let err = store
        .set(EntityId::new(0, 1), names.name, Value::component())
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::AttributeNotFound { attribute, .. } if attribute == names.owner_id
    ));
}

#[test]
fn wrong_field_type_fails() {
    let mut interner = Interner::new();
    let (names, schema) = follower(&mut interner);
    let mut store = ComponentStore::new();
    store.register_schema(schema).unwrap();

    let value = Value::component()
        .with_field(names.target, Value::Int(3))
        .unwrap()
        .with_field(names.owner_id, Value::Int(7))
        .unwrap();
    let err = store.set(EntityId::new(0, 1), names.name, value).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn set_field_fills_defaults() {
    let mut interner = Interner::new();
    let (names, schema) = follower(&mut interner);
    let e = EntityId::new(0, 1);
    let mut store = ComponentStore::new();
    store.register_schema(schema).unwrap();

    store
        .set_field(e, names.name, names.owner_id, Value::Int(2))
        .unwrap();

    assert_eq!(
        store.get_field(e, names.name, names.allies),
        Some(&Value::from(Vec::<EntityId>::new()))
    );
    assert_eq!(store.get_field(e, names.name, names.target), None);
}

#[test]
fn set_field_unknown_field_fails() {
    let mut interner = Interner::new();
    let (names, schema) = follower(&mut interner);
    let stray = interner.intern_keyword("stray");
    let mut store = ComponentStore::new();
    store.register_schema(schema).unwrap();

    let err = store
        .set_field(EntityId::new(0, 1), names.name, stray, Value::Nil)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AttributeNotFound { .. }));
}

#[test]
fn get_mut_edits_in_place() {
    let mut interner = Interner::new();
    let (names, schema) = follower(&mut interner);
    let e = EntityId::new(0, 1);
    let mut store = ComponentStore::new();
    store.register_schema(schema).unwrap();
    store
        .set_field(e, names.name, names.owner_id, Value::Int(2))
        .unwrap();

    let value = store.get_mut(e, names.name).unwrap();
    *value = value.with_field(names.owner_id, Value::Int(9)).unwrap();

    assert_eq!(
        store.get_field(e, names.name, names.owner_id),
        Some(&Value::Int(9))
    );
}

#[test]
fn remove_entity_clears_components() {
    let mut interner = Interner::new();
    let (names, schema) = follower(&mut interner);
    let e = EntityId::new(0, 1);
    let mut store = ComponentStore::new();
    store.register_schema(schema).unwrap();
    store
        .set_field(e, names.name, names.owner_id, Value::Int(2))
        .unwrap();

    store.remove_entity(e);
    assert!(!store.has(e, names.name));
    assert!(store.remove(e, names.name).is_none());
}

//! Integration tests for the link table
//!
//! Tests cached discovery against a component store: destroying an entity
//! and fixing up every reference to it, and refreshing sites after a
//! schema is replaced.

use std::sync::{Arc, RwLock};

use tether_foundation::{EntityId, Interner, KeywordId, Type, Value};
use tether_link::{LinkFactory, LinkTable, MutatorRegistry};
use tether_storage::{ComponentSchema, ComponentStore, EntityStore, FieldSchema, LinkPolicy};

use crate::init_tracing;

struct World {
    entities: Arc<RwLock<EntityStore>>,
    components: ComponentStore,
    factory: LinkFactory,
    table: LinkTable,
}

struct Names {
    follower: KeywordId,
    target: KeywordId,
    allies: KeywordId,
    squad_id: KeywordId,
    cached: KeywordId,
}

fn names(interner: &mut Interner) -> Names {
    Names {
        follower: interner.intern_keyword("follower"),
        target: interner.intern_keyword("target"),
        allies: interner.intern_keyword("allies"),
        squad_id: interner.intern_keyword("squad-id"),
        cached: interner.intern_keyword("cached-target-id"),
    }
}

fn follower_schema(n: &Names) -> ComponentSchema {
    ComponentSchema::new(n.follower)
        .with_field(FieldSchema::optional_nil(n.target, Type::EntityRef))
        .with_field(FieldSchema::optional_nil(n.allies, Type::vec(Type::EntityRef)))
        .with_field(FieldSchema::optional(n.squad_id, Type::Int, Value::Int(-1)).with_entity_id())
        .with_field(
            FieldSchema::optional_nil(n.cached, Type::Int)
                .with_entity_id()
                .with_link_policy(LinkPolicy::Skip),
        )
}

fn world(n: &Names) -> World {
    let entities = Arc::new(RwLock::new(EntityStore::new()));
    let factory = LinkFactory::new(MutatorRegistry::new(entities.clone()));
    let mut components = ComponentStore::new();
    let schema = follower_schema(n);
    components.register_schema(schema.clone()).unwrap();

    let mut table = LinkTable::new();
    table.discover(&factory, &schema).unwrap();

    World {
        entities,
        components,
        factory,
        table,
    }
}

impl World {
    fn spawn(&self) -> EntityId {
        self.entities.write().unwrap().spawn()
    }

    /// Destroys `victim` and strips every reference to it.
    fn destroy(&mut self, victim: EntityId) -> usize {
        self.entities.write().unwrap().destroy(victim).unwrap();
        self.components.remove_entity(victim);

        let mut changed = 0;
        let holders: Vec<(KeywordId, EntityId)> = self
            .table
            .iter()
            .flat_map(|(component, _)| {
                self.components
                    .with_component(component)
                    .map(move |e| (component, e))
            })
            .collect();
        for (component, holder) in holders {
            let value = self.components.get_mut(holder, component).unwrap();
            changed += self.table.unlink_all(component, value, victim).unwrap();
        }
        changed
    }
}

// =============================================================================
// Destroy and Fix-up
// =============================================================================

#[test]
fn destroy_clears_every_reference() {
    init_tracing();
    let mut interner = Interner::new();
    let n = names(&mut interner);
    let mut w = world(&n);

    let boss = w.spawn();
    let ally = w.spawn();
    let grunt = w.spawn();

    let value = Value::component()
        .with_field(n.target, Value::EntityRef(boss))
        .unwrap()
        .with_field(n.allies, Value::from(vec![boss, ally, boss]))
        .unwrap()
        .with_field(n.squad_id, Value::Int(i64::try_from(boss.index).unwrap()))
        .unwrap()
        .with_field(n.cached, Value::Int(i64::try_from(boss.index).unwrap()))
        .unwrap();
    w.components.set(grunt, n.follower, value).unwrap();

    assert_eq!(w.destroy(boss), 3);

    let c = w.components.get(grunt, n.follower).unwrap();
    assert_eq!(c.field(n.target), Some(&Value::Nil));
    assert_eq!(c.field(n.allies), Some(&Value::from(vec![ally])));
    assert_eq!(c.field(n.squad_id), Some(&Value::Int(-1)));
    // Excluded fields are left alone
    assert_eq!(
        c.field(n.cached),
        Some(&Value::Int(i64::try_from(boss.index).unwrap()))
    );
}

#[test]
fn destroy_leaves_unrelated_references() {
    let mut interner = Interner::new();
    let n = names(&mut interner);
    let mut w = world(&n);

    let boss = w.spawn();
    let other = w.spawn();
    let grunt = w.spawn();

    let value = Value::component()
        .with_field(n.target, Value::EntityRef(other))
        .unwrap();
    w.components.set(grunt, n.follower, value.clone()).unwrap();

    assert_eq!(w.destroy(boss), 0);
    assert_eq!(w.components.get(grunt, n.follower), Some(&value));
}

// =============================================================================
// Schema Reload
// =============================================================================

#[test]
fn replaced_schema_is_rediscovered() {
    let mut interner = Interner::new();
    let n = names(&mut interner);
    let leader = interner.intern_keyword("leader");
    let mut w = world(&n);

    let old = w.table.sites(n.follower).unwrap().clone();
    assert_eq!(old.len(), 3);

    let v2 = follower_schema(&n)
        .with_field(FieldSchema::optional_nil(leader, Type::EntityRef));
    w.components.replace_schema(v2);
    let schema = w.components.schema(n.follower).unwrap();
    let fresh = w.table.discover(&w.factory, schema).unwrap();

    assert_eq!(fresh.len(), 4);
    assert_eq!(fresh[3].field_name(), leader);
    assert_eq!(old.len(), 3);
    assert_eq!(w.table.len(), 1);
}

#[test]
fn discover_all_registered_schemas() {
    let mut interner = Interner::new();
    let n = names(&mut interner);
    let mut w = world(&n);
    let squad = interner.intern_keyword("squad");
    let members = interner.intern_keyword("member-ids");
    w.components
        .register_schema(ComponentSchema::new(squad).with_field(
            FieldSchema::optional_nil(members, Type::vec(Type::Int)).with_entity_id(),
        ))
        .unwrap();

    w.table.discover_all(&w.factory, w.components.schemas()).unwrap();

    assert_eq!(w.table.len(), 2);
    assert_eq!(w.table.sites(squad).unwrap().len(), 1);
}

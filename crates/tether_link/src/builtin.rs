//! Built-in mutators, one per linkable storage kind.
//!
//! | storage kind     | mutator                  | stored as                    |
//! |------------------|--------------------------|------------------------------|
//! | `entity-ref`     | [`EntityFieldMutator`]   | `EntityRef` or `nil`         |
//! | `int`            | [`RawIdFieldMutator`]    | `Int`, null sentinel = none  |
//! | `vec<entity-ref>`| [`EntityVecFieldMutator`]| `Vec` of `EntityRef`         |
//! | `vec<int>`       | [`RawIdVecFieldMutator`] | `Vec` of `Int`               |

use std::fmt;

use tether_foundation::{EntityId, Error, KeywordId, PVec, Result, Type, Value};

use crate::mutator::{MultiMutator, SingleMutator};
use crate::resolver::SharedResolver;

// =============================================================================
// Field access helpers
// =============================================================================

fn store(component: &mut Value, field: KeywordId, value: Value) -> Result<()> {
    let updated = component.with_field(field, value).ok_or_else(|| {
        Error::type_mismatch(Type::map(Type::Keyword, Type::Any), component.value_type())
    })?;
    *component = updated;
    Ok(())
}

/// Returns the stored collection, treating an absent or nil field as empty.
fn sequence(component: &Value, field: KeywordId) -> Result<PVec<Value>> {
    match component.field(field) {
        None | Some(Value::Nil) => Ok(PVec::new()),
        Some(Value::Vec(items)) => Ok(items.clone()),
        Some(other) => Err(Error::type_mismatch(
            Type::vec(Type::Any),
            other.value_type(),
        )),
    }
}

fn push(
    component: &mut Value,
    field: KeywordId,
    element: Value,
    unique: bool,
) -> Result<()> {
    let items = sequence(component, field)?;
    if unique && items.contains(&element) {
        return Ok(());
    }
    store(component, field, Value::Vec(items.push_back(element)))
}

fn remove_first(component: &mut Value, field: KeywordId, element: &Value) -> Result<bool> {
    let items = sequence(component, field)?;
    let Some((rest, _)) = items.position(element).and_then(|index| items.remove(index)) else {
        return Ok(false);
    };
    store(component, field, Value::Vec(rest))?;
    Ok(true)
}

fn remove_every(component: &mut Value, field: KeywordId, element: &Value) -> Result<usize> {
    let items = sequence(component, field)?;
    let rest = items.retain(|item| item != element);
    let removed = items.len() - rest.len();
    if removed > 0 {
        store(component, field, Value::Vec(rest))?;
    }
    Ok(removed)
}

fn raw_id_of(resolver: &SharedResolver, target: EntityId) -> Result<i64> {
    resolver
        .raw_id(target)
        .ok_or_else(|| Error::internal(format!("{target:?} has no raw id")))
}

// =============================================================================
// Single-reference mutators
// =============================================================================

/// Mutator for `entity-ref` fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntityFieldMutator;

impl SingleMutator for EntityFieldMutator {
    fn read(&self, component: &Value, field: KeywordId) -> Option<EntityId> {
        component.field(field)?.as_entity()
    }

    fn write(
        &self,
        component: &mut Value,
        field: KeywordId,
        target: Option<EntityId>,
    ) -> Result<()> {
        store(component, field, target.map_or(Value::Nil, Value::EntityRef))
    }
}

/// Mutator for `int` fields marked as holding raw entity ids.
pub struct RawIdFieldMutator {
    resolver: SharedResolver,
    null_raw_id: i64,
}

impl RawIdFieldMutator {
    /// Creates a mutator translating through `resolver`.
    #[must_use]
    pub fn new(resolver: SharedResolver, null_raw_id: i64) -> Self {
        Self {
            resolver,
            null_raw_id,
        }
    }
}

impl SingleMutator for RawIdFieldMutator {
    fn read(&self, component: &Value, field: KeywordId) -> Option<EntityId> {
        let raw = component.field(field)?.as_int()?;
        if raw == self.null_raw_id {
            return None;
        }
        self.resolver.resolve(raw)
    }

    fn write(
        &self,
        component: &mut Value,
        field: KeywordId,
        target: Option<EntityId>,
    ) -> Result<()> {
        let raw = match target {
            Some(entity) => {
                let raw = raw_id_of(&self.resolver, entity)?;
                // Storing the sentinel would read back as no reference
                if raw == self.null_raw_id {
                    return Err(Error::internal(format!(
                        "raw id of {entity:?} collides with the null raw id {raw}"
                    )));
                }
                raw
            }
            None => self.null_raw_id,
        };
        store(component, field, Value::Int(raw))
    }
}

impl fmt::Debug for RawIdFieldMutator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawIdFieldMutator")
            .field("null_raw_id", &self.null_raw_id)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Multi-reference mutators
// =============================================================================

/// Mutator for `vec<entity-ref>` fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntityVecFieldMutator {
    unique: bool,
}

impl EntityVecFieldMutator {
    /// Creates a mutator; `unique` rejects duplicate adds.
    #[must_use]
    pub fn new(unique: bool) -> Self {
        Self { unique }
    }
}

impl MultiMutator for EntityVecFieldMutator {
    fn read(&self, component: &Value, field: KeywordId) -> Vec<EntityId> {
        component
            .field(field)
            .and_then(Value::as_vec)
            .map(|items| items.iter().filter_map(Value::as_entity).collect())
            .unwrap_or_default()
    }

    fn add(&self, component: &mut Value, field: KeywordId, target: EntityId) -> Result<()> {
        push(component, field, Value::EntityRef(target), self.unique)
    }

    fn remove(&self, component: &mut Value, field: KeywordId, target: EntityId) -> Result<bool> {
        remove_first(component, field, &Value::EntityRef(target))
    }

    fn remove_all(
        &self,
        component: &mut Value,
        field: KeywordId,
        target: EntityId,
    ) -> Result<usize> {
        remove_every(component, field, &Value::EntityRef(target))
    }

    fn clear(&self, component: &mut Value, field: KeywordId) -> Result<()> {
        store(component, field, Value::Vec(PVec::new()))
    }
}

/// Mutator for `vec<int>` fields marked as holding raw entity ids.
///
/// Ids the resolver cannot map are left in place but omitted from reads.
pub struct RawIdVecFieldMutator {
    resolver: SharedResolver,
    unique: bool,
}

impl RawIdVecFieldMutator {
    /// Creates a mutator translating through `resolver`.
    #[must_use]
    pub fn new(resolver: SharedResolver, unique: bool) -> Self {
        Self { resolver, unique }
    }
}

impl MultiMutator for RawIdVecFieldMutator {
    fn read(&self, component: &Value, field: KeywordId) -> Vec<EntityId> {
        component
            .field(field)
            .and_then(Value::as_vec)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_int)
                    .filter_map(|raw| self.resolver.resolve(raw))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn add(&self, component: &mut Value, field: KeywordId, target: EntityId) -> Result<()> {
        let raw = raw_id_of(&self.resolver, target)?;
        push(component, field, Value::Int(raw), self.unique)
    }

    fn remove(&self, component: &mut Value, field: KeywordId, target: EntityId) -> Result<bool> {
        let raw = raw_id_of(&self.resolver, target)?;
        remove_first(component, field, &Value::Int(raw))
    }

    fn remove_all(
        &self,
        component: &mut Value,
        field: KeywordId,
        target: EntityId,
    ) -> Result<usize> {
        let raw = raw_id_of(&self.resolver, target)?;
        remove_every(component, field, &Value::Int(raw))
    }

    fn clear(&self, component: &mut Value, field: KeywordId) -> Result<()> {
        store(component, field, Value::Vec(PVec::new()))
    }
}

impl fmt::Debug for RawIdVecFieldMutator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawIdVecFieldMutator")
            .field("unique", &self.unique)
            .finish_non_exhaustive()
    }
}

//! Reference classification for component fields.
//!
//! Classification looks only at a field's declared type and its explicit
//! entity-id marker. It never fails: fields that do not look like entity
//! references classify as [`Cardinality::None`] and are skipped.

use tether_foundation::Type;
use tether_storage::FieldSchema;

/// Storage representation of a field, as far as linking is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// `entity-ref`
    EntityHandle,
    /// `int`
    RawId,
    /// `vec<entity-ref>`
    EntityHandles,
    /// `vec<int>`
    RawIds,
    /// Anything else.
    Other,
}

impl StorageKind {
    /// Maps a declared field type to its storage kind.
    #[must_use]
    pub fn of(ty: &Type) -> Self {
        match ty {
            Type::EntityRef => Self::EntityHandle,
            Type::Int => Self::RawId,
            Type::Vec(elem) => match elem.as_ref() {
                Type::EntityRef => Self::EntityHandles,
                Type::Int => Self::RawIds,
                _ => Self::Other,
            },
            _ => Self::Other,
        }
    }
}

/// How many entity references a field holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Not a reference field.
    None,
    /// At most one reference.
    Single,
    /// A collection of references.
    Multi,
}

impl Cardinality {
    /// Returns true for `Single` and `Multi`.
    #[must_use]
    pub const fn is_reference(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Classifies a field by the references it holds.
///
/// Raw integer fields count only when marked with
/// [`FieldSchema::with_entity_id`].
#[must_use]
pub fn classify(field: &FieldSchema) -> Cardinality {
    match (StorageKind::of(&field.ty), field.entity_id) {
        (StorageKind::EntityHandle, _) | (StorageKind::RawId, true) => Cardinality::Single,
        (StorageKind::EntityHandles, _) | (StorageKind::RawIds, true) => Cardinality::Multi,
        _ => Cardinality::None,
    }
}

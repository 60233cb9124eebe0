//! Mutator contracts for reference fields.
//!
//! A mutator reads and rewrites one reference field on a live component
//! value without its caller knowing how the field is stored. Single and
//! multi references have disjoint capability sets, so they are separate
//! traits joined by the [`Mutator`] tagged union.
//!
//! Mutators are stateless with respect to individual fields: the field is
//! passed on every call, which lets one instance serve every link site of a
//! matching storage kind.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use tether_foundation::{EntityId, KeywordId, Result, Value};

use crate::classify::Cardinality;

/// Capabilities of a field holding at most one entity reference.
pub trait SingleMutator: Send + Sync {
    /// Reads the referenced entity, or `None` if the field is empty,
    /// absent, or not shaped like a reference.
    fn read(&self, component: &Value, field: KeywordId) -> Option<EntityId>;

    /// Points the field at `target`, or clears it when `target` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if `component` is not a component map or the target
    /// cannot be represented in the field.
    fn write(&self, component: &mut Value, field: KeywordId, target: Option<EntityId>)
    -> Result<()>;

    /// Name used in logs and diagnostics.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// Capabilities of a field holding a collection of entity references.
pub trait MultiMutator: Send + Sync {
    /// Reads the referenced entities in stored order.
    fn read(&self, component: &Value, field: KeywordId) -> Vec<EntityId>;

    /// Adds `target` to the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if `component` is not a component map or the field
    /// holds something other than a collection.
    fn add(&self, component: &mut Value, field: KeywordId, target: EntityId) -> Result<()>;

    /// Removes the first occurrence of `target`, reporting whether one was
    /// found.
    ///
    /// # Errors
    ///
    /// Same conditions as [`MultiMutator::add`].
    fn remove(&self, component: &mut Value, field: KeywordId, target: EntityId) -> Result<bool>;

    /// Removes every occurrence of `target`, returning how many were
    /// removed.
    ///
    /// The default calls [`MultiMutator::remove`] until it reports nothing
    /// left, at most once per stored reference plus one. Mutators whose
    /// reads can omit stored entries should override this.
    ///
    /// # Errors
    ///
    /// Same conditions as [`MultiMutator::add`].
    fn remove_all(
        &self,
        component: &mut Value,
        field: KeywordId,
        target: EntityId,
    ) -> Result<usize> {
        let bound = self.read(component, field).len() + 1;
        let mut removed = 0;
        for _ in 0..bound {
            if !self.remove(component, field, target)? {
                break;
            }
            removed += 1;
        }
        Ok(removed)
    }

    /// Empties the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if `component` is not a component map.
    fn clear(&self, component: &mut Value, field: KeywordId) -> Result<()>;

    /// Name used in logs and diagnostics.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// A mutator of either cardinality.
///
/// The variant is the cardinality, so a `Single` mutator can never be bound
/// to a multi-reference site or the other way round.
#[derive(Clone)]
pub enum Mutator {
    /// Single-reference capabilities.
    Single(Arc<dyn SingleMutator>),
    /// Multi-reference capabilities.
    Multi(Arc<dyn MultiMutator>),
}

impl Mutator {
    /// Wraps a single-reference mutator.
    pub fn single(mutator: impl SingleMutator + 'static) -> Self {
        Self::Single(Arc::new(mutator))
    }

    /// Wraps a multi-reference mutator.
    pub fn multi(mutator: impl MultiMutator + 'static) -> Self {
        Self::Multi(Arc::new(mutator))
    }

    /// Returns the cardinality this mutator serves.
    #[must_use]
    pub fn cardinality(&self) -> Cardinality {
        match self {
            Self::Single(_) => Cardinality::Single,
            Self::Multi(_) => Cardinality::Multi,
        }
    }

    /// Returns the mutator's diagnostic name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Single(m) => m.name(),
            Self::Multi(m) => m.name(),
        }
    }

    /// Returns the single-reference capabilities, if this is one.
    #[must_use]
    pub fn as_single(&self) -> Option<&dyn SingleMutator> {
        match self {
            Self::Single(m) => Some(m.as_ref()),
            Self::Multi(_) => None,
        }
    }

    /// Returns the multi-reference capabilities, if this is one.
    #[must_use]
    pub fn as_multi(&self) -> Option<&dyn MultiMutator> {
        match self {
            Self::Multi(m) => Some(m.as_ref()),
            Self::Single(_) => None,
        }
    }

    /// Returns true if both wrap the same mutator instance.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Single(a), Self::Single(b)) => Arc::ptr_eq(a, b),
            (Self::Multi(a), Self::Multi(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Mutator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(m) => f.debug_tuple("Single").field(&m.name()).finish(),
            Self::Multi(m) => f.debug_tuple("Multi").field(&m.name()).finish(),
        }
    }
}

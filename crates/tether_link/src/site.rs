//! Link sites: one reference field bound to its mutator.

use tether_foundation::{EntityId, KeywordId, Result, Value};
use tether_storage::FieldSchema;

use crate::classify::Cardinality;
use crate::mutator::{Mutator, MultiMutator, SingleMutator};

/// A reference field of one component, ready for fix-up.
///
/// Sites are produced by [`LinkFactory::discover`](crate::LinkFactory::discover)
/// and never edited afterwards; rediscovery produces new ones.
#[derive(Clone, Debug)]
pub struct LinkSite {
    component: KeywordId,
    field: FieldSchema,
    mutator: Mutator,
}

impl LinkSite {
    pub(crate) fn new(component: KeywordId, field: FieldSchema, mutator: Mutator) -> Self {
        Self {
            component,
            field,
            mutator,
        }
    }

    /// Name of the component type declaring the field.
    #[must_use]
    pub fn component(&self) -> KeywordId {
        self.component
    }

    /// The field descriptor.
    #[must_use]
    pub fn field(&self) -> &FieldSchema {
        &self.field
    }

    /// Shorthand for `field().name`.
    #[must_use]
    pub fn field_name(&self) -> KeywordId {
        self.field.name
    }

    /// Cardinality of the reference, as served by the mutator.
    #[must_use]
    pub fn cardinality(&self) -> Cardinality {
        self.mutator.cardinality()
    }

    /// The bound mutator.
    #[must_use]
    pub fn mutator(&self) -> &Mutator {
        &self.mutator
    }

    /// Single-reference capabilities, for `Single` sites.
    #[must_use]
    pub fn as_single(&self) -> Option<&dyn SingleMutator> {
        self.mutator.as_single()
    }

    /// Multi-reference capabilities, for `Multi` sites.
    #[must_use]
    pub fn as_multi(&self) -> Option<&dyn MultiMutator> {
        self.mutator.as_multi()
    }

    /// Reads every entity this site references in `component`.
    #[must_use]
    pub fn targets(&self, component: &Value) -> Vec<EntityId> {
        match &self.mutator {
            Mutator::Single(m) => m.read(component, self.field.name).into_iter().collect(),
            Mutator::Multi(m) => m.read(component, self.field.name),
        }
    }

    /// Drops every reference to `target` held by this site.
    ///
    /// A single reference is cleared only if it points at `target`; a
    /// collection loses every stored occurrence, including ones its reads
    /// cannot resolve. Returns whether `component` changed.
    ///
    /// # Errors
    ///
    /// Propagates failures from the mutator's write operations.
    pub fn unlink(&self, component: &mut Value, target: EntityId) -> Result<bool> {
        let field = self.field.name;
        match &self.mutator {
            Mutator::Single(m) => {
                if m.read(component, field) != Some(target) {
                    return Ok(false);
                }
                m.write(component, field, None)?;
                Ok(true)
            }
            Mutator::Multi(m) => Ok(m.remove_all(component, field, target)? > 0),
        }
    }
}

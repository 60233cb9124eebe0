//! Mutator resolution for reference fields.
//!
//! Resolution prefers a component-local override registered for the exact
//! `(component, field)` pair, then falls back to the built-in for the
//! field's storage kind. Built-ins are constructed once per registry and
//! shared by every link site they serve.

use std::collections::HashMap;
use std::fmt;

use tether_foundation::{Error, KeywordId, Result};
use tether_storage::{ComponentSchema, FieldSchema};
use tracing::warn;

use crate::builtin::{
    EntityFieldMutator, EntityVecFieldMutator, RawIdFieldMutator, RawIdVecFieldMutator,
};
use crate::classify::{Cardinality, StorageKind};
use crate::config::LinkConfig;
use crate::mutator::Mutator;
use crate::resolver::SharedResolver;

// =============================================================================
// Built-in set
// =============================================================================

struct Builtins {
    entity: Mutator,
    raw_id: Mutator,
    entities: Mutator,
    raw_ids: Mutator,
}

impl Builtins {
    fn new(resolver: &SharedResolver, config: &LinkConfig) -> Self {
        Self {
            entity: Mutator::single(EntityFieldMutator),
            raw_id: Mutator::single(RawIdFieldMutator::new(
                resolver.clone(),
                config.null_raw_id,
            )),
            entities: Mutator::multi(EntityVecFieldMutator::new(config.unique_targets)),
            raw_ids: Mutator::multi(RawIdVecFieldMutator::new(
                resolver.clone(),
                config.unique_targets,
            )),
        }
    }

    fn get(&self, kind: StorageKind) -> Option<&Mutator> {
        match kind {
            StorageKind::EntityHandle => Some(&self.entity),
            StorageKind::RawId => Some(&self.raw_id),
            StorageKind::EntityHandles => Some(&self.entities),
            StorageKind::RawIds => Some(&self.raw_ids),
            StorageKind::Other => None,
        }
    }
}

// =============================================================================
// MutatorRegistry
// =============================================================================

/// Resolves the mutator for each reference field.
pub struct MutatorRegistry {
    config: LinkConfig,
    builtins: Builtins,
    /// Overrides keyed by `(component, field)`.
    overrides: HashMap<(KeywordId, KeywordId), Mutator>,
}

impl MutatorRegistry {
    /// Creates a registry with default configuration.
    #[must_use]
    pub fn new(resolver: SharedResolver) -> Self {
        Self::with_config(resolver, LinkConfig::default())
    }

    /// Creates a registry whose built-ins follow `config`.
    #[must_use]
    pub fn with_config(resolver: SharedResolver, config: LinkConfig) -> Self {
        let builtins = Builtins::new(&resolver, &config);
        Self {
            config,
            builtins,
            overrides: HashMap::new(),
        }
    }

    /// Returns the registry's configuration.
    #[must_use]
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Registers a component-local override for one field.
    ///
    /// The latest registration for a pair wins; the replaced override is
    /// returned.
    pub fn register_override(
        &mut self,
        component: KeywordId,
        field: KeywordId,
        mutator: Mutator,
    ) -> Option<Mutator> {
        let previous = self.overrides.insert((component, field), mutator);
        if let Some(old) = &previous {
            warn!(
                target: "tether::link",
                ?component,
                ?field,
                replaced = old.name(),
                "mutator override replaced"
            );
        }
        previous
    }

    /// Drops the override for a field, returning it.
    pub fn remove_override(&mut self, component: KeywordId, field: KeywordId) -> Option<Mutator> {
        self.overrides.remove(&(component, field))
    }

    /// Returns the override registered for a field.
    #[must_use]
    pub fn override_for(&self, component: KeywordId, field: KeywordId) -> Option<&Mutator> {
        self.overrides.get(&(component, field))
    }

    /// Returns the built-in serving a storage kind.
    #[must_use]
    pub fn builtin(&self, kind: StorageKind) -> Option<&Mutator> {
        self.builtins.get(kind)
    }

    /// Resolves the mutator for `field` of `component`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnresolvedMutator`](tether_foundation::ErrorKind::UnresolvedMutator)
    /// if `cardinality` is [`Cardinality::None`], no override or built-in
    /// serves the field, or the chosen mutator has the wrong cardinality.
    pub fn resolve(
        &self,
        component: &ComponentSchema,
        field: &FieldSchema,
        cardinality: Cardinality,
    ) -> Result<Mutator> {
        let unresolved =
            |reason: String| Error::unresolved_mutator(component.name, field.name, reason);

        if !cardinality.is_reference() {
            return Err(unresolved("field is not a reference".to_string()));
        }

        let (mutator, origin) = match self.override_for(component.name, field.name) {
            Some(mutator) => (mutator, "override"),
            None => {
                let kind = StorageKind::of(&field.ty);
                let mutator = self.builtin(kind).ok_or_else(|| {
                    unresolved(format!("no built-in mutator for storage kind {kind:?}"))
                })?;
                (mutator, "built-in")
            }
        };

        if mutator.cardinality() != cardinality {
            return Err(unresolved(format!(
                "{origin} {} serves {:?} references, field is {cardinality:?}",
                mutator.name(),
                mutator.cardinality(),
            )));
        }
        Ok(mutator.clone())
    }
}

impl fmt::Debug for MutatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutatorRegistry")
            .field("config", &self.config)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

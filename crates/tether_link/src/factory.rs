//! Link-site discovery.

use tether_foundation::{ErrorContext, Result};
use tether_storage::ComponentSchema;
use tracing::{debug, trace, warn};

use crate::classify::{Cardinality, classify};
use crate::policy::is_excluded;
use crate::registry::MutatorRegistry;
use crate::site::LinkSite;

/// Finds the entity-reference fields of component types.
#[derive(Debug)]
pub struct LinkFactory {
    registry: MutatorRegistry,
}

impl LinkFactory {
    /// Creates a factory resolving mutators through `registry`.
    #[must_use]
    pub fn new(registry: MutatorRegistry) -> Self {
        Self { registry }
    }

    /// Returns the mutator registry.
    #[must_use]
    pub fn registry(&self) -> &MutatorRegistry {
        &self.registry
    }

    /// Returns the mutator registry for override registration.
    pub fn registry_mut(&mut self) -> &mut MutatorRegistry {
        &mut self.registry
    }

    /// Discovers the link sites of a component type.
    ///
    /// Sites come back in field declaration order. Fields that hold no
    /// reference, and fields whose policy excludes them, produce no site.
    /// The schema is only read; calling this twice yields equal results.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnresolvedMutator`](tether_foundation::ErrorKind::UnresolvedMutator)
    /// if any reference field cannot be bound to a mutator. No sites are
    /// returned in that case.
    pub fn discover(&self, schema: &ComponentSchema) -> Result<Vec<LinkSite>> {
        let log_skipped = self.registry.config().log_skipped;
        let mut sites = Vec::new();

        for field in &schema.fields {
            let cardinality = classify(field);
            if cardinality == Cardinality::None {
                if log_skipped {
                    trace!(
                        target: "tether::link",
                        component = ?schema.name,
                        field = ?field.name,
                        ty = %field.ty,
                        "not a reference"
                    );
                }
                continue;
            }
            if is_excluded(field) {
                if log_skipped {
                    trace!(
                        target: "tether::link",
                        component = ?schema.name,
                        field = ?field.name,
                        "excluded by link policy"
                    );
                }
                continue;
            }

            let mutator = self
                .registry
                .resolve(schema, field, cardinality)
                .map_err(|err| {
                    warn!(
                        target: "tether::link",
                        component = ?schema.name,
                        field = ?field.name,
                        error = %err,
                        "link discovery failed"
                    );
                    err.with_context(
                        ErrorContext::new()
                            .with_source("link discovery")
                            .with_frame(format!("component {:?}", schema.name)),
                    )
                })?;

            debug!(
                target: "tether::link",
                component = ?schema.name,
                field = ?field.name,
                ?cardinality,
                mutator = mutator.name(),
                "link site"
            );
            sites.push(LinkSite::new(schema.name, field.clone(), mutator));
        }

        debug!(
            target: "tether::link",
            component = ?schema.name,
            fields = schema.fields.len(),
            sites = sites.len(),
            "discovery complete"
        );
        Ok(sites)
    }
}

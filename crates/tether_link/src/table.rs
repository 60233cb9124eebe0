//! Per-component cache of discovered link sites.

use std::collections::HashMap;
use std::sync::Arc;

use tether_foundation::{EntityId, KeywordId, Result, Value};
use tether_storage::ComponentSchema;
use tracing::debug;

use crate::factory::LinkFactory;
use crate::site::LinkSite;

/// Link sites by component name.
///
/// Entries are replaced wholesale when a component is rediscovered, so a
/// slice handed out earlier stays valid and unchanged.
#[derive(Clone, Debug, Default)]
pub struct LinkTable {
    sites: HashMap<KeywordId, Arc<[LinkSite]>>,
}

impl LinkTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovers the sites of `schema` and stores them.
    ///
    /// Any earlier entry for the component is superseded.
    ///
    /// # Errors
    ///
    /// Propagates discovery failures. The earlier entry, if any, is kept.
    pub fn discover(
        &mut self,
        factory: &LinkFactory,
        schema: &ComponentSchema,
    ) -> Result<Arc<[LinkSite]>> {
        let sites: Arc<[LinkSite]> = factory.discover(schema)?.into();
        if self.sites.insert(schema.name, sites.clone()).is_some() {
            debug!(target: "tether::link", component = ?schema.name, "link sites superseded");
        }
        Ok(sites)
    }

    /// Discovers every schema in turn, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Propagates the first discovery failure. Entries stored before it
    /// remain.
    pub fn discover_all<'a>(
        &mut self,
        factory: &LinkFactory,
        schemas: impl IntoIterator<Item = &'a ComponentSchema>,
    ) -> Result<()> {
        for schema in schemas {
            self.discover(factory, schema)?;
        }
        Ok(())
    }

    /// Returns the sites stored for a component.
    #[must_use]
    pub fn sites(&self, component: KeywordId) -> Option<&Arc<[LinkSite]>> {
        self.sites.get(&component)
    }

    /// Drops the entry for a component.
    pub fn remove(&mut self, component: KeywordId) -> Option<Arc<[LinkSite]>> {
        self.sites.remove(&component)
    }

    /// Number of components with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Returns true if no component has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Iterates over entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (KeywordId, &[LinkSite])> {
        self.sites.iter().map(|(name, sites)| (*name, sites.as_ref()))
    }

    /// Removes every reference to `target` from a component value.
    ///
    /// Returns the number of sites that changed. A component with no entry
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// Propagates the first mutator failure. Sites handled before it keep
    /// their changes.
    pub fn unlink_all(
        &self,
        component: KeywordId,
        value: &mut Value,
        target: EntityId,
    ) -> Result<usize> {
        let Some(sites) = self.sites.get(&component) else {
            return Ok(0);
        };
        let mut changed = 0;
        for site in sites.iter() {
            if site.unlink(value, target)? {
                changed += 1;
            }
        }
        Ok(changed)
    }
}

//! Translation between raw integer ids and entity handles.

use std::sync::{Arc, PoisonError, RwLock};

use tether_foundation::EntityId;
use tether_storage::EntityStore;

/// World handle that raw-id mutators use to map integers to entities.
///
/// A raw id is an entity's storage index. Resolution goes through whatever
/// owns entity identity, since only it knows the generation behind an index.
pub trait EntityResolver: Send + Sync {
    /// Returns the entity a raw id refers to.
    fn resolve(&self, raw: i64) -> Option<EntityId>;

    /// Returns the raw id for an entity.
    fn raw_id(&self, entity: EntityId) -> Option<i64> {
        if entity.is_null() {
            return None;
        }
        i64::try_from(entity.index).ok()
    }
}

/// Shared resolver handle injected into a registry's built-in mutators.
pub type SharedResolver = Arc<dyn EntityResolver>;

impl EntityResolver for EntityStore {
    fn resolve(&self, raw: i64) -> Option<EntityId> {
        self.latest(u64::try_from(raw).ok()?)
    }
}

// A lock around a live store lets mutators follow entities spawned after the
// registry was built.
impl<T: EntityResolver> EntityResolver for RwLock<T> {
    fn resolve(&self, raw: i64) -> Option<EntityId> {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .resolve(raw)
    }

    fn raw_id(&self, entity: EntityId) -> Option<i64> {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .raw_id(entity)
    }
}

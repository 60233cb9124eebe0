//! Entity allocation with generational indices.
//!
//! `EntityStore` is the identity authority that link mutators consult when
//! translating raw integer ids back into entity handles.

// Allow u64 to usize casts - we target 64-bit systems
#![allow(clippy::cast_possible_truncation)]

use tether_foundation::{EntityId, Error, Result};

/// Allocates entities and tracks generations.
///
/// Even generations are free slots, odd generations are alive. Destroying an
/// entity bumps its generation and returns the index to the free list.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    /// Generation counter for each entity index.
    generations: Vec<u32>,
    /// Free list of indices available for reuse.
    free_list: Vec<u64>,
    /// Count of live entities.
    live_count: usize,
}

impl EntityStore {
    /// Creates a new empty entity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a new entity, reusing a freed index when one is available.
    pub fn spawn(&mut self) -> EntityId {
        self.live_count += 1;

        if let Some(index) = self.free_list.pop() {
            let idx = index as usize;
            // Was even/free, now odd/alive
            self.generations[idx] += 1;
            EntityId::new(index, self.generations[idx])
        } else {
            let index = self.generations.len() as u64;
            self.generations.push(1);
            EntityId::new(index, 1)
        }
    }

    /// Destroys an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or was never spawned.
    pub fn destroy(&mut self, id: EntityId) -> Result<()> {
        self.validate(id)?;

        let idx = id.index as usize;
        self.generations[idx] += 1;
        self.free_list.push(id.index);
        self.live_count -= 1;

        Ok(())
    }

    /// Checks if an entity exists and is not stale.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.generations
            .get(id.index as usize)
            .is_some_and(|&generation| generation == id.generation && generation % 2 == 1)
    }

    /// Validates that an entity is live.
    ///
    /// # Errors
    ///
    /// Returns `StaleEntity` on a generation mismatch and `EntityNotFound`
    /// for indices that were never allocated or are currently free.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        let Some(&current) = self.generations.get(id.index as usize) else {
            return Err(Error::entity_not_found(id));
        };

        if current != id.generation {
            return Err(Error::stale_entity(id));
        }

        if current % 2 == 0 {
            return Err(Error::entity_not_found(id));
        }

        Ok(())
    }

    /// Returns the handle most recently allocated at `index`.
    ///
    /// The handle is returned whether or not that entity is still alive, so
    /// a raw id naming a just-destroyed entity still maps back to it. Returns
    /// `None` only for indices that were never allocated.
    #[must_use]
    pub fn latest(&self, index: u64) -> Option<EntityId> {
        let generation = *self.generations.get(usize::try_from(index).ok()?)?;
        // Free slots sit one generation past their last occupant
        let allocated = if generation % 2 == 1 {
            generation
        } else {
            generation - 1
        };
        Some(EntityId::new(index, allocated))
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Iterates over all live entity handles.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.generations
            .iter()
            .enumerate()
            .filter(|(_, generation)| *generation % 2 == 1)
            .map(|(idx, generation)| EntityId::new(idx as u64, *generation))
    }

    /// Returns the current generation for an index, if it exists.
    #[must_use]
    pub fn generation(&self, index: u64) -> Option<u32> {
        self.generations.get(index as usize).copied()
    }
}

//! Entity handles with generational indices.

use std::fmt;

/// Opaque handle to an entity.
///
/// The generation counter increments whenever an index is reused, so a
/// handle held in a component field can be told apart from a newer entity
/// occupying the same slot. The bare `index` is what raw-id fields store.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct EntityId {
    /// Index into entity storage.
    pub index: u64,
    /// Generation counter for stale reference detection.
    pub generation: u32,
}

impl EntityId {
    /// Creates a new entity handle with the given index and generation.
    #[must_use]
    pub const fn new(index: u64, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns a sentinel value representing "no entity".
    ///
    /// Uses `u64::MAX` as the index, which is never allocated.
    #[must_use]
    pub const fn null() -> Self {
        Self {
            index: u64::MAX,
            generation: 0,
        }
    }

    /// Returns true if this is the null sentinel value.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.index == u64::MAX
    }

    /// Returns true if both handles address the same storage slot,
    /// regardless of generation.
    #[must_use]
    pub const fn same_slot(self, other: Self) -> bool {
        self.index == other.index
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "EntityId(null)")
        } else {
            write!(f, "EntityId({}v{})", self.index, self.generation)
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(null)")
        } else {
            write!(f, "Entity({})", self.index)
        }
    }
}

//! Configuration for built-in mutators and discovery.

/// Configuration for a [`MutatorRegistry`](crate::MutatorRegistry) and the
/// discovery passes run through it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkConfig {
    /// Value raw-id fields hold when they reference no entity.
    pub null_raw_id: i64,

    /// Reject duplicate targets when adding to a collection field.
    ///
    /// When false, collections behave like bags and may hold the same
    /// entity more than once.
    pub unique_targets: bool,

    /// Emit `trace` events for fields discovery skips.
    pub log_skipped: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            null_raw_id: -1,
            unique_targets: false,
            log_skipped: true,
        }
    }
}

impl LinkConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the raw-id null sentinel.
    #[must_use]
    pub fn with_null_raw_id(mut self, null_raw_id: i64) -> Self {
        self.null_raw_id = null_raw_id;
        self
    }

    /// Builder method to enable/disable duplicate rejection in collections.
    #[must_use]
    pub fn with_unique_targets(mut self, unique: bool) -> Self {
        self.unique_targets = unique;
        self
    }

    /// Builder method to enable/disable tracing of skipped fields.
    #[must_use]
    pub fn with_log_skipped(mut self, log_skipped: bool) -> Self {
        self.log_skipped = log_skipped;
        self
    }
}

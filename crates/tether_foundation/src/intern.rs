//! Keyword interning for component and field names.
//!
//! Component types and their fields are named by keywords such as
//! `:follower` or `:target`. Interning them gives cheap `Copy` identifiers
//! that hash and compare in O(1).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Interned keyword identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct KeywordId(pub(crate) u32);

impl KeywordId {
    /// Returns the raw index of this keyword.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for KeywordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeywordId({})", self.0)
    }
}

/// Interner mapping keyword strings to [`KeywordId`]s and back.
///
/// Not thread-safe; use external synchronization if needed.
#[derive(Clone, Debug, Default)]
pub struct Interner {
    /// Keyword storage, indexed by `KeywordId`.
    keywords: Vec<Arc<str>>,
    /// Map from keyword string to `KeywordId`.
    keyword_map: HashMap<Arc<str>, KeywordId>,
}

impl Interner {
    /// Creates an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a keyword, returning its [`KeywordId`].
    ///
    /// A leading `:` is stripped, so `":target"` and `"target"` intern to
    /// the same id.
    ///
    /// # Panics
    ///
    /// Panics if the number of interned keywords exceeds `u32::MAX`.
    pub fn intern_keyword(&mut self, s: &str) -> KeywordId {
        let s = s.strip_prefix(':').unwrap_or(s);
        if let Some(&id) = self.keyword_map.get(s) {
            return id;
        }

        let id = KeywordId(u32::try_from(self.keywords.len()).expect("too many keywords"));
        let arc: Arc<str> = s.into();
        self.keywords.push(arc.clone());
        self.keyword_map.insert(arc, id);
        id
    }

    /// Looks up a keyword without interning it.
    #[must_use]
    pub fn lookup_keyword(&self, s: &str) -> Option<KeywordId> {
        let s = s.strip_prefix(':').unwrap_or(s);
        self.keyword_map.get(s).copied()
    }

    /// Gets the string for a keyword.
    #[must_use]
    pub fn get_keyword(&self, id: KeywordId) -> Option<&str> {
        self.keywords.get(id.0 as usize).map(AsRef::as_ref)
    }

    /// Returns the number of interned keywords.
    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

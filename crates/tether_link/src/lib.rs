//! Entity-link discovery for Tether component types.
//!
//! Given a component schema, this crate finds every field that holds a
//! reference to another entity and binds it to a mutator able to read and
//! rewrite that reference. Lifecycle code uses the resulting link sites to
//! fix up references when entities are destroyed or remapped.
//!
//! This crate provides:
//! - [`classify`] - Reference cardinality of a field
//! - [`policy`] / [`is_excluded`] - Per-field link policy
//! - [`SingleMutator`] / [`MultiMutator`] / [`Mutator`] - Mutator contracts
//! - [`MutatorRegistry`] - Override and built-in resolution
//! - [`LinkFactory`] - Discovery of [`LinkSite`]s
//! - [`LinkTable`] - Per-component cache of discovered sites
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tether_foundation::{Interner, Type};
//! use tether_link::{Cardinality, LinkFactory, MutatorRegistry};
//! use tether_storage::{ComponentSchema, EntityStore, FieldSchema};
//!
//! let mut interner = Interner::new();
//! let schema = ComponentSchema::new(interner.intern_keyword("follower"))
//!     .with_field(FieldSchema::optional_nil(interner.intern_keyword("target"), Type::EntityRef))
//!     .with_field(FieldSchema::required(interner.intern_keyword("owner-id"), Type::Int));
//!
//! let factory = LinkFactory::new(MutatorRegistry::new(Arc::new(EntityStore::new())));
//! let sites = factory.discover(&schema)?;
//!
//! assert_eq!(sites.len(), 1);
//! assert_eq!(sites[0].cardinality(), Cardinality::Single);
//! # Ok::<(), tether_foundation::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builtin;
pub mod classify;
pub mod config;
pub mod factory;
pub mod mutator;
pub mod policy;
pub mod registry;
pub mod resolver;
pub mod site;
pub mod table;

pub use builtin::{
    EntityFieldMutator, EntityVecFieldMutator, RawIdFieldMutator, RawIdVecFieldMutator,
};
pub use classify::{Cardinality, StorageKind, classify};
pub use config::LinkConfig;
pub use factory::LinkFactory;
pub use mutator::{MultiMutator, Mutator, SingleMutator};
pub use policy::{is_excluded, policy};
pub use registry::MutatorRegistry;
pub use resolver::{EntityResolver, SharedResolver};
pub use site::LinkSite;
pub use table::LinkTable;

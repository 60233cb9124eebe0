//! Tether - entity-link discovery for component schemas
//!
//! This crate re-exports all layers of the Tether system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: tether_link        - Classification, mutators, link sites, discovery
//! Layer 1: tether_storage     - Entity store, component schemas and storage
//! Layer 0: tether_foundation  - Core types (Value, EntityId, Type, Error)
//! ```

pub use tether_foundation as foundation;
pub use tether_link as link;
pub use tether_storage as storage;

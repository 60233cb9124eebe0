//! Entity allocation and component schemas for Tether.
//!
//! This crate provides:
//! - [`EntityStore`] - Generational entity allocation
//! - [`ComponentSchema`] / [`FieldSchema`] - Component type descriptors
//! - [`ComponentStore`] - Schema-validated component storage

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod entity;
pub mod schema;

pub use component::ComponentStore;
pub use entity::EntityStore;
pub use schema::{ComponentSchema, FieldSchema, LinkPolicy};

//! Core types, values, and persistent collections for Tether.
//!
//! This crate provides:
//! - [`Value`] - Dynamic value type for component data
//! - [`EntityId`] - Generational entity handles
//! - [`Type`] - Declared field types
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`PVec`], [`PMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod entity;
pub mod error;
pub mod intern;
pub mod types;
pub mod value;

pub use collections::{PMap, PVec};
pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind};
pub use intern::{Interner, KeywordId};
pub use types::Type;
pub use value::Value;

/// Result type alias using Tether's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

//! Schema definitions for component types.
//!
//! A [`ComponentSchema`] is the registration-time description of a component
//! kind: its name and its fields in declaration order. Each [`FieldSchema`]
//! carries the declared [`Type`] plus the markers entity-link discovery reads:
//! the explicit entity-id marker and the link policy.

use tether_foundation::{KeywordId, Type, Value};

/// Schema definition for a component type.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentSchema {
    /// Component name (e.g., `:follower`).
    pub name: KeywordId,
    /// Field definitions, in declaration order.
    pub fields: Vec<FieldSchema>,
    /// If true, this is a tag component (presence-only, no data).
    pub is_tag: bool,
}

impl ComponentSchema {
    /// Creates a new component schema.
    #[must_use]
    pub fn new(name: KeywordId) -> Self {
        Self {
            name,
            fields: Vec::new(),
            is_tag: false,
        }
    }

    /// Creates a tag component schema (no fields).
    #[must_use]
    pub fn tag(name: KeywordId) -> Self {
        Self {
            name,
            fields: Vec::new(),
            is_tag: true,
        }
    }

    /// Adds a field to the schema.
    #[must_use]
    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the field schema by name.
    #[must_use]
    pub fn field(&self, name: KeywordId) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Schema definition for a component field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSchema {
    /// Field name.
    pub name: KeywordId,
    /// Declared field type.
    pub ty: Type,
    /// Default value if not provided.
    pub default: Option<Value>,
    /// Whether the field is required.
    pub required: bool,
    /// Marks `int` / `vec<int>` fields as holding raw entity ids.
    pub entity_id: bool,
    /// Explicit link policy, if one was declared.
    pub link_policy: Option<LinkPolicy>,
}

impl FieldSchema {
    fn with_shape(name: KeywordId, ty: Type, default: Option<Value>, required: bool) -> Self {
        Self {
            name,
            ty,
            default,
            required,
            entity_id: false,
            link_policy: None,
        }
    }

    /// Creates a required field with no default.
    #[must_use]
    pub fn required(name: KeywordId, ty: Type) -> Self {
        Self::with_shape(name, ty, None, true)
    }

    /// Creates an optional field with a default value.
    #[must_use]
    pub fn optional(name: KeywordId, ty: Type, default: Value) -> Self {
        Self::with_shape(name, ty, Some(default), false)
    }

    /// Creates an optional field with no default (will be nil).
    #[must_use]
    pub fn optional_nil(name: KeywordId, ty: Type) -> Self {
        Self::with_shape(name, ty, None, false)
    }

    /// Marks this field as storing raw entity ids.
    ///
    /// Without the marker an `int` field is ordinary numeric data.
    #[must_use]
    pub fn with_entity_id(mut self) -> Self {
        self.entity_id = true;
        self
    }

    /// Attaches an explicit link policy.
    #[must_use]
    pub fn with_link_policy(mut self, policy: LinkPolicy) -> Self {
        self.link_policy = Some(policy);
        self
    }
}

/// Per-field policy controlling entity-link discovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LinkPolicy {
    /// Never treat this field as a link, whatever its type.
    Skip,
    /// Treat the field as a link if its shape qualifies.
    ///
    /// Equivalent to declaring no policy at all.
    Check,
}

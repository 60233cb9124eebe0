//! Type descriptors for component field declarations.

use std::fmt;

/// Declared type of a component field.
///
/// Field types drive both value validation and entity-link classification:
/// `EntityRef` and `Vec(EntityRef)` always denote references, while `Int` and
/// `Vec(Int)` denote references only when the field carries an explicit
/// entity-id marker.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The nil type (only value: nil).
    Nil,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String type.
    String,
    /// Keyword type (interned, prefixed with `:`).
    Keyword,
    /// Entity handle type.
    EntityRef,
    /// Homogeneous vector type.
    Vec(Box<Type>),
    /// Homogeneous map type.
    Map(Box<Type>, Box<Type>),
    /// Optional type (value or nil).
    Option(Box<Type>),
    /// Any type (accepts any value).
    Any,
}

impl Type {
    /// Creates a vector type with the given element type.
    #[must_use]
    pub fn vec(element: Type) -> Self {
        Self::Vec(Box::new(element))
    }

    /// Creates a map type with the given key and value types.
    #[must_use]
    pub fn map(key: Type, value: Type) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Creates an optional type.
    #[must_use]
    pub fn option(inner: Type) -> Self {
        Self::Option(Box::new(inner))
    }

    /// Returns true if this type is `Any`.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns the element type of a vector type.
    #[must_use]
    pub fn element(&self) -> Option<&Type> {
        match self {
            Self::Vec(elem) => Some(elem.as_ref()),
            _ => None,
        }
    }

    /// Checks if a value type is accepted by this type.
    ///
    /// - `Any` accepts all types
    /// - `Option(T)` accepts `Nil` and anything `T` accepts
    /// - Primitive types must match exactly (`Float` also accepts `Int`)
    /// - Collection types check element types recursively; a runtime
    ///   `vec<any>` is accepted by every vector type
    #[must_use]
    pub fn accepts(&self, value_type: &Type) -> bool {
        if let Self::Option(inner) = self {
            return matches!(value_type, Self::Nil) || inner.accepts(value_type);
        }

        match (self, value_type) {
            (Self::Any, _)
            | (Self::Nil, Self::Nil)
            | (Self::Bool, Self::Bool)
            | (Self::Int | Self::Float, Self::Int)
            | (Self::Float, Self::Float)
            | (Self::String, Self::String)
            | (Self::Keyword, Self::Keyword)
            | (Self::EntityRef, Self::EntityRef) => true,

            (Self::Vec(expected), Self::Vec(actual)) => {
                actual.is_any() || expected.accepts(actual)
            }
            (Self::Map(ek, ev), Self::Map(ak, av)) => {
                (ak.is_any() && av.is_any()) || (ek.accepts(ak) && ev.accepts(av))
            }

            _ => false,
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Keyword => write!(f, "keyword"),
            Self::EntityRef => write!(f, "entity-ref"),
            Self::Vec(t) => write!(f, "vec<{t:?}>"),
            Self::Map(k, v) => write!(f, "map<{k:?}, {v:?}>"),
            Self::Option(t) => write!(f, "option<{t:?}>"),
            Self::Any => write!(f, "any"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

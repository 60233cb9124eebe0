//! Component storage with schema validation.
//!
//! Each component kind is registered with a [`ComponentSchema`] before use.
//! Component values are `Value::Map`s keyed by field keyword; tag components
//! store `true`.

use std::collections::HashMap;

use tether_foundation::{EntityId, Error, ErrorKind, KeywordId, PMap, Result, Type, Value};

use crate::schema::{ComponentSchema, FieldSchema};

/// Stores component data for entities, keyed by component then entity.
#[derive(Clone, Debug, Default)]
pub struct ComponentStore {
    /// Registered schemas by component name.
    schemas: HashMap<KeywordId, ComponentSchema>,
    /// Component data: component -> entity -> value.
    data: HashMap<KeywordId, HashMap<EntityId, Value>>,
}

impl ComponentStore {
    /// Creates a new empty component store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component schema.
    ///
    /// # Errors
    ///
    /// Returns an error if a schema with the same name is already registered.
    pub fn register_schema(&mut self, schema: ComponentSchema) -> Result<()> {
        if self.schemas.contains_key(&schema.name) {
            return Err(Error::internal(format!(
                "component schema already registered: {:?}",
                schema.name
            )));
        }
        self.schemas.insert(schema.name, schema);
        Ok(())
    }

    /// Replaces a registered schema, returning the previous one.
    ///
    /// Stored component values are left as they are; callers that cache
    /// per-schema metadata (such as link sites) must refresh it.
    pub fn replace_schema(&mut self, schema: ComponentSchema) -> Option<ComponentSchema> {
        self.schemas.insert(schema.name, schema)
    }

    /// Gets the schema for a component type.
    #[must_use]
    pub fn schema(&self, component: KeywordId) -> Option<&ComponentSchema> {
        self.schemas.get(&component)
    }

    /// Iterates over all registered schemas.
    pub fn schemas(&self) -> impl Iterator<Item = &ComponentSchema> {
        self.schemas.values()
    }

    /// Sets a component on an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the component is not registered or validation fails.
    pub fn set(&mut self, entity: EntityId, component: KeywordId, value: Value) -> Result<()> {
        let schema = self.require_schema(component)?;
        Self::validate_component_value(schema, &value)?;

        self.data
            .entry(component)
            .or_default()
            .insert(entity, value);
        Ok(())
    }

    /// Sets a specific field within a component.
    ///
    /// If the component doesn't exist on the entity, creates it with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the component or field is not registered, or the
    /// value does not match the field's declared type. Returns `TypeMismatch`
    /// if the stored component is no longer a map.
    pub fn set_field(
        &mut self,
        entity: EntityId,
        component: KeywordId,
        field: KeywordId,
        value: Value,
    ) -> Result<()> {
        let schema = self.require_schema(component)?;
        let field_schema = schema.field(field).ok_or_else(|| {
            Error::new(ErrorKind::AttributeNotFound {
                component,
                attribute: field,
            })
        })?;
        Self::validate_field_value(field_schema, &value)?;
        let default_value = Self::create_default_component(schema);

        let comp_value = self
            .data
            .entry(component)
            .or_default()
            .entry(entity)
            .or_insert(default_value);

        let Some(updated) = comp_value.with_field(field, value) else {
            return Err(Error::type_mismatch(
                Type::map(Type::Keyword, Type::Any),
                comp_value.value_type(),
            ));
        };
        *comp_value = updated;
        Ok(())
    }

    /// Gets a component value for an entity.
    #[must_use]
    pub fn get(&self, entity: EntityId, component: KeywordId) -> Option<&Value> {
        self.data.get(&component)?.get(&entity)
    }

    /// Gets a mutable component value for an entity.
    ///
    /// Writes through this reference bypass schema validation.
    pub fn get_mut(&mut self, entity: EntityId, component: KeywordId) -> Option<&mut Value> {
        self.data.get_mut(&component)?.get_mut(&entity)
    }

    /// Gets a specific field from a component.
    #[must_use]
    pub fn get_field(
        &self,
        entity: EntityId,
        component: KeywordId,
        field: KeywordId,
    ) -> Option<&Value> {
        self.get(entity, component)?.field(field)
    }

    /// Checks if an entity has a component.
    #[must_use]
    pub fn has(&self, entity: EntityId, component: KeywordId) -> bool {
        self.data
            .get(&component)
            .is_some_and(|m| m.contains_key(&entity))
    }

    /// Removes a component from an entity, returning it if it existed.
    pub fn remove(&mut self, entity: EntityId, component: KeywordId) -> Option<Value> {
        self.data.get_mut(&component)?.remove(&entity)
    }

    /// Removes all components for an entity.
    pub fn remove_entity(&mut self, entity: EntityId) {
        for comp_data in self.data.values_mut() {
            comp_data.remove(&entity);
        }
    }

    /// Iterates entities with a specific component.
    pub fn with_component(&self, component: KeywordId) -> impl Iterator<Item = EntityId> + '_ {
        self.data
            .get(&component)
            .into_iter()
            .flat_map(|m| m.keys().copied())
    }

    // --- Private helpers ---

    fn require_schema(&self, component: KeywordId) -> Result<&ComponentSchema> {
        self.schema(component)
            .ok_or_else(|| Error::internal(format!("unknown component: {component:?}")))
    }

    fn validate_component_value(schema: &ComponentSchema, value: &Value) -> Result<()> {
        if schema.is_tag {
            return match value {
                Value::Bool(true) | Value::Map(_) => Ok(()),
                _ => Err(Error::type_mismatch(Type::Bool, value.value_type())),
            };
        }

        let Value::Map(map) = value else {
            return Err(Error::type_mismatch(
                Type::map(Type::Keyword, Type::Any),
                value.value_type(),
            ));
        };

        for field in &schema.fields {
            match map.get(&Value::Keyword(field.name)) {
                Some(v) => Self::validate_field_value(field, v)?,
                None if field.required => {
                    return Err(Error::new(ErrorKind::AttributeNotFound {
                        component: schema.name,
                        attribute: field.name,
                    }));
                }
                None => {}
            }
        }
        Ok(())
    }

    fn validate_field_value(field: &FieldSchema, value: &Value) -> Result<()> {
        if value.is_nil() && !field.required {
            return Ok(());
        }
        if field.ty.accepts(&value.value_type()) {
            Ok(())
        } else {
            Err(Error::type_mismatch(field.ty.clone(), value.value_type()))
        }
    }

    fn create_default_component(schema: &ComponentSchema) -> Value {
        if schema.is_tag {
            return Value::Bool(true);
        }
        let map: PMap<Value, Value> = schema
            .fields
            .iter()
            .filter_map(|field| {
                field
                    .default
                    .clone()
                    .map(|default| (Value::Keyword(field.name), default))
            })
            .collect();
        Value::Map(map)
    }
}

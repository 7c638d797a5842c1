//! Entity and attribute model
//!
//! The compact entity descriptor, attribute, and metadata types the
//! response envelope serializes. Attribute values and metadata values are
//! arbitrary JSON.

use crate::types::{ApiVersion, OperationKind};
use serde_json::{Map, Value};

/// Characters V2 rejects inside identifiers (ids, types, attribute and
/// metadata names).
const FORBIDDEN_ID_CHARS: &[char] = &['<', '>', '"', '\'', '=', ';', '(', ')'];

pub(crate) fn has_forbidden_chars(value: &str) -> bool {
    value.contains(FORBIDDEN_ID_CHARS)
}

/// Context entity descriptor: identifier, type, and whether the identifier
/// is a match pattern rather than a literal id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityId {
    pub id: String,
    pub entity_type: String,
    pub is_pattern: bool,
}

impl EntityId {
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>, is_pattern: bool) -> Self {
        EntityId {
            id: id.into(),
            entity_type: entity_type.into(),
            is_pattern,
        }
    }

    pub fn fill(&mut self, id: impl Into<String>, entity_type: impl Into<String>, is_pattern: bool) {
        self.id = id.into();
        self.entity_type = entity_type.into();
        self.is_pattern = is_pattern;
    }

    /// Descriptor wire object. `isPattern` renders as the strings
    /// `"true"`/`"false"` (v1 wire form).
    pub fn render_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".to_string(), Value::String(self.entity_type.clone()));
        out.insert("isPattern".to_string(), Value::String(self.is_pattern.to_string()));
        out.insert("id".to_string(), Value::String(self.id.clone()));
        Value::Object(out)
    }

    /// Structural validation for the given API version and operation.
    /// Pattern ids only make sense where matching happens; update
    /// operations address concrete entities.
    pub fn check(&self, api_version: ApiVersion, operation: OperationKind) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("empty entity id".to_string());
        }

        if self.is_pattern && operation == OperationKind::UpdateContext {
            return Err("pattern entity ids are not allowed in update operations".to_string());
        }

        if api_version == ApiVersion::V2 {
            if has_forbidden_chars(&self.id) {
                return Err(format!("invalid character in entity id: {}", self.id));
            }
            if has_forbidden_chars(&self.entity_type) {
                return Err(format!("invalid character in entity type: {}", self.entity_type));
            }
        }

        Ok(())
    }
}

/// Attribute metadata: name, type, and a JSON value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    pub name: String,
    pub meta_type: String,
    pub value: Value,
}

impl Metadata {
    pub fn new(name: impl Into<String>, meta_type: impl Into<String>, value: Value) -> Self {
        Metadata {
            name: name.into(),
            meta_type: meta_type.into(),
            value,
        }
    }

    pub fn render_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("name".to_string(), Value::String(self.name.clone()));
        out.insert("type".to_string(), Value::String(self.meta_type.clone()));
        out.insert("value".to_string(), self.value.clone());
        Value::Object(out)
    }
}

/// One attribute of a context entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContextAttribute {
    pub name: String,
    pub attr_type: String,
    pub value: Value,
    pub metadata: Vec<Metadata>,
}

impl ContextAttribute {
    pub fn new(name: impl Into<String>, attr_type: impl Into<String>, value: Value) -> Self {
        ContextAttribute {
            name: name.into(),
            attr_type: attr_type.into(),
            value,
            metadata: Vec::new(),
        }
    }

    /// Attribute body without its name: `{ "type": ..., "value": ... }`
    /// plus `"metadatas"` when any metadata survives the filter. The name
    /// is added by the caller, whose rendering mode decides whether it
    /// becomes a field or an object key. `omit_value` drops the value for
    /// operations that only echo attribute names and types back.
    pub fn render_value(&self, metadata_filter: &[String], omit_value: bool) -> Value {
        let mut out = Map::new();
        out.insert("type".to_string(), Value::String(self.attr_type.clone()));

        if !omit_value {
            out.insert("value".to_string(), self.value.clone());
        }

        let metadatas: Vec<Value> = self
            .metadata
            .iter()
            .filter(|m| metadata_filter.is_empty() || metadata_filter.contains(&m.name))
            .map(Metadata::render_value)
            .collect();
        if !metadatas.is_empty() {
            out.insert("metadatas".to_string(), Value::Array(metadatas));
        }

        Value::Object(out)
    }

    pub fn check(&self, api_version: ApiVersion, _operation: OperationKind) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("missing attribute name".to_string());
        }

        if api_version == ApiVersion::V2 {
            if has_forbidden_chars(&self.name) {
                return Err(format!("invalid character in attribute name: {}", self.name));
            }
            if has_forbidden_chars(&self.attr_type) {
                return Err(format!("invalid character in attribute type: {}", self.attr_type));
            }
        }

        Ok(())
    }
}

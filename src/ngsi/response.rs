//! Per-entity results
//!
//! One matched entity's result (descriptor, attributes, per-entity status)
//! and the ordered, owned collection of them. Insertion order is result
//! order and reflects match order from the query.

use crate::ngsi::entity::{ContextAttribute, EntityId};
use crate::ngsi::status::{SccCode, StatusCode};
use crate::types::{ApiVersion, OperationKind};
use serde_json::{Map, Value};

/// One entity's result: descriptor, attributes, and its own status code.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextElementResponse {
    pub entity: EntityId,
    pub attributes: Vec<ContextAttribute>,
    pub status_code: StatusCode,
}

impl ContextElementResponse {
    /// Result for a successfully matched entity; the per-element status is
    /// pre-filled with Ok.
    pub fn new(entity: EntityId, attributes: Vec<ContextAttribute>) -> Self {
        let mut status_code = StatusCode::new();
        status_code.fill(SccCode::Ok, "");
        ContextElementResponse {
            entity,
            attributes,
            status_code,
        }
    }

    pub fn with_status(entity: EntityId, attributes: Vec<ContextAttribute>, status_code: StatusCode) -> Self {
        ContextElementResponse {
            entity,
            attributes,
            status_code,
        }
    }

    /// Validate the entity descriptor and every attribute, short-circuiting
    /// on the first failure.
    pub fn check(&self, api_version: ApiVersion, operation: OperationKind) -> Result<(), String> {
        self.entity.check(api_version, operation)?;
        for attribute in &self.attributes {
            attribute.check(api_version, operation)?;
        }
        Ok(())
    }

    /// Wire form of one result.
    ///
    /// The `"contextElement"` member carries the entity descriptor plus its
    /// attributes (as a name-keyed object when `as_object`, as an array
    /// otherwise). The per-element status appears only when
    /// `include_error_field` is set, keeping the element form consistent
    /// with whether a top-level error is also rendered.
    pub fn render(
        &self,
        as_object: bool,
        operation: OperationKind,
        attribute_filter: &[String],
        metadata_filter: &[String],
        include_error_field: bool,
    ) -> Value {
        // update responses echo attribute names and types without values
        let omit_value = operation == OperationKind::UpdateContext;

        let selected: Vec<&ContextAttribute> = self
            .attributes
            .iter()
            .filter(|a| attribute_filter.is_empty() || attribute_filter.contains(&a.name))
            .collect();

        let mut context_element = match self.entity.render_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        if !selected.is_empty() {
            let attributes = if as_object {
                let mut out = Map::new();
                for attribute in &selected {
                    out.insert(
                        attribute.name.clone(),
                        attribute.render_value(metadata_filter, omit_value),
                    );
                }
                Value::Object(out)
            } else {
                let mut out = Vec::new();
                for attribute in &selected {
                    let mut body = match attribute.render_value(metadata_filter, omit_value) {
                        Value::Object(map) => map,
                        _ => Map::new(),
                    };
                    body.insert("name".to_string(), Value::String(attribute.name.clone()));
                    out.push(Value::Object(body));
                }
                Value::Array(out)
            };
            context_element.insert("attributes".to_string(), attributes);
        }

        let mut element = Map::new();
        element.insert("contextElement".to_string(), Value::Object(context_element));
        if include_error_field {
            element.insert(
                self.status_code.key_name().to_string(),
                self.status_code.render_value(),
            );
        }

        Value::Object(element)
    }
}

/// Ordered, owned collection of per-entity results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextElementResponseVector {
    items: Vec<ContextElementResponse>,
}

impl ContextElementResponseVector {
    pub fn new() -> Self {
        ContextElementResponseVector { items: Vec::new() }
    }

    /// Append a result; the vector takes ownership.
    pub fn push(&mut self, element: ContextElementResponse) {
        self.items.push(element);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ContextElementResponse> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContextElementResponse> {
        self.items.iter()
    }

    /// Validate the whole collection for the given API version and
    /// operation. A predetected error from an upstream collaborator
    /// short-circuits everything; then the expected-size floor; then each
    /// element in order, stopping at the first failure. The `Err` payload
    /// is the human-readable reason the wire contract carries inside a
    /// BadRequest status.
    pub fn check(
        &self,
        api_version: ApiVersion,
        operation: OperationKind,
        predetected_error: Option<&str>,
        minimum_expected: usize,
    ) -> Result<(), String> {
        if let Some(reason) = predetected_error.filter(|r| !r.is_empty()) {
            return Err(reason.to_string());
        }

        if self.items.len() < minimum_expected {
            return Err(format!(
                "too few context element responses; expected at least {}",
                minimum_expected
            ));
        }

        for element in &self.items {
            element.check(api_version, operation)?;
        }

        Ok(())
    }

    /// The `"contextResponses"` array fragment: every element in insertion
    /// order, each optionally wrapped with its own status code.
    pub fn render(
        &self,
        as_object: bool,
        operation: OperationKind,
        attribute_filter: &[String],
        metadata_filter: &[String],
        include_error_field: bool,
    ) -> Value {
        Value::Array(
            self.items
                .iter()
                .map(|element| {
                    element.render(
                        as_object,
                        operation,
                        attribute_filter,
                        metadata_filter,
                        include_error_field,
                    )
                })
                .collect(),
        )
    }

    /// Drop every owned element. Calling again is a no-op.
    pub fn release(&mut self) {
        self.items.clear();
    }
}

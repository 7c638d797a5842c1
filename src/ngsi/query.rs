//! Query response aggregate
//!
//! `QueryContextResponse` owns the top-level error status and the vector of
//! per-entity results, and decides which of the two a wire payload
//! surfaces. The decision is a small table over the partially-filled state,
//! kept as the pure [`rendering_mode`] function so it stays testable apart
//! from serialization.

use crate::alarms::AlarmManager;
use crate::ngsi::entity::{ContextAttribute, EntityId};
use crate::ngsi::response::{ContextElementResponse, ContextElementResponseVector};
use crate::ngsi::status::{SccCode, StatusCode};
use crate::types::{ApiVersion, OperationKind};
use serde_json::{Map, Value};
use tracing::error;

/// Fixed detail text for the forced internal error when an aggregate
/// reaches rendering with nothing to render. Reaching this state means a
/// result-producing collaborator violated its contract.
const BOTH_EMPTY_DETAILS: &str =
    "Both the error-code structure and the response vector were empty";

/// Which top-level members a payload surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderingMode {
    /// Results are present and nothing warrants an error field.
    ResultsOnly,
    /// No results; the error field carries the outcome (including the
    /// "valid query, zero matches" case, where the code is a success).
    ErrorOnly,
    /// Results plus an error field: an explicit failure with partial
    /// results attached, or informational details on a success.
    Both,
    /// Neither branch was populated. A broker bug, surfaced as a forced
    /// internal error rather than an empty body.
    InternalFault,
}

/// Decide which members to render from the aggregate's state.
///
/// Precedence: an explicit failure code always renders the error field;
/// an empty result set renders it next (something must surface on the
/// wire); attached details render it even on success, alongside results.
pub fn rendering_mode(code: SccCode, details_present: bool, result_count: usize) -> RenderingMode {
    if code.is_error() {
        if result_count > 0 {
            RenderingMode::Both
        } else {
            RenderingMode::ErrorOnly
        }
    } else if result_count == 0 {
        if code == SccCode::None {
            RenderingMode::InternalFault
        } else {
            RenderingMode::ErrorOnly
        }
    } else if details_present {
        RenderingMode::Both
    } else {
        RenderingMode::ResultsOnly
    }
}

/// Aggregate response for a context query: one top-level status (serialized
/// as `"errorCode"`) and the ordered per-entity results. Owns both children
/// exclusively; `Clone` yields a deep, independent copy.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryContextResponse {
    pub error_code: StatusCode,
    pub results: ContextElementResponseVector,
}

impl Default for QueryContextResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryContextResponse {
    pub fn new() -> Self {
        let mut error_code = StatusCode::new();
        error_code.key_name_set("errorCode");
        QueryContextResponse {
            error_code,
            results: ContextElementResponseVector::new(),
        }
    }

    /// Response pre-seeded with an error outcome.
    pub fn from_status(status: &StatusCode) -> Self {
        let mut response = QueryContextResponse::new();
        response.error_code.fill_from(status);
        response
    }

    /// Response pre-seeded with a single entity/attribute result, for the
    /// narrow "resolve one attribute" flows. Both the element status and
    /// the top-level status are filled with Ok.
    pub fn resolve_attribute(entity: &EntityId, attribute: &ContextAttribute) -> Self {
        let mut response = QueryContextResponse::new();
        response.results.push(ContextElementResponse::new(
            entity.clone(),
            vec![attribute.clone()],
        ));
        response.error_code.fill(SccCode::Ok, "");
        response
    }

    /// Serialize the envelope to its JSON wire payload.
    ///
    /// Mutates only to normalize state the decision table requires
    /// (lifting an unset code to Ok when details ride along with results,
    /// or filling the forced internal error); otherwise a repeatable read.
    pub fn render(&mut self, as_object: bool) -> String {
        let mode = rendering_mode(
            self.error_code.code(),
            !self.error_code.details().is_empty(),
            self.results.len(),
        );

        // Informational details attached to an otherwise-successful
        // response: the code must not serialize as the unset sentinel.
        if mode == RenderingMode::Both && self.error_code.code() == SccCode::None {
            self.error_code.code_set(SccCode::Ok);
        }

        let include_error_field = mode != RenderingMode::ResultsOnly;
        let mut envelope = Map::new();

        if !self.results.is_empty() {
            envelope.insert(
                "contextResponses".to_string(),
                self.results.render(
                    as_object,
                    OperationKind::QueryContext,
                    &[],
                    &[],
                    include_error_field,
                ),
            );
        }

        match mode {
            RenderingMode::ResultsOnly => {}
            RenderingMode::ErrorOnly | RenderingMode::Both => {
                envelope.insert(
                    self.error_code.key_name().to_string(),
                    self.error_code.render_value(),
                );
            }
            RenderingMode::InternalFault => {
                error!("runtime error: both error-code and response vector empty");
                self.error_code
                    .fill(SccCode::ReceiverInternalError, BOTH_EMPTY_DETAILS);
                envelope.insert(
                    self.error_code.key_name().to_string(),
                    self.error_code.render_value(),
                );
            }
        }

        Value::Object(envelope).to_string()
    }

    /// Validate the aggregate before serialization.
    ///
    /// `Ok(())` means the caller proceeds to render a success. Any failure
    /// fills the error status with BadRequest and returns the fully
    /// rendered failure payload, so one call both decides and produces the
    /// response body. Validation failures found here (as opposed to
    /// predetected ones) are client mistakes and go through the
    /// rate-limited alarm collaborator, not raw logging.
    pub fn check(
        &mut self,
        api_version: ApiVersion,
        as_object: bool,
        predetected_error: Option<&str>,
        alarms: &AlarmManager,
        client: &str,
    ) -> Result<(), String> {
        if let Some(reason) = predetected_error.filter(|r| !r.is_empty()) {
            self.error_code.fill(SccCode::BadRequest, reason);
        } else if let Err(reason) =
            self.results
                .check(api_version, OperationKind::QueryContext, None, 0)
        {
            alarms.bad_input(client, &reason);
            self.error_code.fill(SccCode::BadRequest, reason);
        } else {
            return Ok(());
        }

        Err(self.render(as_object))
    }

    /// Copy another response into this one: the error status by value
    /// (keeping this response's serialization key) and a deep copy of
    /// every result element, preserving order.
    pub fn fill_from(&mut self, source: &QueryContextResponse) {
        self.error_code.fill_from(&source.error_code);
        for element in source.results.iter() {
            self.results.push(element.clone());
        }
    }

    /// Release both children. Safe to call multiple times; the aggregate
    /// is reusable-empty afterwards.
    pub fn release(&mut self) {
        self.results.release();
        self.error_code.release();
    }
}

//! Protocol status codes
//!
//! NGSI status codes are protocol-level indicators, distinct from the
//! transport status the embedding service eventually maps them to via
//! [`SccCode::number`].

use serde_json::{Map, Value};

/// Protocol status code.
///
/// `None` is a sentinel meaning "not yet set"; it must never appear in a
/// finally-serialized response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SccCode {
    None,
    Ok,
    Created,
    BadRequest,
    Forbidden,
    ContextElementNotFound,
    BadVerb,
    NotAcceptable,
    RequestEntityTooLarge,
    UnsupportedMediaType,
    ReceiverInternalError,
    NotImplemented,
}

impl SccCode {
    /// Numeric wire form of the code.
    pub fn number(self) -> u16 {
        match self {
            SccCode::None => 0,
            SccCode::Ok => 200,
            SccCode::Created => 201,
            SccCode::BadRequest => 400,
            SccCode::Forbidden => 403,
            SccCode::ContextElementNotFound => 404,
            SccCode::BadVerb => 405,
            SccCode::NotAcceptable => 406,
            SccCode::RequestEntityTooLarge => 413,
            SccCode::UnsupportedMediaType => 415,
            SccCode::ReceiverInternalError => 500,
            SccCode::NotImplemented => 501,
        }
    }

    /// Map a numeric code back to its variant. Unknown numbers degrade to
    /// the sentinel, which renders with an "Unknown" reason phrase.
    pub fn from_number(number: u16) -> SccCode {
        match number {
            200 => SccCode::Ok,
            201 => SccCode::Created,
            400 => SccCode::BadRequest,
            403 => SccCode::Forbidden,
            404 => SccCode::ContextElementNotFound,
            405 => SccCode::BadVerb,
            406 => SccCode::NotAcceptable,
            413 => SccCode::RequestEntityTooLarge,
            415 => SccCode::UnsupportedMediaType,
            500 => SccCode::ReceiverInternalError,
            501 => SccCode::NotImplemented,
            _ => SccCode::None,
        }
    }

    pub fn reason_phrase(self) -> &'static str {
        match self {
            SccCode::None => "Unknown",
            SccCode::Ok => "OK",
            SccCode::Created => "Created",
            SccCode::BadRequest => "Bad Request",
            SccCode::Forbidden => "Forbidden",
            SccCode::ContextElementNotFound => "No context element found",
            SccCode::BadVerb => "Bad Verb",
            SccCode::NotAcceptable => "Not Acceptable",
            SccCode::RequestEntityTooLarge => "Request Entity Too Large",
            SccCode::UnsupportedMediaType => "Unsupported Media Type",
            SccCode::ReceiverInternalError => "Internal Server Error",
            SccCode::NotImplemented => "Not Implemented",
        }
    }

    /// True for codes that signal a failure, i.e. neither the unset
    /// sentinel nor a success code.
    pub fn is_error(self) -> bool {
        !matches!(self, SccCode::None | SccCode::Ok)
    }
}

/// Protocol status: code, reason phrase, optional detail text, and the
/// label it serializes under.
///
/// The label defaults to `"statusCode"` (the per-element form); aggregate
/// roots override it, e.g. to `"errorCode"` for query responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCode {
    code: SccCode,
    reason_phrase: String,
    details: String,
    key_name: String,
}

impl Default for StatusCode {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCode {
    pub fn new() -> Self {
        StatusCode {
            code: SccCode::None,
            reason_phrase: String::new(),
            details: String::new(),
            key_name: "statusCode".to_string(),
        }
    }

    pub fn with_code(code: SccCode, details: impl Into<String>) -> Self {
        let mut status = StatusCode::new();
        status.fill(code, details);
        status
    }

    /// Set code and details; the reason phrase is derived from the code
    /// and the key name is left untouched.
    pub fn fill(&mut self, code: SccCode, details: impl Into<String>) {
        self.code = code;
        self.reason_phrase = code.reason_phrase().to_string();
        self.details = details.into();
    }

    /// Copy code, reason phrase and details from another status,
    /// preserving the receiver's key name.
    pub fn fill_from(&mut self, source: &StatusCode) {
        self.code = source.code;
        self.reason_phrase = source.reason_phrase.clone();
        self.details = source.details.clone();
    }

    /// Override the serialization label.
    pub fn key_name_set(&mut self, key_name: impl Into<String>) {
        self.key_name = key_name.into();
    }

    /// Set the code alone, rederiving the reason phrase and keeping
    /// details and key name.
    pub fn code_set(&mut self, code: SccCode) {
        self.code = code;
        self.reason_phrase = code.reason_phrase().to_string();
    }

    pub fn code(&self) -> SccCode {
        self.code
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// Inner wire object: `{ "code": "<n>", "reasonPhrase": "<text>" }`
    /// plus `"details"` when non-empty. The caller pairs it with
    /// [`StatusCode::key_name`]. Never fails; an unfilled status renders
    /// the generic "Unknown" phrase.
    pub fn render_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("code".to_string(), Value::String(self.code.number().to_string()));

        let reason = if self.reason_phrase.is_empty() {
            self.code.reason_phrase()
        } else {
            self.reason_phrase.as_str()
        };
        out.insert("reasonPhrase".to_string(), Value::String(reason.to_string()));

        if !self.details.is_empty() {
            out.insert("details".to_string(), Value::String(self.details.clone()));
        }

        Value::Object(out)
    }

    /// Reset to the unset sentinel, keeping the key name. Idempotent.
    pub fn release(&mut self) {
        self.code = SccCode::None;
        self.reason_phrase.clear();
        self.details.clear();
    }
}

//! Shared protocol parameters for validation and rendering.

use serde::{Deserialize, Serialize};

/// Protocol API version a request was issued against.
///
/// Validation rules differ between versions (V2 rejects characters in
/// identifiers that V1 tolerated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    V2,
}

/// Operation kind a response envelope is being produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    QueryContext,
    UpdateContext,
    NotifyContext,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::QueryContext => "query_context",
            OperationKind::UpdateContext => "update_context",
            OperationKind::NotifyContext => "notify_context",
        }
    }
}

//! NGSI response envelope model
//!
//! Value types for context-query responses: status codes, the entity and
//! attribute model, per-entity results, and the query response aggregate
//! that owns them.

pub mod entity;
pub mod query;
pub mod response;
pub mod status;

pub use entity::{ContextAttribute, EntityId, Metadata};
pub use query::{rendering_mode, QueryContextResponse, RenderingMode};
pub use response::{ContextElementResponse, ContextElementResponseVector};
pub use status::{SccCode, StatusCode};

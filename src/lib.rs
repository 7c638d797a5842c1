//! Cirrus: NGSI-style context broker response core
//!
//! Models the response envelope for context-query operations: per-entity
//! results, a top-level error carrier, and the rules that decide which of
//! the two a wire payload surfaces.

pub mod alarms;
pub mod config;
pub mod error;
pub mod logging;
pub mod ngsi;
pub mod types;

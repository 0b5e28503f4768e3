//! Translate a declarative, nested query description into the query-string
//! grammar understood by PostgREST-compatible APIs: horizontal filtering
//! with operator chains and logical grouping, JSON path traversal, vertical
//! filtering with embedded resources, ordering, and pagination.
//!
//! Translation is pure and synchronous; performing the HTTP request is the
//! caller's concern.

pub mod request;
pub mod translation;

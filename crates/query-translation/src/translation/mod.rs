//! Translate a declarative query description into a compiled query string.

pub mod error;
pub mod query;

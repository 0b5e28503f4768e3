//! The low-level representation of a PostgREST request: an ordered list of
//! query-string parameters attached to a resource path.

pub mod helpers;
pub mod string;

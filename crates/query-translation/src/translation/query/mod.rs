//! The translation phases, leaves first: value serialization, condition
//! translation, select translation, order rendering, and the orchestrating
//! root.

pub mod fields;
pub mod filtering;
pub mod root;
pub mod sorting;
pub mod values;

pub use root::translate;

//! Errors for query translation.

/// A type for translation errors. Both variants are structural input errors
/// and abort the whole translation; there is no partial output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A condition value whose shape does not fit its key: a logical
    /// operator given anything but an object of conditions, `in` given
    /// anything but an array, or an operator chain applied to a nested
    /// object.
    #[error("unexpected value shape for condition key '{key}'")]
    ConditionType { key: String },

    /// Logical operators cannot occur inside a JSON path.
    #[error("logical operator '{operator}' cannot be used inside the JSON path '{path}'")]
    NestedLogicalOperator { operator: String, path: String },
}

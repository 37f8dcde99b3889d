//! Errors raised while validating malformed project data.

use thiserror::Error;

/// Malformed input found by a validator.
///
/// Validators never let these escape the audit: the [`Auditor`](crate::Auditor)
/// turns each one into a single synthetic check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// A variable has an empty or all-slash name.
    #[error("variable `{id}` has an empty name")]
    EmptyVariableName {
        /// Variable id.
        id: String,
    },

    /// A text style has an empty name.
    #[error("text style #{index} has an empty name")]
    EmptyStyleName {
        /// Position in the text style list.
        index: usize,
    },

    /// A solid paint carries no color.
    #[error("node `{node_id}` ({node_name}): solid {property}[{index}] has no color")]
    MissingPaintColor {
        /// Node id.
        node_id: String,
        /// Node name.
        node_name: String,
        /// `fills` or `strokes`.
        property: &'static str,
        /// Paint index.
        index: usize,
    },
}

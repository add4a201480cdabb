//! Style validation errors.

use thiserror::Error;

/// Error returned when a style breaks one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleValidationError {
    /// The style has no name, so it cannot be looked up.
    #[error("style name must not be empty")]
    EmptyName,
    /// The style ends at a closing tag but has no tag to match it against.
    #[error("style '{name}' ends at an end tag but has no tag name")]
    EndTagWithoutTag { name: String },
    /// A text field starts or ends with whitespace.
    #[error("style {name:?}: {field} has leading or trailing whitespace")]
    PaddedText { name: String, field: &'static str },
    /// A text field holds a line break or another control character.
    #[error("style {name:?}: {field} contains a control character")]
    ControlCharacter { name: String, field: &'static str },
    /// A numeric field is NaN or infinite.
    #[error("style '{name}': {field} must be a finite number")]
    NonFiniteNumber { name: String, field: &'static str },
}

//! Error types for stylesheet operations.
//!
//! Lookup misses are not errors: [`StyleSheet::style_named`](crate::StyleSheet::style_named)
//! returns `None`. Everything here is a real failure the caller must handle,
//! typically by falling back to the built-in sheet.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::style::StyleValidationError;

/// A single style record that could not be read.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {kind}")]
pub struct RecordError {
    /// 1-based line in the input where the problem was found.
    pub line: usize,
    pub kind: RecordErrorKind,
}

impl RecordError {
    pub(crate) fn new(line: usize, kind: RecordErrorKind) -> Self {
        Self { line, kind }
    }
}

/// What went wrong with a style record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordErrorKind {
    #[error("record has no Name field")]
    MissingName,
    #[error("'{text}' is not a 'Key: value' line")]
    Syntax { text: String },
    #[error("invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
    #[error("style '{0}' is defined more than once")]
    DuplicateName(String),
    #[error(transparent)]
    Invalid(#[from] StyleValidationError),
}

/// Errors from building, loading and saving stylesheets.
#[derive(Debug, Error)]
pub enum StyleError {
    /// A standalone style record failed to parse.
    #[error("malformed style record: {0}")]
    MalformedStyleRecord(#[from] RecordError),

    /// A record inside a sheet failed to parse; the whole load is abandoned.
    #[error("malformed style sheet '{sheet}' at record {index}: {source}")]
    MalformedStyleSheet {
        sheet: String,
        /// 0-based position of the offending record among the style records.
        index: usize,
        #[source]
        source: RecordError,
    },

    /// A style with this name is already in the sheet.
    #[error("style '{name}' already exists in the sheet")]
    DuplicateStyleName { name: String },

    #[error("invalid style: {0}")]
    Invalid(#[from] StyleValidationError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid YAML stylesheet: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl StyleError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        StyleError::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn io_at(action: &str, path: &Path, source: io::Error) -> Self {
        Self::io(format!("failed to {} '{}'", action, path.display()), source)
    }

    /// Returns the underlying record error for record and sheet failures.
    pub fn record_error(&self) -> Option<&RecordError> {
        match self {
            StyleError::MalformedStyleRecord(err) => Some(err),
            StyleError::MalformedStyleSheet { source, .. } => Some(source),
            _ => None,
        }
    }
}

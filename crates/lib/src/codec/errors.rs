//! Error types for the XML codec.
//!
//! This module defines structured error types for serializing states to XML and reading
//! them back, including scalar text that cannot be parsed and element shapes that do not
//! belong to the document layout.

use thiserror::Error;

/// Structured error types for codec operations.
///
/// None of these are transient: they point at bad input data or a broken contract with
/// the caller, so they are surfaced as-is and never retried.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CodecError {
    /// Scalar text does not match the encoding of its declared type
    #[error("Malformed {scalar_type} value for field '{field}': {text:?}")]
    MalformedScalar {
        field: String,
        scalar_type: String,
        text: String,
    },

    /// An element does not have any recognized shape
    #[error("Malformed document at {path}: {reason}")]
    MalformedDocument { path: String, reason: String },

    /// A calendar that the canonical text form cannot hold
    #[error("Unrepresentable calendar for field '{field}': {value} ({reason})")]
    UnrepresentableCalendar {
        field: String,
        value: String,
        reason: String,
    },

    /// A state key cannot be turned into an element name
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// The XML reader or writer failed
    #[error("XML error: {reason}")]
    Xml { reason: String },
}

impl CodecError {
    /// Check if this error is an unparseable scalar
    pub fn is_malformed_scalar(&self) -> bool {
        matches!(self, CodecError::MalformedScalar { .. })
    }

    /// Check if this error is an unrecognized document shape or unreadable XML
    pub fn is_malformed_document(&self) -> bool {
        matches!(
            self,
            CodecError::MalformedDocument { .. } | CodecError::Xml { .. }
        )
    }

    /// Check if this error is a calendar with no canonical text form
    pub fn is_unrepresentable_calendar(&self) -> bool {
        matches!(self, CodecError::UnrepresentableCalendar { .. })
    }

    /// Check if this error is an invalid key
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, CodecError::InvalidKey { .. })
    }

    /// Get the document path if this is a document shape error
    pub fn path(&self) -> Option<&str> {
        match self {
            CodecError::MalformedDocument { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get the field if this is a scalar error
    pub fn field(&self) -> Option<&str> {
        match self {
            CodecError::MalformedScalar { field, .. }
            | CodecError::UnrepresentableCalendar { field, .. } => Some(field),
            _ => None,
        }
    }
}

// Conversion from CodecError to the main Error type
impl From<CodecError> for crate::Error {
    fn from(err: CodecError) -> Self {
        crate::Error::Codec(err)
    }
}

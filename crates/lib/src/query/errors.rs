//! Error types for the query builders.

use thiserror::Error;

/// Structured error types for query building.
///
/// The builders never substitute a semantically close query for one they cannot express:
/// they fail with [`QueryError::UnsupportedPredicate`] instead.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum QueryError {
    /// An operator or operand shape that cannot be lowered to a `cts:` query
    #[error("Unsupported predicate '{operator}': {reason}")]
    UnsupportedPredicate { operator: String, reason: String },

    /// A field that cannot be resolved to a document path
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// Ordering on a field that has no range element index
    #[error("No range element index configured for '{field}'")]
    MissingRangeIndex { field: String },

    /// Invalid query configuration
    #[error("Invalid query configuration: {reason}")]
    Config { reason: String },
}

impl QueryError {
    /// Check if this error is an operator or operand that cannot be lowered
    pub fn is_unsupported_predicate(&self) -> bool {
        matches!(self, QueryError::UnsupportedPredicate { .. })
    }

    /// Check if this error is an unresolvable field
    pub fn is_invalid_field(&self) -> bool {
        matches!(self, QueryError::InvalidField { .. })
    }

    /// Check if this error is a missing range element index
    pub fn is_missing_range_index(&self) -> bool {
        matches!(self, QueryError::MissingRangeIndex { .. })
    }

    /// Check if this error is a configuration problem
    pub fn is_config_error(&self) -> bool {
        matches!(self, QueryError::Config { .. })
    }

    /// Get the operator if this is an unsupported predicate
    pub fn operator(&self) -> Option<&str> {
        match self {
            QueryError::UnsupportedPredicate { operator, .. } => Some(operator),
            _ => None,
        }
    }
}

// Conversion from QueryError to the main Error type
impl From<QueryError> for crate::Error {
    fn from(err: QueryError) -> Self {
        crate::Error::Query(err)
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Config {
            reason: err.to_string(),
        }
    }
}

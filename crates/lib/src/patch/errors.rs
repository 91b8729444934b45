//! Error types for the patch builders.

use thiserror::Error;

/// Structured error types for patch building.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PatchError {
    /// A diff entry that cannot be addressed to a valid document path
    #[error("Invalid diff at {path}: {reason}")]
    InvalidDiff { path: String, reason: String },
}

impl PatchError {
    /// Check if this error is an unaddressable diff entry
    pub fn is_invalid_diff(&self) -> bool {
        matches!(self, PatchError::InvalidDiff { .. })
    }

    /// Get the path of the offending diff entry
    pub fn path(&self) -> Option<&str> {
        match self {
            PatchError::InvalidDiff { path, .. } => Some(path),
        }
    }
}

// Conversion from PatchError to the main Error type
impl From<PatchError> for crate::Error {
    fn from(err: PatchError) -> Self {
        crate::Error::Patch(err)
    }
}

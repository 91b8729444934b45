//!
//! docstate-marklogic: maps generic document state onto MarkLogic.
//! This library converts in-memory document state to and from MarkLogic's native XML,
//! compiles filter expressions into `cts:` queries, and builds REST patches from state diffs.
//!
//! ## Core Concepts
//!
//! * **State (`state::State`)**: A semi-structured document, keyed by colon-namespaced field names
//!   (`ecm:id`, `dc:title`) with typed values, sub-states, lists of sub-states and scalar arrays.
//! * **StateDiff (`state::StateDiff`)**: A partial update. List entries can be patched element by
//!   element instead of being rewritten whole.
//! * **Codec (`codec`)**: Serializes a `State` to the `<document>` XML layout and reads it back.
//! * **Helper (`helper`)**: The canonical text forms of scalars and the key to element name mapping.
//! * **Queries (`query`)**: Three builders at different levels:
//!     * **SimpleQueryBuilder**: field equality and exclusion as a `cts:` query.
//!     * **QueryByExampleBuilder**: the same predicates as a query-by-example document.
//!     * **MarkLogicQueryBuilder**: a full expression tree, projection, ordering and paging.
//! * **Patches (`patch`)**: `rapi:patch` documents for state diffs and for the document lock.
//!
//! Every transform is a pure function of its inputs. Executing the payloads is the caller's job.
//!
//! ## Example
//!
//! ```
//! use docstate_marklogic::{codec, state::State};
//!
//! let mut state = State::new();
//! state.put("ecm:id", "ID");
//!
//! let xml = codec::serialize(&state)?;
//! assert_eq!(codec::deserialize(xml.as_str())?, state);
//! # Ok::<(), docstate_marklogic::Error>(())
//! ```

pub mod codec;
pub mod constants;
pub mod helper;
pub mod patch;
pub mod query;
pub mod state;

pub use codec::XmlDocument;
pub use patch::{MarkLogicLockUpdateBuilder, MarkLogicUpdateBuilder, Patch};
pub use query::{MarkLogicQueryBuilder, QueryByExampleBuilder, SimpleQueryBuilder};
pub use state::{State, StateDiff, Value};

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured errors from the XML codec and scalar helper
    #[error(transparent)]
    Codec(codec::CodecError),

    /// Structured errors from the query builders
    #[error(transparent)]
    Query(query::QueryError),

    /// Structured errors from the patch builders
    #[error(transparent)]
    Patch(patch::PatchError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Codec(_) => "codec",
            Error::Query(_) => "query",
            Error::Patch(_) => "patch",
        }
    }

    /// Check if this error comes from an unparseable scalar.
    pub fn is_malformed_scalar(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_malformed_scalar(),
            _ => false,
        }
    }

    /// Check if this error is a calendar the document format cannot hold.
    pub fn is_unrepresentable_calendar(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_unrepresentable_calendar(),
            _ => false,
        }
    }

    /// Check if this error comes from an unrecognized document shape.
    pub fn is_malformed_document(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_malformed_document(),
            _ => false,
        }
    }

    /// Check if this error is a key that cannot be used as an element name.
    pub fn is_invalid_key(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_invalid_key(),
            Error::Query(query_err) => query_err.is_invalid_field(),
            _ => false,
        }
    }

    /// Check if this error is a predicate the query builders cannot lower.
    pub fn is_unsupported_predicate(&self) -> bool {
        match self {
            Error::Query(query_err) => query_err.is_unsupported_predicate(),
            _ => false,
        }
    }

    /// Check if this error is a diff entry that cannot be addressed.
    pub fn is_invalid_diff(&self) -> bool {
        match self {
            Error::Patch(patch_err) => patch_err.is_invalid_diff(),
            _ => false,
        }
    }

    /// Check if this error is configuration-related.
    pub fn is_config_error(&self) -> bool {
        match self {
            Error::Query(query_err) => query_err.is_config_error(),
            _ => false,
        }
    }
}

//! `rapi:patch` builders.
//!
//! A [`Patch`] is an ordered list of path-addressed operations that MarkLogic applies to a
//! stored document as one request. [`MarkLogicUpdateBuilder`] derives one from a
//! [`StateDiff`](crate::state::StateDiff); [`MarkLogicLockUpdateBuilder`] writes and
//! clears the lock fields.
//!
//! Operation content is rendered by the codec's serializer, so patched elements are
//! indistinguishable from elements written with the whole document.

pub mod errors;
pub mod lock;
pub mod ops;
pub mod update;

pub use errors::PatchError;
pub use lock::MarkLogicLockUpdateBuilder;
pub use ops::{Content, Patch, PatchOperation, Position};
pub use update::MarkLogicUpdateBuilder;

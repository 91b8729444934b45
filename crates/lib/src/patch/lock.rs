//! Patches of the document lock.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::ops::{Content, Patch, PatchOperation};
use crate::Result;
use crate::constants::{DOCUMENT_ROOT_PATH, KEY_LOCK_CREATED, KEY_LOCK_OWNER};
use crate::helper;

/// Builds the patches taking and releasing the lock of a document.
///
/// The builder only describes the write. Checking that the lock is free is up to the
/// caller and the database.
#[derive(Debug, Clone, Default)]
pub struct MarkLogicLockUpdateBuilder;

impl MarkLogicLockUpdateBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Records `owner` as the lock holder since `created`.
    pub fn set(&self, owner: &str, created: DateTime<Utc>) -> Result<Patch> {
        let mut patch = Patch::new();
        patch.push(replace_insert(KEY_LOCK_OWNER, owner)?);
        patch.push(replace_insert(KEY_LOCK_CREATED, created)?);
        debug!(owner, "Built lock patch");
        Ok(patch)
    }

    /// Removes the lock.
    pub fn delete(&self) -> Result<Patch> {
        let mut patch = Patch::new();
        for key in [KEY_LOCK_OWNER, KEY_LOCK_CREATED] {
            let element = helper::serialize_key(key)?;
            patch.push(PatchOperation::Delete {
                select: format!("{DOCUMENT_ROOT_PATH}/{element}"),
            });
        }
        debug!("Built unlock patch");
        Ok(patch)
    }
}

fn replace_insert(key: &str, value: impl Into<crate::Value>) -> Result<PatchOperation> {
    let element = helper::serialize_key(key)?;
    Ok(PatchOperation::ReplaceInsert {
        context: DOCUMENT_ROOT_PATH.to_string(),
        select: element.clone(),
        content: Content::new(element, value),
    })
}

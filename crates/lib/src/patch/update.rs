//! Patches from state diffs.
//!
//! Each diff entry becomes operations addressed at the entry's own path, so a patch never
//! rewrites more of the document than the diff changes:
//!
//! | diff entry            | operation                                            |
//! |-----------------------|------------------------------------------------------|
//! | set, counter delta    | replace-insert of the element                        |
//! | remove                | delete of the element                                |
//! | nested state diff     | the nested entries, under the sub-state's path       |
//! | list diff, element i  | replace-insert of `k__item[i+1]`, or nested entries  |
//! | list diff, rpush      | insert of a `k__item` as last child                  |

use std::collections::HashSet;

use tracing::{debug, trace};

use super::PatchError;
use super::ops::{Content, Patch, PatchOperation, Position};
use crate::Result;
use crate::constants::DOCUMENT_ROOT_PATH;
use crate::helper;
use crate::state::{Diff, DiffElement, ListDiff, StateDiff, Value};

/// Builds the patch applying a [`StateDiff`] to a stored document.
///
/// ```
/// use docstate_marklogic::{MarkLogicUpdateBuilder, StateDiff};
///
/// let mut diff = StateDiff::new();
/// diff.set("dc:title", "renamed").remove("dc:description");
///
/// let patch = MarkLogicUpdateBuilder::new().build_patch(&diff)?;
/// assert_eq!(patch.len(), 2);
/// # Ok::<(), docstate_marklogic::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkLogicUpdateBuilder;

impl MarkLogicUpdateBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Lowers `diff` to patch operations.
    ///
    /// Fails with [`PatchError::InvalidDiff`] if an entry cannot be addressed; no partial
    /// patch is returned.
    pub fn build_patch(&self, diff: &StateDiff) -> Result<Patch> {
        let mut lowering = Lowering::default();
        lowering.state(DOCUMENT_ROOT_PATH, "", diff)?;
        debug!(
            entries = diff.len(),
            operations = lowering.patch.len(),
            "Built update patch"
        );
        Ok(lowering.patch)
    }
}

fn invalid_diff(path: &str, reason: impl Into<String>) -> crate::Error {
    PatchError::InvalidDiff {
        path: path.to_string(),
        reason: reason.into(),
    }
    .into()
}

/// Key path used in errors, e.g. `files:files/2/name`.
fn key_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}/{key}")
    }
}

#[derive(Default)]
struct Lowering {
    patch: Patch,
    targets: HashSet<String>,
}

impl Lowering {
    /// Records `operation`, refusing a second write or delete of the same node.
    fn push(&mut self, path: &str, operation: PatchOperation) -> Result<()> {
        if !matches!(operation, PatchOperation::Insert { .. })
            && !self.targets.insert(operation.target())
        {
            return Err(invalid_diff(
                path,
                format!("more than one operation on {}", operation.target()),
            ));
        }
        trace!(%operation, "Patch operation");
        self.patch.push(operation);
        Ok(())
    }

    fn state(&mut self, context: &str, prefix: &str, diff: &StateDiff) -> Result<()> {
        for (key, entry) in diff {
            let path = key_path(prefix, key);
            let element =
                helper::serialize_key(key).map_err(|err| invalid_diff(&path, err.to_string()))?;
            match entry {
                Diff::Set(value) => self.push(
                    &path,
                    PatchOperation::ReplaceInsert {
                        context: context.to_string(),
                        select: element.clone(),
                        content: Content::new(element, value.clone()),
                    },
                )?,
                Diff::Delta { base, delta } => {
                    let value = entry.delta_value().ok_or_else(|| {
                        invalid_diff(&path, format!("{base} + {delta} overflows a long"))
                    })?;
                    self.push(
                        &path,
                        PatchOperation::ReplaceInsert {
                            context: context.to_string(),
                            select: element.clone(),
                            content: Content::new(element, value),
                        },
                    )?
                }
                Diff::Remove => self.push(
                    &path,
                    PatchOperation::Delete {
                        select: format!("{context}/{element}"),
                    },
                )?,
                Diff::State(nested) => {
                    self.state(&format!("{context}/{element}"), &path, nested)?
                }
                Diff::List(list) => self.list(context, &element, &path, list)?,
            }
        }
        Ok(())
    }

    fn list(&mut self, context: &str, element: &str, path: &str, list: &ListDiff) -> Result<()> {
        let list_context = format!("{context}/{element}");
        let item = helper::item_name(element);

        for (index, change) in list.diff.iter().enumerate() {
            let item_path = format!("{path}/{index}");
            let selected = format!("{item}[{}]", index + 1);
            match change {
                DiffElement::Nop => {}
                DiffElement::Set(value) => {
                    check_element(list, &item_path, value)?;
                    self.push(
                        &item_path,
                        PatchOperation::ReplaceInsert {
                            context: list_context.clone(),
                            select: selected,
                            content: Content::new(item.as_str(), value.clone()),
                        },
                    )?;
                }
                DiffElement::State(nested) => {
                    if list.is_array {
                        return Err(invalid_diff(&item_path, "sub-state diff inside an array"));
                    }
                    self.state(&format!("{list_context}/{selected}"), &item_path, nested)?;
                }
            }
        }

        for value in &list.rpush {
            check_element(list, path, value)?;
            self.push(
                path,
                PatchOperation::Insert {
                    context: list_context.clone(),
                    position: Position::LastChild,
                    content: Content::new(item.as_str(), value.clone()),
                },
            )?;
        }
        Ok(())
    }
}

/// Arrays hold non-null scalars, lists hold sub-states.
fn check_element(list: &ListDiff, path: &str, value: &Value) -> Result<()> {
    let valid = if list.is_array {
        value.is_scalar() && !value.is_null()
    } else {
        matches!(value, Value::State(_))
    };
    if valid {
        Ok(())
    } else {
        let container = if list.is_array { "an array" } else { "a list" };
        Err(invalid_diff(
            path,
            format!("a {} value cannot be an element of {container}", value.type_name()),
        ))
    }
}

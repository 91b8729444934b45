//! Resolution of logical field names to document paths.
//!
//! The query builder never looks fields up itself: it is handed a [`PathResolver`]. The
//! resolver knows which logical names are aliases, which fields are arrays or booleans,
//! and, when backed by a live session, which document lives at a given path.

use std::collections::{HashMap, HashSet};

use super::QueryError;
use crate::Result;
use crate::constants::{ITEM_SUFFIX, KEY_ANCESTOR_IDS, KEY_ID, KEY_READ_ACL};
use crate::helper;

/// The document path a field resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Physical field, segments joined with `/` and wildcards dropped (`picture:views/width`)
    pub field: String,
    /// Element names from the document root down to the element holding the value
    pub elements: Vec<String>,
    /// The value lives in the items of an array
    pub array: bool,
    /// The field stores booleans
    pub boolean: bool,
}

impl ResolvedPath {
    /// Name of the element holding the value.
    pub fn leaf(&self) -> &str {
        self.elements.last().map(String::as_str).unwrap_or_default()
    }

    /// Enclosing elements of the leaf, outermost first, skipping list and array items.
    pub fn containers(&self) -> impl DoubleEndedIterator<Item = &str> {
        let count = self.elements.len().saturating_sub(1);
        self.elements[..count]
            .iter()
            .map(String::as_str)
            .filter(|element| !element.ends_with(ITEM_SUFFIX))
    }

    /// Path of the field's element below the document root; arrays stop at the wrapper.
    pub fn field_xpath(&self) -> String {
        let count = if self.array {
            self.elements.len().saturating_sub(1).max(1)
        } else {
            self.elements.len()
        };
        self.elements[..count].join("/")
    }
}

/// Maps logical field names to document paths.
pub trait PathResolver: Send + Sync {
    /// Resolves `field`, e.g. `dc:title`, `dc:contributors/*` or `picture:views/*/width`.
    fn resolve(&self, field: &str) -> Result<ResolvedPath>;

    /// Returns the id of the document stored at `path`, if any.
    fn document_id_by_path(&self, path: &str) -> Option<String> {
        let _ = path;
        None
    }
}

/// A [`PathResolver`] driven by static schema knowledge.
///
/// The default instance knows the system fields: `ecm:uuid` is stored as `ecm:id`,
/// `ecm:mixinType` as the `ecm:mixinTypes` array, and the `ecm:is*` flags are booleans.
#[derive(Debug, Clone)]
pub struct SchemaResolver {
    aliases: HashMap<String, String>,
    arrays: HashSet<String>,
    booleans: HashSet<String>,
    documents: HashMap<String, String>,
}

impl Default for SchemaResolver {
    fn default() -> Self {
        Self::empty()
            .with_alias("ecm:uuid", KEY_ID)
            .with_alias("ecm:mixinType", "ecm:mixinTypes")
            .with_array("ecm:mixinTypes")
            .with_array(KEY_ANCESTOR_IDS)
            .with_array(KEY_READ_ACL)
            .with_boolean("ecm:isProxy")
            .with_boolean("ecm:isVersion")
            .with_boolean("ecm:isCheckedIn")
            .with_boolean("ecm:isLatestVersion")
            .with_boolean("ecm:isTrashed")
    }
}

impl SchemaResolver {
    /// A resolver with the system fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver that knows nothing and maps every field to itself.
    pub fn empty() -> Self {
        Self {
            aliases: HashMap::new(),
            arrays: HashSet::new(),
            booleans: HashSet::new(),
            documents: HashMap::new(),
        }
    }

    /// Stores logical field `logical` under `physical`.
    pub fn with_alias(mut self, logical: impl Into<String>, physical: impl Into<String>) -> Self {
        self.aliases.insert(logical.into(), physical.into());
        self
    }

    /// Declares `field` as a scalar array.
    pub fn with_array(mut self, field: impl Into<String>) -> Self {
        self.arrays.insert(field.into());
        self
    }

    /// Declares `field` as a boolean.
    pub fn with_boolean(mut self, field: impl Into<String>) -> Self {
        self.booleans.insert(field.into());
        self
    }

    /// Records that the document at `path` has id `id`.
    pub fn with_document(mut self, path: impl Into<String>, id: impl Into<String>) -> Self {
        self.documents.insert(path.into(), id.into());
        self
    }
}

fn invalid_field(field: &str, reason: impl Into<String>) -> crate::Error {
    QueryError::InvalidField {
        field: field.to_string(),
        reason: reason.into(),
    }
    .into()
}

impl PathResolver for SchemaResolver {
    fn resolve(&self, field: &str) -> Result<ResolvedPath> {
        let mut segments = field.split('/');
        let first = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| invalid_field(field, "empty field name"))?;
        let first = self.aliases.get(first).map(String::as_str).unwrap_or(first);

        let element_of = |segment: &str| {
            helper::serialize_key(segment).map_err(|err| invalid_field(field, err.to_string()))
        };

        let mut elements = vec![element_of(first)?];
        let mut physical = vec![first];
        let mut wildcard_leaf = false;
        for segment in segments {
            if segment == "*" {
                let items = helper::item_name(elements.last().map(String::as_str).unwrap_or(""));
                elements.push(items);
                wildcard_leaf = true;
                continue;
            }
            if segment.starts_with('*') {
                return Err(QueryError::UnsupportedPredicate {
                    operator: segment.to_string(),
                    reason: format!("correlated wildcard in '{field}' cannot be expressed"),
                }
                .into());
            }
            elements.push(element_of(segment)?);
            physical.push(segment);
            wildcard_leaf = false;
        }

        let physical = physical.join("/");
        let mut array = wildcard_leaf;
        if self.arrays.contains(&physical) && !wildcard_leaf {
            let items = helper::item_name(elements.last().map(String::as_str).unwrap_or(""));
            elements.push(items);
            array = true;
        }

        Ok(ResolvedPath {
            boolean: self.booleans.contains(&physical),
            field: physical,
            elements,
            array,
        })
    }

    fn document_id_by_path(&self, path: &str) -> Option<String> {
        self.documents.get(path).cloned()
    }
}

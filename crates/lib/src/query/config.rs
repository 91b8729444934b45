//! Query configuration.
//!
//! Range element indexes are declared on the database; the query builder needs to know
//! about them to use `cts:element-range-query` for equality and `cts:index-order` for
//! sorting. The configuration is plain serde data so callers can keep it in whatever
//! descriptor they load.
//!
//! ```
//! use docstate_marklogic::query::QueryConfig;
//!
//! let config = QueryConfig::from_json(
//!     r#"{ "range_element_indexes": [ { "element": "dc:title", "type": "string" } ] }"#,
//! )?;
//! assert_eq!(config.range_index("dc:title").unwrap().kind, "string");
//! # Ok::<(), docstate_marklogic::Error>(())
//! ```

use serde::{Deserialize, Serialize};

use super::QueryError;
use crate::Result;

/// Scalar types a range element index can be declared with.
pub const RANGE_INDEX_TYPES: &[&str] = &[
    "string", "int", "long", "decimal", "double", "float", "boolean", "dateTime", "date",
];

/// A range element index over one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeElementIndex {
    /// The field (state key, e.g. `dc:title`)
    pub element: String,
    /// The index scalar type (`string`, `long`, `dateTime`, ...)
    #[serde(rename = "type")]
    pub kind: String,
}

impl RangeElementIndex {
    pub fn new(element: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            kind: kind.into(),
        }
    }
}

/// Configuration of the query builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub range_element_indexes: Vec<RangeElementIndex>,
}

impl QueryConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: QueryConfig = serde_json::from_str(json).map_err(QueryError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Adds a range element index.
    pub fn with_range_index(mut self, index: RangeElementIndex) -> Self {
        self.range_element_indexes.push(index);
        self
    }

    /// Checks that every index has a known type and that no field is indexed twice.
    pub fn validate(&self) -> Result<()> {
        for (position, index) in self.range_element_indexes.iter().enumerate() {
            if !RANGE_INDEX_TYPES.contains(&index.kind.as_str()) {
                return Err(QueryError::Config {
                    reason: format!(
                        "range index on '{}' has unknown type '{}'",
                        index.element, index.kind
                    ),
                }
                .into());
            }
            if self.range_element_indexes[..position]
                .iter()
                .any(|other| other.element == index.element)
            {
                return Err(QueryError::Config {
                    reason: format!("'{}' has more than one range index", index.element),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Returns the range element index over `field`, if one is configured.
    pub fn range_index(&self, field: &str) -> Option<&RangeElementIndex> {
        self.range_element_indexes
            .iter()
            .find(|index| index.element == field)
    }
}

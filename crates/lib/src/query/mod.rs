//! Query builders.
//!
//! Three builders produce query payloads for MarkLogic at different levels:
//!
//! - [`SimpleQueryBuilder`]: field equality and exclusion, rendered as a `cts:` query.
//! - [`QueryByExampleBuilder`]: the same predicates as a query-by-example document.
//! - [`MarkLogicQueryBuilder`]: a full [`Expression`] tree plus projection, ordering,
//!   security principals and paging, resolved through an injected [`PathResolver`].
//!
//! ```
//! use docstate_marklogic::query::{PredicateBuilder, SimpleQueryBuilder};
//!
//! let payload = SimpleQueryBuilder::new().eq("ecm:id", "ID").build()?;
//! assert_eq!(
//!     payload.as_str(),
//!     r#"cts:element-value-query(fn:QName("","ecm__id"),"ID",("exact"))"#
//! );
//! # Ok::<(), docstate_marklogic::Error>(())
//! ```

use std::fmt;

pub mod builder;
pub mod config;
pub(crate) mod cts;
pub mod errors;
pub mod example;
pub mod expression;
pub mod resolver;
pub mod simple;

pub use builder::{MarkLogicQuery, MarkLogicQueryBuilder};
pub use config::{QueryConfig, RangeElementIndex};
pub use errors::QueryError;
pub use example::QueryByExampleBuilder;
pub use expression::{Expression, Literal, Operand, Operator, OrderBy};
pub use resolver::{PathResolver, ResolvedPath, SchemaResolver};
pub use simple::SimpleQueryBuilder;

use crate::Result;
use crate::codec::XmlDocument;
use crate::helper;
use crate::state::Value;

/// A query ready to be handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPayload {
    /// A `cts:` query expression
    Cts(String),
    /// A query-by-example document
    Example(XmlDocument),
}

impl QueryPayload {
    pub fn as_str(&self) -> &str {
        match self {
            QueryPayload::Cts(query) => query,
            QueryPayload::Example(document) => document.as_str(),
        }
    }
}

impl fmt::Display for QueryPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level predicates over top-level keys, combined with AND.
///
/// A predicate matches the text of the top-level element itself, so these builders are
/// for scalar fields only. The text of an array wrapper is all of its items run together;
/// match array items with [`MarkLogicQueryBuilder`], which resolves array fields to their
/// `__item` elements.
pub trait PredicateBuilder: Sized {
    /// Matches documents whose `key` equals `value`.
    fn eq(self, key: impl Into<String>, value: impl Into<Value>) -> Self;

    /// Matches documents whose `key` is none of `values`.
    ///
    /// A single value yields a negated equality, several values a negated set membership.
    fn not_in<I, V>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>;

    fn build(&self) -> Result<QueryPayload>;
}

/// A predicate recorded by the simple builders.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldPredicate {
    Eq { key: String, value: Value },
    NotIn { key: String, values: Vec<Value> },
}

impl FieldPredicate {
    fn operator(&self) -> Operator {
        match self {
            FieldPredicate::Eq { .. } => Operator::Eq,
            FieldPredicate::NotIn { .. } => Operator::NotIn,
        }
    }
}

/// Element name of a top-level key.
pub(crate) fn element_name(key: &str) -> Result<String> {
    helper::serialize_key(key).map_err(|err| {
        QueryError::InvalidField {
            field: key.to_string(),
            reason: err.to_string(),
        }
        .into()
    })
}

/// Text of a predicate value; only non-null scalars can be matched.
pub(crate) fn predicate_text(operator: Operator, key: &str, value: &Value) -> Result<String> {
    helper::scalar_to_text(value).ok_or_else(|| {
        unsupported(
            operator,
            format!("cannot match '{key}' against a {} value", value.type_name()),
        )
    })
}

pub(crate) fn unsupported(operator: Operator, reason: impl Into<String>) -> crate::Error {
    QueryError::UnsupportedPredicate {
        operator: operator.as_str().to_string(),
        reason: reason.into(),
    }
    .into()
}

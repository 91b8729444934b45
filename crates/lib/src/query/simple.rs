//! Field predicates rendered as a `cts:` query.

use tracing::debug;

use super::cts;
use super::{FieldPredicate, PredicateBuilder, QueryPayload, element_name, predicate_text};
use crate::Result;
use crate::state::Value;

/// Builds a `cts:` query from equality and exclusion predicates on top-level scalar keys.
///
/// Array fields go through [`MarkLogicQueryBuilder`](super::MarkLogicQueryBuilder); see
/// [`PredicateBuilder`].
///
/// ```
/// use docstate_marklogic::query::{PredicateBuilder, SimpleQueryBuilder};
///
/// let payload = SimpleQueryBuilder::new()
///     .not_in("ecm:id", ["ID1", "ID2"])
///     .build()?;
/// assert_eq!(
///     payload.as_str(),
///     r#"cts:not-query(cts:element-value-query(fn:QName("","ecm__id"),("ID1","ID2"),("exact")))"#
/// );
/// # Ok::<(), docstate_marklogic::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleQueryBuilder {
    predicates: Vec<FieldPredicate>,
}

impl SimpleQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lower(predicate: &FieldPredicate) -> Result<Option<String>> {
        let operator = predicate.operator();
        match predicate {
            FieldPredicate::Eq { key, value } => {
                let element = element_name(key)?;
                let text = predicate_text(operator, key, value)?;
                Ok(Some(cts::value_query(&element, &[text], cts::EXACT)))
            }
            FieldPredicate::NotIn { key, values } => {
                let element = element_name(key)?;
                let texts = values
                    .iter()
                    .map(|value| predicate_text(operator, key, value))
                    .collect::<Result<Vec<_>>>()?;
                if texts.is_empty() {
                    return Ok(None);
                }
                Ok(Some(cts::not_query(&cts::value_query(
                    &element,
                    &texts,
                    cts::EXACT,
                ))))
            }
        }
    }
}

impl PredicateBuilder for SimpleQueryBuilder {
    fn eq(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push(FieldPredicate::Eq {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    fn not_in<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.predicates.push(FieldPredicate::NotIn {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    fn build(&self) -> Result<QueryPayload> {
        let mut queries = Vec::with_capacity(self.predicates.len());
        for predicate in &self.predicates {
            // Excluding nothing matches everything.
            if let Some(query) = Self::lower(predicate)? {
                queries.push(query);
            }
        }

        let query = match queries.len() {
            0 => cts::TRUE_QUERY.to_string(),
            1 => queries.remove(0),
            _ => cts::and_query(&queries),
        };
        debug!(predicates = self.predicates.len(), "Built cts query");
        Ok(QueryPayload::Cts(query))
    }
}

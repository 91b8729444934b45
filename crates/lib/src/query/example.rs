//! Field predicates rendered as a query-by-example document.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use tracing::debug;

use super::{FieldPredicate, PredicateBuilder, QueryPayload, element_name, predicate_text};
use crate::Result;
use crate::codec::xml::{finish, write, write_text_element};
use crate::constants::QBE_NAMESPACE;
use crate::state::Value;

const QBE: &str = "q:qbe";
const QUERY: &str = "q:query";
const NOT: &str = "q:not";
const OR: &str = "q:or";

/// Builds a query-by-example document from equality and exclusion predicates on top-level
/// scalar keys, with the same limits as [`SimpleQueryBuilder`](super::SimpleQueryBuilder).
///
/// ```
/// use docstate_marklogic::query::{PredicateBuilder, QueryByExampleBuilder};
///
/// let payload = QueryByExampleBuilder::new().eq("ecm:id", "ID").build()?;
/// assert_eq!(
///     payload.as_str(),
///     r#"<q:qbe xmlns:q="http://marklogic.com/appservices/querybyexample"><q:query><ecm__id>ID</ecm__id></q:query></q:qbe>"#
/// );
/// # Ok::<(), docstate_marklogic::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryByExampleBuilder {
    predicates: Vec<FieldPredicate>,
}

impl QueryByExampleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_predicate(writer: &mut Writer<Vec<u8>>, predicate: &FieldPredicate) -> Result<()> {
        let operator = predicate.operator();
        match predicate {
            FieldPredicate::Eq { key, value } => {
                let element = element_name(key)?;
                let text = predicate_text(operator, key, value)?;
                write_text_element(writer, BytesStart::new(element.as_str()), &text)
            }
            FieldPredicate::NotIn { key, values } => {
                let element = element_name(key)?;
                let texts = values
                    .iter()
                    .map(|value| predicate_text(operator, key, value))
                    .collect::<Result<Vec<_>>>()?;
                if texts.is_empty() {
                    return Ok(());
                }

                write(writer, Event::Start(BytesStart::new(NOT)))?;
                if texts.len() > 1 {
                    write(writer, Event::Start(BytesStart::new(OR)))?;
                }
                for text in &texts {
                    write_text_element(writer, BytesStart::new(element.as_str()), text)?;
                }
                if texts.len() > 1 {
                    write(writer, Event::End(BytesEnd::new(OR)))?;
                }
                write(writer, Event::End(BytesEnd::new(NOT)))
            }
        }
    }
}

impl PredicateBuilder for QueryByExampleBuilder {
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
        let mut writer = Writer::new(Vec::new());
        write(
            &mut writer,
            Event::Start(BytesStart::new(QBE).with_attributes([("xmlns:q", QBE_NAMESPACE)])),
        )?;
        write(&mut writer, Event::Start(BytesStart::new(QUERY)))?;
        for predicate in &self.predicates {
            Self::write_predicate(&mut writer, predicate)?;
        }
        write(&mut writer, Event::End(BytesEnd::new(QUERY)))?;
        write(&mut writer, Event::End(BytesEnd::new(QBE)))?;

        debug!(predicates = self.predicates.len(), "Built query by example");
        Ok(QueryPayload::Example(finish(writer)?))
    }
}

use docstate_marklogic::query::{
    Expression, MarkLogicQueryBuilder, QueryConfig, RangeElementIndex, SchemaResolver,
};

/// `fn:QName("","element")`
pub fn qname(element: &str) -> String {
    format!(r#"fn:QName("","{element}")"#)
}

/// An exact value query on one value.
pub fn exact(element: &str, value: &str) -> String {
    format!(
        r#"cts:element-value-query({},"{value}",("exact"))"#,
        qname(element)
    )
}

/// A resolver knowing a few schema fields on top of the system ones.
pub fn resolver() -> SchemaResolver {
    SchemaResolver::new()
        .with_array("dc:contributors")
        .with_array("dc:subjects")
        .with_document("/default-domain/workspaces", "ws-id")
}

pub fn config() -> QueryConfig {
    QueryConfig::default()
        .with_range_index(RangeElementIndex::new("dc:title", "string"))
        .with_range_index(RangeElementIndex::new("dc:modified", "dateTime"))
}

/// Lowers `expression` with [`resolver`] and no range indexes.
pub fn lower(expression: Expression) -> String {
    let resolver = resolver();
    MarkLogicQueryBuilder::new(&resolver)
        .filter(expression)
        .build()
        .unwrap()
        .cts_query()
        .to_string()
}

/// Lowers `expression` and returns the error.
pub fn lower_err(expression: Expression) -> docstate_marklogic::Error {
    let resolver = resolver();
    MarkLogicQueryBuilder::new(&resolver)
        .filter(expression)
        .build()
        .unwrap_err()
}

//! Rendering of `cts:` query constructors.
//!
//! Every constructor is rendered on one line with no spaces after commas, so query text
//! only depends on the predicates that produced it.

use crate::constants::XSI_NAMESPACE;

pub(crate) const TRUE_QUERY: &str = "cts:true-query()";
pub(crate) const FALSE_QUERY: &str = "cts:false-query()";

pub(crate) const EXACT: &[&str] = &["exact"];
pub(crate) const WILDCARDED: &[&str] = &["wildcarded", "case-sensitive"];
pub(crate) const WILDCARDED_CASE_INSENSITIVE: &[&str] = &["wildcarded", "case-insensitive"];

/// An XQuery string literal. `&` would start an entity reference, `"` would end the literal.
pub(crate) fn string_literal(text: &str) -> String {
    format!(
        "\"{}\"",
        text.replace('&', "&amp;").replace('"', "&quot;")
    )
}

pub(crate) fn qname(element: &str) -> String {
    format!("fn:QName(\"\",{})", string_literal(element))
}

fn sequence(items: &[String]) -> String {
    format!("({})", items.join(","))
}

fn options(options: &[&str]) -> String {
    let items: Vec<String> = options.iter().map(|option| string_literal(option)).collect();
    sequence(&items)
}

/// `cts:element-value-query`; several texts form a set-membership query.
pub(crate) fn value_query(element: &str, texts: &[String], query_options: &[&str]) -> String {
    let values = match texts {
        [single] => string_literal(single),
        _ => sequence(&texts.iter().map(|text| string_literal(text)).collect::<Vec<_>>()),
    };
    format!(
        "cts:element-value-query({},{},{})",
        qname(element),
        values,
        options(query_options)
    )
}

/// A typed XQuery value, `xs:dateTime("…")`.
pub(crate) fn typed_value(kind: &str, text: &str) -> String {
    format!("xs:{kind}({})", string_literal(text))
}

pub(crate) fn range_query(element: &str, operator: &str, value: &str) -> String {
    format!(
        "cts:element-range-query({},{},{})",
        qname(element),
        string_literal(operator),
        value
    )
}

pub(crate) fn element_query(element: &str, inner: &str) -> String {
    format!("cts:element-query({},{inner})", qname(element))
}

/// Matches documents holding an `element`, whatever its content.
pub(crate) fn exists(element: &str) -> String {
    element_query(element, "cts:and-query(())")
}

/// Matches documents holding an `element` marked `xsi:nil="true"`.
pub(crate) fn nil_query(element: &str) -> String {
    format!(
        "cts:element-attribute-value-query({},fn:QName({},\"nil\"),\"true\")",
        qname(element),
        string_literal(XSI_NAMESPACE)
    )
}

pub(crate) fn not_query(inner: &str) -> String {
    format!("cts:not-query({inner})")
}

pub(crate) fn and_query(parts: &[String]) -> String {
    format!("cts:and-query({})", sequence(parts))
}

pub(crate) fn or_query(parts: &[String]) -> String {
    format!("cts:or-query({})", sequence(parts))
}

pub(crate) fn index_order(element: &str, kind: &str, descending: bool) -> String {
    format!(
        "cts:index-order(cts:element-reference({},(\"type={kind}\")),\"{}\")",
        qname(element),
        if descending { "descending" } else { "ascending" }
    )
}

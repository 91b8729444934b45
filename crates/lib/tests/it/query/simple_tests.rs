use docstate_marklogic::{
    Value,
    query::{Expression, PredicateBuilder, QueryPayload, SimpleQueryBuilder},
    state::State,
};

use super::helpers::{exact, lower, qname};

#[test]
fn test_eq() {
    let payload = SimpleQueryBuilder::new().eq("ecm:id", "ID").build().unwrap();
    assert_eq!(payload, QueryPayload::Cts(exact("ecm__id", "ID")));
}

#[test]
fn test_not_in_one_value_is_negated_equality() {
    let payload = SimpleQueryBuilder::new()
        .not_in("ecm:id", ["ID1"])
        .build()
        .unwrap();
    assert_eq!(
        payload.as_str(),
        format!("cts:not-query({})", exact("ecm__id", "ID1"))
    );
}

#[test]
fn test_not_in_several_values_is_negated_membership() {
    let payload = SimpleQueryBuilder::new()
        .not_in("ecm:id", ["ID1", "ID2"])
        .build()
        .unwrap();
    assert_eq!(
        payload.as_str(),
        r#"cts:not-query(cts:element-value-query(fn:QName("","ecm__id"),("ID1","ID2"),("exact")))"#
    );

    let single = SimpleQueryBuilder::new()
        .not_in("ecm:id", ["ID1"])
        .build()
        .unwrap();
    assert_ne!(payload, single);
}

#[test]
fn test_predicates_are_combined_with_and() {
    let payload = SimpleQueryBuilder::new()
        .eq("ecm:parentId", "P")
        .eq("ecm:isProxy", false)
        .not_in("ecm:name", ["a"])
        .build()
        .unwrap();
    assert_eq!(
        payload.as_str(),
        format!(
            "cts:and-query(({},{},cts:not-query({})))",
            exact("ecm__parentId", "P"),
            exact("ecm__isProxy", "false"),
            exact("ecm__name", "a"),
        )
    );
}

#[test]
fn test_scalar_text_forms() {
    let payload = SimpleQueryBuilder::new()
        .eq("dc:created", crate::helpers::calendar(1))
        .build()
        .unwrap();
    assert_eq!(
        payload.as_str(),
        exact("dc__created", "1970-01-01T00:00:00.001")
    );

    let payload = SimpleQueryBuilder::new()
        .eq("ecm:majorVersion", 3i64)
        .build()
        .unwrap();
    assert_eq!(payload.as_str(), exact("ecm__majorVersion", "3"));
}

#[test]
fn test_quotes_are_escaped() {
    let payload = SimpleQueryBuilder::new()
        .eq("dc:title", r#"say "hi" & bye"#)
        .build()
        .unwrap();
    assert_eq!(
        payload.as_str(),
        exact("dc__title", "say &quot;hi&quot; &amp; bye")
    );
}

#[test]
fn test_rejects_containers_and_null() {
    for value in [
        Value::Null,
        Value::from(State::new()),
        Value::from(Vec::<State>::new()),
    ] {
        let err = SimpleQueryBuilder::new()
            .eq("dc:title", value)
            .build()
            .unwrap_err();
        assert!(err.is_unsupported_predicate());
    }
}

#[test]
fn test_eq_matches_the_top_level_element_only() {
    let payload = SimpleQueryBuilder::new()
        .eq("dc:contributors", "bob")
        .build()
        .unwrap();
    assert_eq!(payload.as_str(), exact("dc__contributors", "bob"));

    // Array items are reached through the full builder
    assert_eq!(
        lower(Expression::eq("dc:contributors", "bob")),
        format!(
            "cts:element-query({},{})",
            qname("dc__contributors"),
            exact("dc__contributors__item", "bob")
        )
    );
}

use docstate_marklogic::query::{PredicateBuilder, QueryByExampleBuilder, QueryPayload};

fn qbe(body: &str) -> String {
    format!(
        r#"<q:qbe xmlns:q="http://marklogic.com/appservices/querybyexample"><q:query>{body}</q:query></q:qbe>"#
    )
}

#[test]
fn test_eq() {
    let payload = QueryByExampleBuilder::new()
        .eq("ecm:id", "ID")
        .build()
        .unwrap();
    assert!(matches!(payload, QueryPayload::Example(_)));
    assert_eq!(payload.as_str(), qbe("<ecm__id>ID</ecm__id>"));
}

#[test]
fn test_not_in_one_and_several_values() {
    let single = QueryByExampleBuilder::new()
        .not_in("ecm:id", ["ID1"])
        .build()
        .unwrap();
    assert_eq!(single.as_str(), qbe("<q:not><ecm__id>ID1</ecm__id></q:not>"));

    let several = QueryByExampleBuilder::new()
        .not_in("ecm:id", ["ID1", "ID2"])
        .build()
        .unwrap();
    assert_eq!(
        several.as_str(),
        qbe("<q:not><q:or><ecm__id>ID1</ecm__id><ecm__id>ID2</ecm__id></q:or></q:not>")
    );
}

#[test]
fn test_predicates_in_order() {
    let payload = QueryByExampleBuilder::new()
        .eq("ecm:parentId", "P")
        .not_in("ecm:name", ["a"])
        .build()
        .unwrap();
    assert_eq!(
        payload.as_str(),
        qbe("<ecm__parentId>P</ecm__parentId><q:not><ecm__name>a</ecm__name></q:not>")
    );
}

#[test]
fn test_empty_builder() {
    let payload = QueryByExampleBuilder::new().build().unwrap();
    assert_eq!(payload.as_str(), qbe(""));
}

#[test]
fn test_invalid_key() {
    let err = QueryByExampleBuilder::new()
        .eq("ecm id", "x")
        .build()
        .unwrap_err();
    assert!(err.is_invalid_key());
    assert_eq!(err.module(), "query");
}

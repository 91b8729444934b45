use docstate_marklogic::{
    MarkLogicUpdateBuilder, State, StateDiff, Value,
    patch::{Content, PatchOperation, Position},
    state::{DiffElement, ListDiff, ScalarArray},
};

fn build(diff: &StateDiff) -> Vec<PatchOperation> {
    MarkLogicUpdateBuilder::new()
        .build_patch(diff)
        .unwrap()
        .operations()
        .to_vec()
}

fn replace(context: &str, select: &str, element: &str, value: impl Into<Value>) -> PatchOperation {
    PatchOperation::ReplaceInsert {
        context: context.to_string(),
        select: select.to_string(),
        content: Content::new(element, value),
    }
}

#[test]
fn test_set_and_remove() {
    let mut diff = StateDiff::new();
    diff.set("dc:title", "renamed")
        .set("ecm:lockOwner", Value::Null)
        .remove("dc:description");

    assert_eq!(
        build(&diff),
        vec![
            PatchOperation::Delete {
                select: "/document/dc__description".to_string()
            },
            replace("/document", "dc__title", "dc__title", "renamed"),
            replace("/document", "ecm__lockOwner", "ecm__lockOwner", Value::Null),
        ]
    );
}

#[test]
fn test_delta_writes_the_sum() {
    let mut diff = StateDiff::new();
    diff.delta("uid:minor_version", 4, 1);
    assert_eq!(
        build(&diff),
        vec![replace("/document", "uid__minor_version", "uid__minor_version", 5i64)]
    );

    let mut overflow = StateDiff::new();
    overflow.delta("uid:minor_version", i64::MAX, 1);
    let err = MarkLogicUpdateBuilder::new()
        .build_patch(&overflow)
        .unwrap_err();
    assert!(err.is_invalid_diff());
}

#[test]
fn test_nested_state_diff() {
    let mut nested = StateDiff::new();
    nested.set("width", 800i64).remove("height");
    let mut diff = StateDiff::new();
    diff.diff_state("picture:info", nested);

    assert_eq!(
        build(&diff),
        vec![
            PatchOperation::Delete {
                select: "/document/picture__info/height".to_string()
            },
            replace("/document/picture__info", "width", "width", 800i64),
        ]
    );
}

#[test]
fn test_single_list_element_touches_only_that_element() {
    let mut element = StateDiff::new();
    element.set("name", "renamed.txt");
    let list = ListDiff::list().with_element(2, DiffElement::State(element));
    let mut diff = StateDiff::new();
    diff.diff_list("files:files", list);

    let operations = build(&diff);
    assert_eq!(
        operations,
        vec![replace(
            "/document/files__files/files__files__item[3]",
            "name",
            "name",
            "renamed.txt"
        )]
    );
    assert_eq!(
        operations[0].target(),
        "/document/files__files/files__files__item[3]/name"
    );
}

#[test]
fn test_list_element_replacement_and_append() {
    let replaced = State::new().with("name", "b.txt");
    let appended = State::new().with("name", "c.txt");
    let list = ListDiff::list()
        .with_element(1, DiffElement::Set(replaced.clone().into()))
        .with_rpush(appended.clone());
    let mut diff = StateDiff::new();
    diff.diff_list("files:files", list);

    assert_eq!(
        build(&diff),
        vec![
            replace(
                "/document/files__files",
                "files__files__item[2]",
                "files__files__item",
                replaced
            ),
            PatchOperation::Insert {
                context: "/document/files__files".to_string(),
                position: Position::LastChild,
                content: Content::new("files__files__item", appended),
            },
        ]
    );
}

#[test]
fn test_array_element_replacement() {
    let list = ListDiff::array().with_element(0, DiffElement::Set("carol".into()));
    let mut diff = StateDiff::new();
    diff.diff_list("dc:contributors", list);

    let patch = MarkLogicUpdateBuilder::new().build_patch(&diff).unwrap();
    let xml = patch.to_xml().unwrap();
    assert!(xml.as_str().contains(concat!(
        r#"<rapi:replace-insert select="dc__contributors__item[1]" context="/document/dc__contributors">"#,
        r#"<dc__contributors__item xsi:type="xs:string">carol</dc__contributors__item>"#,
        r#"</rapi:replace-insert>"#
    )));
}

#[test]
fn test_whole_array_set_is_one_operation() {
    let mut diff = StateDiff::new();
    diff.set("dc:subjects", ScalarArray::from(vec!["a", "b"]));
    let operations = build(&diff);
    assert_eq!(operations.len(), 1);
    assert_eq!(operations[0].target(), "/document/dc__subjects");
}

#[test]
fn test_empty_diffs_produce_no_operations() {
    let mut diff = StateDiff::new();
    diff.diff_list("files:files", ListDiff::list())
        .diff_state("picture:info", StateDiff::new());
    assert!(build(&diff).is_empty());
    assert!(build(&StateDiff::new()).is_empty());
}

#[test]
fn test_invalid_diffs() {
    let mut bad_key = StateDiff::new();
    bad_key.set("dc title", "x");

    let mut state_in_array = StateDiff::new();
    state_in_array.diff_list(
        "dc:contributors",
        ListDiff::array().with_element(0, DiffElement::State(StateDiff::new())),
    );

    let mut scalar_in_list = StateDiff::new();
    scalar_in_list.diff_list(
        "files:files",
        ListDiff::list().with_element(0, DiffElement::Set("x".into())),
    );

    let mut null_in_array = StateDiff::new();
    null_in_array.diff_list("dc:contributors", ListDiff::array().with_rpush(Value::Null));

    let mut state_in_array_push = StateDiff::new();
    state_in_array_push.diff_list(
        "dc:contributors",
        ListDiff::array().with_rpush(State::new()),
    );

    let mut nested_bad_key = StateDiff::new();
    let mut inner = StateDiff::new();
    inner.remove("a__b");
    nested_bad_key.diff_state("picture:info", inner);

    for diff in [
        bad_key,
        state_in_array,
        scalar_in_list,
        null_in_array,
        state_in_array_push,
        nested_bad_key,
    ] {
        let err = MarkLogicUpdateBuilder::new().build_patch(&diff).unwrap_err();
        assert!(err.is_invalid_diff(), "{diff:?} should be invalid");
        assert_eq!(err.module(), "patch");
    }
}

#[test]
fn test_patch_document() {
    let mut diff = StateDiff::new();
    diff.set("dc:title", "t").remove("dc:description");
    let xml = MarkLogicUpdateBuilder::new()
        .build_patch(&diff)
        .unwrap()
        .to_xml()
        .unwrap();
    assert_eq!(
        xml.as_str(),
        concat!(
            r#"<rapi:patch xmlns:rapi="http://marklogic.com/rest-api" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xs="http://www.w3.org/2001/XMLSchema">"#,
            r#"<rapi:delete select="/document/dc__description"/>"#,
            r#"<rapi:replace-insert select="dc__title" context="/document"><dc__title xsi:type="xs:string">t</dc__title></rapi:replace-insert>"#,
            r#"</rapi:patch>"#
        )
    );
}

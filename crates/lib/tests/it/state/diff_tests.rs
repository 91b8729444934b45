use docstate_marklogic::state::{Diff, DiffElement, ListDiff, State, StateDiff, Value};

#[test]
fn test_state_diff_builders() {
    let mut nested = StateDiff::new();
    nested.set("width", 800i64);

    let mut diff = StateDiff::new();
    diff.set("dc:title", "renamed")
        .remove("dc:description")
        .delta("uid:major_version", 1, 1)
        .diff_state("picture:info", nested.clone());

    assert_eq!(diff.len(), 4);
    assert_eq!(diff.get("dc:title"), Some(&Diff::Set(Value::from("renamed"))));
    assert_eq!(diff.get("dc:description"), Some(&Diff::Remove));
    assert_eq!(diff.get("picture:info"), Some(&Diff::State(nested)));
    assert_eq!(diff.get("uid:major_version").unwrap().delta_value(), Some(2));

    let keys: Vec<&String> = diff.iter().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        vec!["dc:description", "dc:title", "picture:info", "uid:major_version"]
    );
}

#[test]
fn test_delta_overflow() {
    let diff = Diff::Delta {
        base: i64::MAX,
        delta: 1,
    };
    assert_eq!(diff.delta_value(), None);
    assert_eq!(Diff::Remove.delta_value(), None);
}

#[test]
fn test_list_diff_padding() {
    let diff = ListDiff::list().with_element(2, DiffElement::Set(State::new().into()));
    assert!(!diff.is_array);
    assert_eq!(diff.diff.len(), 3);
    assert_eq!(diff.diff[0], DiffElement::Nop);
    assert_eq!(diff.diff[1], DiffElement::Nop);
    assert!(!diff.is_empty());

    // Setting an earlier index keeps the length
    let diff = diff.with_element(0, DiffElement::Set(State::new().into()));
    assert_eq!(diff.diff.len(), 3);
}

#[test]
fn test_list_diff_emptiness() {
    assert!(ListDiff::array().is_empty());
    assert!(ListDiff::array().with_element(1, DiffElement::Nop).is_empty());
    assert!(!ListDiff::array().with_rpush("x").is_empty());
}

#[test]
fn test_diff_from_state() {
    let state = State::new().with("dc:title", "t").with("ecm:lockOwner", Value::Null);
    let diff = StateDiff::from(state);
    assert_eq!(diff.len(), 2);
    assert_eq!(diff.get("ecm:lockOwner"), Some(&Diff::Set(Value::Null)));
}

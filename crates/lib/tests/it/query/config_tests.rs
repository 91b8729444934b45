use docstate_marklogic::query::{QueryConfig, RangeElementIndex};

#[test]
fn test_config_from_json() {
    let config = QueryConfig::from_json(
        r#"{
            "range_element_indexes": [
                { "element": "dc:title", "type": "string" },
                { "element": "dc:modified", "type": "dateTime" }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(config.range_element_indexes.len(), 2);
    assert_eq!(
        config.range_index("dc:modified"),
        Some(&RangeElementIndex::new("dc:modified", "dateTime"))
    );
    assert_eq!(config.range_index("dc:description"), None);
}

#[test]
fn test_config_defaults_to_no_indexes() {
    let config = QueryConfig::from_json("{}").unwrap();
    assert_eq!(config, QueryConfig::default());
}

#[test]
fn test_config_errors() {
    let unknown_type = QueryConfig::from_json(
        r#"{ "range_element_indexes": [ { "element": "a", "type": "text" } ] }"#,
    )
    .unwrap_err();
    assert!(unknown_type.is_config_error());

    let duplicate = QueryConfig::default()
        .with_range_index(RangeElementIndex::new("a", "string"))
        .with_range_index(RangeElementIndex::new("a", "long"));
    assert!(duplicate.validate().unwrap_err().is_config_error());

    let not_json = QueryConfig::from_json("range_element_indexes").unwrap_err();
    assert!(not_json.is_config_error());
}

use chrono::{TimeZone, Utc};
use docstate_marklogic::{
    State, Value, codec, helper,
    state::ScalarArray,
};

use crate::helpers::{calendar, roundtrip, sample_state};

#[test]
fn test_roundtrip_sample_state() {
    let state = sample_state();
    assert_eq!(roundtrip(&state), state);
}

#[test]
fn test_roundtrip_empty_and_nested_containers() {
    let state = State::new()
        .with("a:list", Vec::<State>::new())
        .with("a:state", State::new())
        .with("a:strings", ScalarArray::from(Vec::<String>::new()))
        .with(
            "a:deep",
            State::new().with(
                "inner",
                State::new().with(
                    "items",
                    vec![State::new().with("leaf", Value::Null)],
                ),
            ),
        );
    assert_eq!(roundtrip(&state), state);
}

#[test]
fn test_roundtrip_scalar_edge_cases() {
    let state = State::new()
        .with("empty", "")
        .with("spaces", "  padded  ")
        .with("markup", "<tag attr=\"v\"> & 'quoted'")
        .with("min", i64::MIN)
        .with("max", i64::MAX)
        .with("infinity", f64::INFINITY)
        .with("tiny", 1e-300)
        .with("epoch", calendar(0))
        .with("typed:number:text", "42");
    assert_eq!(roundtrip(&state), state);
}

#[test]
fn test_calendars_are_built_with_millisecond_precision() {
    let precise = Utc.timestamp_nanos(1_500_000);
    let state = State::new()
        .with("dc:created", precise)
        .with("dc:history", ScalarArray::from(vec![precise, calendar(2)]));
    assert_eq!(state.get("dc:created"), Some(&Value::Calendar(calendar(1))));
    assert_eq!(roundtrip(&state), state);
}

#[test]
fn test_serialize_rejects_calendars_without_canonical_text() {
    for calendar in [
        Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(-1, 6, 1, 0, 0, 0).unwrap(),
        Utc.timestamp_nanos(1_500_000),
    ] {
        // Direct construction skips the truncation done by `From`
        let state = State::new().with("dc:created", Value::Calendar(calendar));
        let err = codec::serialize(&state).unwrap_err();
        assert!(err.is_unrepresentable_calendar(), "serialized {calendar}");
    }

    let last = State::new().with(
        "dc:created",
        Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap(),
    );
    assert_eq!(roundtrip(&last), last);
}

#[test]
fn test_roundtrip_sub_state_shaped_like_a_list() {
    let scalar_item = State::new().with("a", State::new().with("a:item", "v"));
    let xml = codec::serialize(&scalar_item).unwrap();
    assert!(
        xml.as_str()
            .contains(r#"<a><a__item xsi:type="xs:string">v</a__item></a>"#)
    );
    assert_eq!(codec::deserialize(xml.as_str()).unwrap(), scalar_item);

    let state_item = State::new().with(
        "a",
        State::new().with("a:item", State::new().with("x", 1i64)),
    );
    let back = roundtrip(&state_item);
    assert!(matches!(back.get("a"), Some(Value::State(_))));
    assert_eq!(back, state_item);

    let repeated = State::new().with(
        "files",
        State::new()
            .with("files:item", State::new().with("name", "a"))
            .with("other", 2i64),
    );
    assert_eq!(roundtrip(&repeated), repeated);
}

#[test]
fn test_key_bijection() {
    for key in ["ecm:id", "dc:title", "width", "a:b:c", "_private", "x-y.z"] {
        let element = helper::serialize_key(key).unwrap();
        assert_eq!(helper::deserialize_key(&element), key);
    }
}

/// An empty array carries no item to tell its element type, so it reads back as an empty
/// string array. Non-empty arrays keep their type.
#[test]
fn test_empty_non_string_array_reads_back_as_string_array() {
    for empty in [
        ScalarArray::from(Vec::<i64>::new()),
        ScalarArray::from(Vec::<f64>::new()),
        ScalarArray::from(Vec::<bool>::new()),
    ] {
        let state = State::new().with("a", empty);
        let back = roundtrip(&state);
        assert_eq!(
            back.get("a"),
            Some(&Value::from(ScalarArray::from(Vec::<String>::new())))
        );
        assert_ne!(back, state);
    }

    let longs = State::new().with("a", ScalarArray::from(vec![1i64]));
    assert_eq!(roundtrip(&longs), longs);
}

#[test]
fn test_serialize_is_stable_across_roundtrip() {
    let state = sample_state();
    let first = codec::serialize(&state).unwrap();
    let second = codec::serialize(&codec::deserialize(first.as_str()).unwrap()).unwrap();
    assert_eq!(first, second);
}

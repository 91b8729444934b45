use chrono::{DateTime, TimeZone, Utc};
use docstate_marklogic::{
    State, Value, codec,
    state::ScalarArray,
};

/// The serialized form of an empty state.
pub const EMPTY_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?><document xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xs="http://www.w3.org/2001/XMLSchema"/>"#;

/// Wraps `body` in a complete document.
pub fn document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><document xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xs="http://www.w3.org/2001/XMLSchema">{body}</document>"#
    )
}

/// A UTC instant `millis` milliseconds after the epoch.
pub fn calendar(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).unwrap()
}

/// A state exercising every value kind.
pub fn sample_state() -> State {
    let file = |name: &str, length: i64| {
        State::new()
            .with("name", name)
            .with("length", length)
    };

    State::new()
        .with("ecm:id", "0a1b2c3d")
        .with("ecm:primaryType", "File")
        .with("ecm:isProxy", false)
        .with("ecm:lockOwner", Value::Null)
        .with("dc:created", calendar(1_500_000_000_123))
        .with("dc:title", "Quarterly <report> & notes")
        .with("dc:rating", 4.5)
        .with("uid:major_version", 1i64)
        .with("dc:contributors", ScalarArray::from(vec!["bob", "alice"]))
        .with("ecm:racl", ScalarArray::from(vec!["Everyone"]))
        .with("dc:scores", ScalarArray::from(vec![1i64, 2, 3]))
        .with(
            "files:files",
            vec![file("a.txt", 10), file("b.txt", 20)],
        )
        .with(
            "picture:info",
            State::new()
                .with("width", 640i64)
                .with("format", "png"),
        )
}

/// Serializes and deserializes `state`.
pub fn roundtrip(state: &State) -> State {
    let xml = codec::serialize(state).unwrap();
    codec::deserialize(xml.as_str()).unwrap()
}

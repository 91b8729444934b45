use docstate_marklogic::{
    State, Value, codec,
    state::ScalarArray,
};

use crate::helpers::{EMPTY_DOCUMENT, calendar, document};

#[test]
fn test_serialize_empty_state() {
    let xml = codec::serialize(&State::new()).unwrap();
    assert_eq!(xml.as_str(), EMPTY_DOCUMENT);
}

#[test]
fn test_serialize_simple_value() {
    let state = State::new().with("ecm:id", "ID");
    let xml = codec::serialize(&state).unwrap();
    assert_eq!(
        xml.as_str(),
        document(r#"<ecm__id xsi:type="xs:string">ID</ecm__id>"#)
    );
}

#[test]
fn test_serialize_scalars() {
    let state = State::new()
        .with("a:string", "text")
        .with("b:long", -42i64)
        .with("c:double", 0.25)
        .with("d:boolean", true)
        .with("e:calendar", calendar(1))
        .with("f:null", Value::Null);
    let xml = codec::serialize(&state).unwrap();
    assert_eq!(
        xml.as_str(),
        document(concat!(
            r#"<a__string xsi:type="xs:string">text</a__string>"#,
            r#"<b__long xsi:type="xs:long">-42</b__long>"#,
            r#"<c__double xsi:type="xs:double">0.25</c__double>"#,
            r#"<d__boolean xsi:type="xs:boolean">true</d__boolean>"#,
            r#"<e__calendar xsi:type="xs:dateTime">1970-01-01T00:00:00.001</e__calendar>"#,
            r#"<f__null xsi:nil="true"/>"#,
        ))
    );
}

#[test]
fn test_serialize_containers() {
    let state = State::new()
        .with("dc:contributors", ScalarArray::from(vec!["bob", "alice"]))
        .with(
            "files:files",
            vec![State::new().with("name", "a.txt"), State::new()],
        )
        .with("picture:info", State::new().with("width", 640i64))
        .with("picture:empty", State::new());
    let xml = codec::serialize(&state).unwrap();
    assert_eq!(
        xml.as_str(),
        document(concat!(
            r#"<dc__contributors xsi:type="array">"#,
            r#"<dc__contributors__item xsi:type="xs:string">bob</dc__contributors__item>"#,
            r#"<dc__contributors__item xsi:type="xs:string">alice</dc__contributors__item>"#,
            r#"</dc__contributors>"#,
            r#"<files__files xsi:type="list">"#,
            r#"<files__files__item><name xsi:type="xs:string">a.txt</name></files__files__item>"#,
            r#"<files__files__item/>"#,
            r#"</files__files>"#,
            r#"<picture__empty/>"#,
            r#"<picture__info><width xsi:type="xs:long">640</width></picture__info>"#,
        ))
    );
}

#[test]
fn test_serialize_escapes_text() {
    let state = State::new().with("dc:title", "a < b & c");
    let xml = codec::serialize(&state).unwrap();
    assert!(xml.as_str().contains(">a &lt; b &amp; c<"));
}

#[test]
fn test_serialize_is_deterministic() {
    let one = State::new().with("b", 1i64).with("a", 2i64);
    let two = State::new().with("a", 2i64).with("b", 1i64);
    assert_eq!(
        codec::serialize(&one).unwrap(),
        codec::serialize(&two).unwrap()
    );
}

#[test]
fn test_serialize_rejects_invalid_keys() {
    for key in ["", "1abc", "dc title", "a__b", "a<b"] {
        let state = State::new().with(key, "x");
        let err = codec::serialize(&state).unwrap_err();
        assert!(err.is_invalid_key(), "key {key:?} should be rejected");
        assert_eq!(err.module(), "codec");
    }

    let nested = State::new().with("picture:info", State::new().with("bad key", 1i64));
    assert!(codec::serialize(&nested).unwrap_err().is_invalid_key());
}

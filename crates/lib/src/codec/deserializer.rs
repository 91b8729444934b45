//! XML to state.
//!
//! The inverse of [`serialize`](super::serialize). Each element is classified by its
//! markers first and its shape second:
//!
//! | element                                   | value                       |
//! |-------------------------------------------|-----------------------------|
//! | `xsi:nil="true"`                          | `Null`                      |
//! | `xsi:type="array"`                        | `Array`                     |
//! | `xsi:type="list"`                         | `List`                      |
//! | `xsi:type="xs:…"`                         | the matching scalar         |
//! | untyped, with children                    | `State`                     |
//! | untyped, empty                            | empty `State`               |
//! | untyped, text only                        | inferred scalar             |
//!
//! Lists are only ever recognized by their marker. A sub-state whose single key is
//! `<name>:item` has the same shape as an unmarked list.
//!
//! Anything else fails the whole document; there is no partial result.

use tracing::trace;

use super::CodecError;
use super::xml::{self, Element};
use crate::Result;
use crate::constants::{ARRAY_TYPE, DOCUMENT_ROOT, LIST_TYPE, XSI_NIL, XSI_TYPE};
use crate::helper;
use crate::state::{ScalarArray, ScalarType, State, Value};

/// Deserializes a complete document.
pub fn deserialize(xml: impl AsRef<str>) -> Result<State> {
    let root = xml::parse(xml.as_ref())?;
    let path = format!("/{}", root.name);
    if root.name != DOCUMENT_ROOT {
        return Err(malformed(
            &path,
            format!("root element must be <{DOCUMENT_ROOT}>"),
        ));
    }
    let state = read_state(&root, &path)?;
    trace!(fields = state.len(), "Deserialized state");
    Ok(state)
}

fn malformed(path: &str, reason: impl Into<String>) -> crate::Error {
    CodecError::MalformedDocument {
        path: path.to_string(),
        reason: reason.into(),
    }
    .into()
}

fn read_state(element: &Element, path: &str) -> Result<State> {
    if !element.text.trim().is_empty() {
        return Err(malformed(path, "text mixed with child elements"));
    }
    let mut state = State::new();
    for child in &element.children {
        let child_path = format!("{path}/{}", child.name);
        let key = helper::deserialize_key(&child.name);
        if state.contains_key(&key) {
            return Err(malformed(&child_path, format!("duplicate field '{key}'")));
        }
        let value = read_value(child, &key, &child_path)?;
        state.put(key, value);
    }
    Ok(state)
}

fn read_value(element: &Element, key: &str, path: &str) -> Result<Value> {
    if let Some(nil) = element.attribute(XSI_NIL) {
        return match nil {
            "true" | "1" if element.children.is_empty() && element.text.is_empty() => {
                Ok(Value::Null)
            }
            "true" | "1" => Err(malformed(path, "nil element has content")),
            "false" | "0" => read_typed(element, key, path),
            other => Err(malformed(path, format!("invalid {XSI_NIL} value {other:?}"))),
        };
    }
    read_typed(element, key, path)
}

fn read_typed(element: &Element, key: &str, path: &str) -> Result<Value> {
    match element.attribute(XSI_TYPE) {
        Some(ARRAY_TYPE) => read_array(element, key, path),
        Some(LIST_TYPE) => read_list(element, path),
        Some(xsi_type) => {
            let scalar_type = ScalarType::from_xsi_type(xsi_type).ok_or_else(|| {
                malformed(path, format!("unknown {XSI_TYPE} {xsi_type:?}"))
            })?;
            if !element.children.is_empty() {
                return Err(malformed(path, "scalar element has child elements"));
            }
            helper::text_to_scalar(key, scalar_type, &element.text)
        }
        None if element.children.is_empty() && element.text.is_empty() => {
            Ok(Value::State(State::new()))
        }
        None if element.children.is_empty() => Ok(helper::infer_scalar(&element.text)),
        None => read_state(element, path).map(Value::State),
    }
}

fn read_list(element: &Element, path: &str) -> Result<Value> {
    if !element.text.trim().is_empty() {
        return Err(malformed(path, "text mixed with list items"));
    }
    let item = helper::item_name(&element.name);
    let mut list = Vec::with_capacity(element.children.len());
    for (index, child) in element.children.iter().enumerate() {
        let child_path = format!("{path}/{}[{}]", child.name, index + 1);
        if child.name != item {
            return Err(malformed(&child_path, format!("expected <{item}>")));
        }
        if child.attribute(XSI_TYPE).is_some() || child.attribute(XSI_NIL).is_some() {
            return Err(malformed(&child_path, "list items must be sub-states"));
        }
        list.push(read_state(child, &child_path)?);
    }
    Ok(Value::List(list))
}

fn read_array(element: &Element, key: &str, path: &str) -> Result<Value> {
    if !element.text.trim().is_empty() {
        return Err(malformed(path, "text mixed with array items"));
    }
    let item = helper::item_name(&element.name);
    let mut element_type: Option<ScalarType> = None;
    let mut values = Vec::with_capacity(element.children.len());
    for (index, child) in element.children.iter().enumerate() {
        let child_path = format!("{path}/{}[{}]", child.name, index + 1);
        if child.name != item {
            return Err(malformed(&child_path, format!("expected <{item}>")));
        }
        if !child.children.is_empty() {
            return Err(malformed(&child_path, "array items must be scalars"));
        }
        let child_type = match child.attribute(XSI_TYPE) {
            Some(xsi_type) => ScalarType::from_xsi_type(xsi_type).ok_or_else(|| {
                malformed(&child_path, format!("unknown {XSI_TYPE} {xsi_type:?}"))
            })?,
            None => ScalarType::String,
        };
        match element_type {
            Some(expected) if expected != child_type => {
                return Err(malformed(
                    &child_path,
                    format!("array mixes {expected} and {child_type}"),
                ));
            }
            _ => element_type = Some(child_type),
        }
        values.push(helper::text_to_scalar(key, child_type, &child.text)?);
    }

    // Nothing on the wire carries the element type of an empty array
    let element_type = element_type.unwrap_or(ScalarType::String);
    ScalarArray::from_values(element_type, values)
        .map(Value::Array)
        .ok_or_else(|| malformed(path, "array items do not share one type"))
}

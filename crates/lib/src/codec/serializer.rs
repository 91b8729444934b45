//! State to XML.
//!
//! Layout of a serialized state:
//!
//! ```xml
//! <document xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xs="http://www.w3.org/2001/XMLSchema">
//!   <ecm__id xsi:type="xs:string">ID</ecm__id>
//!   <ecm__lockOwner xsi:nil="true"/>
//!   <dc__contributors xsi:type="array">
//!     <dc__contributors__item xsi:type="xs:string">bob</dc__contributors__item>
//!   </dc__contributors>
//!   <files__files xsi:type="list">
//!     <files__files__item><name xsi:type="xs:string">a.txt</name></files__files__item>
//!   </files__files>
//!   <picture__info><width xsi:type="xs:long">640</width></picture__info>
//! </document>
//! ```
//!
//! Output is written without indentation (shown indented above), and fields are written
//! in key order.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use tracing::trace;

use super::XmlDocument;
use super::xml::{finish, write, write_text_element};
use crate::Result;
use crate::constants::{
    ARRAY_TYPE, DOCUMENT_ROOT, LIST_TYPE, XS_NAMESPACE, XSI_NAMESPACE, XSI_NIL, XSI_TYPE,
};
use crate::helper;
use crate::state::{ScalarType, State, Value};

/// Serializes `state` as a complete document.
pub fn serialize(state: &State) -> Result<XmlDocument> {
    let mut writer = Writer::new(Vec::new());
    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let root = namespaced(BytesStart::new(DOCUMENT_ROOT));
    if state.is_empty() {
        write(&mut writer, Event::Empty(root))?;
    } else {
        write(&mut writer, Event::Start(root))?;
        write_fields(&mut writer, state)?;
        write(&mut writer, Event::End(BytesEnd::new(DOCUMENT_ROOT)))?;
    }

    trace!(fields = state.len(), "Serialized state");
    finish(writer)
}

/// Adds the `xsi` and `xs` namespace declarations to a root element.
pub(crate) fn namespaced(start: BytesStart<'_>) -> BytesStart<'_> {
    start.with_attributes([("xmlns:xsi", XSI_NAMESPACE), ("xmlns:xs", XS_NAMESPACE)])
}

fn write_fields<W: Write>(writer: &mut Writer<W>, state: &State) -> Result<()> {
    for (key, value) in state {
        let element = helper::serialize_key(key)?;
        write_value(writer, &element, value)?;
    }
    Ok(())
}

/// Writes `value` as an element named `element`.
///
/// Shared with the patch builder so that patch content matches stored documents.
pub(crate) fn write_value<W: Write>(
    writer: &mut Writer<W>,
    element: &str,
    value: &Value,
) -> Result<()> {
    match value {
        Value::Null => write(
            writer,
            Event::Empty(BytesStart::new(element).with_attributes([(XSI_NIL, "true")])),
        ),
        Value::State(state) => write_state(writer, element, state),
        Value::List(list) => {
            let start = BytesStart::new(element).with_attributes([(XSI_TYPE, LIST_TYPE)]);
            if list.is_empty() {
                return write(writer, Event::Empty(start));
            }
            write(writer, Event::Start(start))?;
            let item = helper::item_name(element);
            for entry in list {
                write_state(writer, &item, entry)?;
            }
            write(writer, Event::End(BytesEnd::new(element)))
        }
        Value::Array(array) => {
            let start = BytesStart::new(element).with_attributes([(XSI_TYPE, ARRAY_TYPE)]);
            if array.is_empty() {
                return write(writer, Event::Empty(start));
            }
            write(writer, Event::Start(start))?;
            let item = helper::item_name(element);
            for entry in array.to_values() {
                write_value(writer, &item, &entry)?;
            }
            write(writer, Event::End(BytesEnd::new(element)))
        }
        Value::String(s) => write_scalar(writer, element, ScalarType::String, s),
        Value::Long(n) => write_scalar(writer, element, ScalarType::Long, &n.to_string()),
        Value::Double(n) => write_scalar(
            writer,
            element,
            ScalarType::Double,
            &helper::double_to_text(*n),
        ),
        Value::Boolean(b) => write_scalar(writer, element, ScalarType::Boolean, &b.to_string()),
        Value::Calendar(c) => write_scalar(
            writer,
            element,
            ScalarType::Calendar,
            &helper::checked_calendar_to_text(element, c)?,
        ),
    }
}

fn write_state<W: Write>(writer: &mut Writer<W>, element: &str, state: &State) -> Result<()> {
    if state.is_empty() {
        return write(writer, Event::Empty(BytesStart::new(element)));
    }
    write(writer, Event::Start(BytesStart::new(element)))?;
    write_fields(writer, state)?;
    write(writer, Event::End(BytesEnd::new(element)))
}

fn write_scalar<W: Write>(
    writer: &mut Writer<W>,
    element: &str,
    scalar_type: ScalarType,
    text: &str,
) -> Result<()> {
    let start = BytesStart::new(element).with_attributes([(XSI_TYPE, scalar_type.xsi_type())]);
    write_text_element(writer, start, text)
}

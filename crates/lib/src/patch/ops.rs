//! Patch operations and their `rapi:patch` rendering.
//!
//! Paths follow the serializer's naming: `context` is an absolute XPath from `/document`,
//! `select` is relative to it for replace-inserts and absolute for deletes.

use std::fmt;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use crate::Result;
use crate::codec::XmlDocument;
use crate::codec::serializer::{namespaced, write_value};
use crate::codec::xml::{finish, write};
use crate::constants::REST_API_NAMESPACE;
use crate::state::Value;

const PATCH: &str = "rapi:patch";
const REPLACE_INSERT: &str = "rapi:replace-insert";
const INSERT: &str = "rapi:insert";
const DELETE: &str = "rapi:delete";

/// Where an inserted element goes relative to its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    LastChild,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::LastChild => "last-child",
        }
    }
}

/// An element written by a patch, rendered exactly as the serializer renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub element: String,
    pub value: Value,
}

impl Content {
    pub fn new(element: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            element: element.into(),
            value: value.into(),
        }
    }
}

/// One path-addressed operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOperation {
    /// Replace `select` under `context`, or insert it if absent
    ReplaceInsert {
        context: String,
        select: String,
        content: Content,
    },
    /// Insert `content` under `context`
    Insert {
        context: String,
        position: Position,
        content: Content,
    },
    /// Delete the node at `select`
    Delete { select: String },
}

impl PatchOperation {
    /// Absolute path of the node the operation writes or deletes.
    pub fn target(&self) -> String {
        match self {
            PatchOperation::ReplaceInsert {
                context, select, ..
            } => format!("{context}/{select}"),
            PatchOperation::Insert {
                context, content, ..
            } => format!("{context}/{}", content.element),
            PatchOperation::Delete { select } => select.clone(),
        }
    }

    fn write(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        match self {
            PatchOperation::ReplaceInsert {
                context,
                select,
                content,
            } => {
                let start = BytesStart::new(REPLACE_INSERT)
                    .with_attributes([("select", select.as_str()), ("context", context.as_str())]);
                write(writer, Event::Start(start))?;
                write_value(writer, &content.element, &content.value)?;
                write(writer, Event::End(BytesEnd::new(REPLACE_INSERT)))
            }
            PatchOperation::Insert {
                context,
                position,
                content,
            } => {
                let start = BytesStart::new(INSERT).with_attributes([
                    ("context", context.as_str()),
                    ("position", position.as_str()),
                ]);
                write(writer, Event::Start(start))?;
                write_value(writer, &content.element, &content.value)?;
                write(writer, Event::End(BytesEnd::new(INSERT)))
            }
            PatchOperation::Delete { select } => write(
                writer,
                Event::Empty(
                    BytesStart::new(DELETE).with_attributes([("select", select.as_str())]),
                ),
            ),
        }
    }
}

/// An ordered sequence of patch operations, applied as one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    operations: Vec<PatchOperation>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub(crate) fn push(&mut self, operation: PatchOperation) {
        self.operations.push(operation);
    }

    /// Renders the `rapi:patch` document.
    pub fn to_xml(&self) -> Result<XmlDocument> {
        let mut writer = Writer::new(Vec::new());
        let root = namespaced(
            BytesStart::new(PATCH).with_attributes([("xmlns:rapi", REST_API_NAMESPACE)]),
        );
        if self.operations.is_empty() {
            write(&mut writer, Event::Empty(root))?;
        } else {
            write(&mut writer, Event::Start(root))?;
            for operation in &self.operations {
                operation.write(&mut writer)?;
            }
            write(&mut writer, Event::End(BytesEnd::new(PATCH)))?;
        }
        finish(writer)
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a PatchOperation;
    type IntoIter = std::slice::Iter<'a, PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOperation::ReplaceInsert { .. } => write!(f, "replace-insert {}", self.target()),
            PatchOperation::Insert { .. } => write!(f, "insert {}", self.target()),
            PatchOperation::Delete { select } => write!(f, "delete {select}"),
        }
    }
}

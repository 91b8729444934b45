//! Value types for document state.
//!
//! This module provides the [`Value`] enum that represents everything a field of a
//! [`State`] can hold, and [`ScalarArray`] for homogeneous arrays of scalars.

use std::fmt;

use chrono::{DateTime, Utc};

use super::State;
use crate::helper;

/// Values that can be stored in a document state.
///
/// # Value Types
///
/// ## Scalars
/// - [`Value::Null`] - Explicit null, distinct from an absent key
/// - [`Value::String`] - UTF-8 text
/// - [`Value::Long`] - 64-bit signed integer
/// - [`Value::Double`] - 64-bit float
/// - [`Value::Boolean`] - true/false
/// - [`Value::Calendar`] - An instant with millisecond precision
///
/// ## Containers
/// - [`Value::State`] - A nested sub-state
/// - [`Value::List`] - An ordered list of sub-states
/// - [`Value::Array`] - An ordered array of one scalar type
///
/// ```
/// # use docstate_marklogic::state::Value;
/// let text = Value::from("hello");
/// let number = Value::from(42);
///
/// assert_eq!(text.as_str(), Some("hello"));
/// assert_eq!(number.as_long(), Some(42));
/// assert!(text.is_scalar());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null value
    Null,
    /// Text string value
    String(String),
    /// Integer value
    Long(i64),
    /// Floating point value
    Double(f64),
    /// Boolean value
    Boolean(bool),
    /// Instant in time
    Calendar(DateTime<Utc>),
    /// Nested sub-state
    State(State),
    /// Ordered list of sub-states
    List(Vec<State>),
    /// Ordered array of scalars of one type
    Array(ScalarArray),
}

/// The scalar kinds a leaf element can carry on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Long,
    Double,
    Boolean,
    Calendar,
}

impl ScalarType {
    /// Returns the `xsi:type` marker of this scalar kind.
    pub fn xsi_type(&self) -> &'static str {
        match self {
            ScalarType::String => "xs:string",
            ScalarType::Long => "xs:long",
            ScalarType::Double => "xs:double",
            ScalarType::Boolean => "xs:boolean",
            ScalarType::Calendar => "xs:dateTime",
        }
    }

    /// Parses an `xsi:type` marker.
    pub fn from_xsi_type(xsi_type: &str) -> Option<Self> {
        match xsi_type {
            "xs:string" => Some(ScalarType::String),
            "xs:long" => Some(ScalarType::Long),
            "xs:double" => Some(ScalarType::Double),
            "xs:boolean" => Some(ScalarType::Boolean),
            "xs:dateTime" => Some(ScalarType::Calendar),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xsi_type())
    }
}

/// An ordered array holding scalars of a single type.
///
/// The element type is part of the variant, so a mixed array cannot be built.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarArray {
    String(Vec<String>),
    Long(Vec<i64>),
    Double(Vec<f64>),
    Boolean(Vec<bool>),
    Calendar(Vec<DateTime<Utc>>),
}

impl ScalarArray {
    /// Returns the element type of this array.
    pub fn element_type(&self) -> ScalarType {
        match self {
            ScalarArray::String(_) => ScalarType::String,
            ScalarArray::Long(_) => ScalarType::Long,
            ScalarArray::Double(_) => ScalarType::Double,
            ScalarArray::Boolean(_) => ScalarType::Boolean,
            ScalarArray::Calendar(_) => ScalarType::Calendar,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ScalarArray::String(items) => items.len(),
            ScalarArray::Long(items) => items.len(),
            ScalarArray::Double(items) => items.len(),
            ScalarArray::Boolean(items) => items.len(),
            ScalarArray::Calendar(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the elements as scalar [`Value`]s, in order.
    pub fn to_values(&self) -> Vec<Value> {
        match self {
            ScalarArray::String(items) => items.iter().cloned().map(Value::String).collect(),
            ScalarArray::Long(items) => items.iter().copied().map(Value::Long).collect(),
            ScalarArray::Double(items) => items.iter().copied().map(Value::Double).collect(),
            ScalarArray::Boolean(items) => items.iter().copied().map(Value::Boolean).collect(),
            ScalarArray::Calendar(items) => items.iter().copied().map(Value::Calendar).collect(),
        }
    }

    /// Builds an array of `element_type` from scalar values.
    ///
    /// Returns `None` if any value is not a scalar of `element_type`.
    pub fn from_values(element_type: ScalarType, values: Vec<Value>) -> Option<Self> {
        fn collect<T>(values: Vec<Value>, f: impl Fn(Value) -> Option<T>) -> Option<Vec<T>> {
            values.into_iter().map(f).collect()
        }

        match element_type {
            ScalarType::String => collect(values, |v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .map(ScalarArray::String),
            ScalarType::Long => collect(values, |v| v.as_long()).map(ScalarArray::Long),
            ScalarType::Double => collect(values, |v| v.as_double()).map(ScalarArray::Double),
            ScalarType::Boolean => collect(values, |v| v.as_bool()).map(ScalarArray::Boolean),
            ScalarType::Calendar => {
                collect(values, |v| v.as_calendar()).map(ScalarArray::Calendar)
            }
        }
    }
}

impl Value {
    /// Returns true if this is a scalar (including null)
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::State(_) | Value::List(_) | Value::Array(_))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the scalar type of this value, `None` for null and containers.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self {
            Value::String(_) => Some(ScalarType::String),
            Value::Long(_) => Some(ScalarType::Long),
            Value::Double(_) => Some(ScalarType::Double),
            Value::Boolean(_) => Some(ScalarType::Boolean),
            Value::Calendar(_) => Some(ScalarType::Calendar),
            _ => None,
        }
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Long(_) => "long",
            Value::Double(_) => "double",
            Value::Boolean(_) => "boolean",
            Value::Calendar(_) => "calendar",
            Value::State(_) => "state",
            Value::List(_) => "list",
            Value::Array(_) => "array",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_calendar(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Calendar(c) => Some(*c),
            _ => None,
        }
    }

    /// Attempts to convert to a sub-state (returns immutable reference)
    pub fn as_state(&self) -> Option<&State> {
        match self {
            Value::State(state) => Some(state),
            _ => None,
        }
    }

    /// Attempts to convert to a list of sub-states
    pub fn as_list(&self) -> Option<&[State]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Attempts to convert to a scalar array
    pub fn as_array(&self) -> Option<&ScalarArray> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Long(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

/// Truncates to millisecond precision.
impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Calendar(helper::truncate_calendar(value))
    }
}

impl From<State> for Value {
    fn from(value: State) -> Self {
        Value::State(value)
    }
}

impl From<Vec<State>> for Value {
    fn from(value: Vec<State>) -> Self {
        Value::List(value)
    }
}

impl From<ScalarArray> for Value {
    fn from(value: ScalarArray) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<String>> for ScalarArray {
    fn from(value: Vec<String>) -> Self {
        ScalarArray::String(value)
    }
}

impl From<Vec<&str>> for ScalarArray {
    fn from(value: Vec<&str>) -> Self {
        ScalarArray::String(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for ScalarArray {
    fn from(value: Vec<i64>) -> Self {
        ScalarArray::Long(value)
    }
}

impl From<Vec<f64>> for ScalarArray {
    fn from(value: Vec<f64>) -> Self {
        ScalarArray::Double(value)
    }
}

impl From<Vec<bool>> for ScalarArray {
    fn from(value: Vec<bool>) -> Self {
        ScalarArray::Boolean(value)
    }
}

/// Truncates each instant to millisecond precision.
impl From<Vec<DateTime<Utc>>> for ScalarArray {
    fn from(value: Vec<DateTime<Utc>>) -> Self {
        ScalarArray::Calendar(value.into_iter().map(helper::truncate_calendar).collect())
    }
}

//! Canonical text forms of scalars and element names of keys.
//!
//! Every scalar written to a document goes through this module, and every scalar read back
//! is parsed here. Parsing never substitutes a default: text that does not match the declared
//! type is a [`CodecError::MalformedScalar`].
//!
//! ```
//! use docstate_marklogic::helper;
//! use chrono::{TimeZone, Utc};
//!
//! let epoch = Utc.timestamp_millis_opt(1).unwrap();
//! assert_eq!(helper::calendar_to_text(&epoch), "1970-01-01T00:00:00.001");
//! assert_eq!(helper::serialize_key("ecm:id").unwrap(), "ecm__id");
//! ```

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};

use crate::Result;
use crate::codec::CodecError;
use crate::constants::{ELEMENT_SEPARATOR, ITEM_SUFFIX, KEY_SEPARATOR};
use crate::state::{ScalarType, Value};

/// The one calendar pattern, UTC with millisecond precision.
pub const CALENDAR_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Length of a calendar rendered with [`CALENDAR_PATTERN`].
const CALENDAR_TEXT_LEN: usize = 23;

/// Years that render as four digits.
const CALENDAR_YEARS: RangeInclusive<i32> = 0..=9999;

const NANOS_PER_MILLI: u32 = 1_000_000;

/// Drops precision below one millisecond.
///
/// Calendars entering a [`Value`] through `From` are truncated here, so every calendar
/// built that way has exactly one canonical text form.
pub fn truncate_calendar(calendar: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = calendar.nanosecond() / NANOS_PER_MILLI * NANOS_PER_MILLI;
    calendar.with_nanosecond(nanos).unwrap_or(calendar)
}

/// Renders a calendar in the canonical form, e.g. `1970-01-01T00:00:00.000`.
///
/// Sub-millisecond precision is truncated. Use [`checked_calendar_to_text`] where the
/// text must parse back to the same instant.
pub fn calendar_to_text(calendar: &DateTime<Utc>) -> String {
    calendar.format(CALENDAR_PATTERN).to_string()
}

/// Renders a calendar in the canonical form, failing for instants that form cannot hold:
/// years outside 0000-9999 and precision finer than one millisecond.
pub fn checked_calendar_to_text(field: &str, calendar: &DateTime<Utc>) -> Result<String> {
    let reason = if !CALENDAR_YEARS.contains(&calendar.year()) {
        "year outside 0000-9999"
    } else if calendar.nanosecond() % NANOS_PER_MILLI != 0 {
        "precision finer than one millisecond"
    } else {
        return Ok(calendar_to_text(calendar));
    };
    Err(CodecError::UnrepresentableCalendar {
        field: field.to_string(),
        value: calendar.to_rfc3339(),
        reason: reason.to_string(),
    }
    .into())
}

/// Parses a calendar in the canonical form.
///
/// `field` only names the offending field in the error.
pub fn text_to_calendar(field: &str, text: &str) -> Result<DateTime<Utc>> {
    if text.len() != CALENDAR_TEXT_LEN {
        return Err(malformed(field, ScalarType::Calendar, text));
    }
    NaiveDateTime::parse_from_str(text, CALENDAR_PATTERN)
        .map(|naive| naive.and_utc())
        .map_err(|_| malformed(field, ScalarType::Calendar, text))
}

/// Renders a double as `xs:double` text.
pub fn double_to_text(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        value.to_string()
    }
}

fn text_to_double(field: &str, text: &str) -> Result<f64> {
    match text {
        "NaN" => Ok(f64::NAN),
        "INF" => Ok(f64::INFINITY),
        "-INF" => Ok(f64::NEG_INFINITY),
        _ => text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| malformed(field, ScalarType::Double, text)),
    }
}

fn text_to_bool(field: &str, text: &str) -> Result<bool> {
    match text {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(malformed(field, ScalarType::Boolean, text)),
    }
}

/// Renders a scalar value in its canonical text form.
///
/// Returns `None` for null and for containers, which have no text form.
pub fn scalar_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Long(n) => Some(n.to_string()),
        Value::Double(n) => Some(double_to_text(*n)),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Calendar(c) => Some(calendar_to_text(c)),
        Value::Null | Value::State(_) | Value::List(_) | Value::Array(_) => None,
    }
}

/// Parses text of a declared scalar type.
pub fn text_to_scalar(field: &str, scalar_type: ScalarType, text: &str) -> Result<Value> {
    match scalar_type {
        ScalarType::String => Ok(Value::String(text.to_string())),
        ScalarType::Long => text
            .parse::<i64>()
            .map(Value::Long)
            .map_err(|_| malformed(field, scalar_type, text)),
        ScalarType::Double => text_to_double(field, text).map(Value::Double),
        ScalarType::Boolean => text_to_bool(field, text).map(Value::Boolean),
        ScalarType::Calendar => text_to_calendar(field, text).map(Value::Calendar),
    }
}

/// Infers the scalar of an untyped leaf: long, then double, then boolean, then calendar,
/// falling back to string.
pub fn infer_scalar(text: &str) -> Value {
    if let Ok(n) = text.parse::<i64>() {
        return Value::Long(n);
    }
    let numeric = text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if numeric {
        if let Ok(n) = text.parse::<f64>() {
            return Value::Double(n);
        }
    }
    match text {
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        _ => {}
    }
    if text.len() == CALENDAR_TEXT_LEN {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, CALENDAR_PATTERN) {
            return Value::Calendar(naive.and_utc());
        }
    }
    Value::String(text.to_string())
}

fn malformed(field: &str, scalar_type: ScalarType, text: &str) -> crate::Error {
    CodecError::MalformedScalar {
        field: field.to_string(),
        scalar_type: scalar_type.xsi_type().to_string(),
        text: text.to_string(),
    }
    .into()
}

/// Maps a state key to its element name: `ecm:id` becomes `ecm__id`.
///
/// The key must start with a letter or underscore and contain only letters, digits,
/// `_`, `-`, `.` and `:`. Keys that would not map back to themselves (such as keys
/// already containing `__`) are rejected, which keeps the mapping one-to-one.
pub fn serialize_key(key: &str) -> Result<String> {
    let invalid = |reason: String| -> crate::Error {
        CodecError::InvalidKey {
            key: key.to_string(),
            reason,
        }
        .into()
    };

    let first = key
        .chars()
        .next()
        .ok_or_else(|| invalid("key is empty".to_string()))?;
    if !(first.is_alphabetic() || first == '_') {
        return Err(invalid(format!(
            "key must start with a letter or '_', found {first:?}"
        )));
    }
    if let Some(c) = key
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')))
    {
        return Err(invalid(format!("character {c:?} is not allowed")));
    }

    let element = key.replace(KEY_SEPARATOR, ELEMENT_SEPARATOR);
    if deserialize_key(&element) != key {
        return Err(invalid(format!(
            "element name {element} does not map back to the key"
        )));
    }
    Ok(element)
}

/// Maps an element name back to its state key: `ecm__id` becomes `ecm:id`.
pub fn deserialize_key(element: &str) -> String {
    element.replace(ELEMENT_SEPARATOR, &KEY_SEPARATOR.to_string())
}

/// Element name of the entries of a list or array element.
pub fn item_name(element: &str) -> String {
    format!("{element}{ITEM_SUFFIX}")
}

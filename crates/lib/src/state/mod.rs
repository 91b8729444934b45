//! In-memory document state.
//!
//! A [`State`] is the generic representation of one document's field values: a map from
//! colon-namespaced keys (`ecm:id`, `dc:title`) to [`Value`]s. A [`StateDiff`] has the same
//! key shape but describes changes to apply to an existing document.
//!
//! Keys are held in a `BTreeMap`, so iteration is always in key order. The serializer relies
//! on this to produce byte-identical output for equal states.

use std::collections::BTreeMap;
use std::collections::btree_map;

pub mod diff;
pub mod value;

pub use diff::{Diff, DiffElement, ListDiff, StateDiff};
pub use value::{ScalarArray, ScalarType, Value};

/// A document state.
///
/// Equality is structural and ignores insertion order.
///
/// ```
/// # use docstate_marklogic::state::{State, Value};
/// let mut state = State::new();
/// state.put("ecm:id", "ID");
/// state.put("ecm:lockOwner", Value::Null);
///
/// assert_eq!(state.get("ecm:id"), Some(&Value::from("ID")));
/// assert_eq!(state.get("ecm:lockOwner"), Some(&Value::Null));
/// assert_eq!(state.get("ecm:name"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    fields: BTreeMap<String, Value>,
}

impl State {
    /// Creates a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `key`, or `None` if the key is absent.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&Value> {
        self.fields.get(key.as_ref())
    }

    /// Mutable access to the value of `key`.
    pub fn get_mut(&mut self, key: impl AsRef<str>) -> Option<&mut Value> {
        self.fields.get_mut(key.as_ref())
    }

    /// Sets `key` to `value`, returning the previous value if there was one.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Builder-style variant of [`State::put`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.put(key, value);
        self
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: impl AsRef<str>) -> Option<Value> {
        self.fields.remove(key.as_ref())
    }

    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.fields.contains_key(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a State {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for State {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for State
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

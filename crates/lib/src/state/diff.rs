//! Partial updates of a document state.
//!
//! A [`StateDiff`] maps keys to [`Diff`]s. Most entries replace a whole value, but a
//! [`ListDiff`] patches a list or array in place, element by element, so that a small
//! change to a large list does not rewrite the whole list.

use std::collections::BTreeMap;
use std::collections::btree_map;

use super::{State, Value};

/// One change to a key of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Diff {
    /// Set or replace the whole value
    Set(Value),
    /// Delete the key
    Remove,
    /// Apply a nested diff to the sub-state at this key
    State(StateDiff),
    /// Patch the list or array at this key in place
    List(ListDiff),
    /// Increment a counter; `base + delta` is the value written
    Delta { base: i64, delta: i64 },
}

impl Diff {
    /// Returns the value a `Delta` resolves to, `None` on overflow or for other variants.
    pub fn delta_value(&self) -> Option<i64> {
        match self {
            Diff::Delta { base, delta } => base.checked_add(*delta),
            _ => None,
        }
    }
}

/// The change applied to one element of a list.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffElement {
    /// Leave the element untouched
    Nop,
    /// Replace the element
    Set(Value),
    /// Apply a nested diff to the element (lists of sub-states only)
    State(StateDiff),
}

/// Element-level changes to a list of sub-states or a scalar array.
///
/// `diff` is positional: entry `i` applies to element `i`. `rpush` holds elements
/// appended after the existing ones.
///
/// ```
/// # use docstate_marklogic::state::{DiffElement, ListDiff, StateDiff};
/// let mut title = StateDiff::new();
/// title.set("title", "renamed");
///
/// let diff = ListDiff::list().with_element(3, DiffElement::State(title));
/// assert_eq!(diff.diff.len(), 4);
/// assert_eq!(diff.diff[0], DiffElement::Nop);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListDiff {
    /// Whether the patched value is a scalar array rather than a list of sub-states
    pub is_array: bool,
    /// Positional element changes
    pub diff: Vec<DiffElement>,
    /// Elements appended at the end
    pub rpush: Vec<Value>,
}

impl ListDiff {
    /// An empty diff of a list of sub-states.
    pub fn list() -> Self {
        Self::default()
    }

    /// An empty diff of a scalar array.
    pub fn array() -> Self {
        Self {
            is_array: true,
            ..Self::default()
        }
    }

    /// Sets the change of element `index`, padding earlier positions with [`DiffElement::Nop`].
    pub fn with_element(mut self, index: usize, element: DiffElement) -> Self {
        if self.diff.len() <= index {
            self.diff.resize(index + 1, DiffElement::Nop);
        }
        self.diff[index] = element;
        self
    }

    /// Appends an element at the end of the list.
    pub fn with_rpush(mut self, value: impl Into<Value>) -> Self {
        self.rpush.push(value.into());
        self
    }

    /// Returns true if the diff changes nothing.
    pub fn is_empty(&self) -> bool {
        self.rpush.is_empty() && self.diff.iter().all(|e| matches!(e, DiffElement::Nop))
    }
}

/// A set of changes to apply to an existing document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateDiff {
    entries: BTreeMap<String, Diff>,
}

impl StateDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.insert(key.into(), Diff::Set(value.into()));
        self
    }

    /// Deletes `key`.
    pub fn remove(&mut self, key: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), Diff::Remove);
        self
    }

    /// Applies `diff` to the sub-state at `key`.
    pub fn diff_state(&mut self, key: impl Into<String>, diff: StateDiff) -> &mut Self {
        self.entries.insert(key.into(), Diff::State(diff));
        self
    }

    /// Patches the list or array at `key`.
    pub fn diff_list(&mut self, key: impl Into<String>, diff: ListDiff) -> &mut Self {
        self.entries.insert(key.into(), Diff::List(diff));
        self
    }

    /// Increments the counter at `key` from `base` by `delta`.
    pub fn delta(&mut self, key: impl Into<String>, base: i64, delta: i64) -> &mut Self {
        self.entries.insert(key.into(), Diff::Delta { base, delta });
        self
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&Diff> {
        self.entries.get(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Diff> {
        self.entries.iter()
    }
}

impl From<State> for StateDiff {
    /// A diff setting every field of `state`.
    fn from(state: State) -> Self {
        Self {
            entries: state
                .into_iter()
                .map(|(key, value)| (key, Diff::Set(value)))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StateDiff {
    type Item = (&'a String, &'a Diff);
    type IntoIter = btree_map::Iter<'a, String, Diff>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//! Composite value wrappers
//!
//! Generic sequence and key-mapping containers over any parseable value type.
//! Both preserve the order of appearance from the source text; for [`Mapping`]
//! that order is diagnostic only and does not affect equality.

use serde::{Deserialize, Serialize};

/// Ordered list of values of one type. Order is meaningful and preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence<T>(Vec<T>);

impl<T> Sequence<T> {
    pub fn new() -> Self {
        Sequence(Vec::new())
    }

    pub fn push(&mut self, value: T) {
        self.0.push(value);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Sequence::new()
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(values: Vec<T>) -> Self {
        Sequence(values)
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// String-keyed collection of values of one type.
///
/// Keys are unique; [`Mapping::insert`] refuses a duplicate instead of
/// overwriting, and the parser turns that refusal into a structural error.
/// Entries keep their insertion order for diagnostics and printing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mapping<T> {
    entries: Vec<(String, T)>,
}

impl<T> Mapping<T> {
    pub fn new() -> Self {
        Mapping {
            entries: Vec::new(),
        }
    }

    /// Insert a new entry. Returns `false` (leaving the mapping unchanged)
    /// when the key is already present.
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, T)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Mapping<T> {
    fn default() -> Self {
        Mapping::new()
    }
}

/// Entry order does not affect equality; keys are unique, so two mappings are
/// equal when every key of one resolves to an equal value in the other.
impl<T: PartialEq> PartialEq for Mapping<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<T> IntoIterator for Mapping<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

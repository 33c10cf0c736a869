//! Keyed string parameters of an operation.
//!
//! Storage does not enforce unique keys, so a node may carry several rows for
//! the same key. `Params` resolves that deterministically: rows are pushed in
//! insertion order and the first row for a key wins; later duplicates are
//! dropped.

/// The parameters of one operation, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Option<String>)>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a row. Ignored if `key` is already present.
    pub fn push(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        if self.entries.iter().any(|(k, _)| *k == key) {
            return;
        }
        self.entries.push((key, value));
    }

    /// Value for `key`. A stored `NULL` reads as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whether a row for `key` exists, including one holding `NULL`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.push(key, Some(value.into()));
        }
        params
    }
}

//! Collection types for EDN maps and sets.
//!
//! [`EdnMap`] is an association list: it keeps every `(key, value)` pair in
//! the order it was read, duplicate keys included. [`EdnMap::flatten`] and
//! [`EdnMap::get`] give the usual "later key wins" view on top of it.
//!
//! [`EdnSet`] is backed by [`IndexSet`], so it remembers insertion order but
//! holds each structurally-equal member only once. Two sets are equal when
//! they hold the same members, whatever the order.
//!
//! ## Examples
//!
//! ```rust
//! use serde_edn::{EdnMap, EdnSet, EdnValue};
//!
//! let mut map = EdnMap::new();
//! map.insert(EdnValue::keyword_unchecked("a"), EdnValue::from(1));
//! map.insert(EdnValue::keyword_unchecked("a"), EdnValue::from(2));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get(&EdnValue::keyword_unchecked("a")), Some(&EdnValue::from(2)));
//! assert_eq!(map.flatten().len(), 1);
//!
//! let set: EdnSet = vec![EdnValue::from(1), EdnValue::from(1)].into_iter().collect();
//! assert_eq!(set.len(), 1);
//! ```

use crate::EdnValue;
use indexmap::{IndexMap, IndexSet};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// An ordered association list of EDN key/value pairs.
///
/// Keys are not required to be unique. Lookups return the last pair with a
/// matching key, mirroring how a map literal with repeated keys reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct EdnMap(Vec<(EdnValue, EdnValue)>);

impl EdnMap {
    /// Creates an empty `EdnMap`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_edn::EdnMap;
    ///
    /// let map = EdnMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        EdnMap(Vec::new())
    }

    /// Creates an empty `EdnMap` with room for `capacity` pairs.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        EdnMap(Vec::with_capacity(capacity))
    }

    /// Appends a pair. Existing pairs with the same key are kept.
    pub fn insert(&mut self, key: EdnValue, value: EdnValue) {
        self.0.push((key, value));
    }

    /// Returns the value of the last pair whose key equals `key`.
    #[must_use]
    pub fn get(&self, key: &EdnValue) -> Option<&EdnValue> {
        self.0.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Looks up a keyword key by name, e.g. `get_keyword("crux.db/id")`.
    #[must_use]
    pub fn get_keyword(&self, name: &str) -> Option<&EdnValue> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| matches!(k, EdnValue::Keyword(n) if n == name))
            .map(|(_, v)| v)
    }

    /// Returns the number of pairs, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (EdnValue, EdnValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &EdnValue> {
        self.0.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &EdnValue> {
        self.0.iter().map(|(_, v)| v)
    }

    /// Collapses duplicate keys into a structural map.
    ///
    /// A later pair overwrites the value of an earlier one but keeps the
    /// position where the key first appeared.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_edn::{decode_one, EdnValue};
    ///
    /// let value = decode_one("{:a 1 :b 2 :a 3}").unwrap();
    /// let flat = value.as_map().unwrap().flatten();
    /// let keys: Vec<_> = flat.keys().cloned().collect();
    ///
    /// assert_eq!(keys, vec![EdnValue::keyword_unchecked("a"), EdnValue::keyword_unchecked("b")]);
    /// assert_eq!(flat[&EdnValue::keyword_unchecked("a")], EdnValue::from(3));
    /// ```
    #[must_use]
    pub fn flatten(&self) -> IndexMap<EdnValue, EdnValue> {
        self.0.iter().cloned().collect()
    }

    /// Rebuilds the list with duplicate keys collapsed, as [`flatten`](Self::flatten) does.
    #[must_use]
    pub fn into_flat(self) -> Self {
        let flat: IndexMap<EdnValue, EdnValue> = self.0.into_iter().collect();
        flat.into_iter().collect()
    }
}

impl IntoIterator for EdnMap {
    type Item = (EdnValue, EdnValue);
    type IntoIter = std::vec::IntoIter<(EdnValue, EdnValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EdnMap {
    type Item = &'a (EdnValue, EdnValue);
    type IntoIter = std::slice::Iter<'a, (EdnValue, EdnValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(EdnValue, EdnValue)> for EdnMap {
    fn from_iter<T: IntoIterator<Item = (EdnValue, EdnValue)>>(iter: T) -> Self {
        EdnMap(iter.into_iter().collect())
    }
}

impl From<Vec<(EdnValue, EdnValue)>> for EdnMap {
    fn from(pairs: Vec<(EdnValue, EdnValue)>) -> Self {
        EdnMap(pairs)
    }
}

/// An insertion-ordered set of EDN values without structural duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdnSet(IndexSet<EdnValue>);

impl EdnSet {
    #[must_use]
    pub fn new() -> Self {
        EdnSet(IndexSet::new())
    }

    /// Adds a member. Returns `false` if an equal member was already present.
    pub fn insert(&mut self, value: EdnValue) -> bool {
        self.0.insert(value)
    }

    #[must_use]
    pub fn contains(&self, value: &EdnValue) -> bool {
        self.0.contains(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, EdnValue> {
        self.0.iter()
    }
}

// Members are hashed one by one and summed so that order does not matter,
// matching the order-insensitive `PartialEq` of `IndexSet`.
impl Hash for EdnSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let combined = self.0.iter().fold(0u64, |acc, member| {
            let mut hasher = DefaultHasher::new();
            member.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        self.0.len().hash(state);
        combined.hash(state);
    }
}

impl IntoIterator for EdnSet {
    type Item = EdnValue;
    type IntoIter = indexmap::set::IntoIter<EdnValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EdnSet {
    type Item = &'a EdnValue;
    type IntoIter = indexmap::set::Iter<'a, EdnValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<EdnValue> for EdnSet {
    fn from_iter<T: IntoIterator<Item = EdnValue>>(iter: T) -> Self {
        EdnSet(iter.into_iter().collect())
    }
}

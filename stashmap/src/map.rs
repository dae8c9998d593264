use std::{
    borrow::Borrow,
    collections::{hash_map::Entry, HashMap},
    fmt::{Debug, Display},
    hash::Hash,
};

use itertools::Itertools;

use crate::key::Key;

/// A map that remembers the order in which its keys were first inserted.
///
/// Values are looked up through a hash table, while a separate list of keys records insertion
/// order. Overwriting the value of an existing key does not move it; removing a key and setting
/// it again appends it to the end.
///
/// ```
/// use stashmap::Stashmap;
///
/// let mut stash = Stashmap::new();
/// stash.set("a", 1).set("b", 2).set("a", 3);
/// assert_eq!(stash.get_keys(), ["a", "b"]);
/// assert_eq!(stash.get("a"), Some(&3));
/// assert_eq!(stash.get_at(1), Some(&2));
/// ```
#[derive(Clone)]
pub struct Stashmap<V> {
    table: HashMap<Key, V>,
    /// Every key of `table`, exactly once, in insertion order.
    order: Vec<Key>,
}

impl<V> Stashmap<V> {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Creates a map holding the entries of `source`, in the order `source` yields them.
    /// Entries are inserted with [`Stashmap::set`], so a repeated key keeps its first position
    /// and its last value. If there is no source, the map is empty.
    pub fn from_source<S, K>(source: Option<S>) -> Self
    where
        S: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
    {
        source.into_iter().flatten().collect()
    }

    /// Removes every entry, keeping the allocated capacity.
    pub fn wipe(&mut self) {
        tracing::trace!(entries = self.order.len(), "wiping stash");
        self.table.clear();
        self.order.clear();
    }

    /// Associates `value` with `key`.
    ///
    /// A new key is appended to the insertion order. An existing key keeps its position and only
    /// has its value replaced. Returns the same map, so calls can be chained.
    pub fn set(&mut self, key: impl Into<Key>, value: V) -> &mut Self {
        match self.table.entry(key.into()) {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
            }
            Entry::Vacant(entry) => {
                tracing::trace!(key = %entry.key(), position = self.order.len(), "appending key");
                self.order.push(entry.key().clone());
                entry.insert(value);
            }
        }
        self
    }

    /// A synonym for [`Stashmap::set`].
    pub fn add(&mut self, key: impl Into<Key>, value: V) -> &mut Self {
        self.set(key, value)
    }

    /// Removes the entry with the given key.
    /// Returns true if there was such an entry.
    ///
    /// This is linear in the number of entries, since the key has to be found in the insertion
    /// order.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.table.remove(key).is_none() {
            return false;
        }
        let position = self
            .order
            .iter()
            .position(|k| <Key as Borrow<Q>>::borrow(k) == key);
        if let Some(position) = position {
            let removed = self.order.remove(position);
            tracing::trace!(key = %removed, position, "removed key");
        }
        true
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key)
    }

    /// Returns the value of the given key for in-place editing. The key keeps its position.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get_mut(key)
    }

    /// Returns the value of the entry at the given position in insertion order.
    pub fn get_at(&self, position: usize) -> Option<&V> {
        self.get_entry_at(position).map(|(_, value)| value)
    }

    /// Returns the key at the given position in insertion order.
    pub fn get_key_at(&self, position: usize) -> Option<&Key> {
        self.order.get(position)
    }

    pub fn get_entry_at(&self, position: usize) -> Option<(&Key, &V)> {
        let key = self.order.get(position)?;
        self.table.get(key).map(|value| (key, value))
    }

    pub fn has<Q>(&self, key: &Q) -> bool
    where
        Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(key)
    }

    /// Returns a copy of the keys, in insertion order.
    pub fn get_keys(&self) -> Vec<Key> {
        self.order.clone()
    }

    /// Returns a copy of the values, in insertion order.
    pub fn get_values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.values().cloned().collect()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.order.len(), self.table.len());
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            order: self.order.iter(),
            table: &self.table,
        }
    }

    pub fn keys(&self) -> std::slice::Iter<'_, Key> {
        self.order.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<V> Default for Stashmap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the number of entries and the keys in order, such as `Stashmap (2) [a, b]`.
impl<V> Display for Stashmap<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stashmap ({}) [{}]", self.len(), self.order.iter().join(", "))
    }
}

impl<V> Debug for Stashmap<V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal if they hold equal entries in the same order.
impl<V> PartialEq for Stashmap<V>
where
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V> Eq for Stashmap<V> where V: Eq {}

impl<K, V> FromIterator<(K, V)> for Stashmap<V>
where
    K: Into<Key>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut stash = Self::new();
        stash.extend(iter);
        stash
    }
}

impl<K, V> Extend<(K, V)> for Stashmap<V>
where
    K: Into<Key>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Stashmap<V>
where
    K: Into<Key>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Borrowing iterator over the entries of a [`Stashmap`], in insertion order.
pub struct Iter<'a, V> {
    order: std::slice::Iter<'a, Key>,
    table: &'a HashMap<Key, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        // Keys without a table slot are skipped.
        let table = self.table;
        self.order
            .find_map(move |key| table.get(key).map(|value| (key, value)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.order.size_hint().1)
    }
}

/// Owning iterator over the entries of a [`Stashmap`], in insertion order.
pub struct IntoIter<V> {
    order: std::vec::IntoIter<Key>,
    table: HashMap<Key, V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (Key, V);

    fn next(&mut self) -> Option<Self::Item> {
        let table = &mut self.table;
        self.order
            .find_map(|key| table.remove(&key).map(|value| (key, value)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.order.size_hint().1)
    }
}

impl<V> IntoIterator for Stashmap<V> {
    type Item = (Key, V);

    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            order: self.order.into_iter(),
            table: self.table,
        }
    }
}

impl<'a, V> IntoIterator for &'a Stashmap<V> {
    type Item = (&'a Key, &'a V);

    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

use crate::{key::Key, map::Stashmap};

impl<V> Stashmap<V> {
    /// Copies every entry of `other` into this map, in `other`'s insertion order.
    ///
    /// Values of keys already in this map are overwritten in place; keys new to this map are
    /// appended after the existing ones.
    #[tracing::instrument(level = "debug", skip_all, fields(into = self.len(), from = other.len()))]
    pub fn merge(&mut self, other: &Stashmap<V>) -> &mut Self
    where
        V: Clone,
    {
        for (key, value) in other {
            self.set(key, value.clone());
        }
        self
    }

    /// Combines every entry of `other` with this map, in `other`'s insertion order.
    ///
    /// For each key of `other`, the new value is `combine(current, incoming, key)`, where
    /// `current` is this map's value for the key ([`None`] if it has none yet).
    ///
    /// ```
    /// use stashmap::Stashmap;
    ///
    /// let mut left = Stashmap::from([("a", vec![1]), ("b", vec![2])]);
    /// let right = Stashmap::from([("a", vec![2]), ("b", vec![3])]);
    /// left.merge_with(&right, |current, incoming, _| {
    ///     let mut combined = current.cloned().unwrap_or_default();
    ///     combined.extend_from_slice(incoming);
    ///     combined
    /// });
    /// assert_eq!(left.get("a"), Some(&vec![1, 2]));
    /// assert_eq!(left.get("b"), Some(&vec![2, 3]));
    /// ```
    #[tracing::instrument(level = "debug", skip_all, fields(into = self.len(), from = other.len()))]
    pub fn merge_with(
        &mut self,
        other: &Stashmap<V>,
        mut combine: impl FnMut(Option<&V>, &V, &Key) -> V,
    ) -> &mut Self {
        for (key, value) in other {
            let combined = combine(self.get(key), value, key);
            self.set(key, combined);
        }
        self
    }

    /// Like [`Stashmap::merge`], but consumes `other` and moves its values.
    #[tracing::instrument(level = "debug", skip_all, fields(into = self.len(), from = other.len()))]
    pub fn merge_from(&mut self, other: Stashmap<V>) -> &mut Self {
        self.extend(other);
        self
    }
}

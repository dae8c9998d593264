//! An insertion-ordered map with string keys.
//!
//! [`Stashmap`] keeps a hash table for lookups next to the list of its keys in the order they
//! were first inserted. On top of that it offers positional access ([`Stashmap::get_at`]),
//! traversal that can stop early ([`Stashmap::for_each`]), filtering traversal
//! ([`Stashmap::map`]) and merging ([`Stashmap::merge`], [`Stashmap::merge_with`]).
//!
//! Keys are [`Key`]s: every key is held in its string form, so the number `1` and the string
//! `"1"` name the same entry.
//!
//! The map is not synchronised. Share it between threads only behind a lock of your own.

pub mod key;
pub mod load;
pub mod map;
mod merge;
mod serialize;
pub mod traverse;

pub use key::Key;
pub use load::{LoadDr, LoadError, LoadWarning};
pub use map::Stashmap;
pub use traverse::{Truthy, Visit};

/// Creates a stash from `source`, keeping the order in which `source` yields its entries.
///
/// ```
/// let count = stashmap::stashmap([("a", 1), ("b", 2)]).for_each(|_, _| ());
/// assert_eq!(count, 2);
/// ```
pub fn stashmap<S, K, V>(source: S) -> Stashmap<V>
where
    S: IntoIterator<Item = (K, V)>,
    K: Into<Key>,
{
    source.into_iter().collect()
}

//! Callback-driven traversal: [`Stashmap::for_each`] and [`Stashmap::map`].

use std::ops::ControlFlow;

use serde_json::Value;

use crate::{key::Key, map::Stashmap};

/// The result of a [`Stashmap::for_each`] callback.
///
/// Only an explicit `false` stops the traversal. Returning nothing, or `true`, continues.
pub trait Visit {
    /// Returns false if the traversal should stop after this entry.
    fn proceed(&self) -> bool;
}

impl Visit for () {
    fn proceed(&self) -> bool {
        true
    }
}

impl Visit for bool {
    fn proceed(&self) -> bool {
        *self
    }
}

impl<B, C> Visit for ControlFlow<B, C> {
    fn proceed(&self) -> bool {
        self.is_continue()
    }
}

/// The result of a [`Stashmap::map`] callback.
///
/// Falsy results are left out of the output: `None`, `false`, zero, the empty string, and
/// the JSON values `null`, `false`, `0` and `""`.
pub trait Truthy {
    /// What ends up in the output of [`Stashmap::map`].
    type Kept;

    /// Returns [`None`] if this result is falsy.
    fn truthy(self) -> Option<Self::Kept>;
}

impl<T> Truthy for Option<T> {
    type Kept = T;

    fn truthy(self) -> Option<T> {
        self
    }
}

impl Truthy for bool {
    type Kept = bool;

    fn truthy(self) -> Option<bool> {
        self.then_some(true)
    }
}

impl Truthy for String {
    type Kept = String;

    fn truthy(self) -> Option<String> {
        (!self.is_empty()).then_some(self)
    }
}

impl<'a> Truthy for &'a str {
    type Kept = &'a str;

    fn truthy(self) -> Option<&'a str> {
        (!self.is_empty()).then_some(self)
    }
}

impl Truthy for Value {
    type Kept = Value;

    fn truthy(self) -> Option<Value> {
        let keep = match &self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        };
        keep.then_some(self)
    }
}

macro_rules! truthy_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Truthy for $ty {
                type Kept = $ty;

                fn truthy(self) -> Option<$ty> {
                    (self != 0).then_some(self)
                }
            }
        )*
    };
}

truthy_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! truthy_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Truthy for $ty {
                type Kept = $ty;

                fn truthy(self) -> Option<$ty> {
                    (self != 0.0 && !self.is_nan()).then_some(self)
                }
            }
        )*
    };
}

truthy_float!(f32, f64);

impl<V> Stashmap<V> {
    /// Calls `callback` with each value and its key, in insertion order.
    ///
    /// The traversal stops as soon as the callback returns `false` (see [`Visit`]).
    /// Returns the number of times the callback was called.
    pub fn for_each<R>(&self, mut callback: impl FnMut(&V, &Key) -> R) -> usize
    where
        R: Visit,
    {
        let mut visited = 0;
        for (key, value) in self.iter() {
            visited += 1;
            if !callback(value, key).proceed() {
                break;
            }
        }
        visited
    }

    /// Calls `callback` with each value and its key, in insertion order, and collects the
    /// truthy results (see [`Truthy`]). Every entry is visited.
    pub fn map<R>(&self, mut callback: impl FnMut(&V, &Key) -> R) -> Vec<R::Kept>
    where
        R: Truthy,
    {
        self.iter()
            .filter_map(|(key, value)| callback(value, key).truthy())
            .collect()
    }
}

//! Serde support: a [`Stashmap`] is a map whose entries appear in insertion order.

use std::{fmt, marker::PhantomData};

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{key::Key, map::Stashmap};

impl<V> Serialize for Stashmap<V>
where
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de, V> Deserialize<'de> for Stashmap<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(StashmapVisitor(PhantomData))
    }
}

struct StashmapVisitor<V>(PhantomData<V>);

impl<'de, V> Visitor<'de> for StashmapVisitor<V>
where
    V: Deserialize<'de>,
{
    type Value = Stashmap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut stash = Stashmap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<Key, V>()? {
            stash.set(key, value);
        }
        Ok(stash)
    }
}

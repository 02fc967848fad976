use crate::{Multiset, SignedMultiset};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

impl<E, H> Serialize for Multiset<E, H>
where
    E: Serialize,
{
    /// Serializes as a map from element to multiplicity.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.counts())
    }
}

impl<'de, E, S> Deserialize<'de> for Multiset<E, S>
where
    E: Deserialize<'de> + Eq + Hash,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountsVisitor<E, S> {
            marker: PhantomData<Multiset<E, S>>,
        }

        impl<'de, E, S> Visitor<'de> for CountsVisitor<E, S>
        where
            E: Deserialize<'de> + Eq + Hash,
            S: BuildHasher + Default,
        {
            type Value = Multiset<E, S>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map from element to multiplicity")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut values = Multiset::with_capacity_and_hasher(
                    map.size_hint().unwrap_or(0),
                    S::default(),
                );

                // Zero multiplicities are dropped on the way in, so the
                // positive-count invariant holds for any input map.
                while let Some((element, multiplicity)) = map.next_entry()? {
                    values.insert_many(element, multiplicity);
                }

                Ok(values)
            }
        }

        let visitor = CountsVisitor {
            marker: PhantomData,
        };

        deserializer.deserialize_map(visitor)
    }
}

impl<E, H> Serialize for SignedMultiset<E, H>
where
    E: Serialize,
{
    /// Serializes as a map from element to signed multiplicity.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.counts())
    }
}

impl<'de, E, S> Deserialize<'de> for SignedMultiset<E, S>
where
    E: Deserialize<'de> + Eq + Hash,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountsVisitor<E, S> {
            marker: PhantomData<SignedMultiset<E, S>>,
        }

        impl<'de, E, S> Visitor<'de> for CountsVisitor<E, S>
        where
            E: Deserialize<'de> + Eq + Hash,
            S: BuildHasher + Default,
        {
            type Value = SignedMultiset<E, S>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map from element to signed multiplicity")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut values = SignedMultiset::with_capacity_and_hasher(
                    map.size_hint().unwrap_or(0),
                    S::default(),
                );

                // Summed algebraically, so zero entries and duplicate
                // elements cannot break the nonzero-count invariant.
                while let Some((element, multiplicity)) = map.next_entry()? {
                    values.add(element, multiplicity);
                }

                Ok(values)
            }
        }

        let visitor = CountsVisitor {
            marker: PhantomData,
        };

        deserializer.deserialize_map(visitor)
    }
}

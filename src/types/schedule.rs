// Schedule - Block-keyed maps of the chain spec
//
// Keys are written as hex quantities; on input they may be hex or decimal.

use super::primitives::{BlockNumber, U256};
use super::quantity::{parse_u256, parse_u64, to_hex, Quantity};
use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// Cumulative schedule: activation block -> running value (bomb delay, block reward)
///
/// On input a bare scalar is accepted and means `{0: value}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule(BTreeMap<BlockNumber, U256>);

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, block: BlockNumber) -> Option<U256> {
        self.0.get(&block).copied()
    }

    pub fn insert(&mut self, block: BlockNumber, value: U256) -> Option<U256> {
        self.0.insert(block, value)
    }

    pub fn remove(&mut self, block: BlockNumber) -> Option<U256> {
        self.0.remove(&block)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Entries in ascending block order
    pub fn iter(&self) -> impl Iterator<Item = (BlockNumber, U256)> + '_ {
        self.0.iter().map(|(block, value)| (*block, *value))
    }

    /// Entries strictly before `block`
    pub fn before(&self, block: BlockNumber) -> impl Iterator<Item = (BlockNumber, U256)> + '_ {
        self.0.range(..block).map(|(block, value)| (*block, *value))
    }
}

impl FromIterator<(BlockNumber, U256)> for Schedule {
    fn from_iter<I: IntoIterator<Item = (BlockNumber, U256)>>(iter: I) -> Self {
        Schedule(iter.into_iter().collect())
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (block, value) in &self.0 {
            map.serialize_entry(&to_hex(*block), &to_hex(*value))?;
        }
        map.end()
    }
}

struct ScheduleVisitor;

impl<'de> Visitor<'de> for ScheduleVisitor {
    type Value = Schedule;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a quantity or a map of block to quantity")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Schedule, E> {
        Ok(Schedule::from_iter([(0, U256::from(value))]))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Schedule, E> {
        let value = parse_u256(value).map_err(E::custom)?;
        Ok(Schedule::from_iter([(0, value)]))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Schedule, A::Error> {
        let mut schedule = Schedule::new();
        while let Some((key, Quantity(value))) = access.next_entry::<String, Quantity>()? {
            let block = parse_u64(&key).map_err(de::Error::custom)?;
            schedule.insert(block, value);
        }
        Ok(schedule)
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScheduleVisitor)
    }
}

/// Generic block-keyed map (precompile pricing history)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMap<V>(BTreeMap<BlockNumber, V>);

impl<V> Default for BlockMap<V> {
    fn default() -> Self {
        BlockMap(BTreeMap::new())
    }
}

impl<V> BlockMap<V> {
    pub fn get(&self, block: BlockNumber) -> Option<&V> {
        self.0.get(&block)
    }

    pub fn insert(&mut self, block: BlockNumber, value: V) -> Option<V> {
        self.0.insert(block, value)
    }

    pub fn retain<F: FnMut(&BlockNumber, &mut V) -> bool>(&mut self, f: F) {
        self.0.retain(f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlockNumber, &V)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> FromIterator<(BlockNumber, V)> for BlockMap<V> {
    fn from_iter<I: IntoIterator<Item = (BlockNumber, V)>>(iter: I) -> Self {
        BlockMap(iter.into_iter().collect())
    }
}

impl<V: Serialize> Serialize for BlockMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (block, value) in &self.0 {
            map.serialize_entry(&to_hex(*block), value)?;
        }
        map.end()
    }
}

struct BlockMapVisitor<V>(PhantomData<V>);

impl<'de, V: DeserializeOwned> Visitor<'de> for BlockMapVisitor<V> {
    type Value = BlockMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map keyed by block number")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<BlockMap<V>, A::Error> {
        let mut entries = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            let block = parse_u64(&key).map_err(de::Error::custom)?;
            entries.insert(block, value);
        }
        Ok(BlockMap(entries))
    }
}

impl<'de, V: DeserializeOwned> Deserialize<'de> for BlockMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BlockMapVisitor(PhantomData))
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Collection and map values.
//!
//! Both keep their entries in a `Vec` and emulate the semantics of their
//! [`CollectionKind`]/[`MapKind`]: sets deduplicate, tree kinds stay sorted
//! by [`Value::total_cmp`], everything else keeps insertion order (which is
//! also the encode order).
//!
//! Element identity is [`Value::total_cmp`] equality for every kind. Hash
//! kinds keep a side index keyed on [`Value::total_hash`], so lookups and
//! inserts stay constant time; bulk construction sorts once.

use super::Value;
use crate::error::{Error, Result};
use crate::schema::{CollectionKind, MapKind};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::Hasher;

fn hash_of(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.total_hash(&mut hasher);
    hasher.finish()
}

fn item(slot: &Value) -> &Value {
    slot
}

fn entry_key(slot: &(Value, Value)) -> &Value {
    &slot.0
}

/// Positions of unsorted slots, bucketed by [`Value::total_hash`].
#[derive(Debug, Clone, Default)]
struct HashIndex {
    buckets: HashMap<u64, Vec<usize>>,
}

impl HashIndex {
    fn find<T>(&self, key: &Value, slots: &[T], key_of: fn(&T) -> &Value) -> Option<usize> {
        self.buckets
            .get(&hash_of(key))?
            .iter()
            .copied()
            .find(|&idx| key_of(&slots[idx]).total_cmp(key).is_eq())
    }

    fn insert(&mut self, key: &Value, idx: usize) {
        self.buckets.entry(hash_of(key)).or_default().push(idx);
    }

    fn rebuild<T>(&mut self, slots: &[T], key_of: fn(&T) -> &Value) {
        self.buckets.clear();
        for (idx, slot) in slots.iter().enumerate() {
            self.insert(key_of(slot), idx);
        }
    }

    fn clear(&mut self) {
        self.buckets.clear();
    }
}

/// A collection of values with the behavior of its [`CollectionKind`].
#[derive(Debug, Clone, Default)]
pub struct CollectionValue {
    kind: CollectionKind,
    items: Vec<Value>,
    index: HashIndex,
    read_only: bool,
}

impl CollectionValue {
    pub fn new(kind: CollectionKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            index: HashIndex::default(),
            read_only: false,
        }
    }

    pub fn from_items<I, V>(kind: CollectionKind, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut collection = Self::new(kind);
        if kind.is_sorted() {
            // Stable sort keeps the first of equal elements.
            let mut items: Vec<Value> = items.into_iter().map(Into::into).collect();
            items.sort_by(Value::total_cmp);
            items.dedup_by(|later, earlier| later.total_cmp(earlier).is_eq());
            collection.items = items;
        } else {
            for item in items {
                collection.place(item.into());
            }
        }
        collection
    }

    /// Insert `value`; returns `false` when a set already held it.
    pub fn insert(&mut self, value: impl Into<Value>) -> Result<bool> {
        if self.read_only {
            return Err(Error::UnmodifiableContainer);
        }
        Ok(self.place(value.into()))
    }

    pub fn clear(&mut self) -> Result<()> {
        if self.read_only {
            return Err(Error::UnmodifiableContainer);
        }
        self.items.clear();
        self.index.clear();
        Ok(())
    }

    fn place(&mut self, value: Value) -> bool {
        if self.kind.is_sorted() {
            match self.items.binary_search_by(|slot| slot.total_cmp(&value)) {
                Ok(_) => false,
                Err(pos) => {
                    self.items.insert(pos, value);
                    true
                }
            }
        } else if self.kind.is_set() {
            if self.index.find(&value, &self.items, item).is_some() {
                return false;
            }
            self.index.insert(&value, self.items.len());
            self.items.push(value);
            true
        } else {
            self.items.push(value);
            true
        }
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, value: &Value) -> bool {
        if self.kind.is_sorted() {
            self.items
                .binary_search_by(|slot| slot.total_cmp(value))
                .is_ok()
        } else if self.kind.is_set() {
            self.index.find(value, &self.items, item).is_some()
        } else {
            self.items.iter().any(|slot| slot.total_cmp(value).is_eq())
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Freeze the collection; later mutation fails.
    pub fn into_unmodifiable(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

impl PartialEq for CollectionValue {
    /// Sets compare as sets, everything else as sequences.
    fn eq(&self, other: &Self) -> bool {
        if self.kind.is_set() || other.kind.is_set() {
            self.len() == other.len() && self.items.iter().all(|v| other.contains(v))
        } else {
            self.items == other.items
        }
    }
}

impl<'a> IntoIterator for &'a CollectionValue {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A key/value map with the behavior of its [`MapKind`].
#[derive(Debug, Clone, Default)]
pub struct MapValue {
    kind: MapKind,
    entries: Vec<(Value, Value)>,
    index: HashIndex,
    read_only: bool,
}

impl MapValue {
    pub fn new(kind: MapKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashIndex::default(),
            read_only: false,
        }
    }

    pub fn from_entries<I, K, V>(kind: MapKind, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut map = Self::new(kind);
        if kind.is_sorted() {
            let mut entries: Vec<(Value, Value)> = entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect();
            entries.sort_by(|a, b| a.0.total_cmp(&b.0));
            // First key of a run stays, last value wins.
            entries.dedup_by(|later, earlier| {
                let duplicate = later.0.total_cmp(&earlier.0).is_eq();
                if duplicate {
                    std::mem::swap(&mut earlier.1, &mut later.1);
                }
                duplicate
            });
            map.entries = entries;
        } else {
            for (k, v) in entries {
                map.place(k.into(), v.into());
            }
        }
        map
    }

    /// Insert or replace; returns the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<Option<Value>> {
        if self.read_only {
            return Err(Error::UnmodifiableContainer);
        }
        Ok(self.place(key.into(), value.into()))
    }

    pub fn remove(&mut self, key: &Value) -> Result<Option<Value>> {
        if self.read_only {
            return Err(Error::UnmodifiableContainer);
        }
        let Ok(idx) = self.position(key) else {
            return Ok(None);
        };
        let (_, value) = self.entries.remove(idx);
        if !self.kind.is_sorted() {
            self.index.rebuild(&self.entries, entry_key);
        }
        Ok(Some(value))
    }

    fn place(&mut self, key: Value, value: Value) -> Option<Value> {
        match self.position(&key) {
            Ok(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            Err(idx) => {
                if !self.kind.is_sorted() {
                    self.index.insert(&key, idx);
                }
                self.entries.insert(idx, (key, value));
                None
            }
        }
    }

    /// `Ok(index)` of `key`, or `Err(insertion index)`.
    fn position(&self, key: &Value) -> std::result::Result<usize, usize> {
        if self.kind.is_sorted() {
            self.entries.binary_search_by(|(slot, _)| slot.total_cmp(key))
        } else {
            self.index
                .find(key, &self.entries, entry_key)
                .ok_or(self.entries.len())
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.position(key).ok().map(|idx| &self.entries[idx].1)
    }

    pub fn kind(&self) -> MapKind {
        self.kind
    }

    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn into_unmodifiable(mut self) -> Self {
        self.read_only = true;
        self
    }
}

impl PartialEq for MapValue {
    /// Same entry set, independent of order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

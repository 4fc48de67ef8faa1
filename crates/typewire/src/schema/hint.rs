// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concrete collection/map implementations and the hint tables choosing them.
//!
//! An interface-like hint (`List`, `SortedSet`, `ConcurrentMap`, ...) picks a
//! default implementation; a concrete hint (`LinkedList`, `TreeMap`, ...) is
//! used verbatim. Package prefixes are ignored. Anonymous or unknown hints are
//! rejected at schema-build time.

use crate::error::{Error, Result};

/// Concrete collection implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollectionKind {
    /// Dynamic array.
    #[default]
    List,
    LinkedList,
    HashSet,
    LinkedHashSet,
    /// Balanced tree set, kept sorted.
    TreeSet,
    /// Double-ended array-backed queue.
    Deque,
}

impl CollectionKind {
    pub fn is_set(self) -> bool {
        matches!(
            self,
            CollectionKind::HashSet | CollectionKind::LinkedHashSet | CollectionKind::TreeSet
        )
    }

    pub fn is_sorted(self) -> bool {
        self == CollectionKind::TreeSet
    }

    pub fn name(self) -> &'static str {
        match self {
            CollectionKind::List => "ArrayList",
            CollectionKind::LinkedList => "LinkedList",
            CollectionKind::HashSet => "HashSet",
            CollectionKind::LinkedHashSet => "LinkedHashSet",
            CollectionKind::TreeSet => "TreeSet",
            CollectionKind::Deque => "ArrayDeque",
        }
    }

    /// Resolve an implementation hint.
    pub fn from_hint(hint: &str) -> Result<Self> {
        let kind = match simple_name(hint)? {
            // interface-like
            "Collection" | "AbstractCollection" | "List" | "AbstractList" => CollectionKind::List,
            "Set" | "AbstractSet" => CollectionKind::HashSet,
            "SortedSet" | "NavigableSet" => CollectionKind::TreeSet,
            "Queue" | "AbstractQueue" => CollectionKind::LinkedList,
            "Deque" => CollectionKind::Deque,
            // concrete
            "ArrayList" | "Vec" => CollectionKind::List,
            "LinkedList" => CollectionKind::LinkedList,
            "HashSet" => CollectionKind::HashSet,
            "LinkedHashSet" => CollectionKind::LinkedHashSet,
            "TreeSet" | "BTreeSet" => CollectionKind::TreeSet,
            "ArrayDeque" | "VecDeque" => CollectionKind::Deque,
            _ => return Err(Error::InvalidImplementationHint(hint.to_string())),
        };
        Ok(kind)
    }
}

/// Concrete map implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapKind {
    #[default]
    Hash,
    LinkedHash,
    /// Kept sorted by key.
    Tree,
    Concurrent,
    /// Concurrent, kept sorted by key.
    ConcurrentSkipList,
}

impl MapKind {
    pub fn is_sorted(self) -> bool {
        matches!(self, MapKind::Tree | MapKind::ConcurrentSkipList)
    }

    pub fn name(self) -> &'static str {
        match self {
            MapKind::Hash => "HashMap",
            MapKind::LinkedHash => "LinkedHashMap",
            MapKind::Tree => "TreeMap",
            MapKind::Concurrent => "ConcurrentHashMap",
            MapKind::ConcurrentSkipList => "ConcurrentSkipListMap",
        }
    }

    pub fn from_hint(hint: &str) -> Result<Self> {
        let kind = match simple_name(hint)? {
            // interface-like
            "Map" | "AbstractMap" => MapKind::Hash,
            "SortedMap" | "NavigableMap" => MapKind::Tree,
            "ConcurrentMap" => MapKind::Concurrent,
            "ConcurrentNavigableMap" => MapKind::ConcurrentSkipList,
            // concrete
            "HashMap" => MapKind::Hash,
            "LinkedHashMap" => MapKind::LinkedHash,
            "TreeMap" | "BTreeMap" => MapKind::Tree,
            "ConcurrentHashMap" | "DashMap" => MapKind::Concurrent,
            "ConcurrentSkipListMap" => MapKind::ConcurrentSkipList,
            _ => return Err(Error::InvalidImplementationHint(hint.to_string())),
        };
        Ok(kind)
    }
}

/// Strip the package/module prefix and reject anonymous names.
fn simple_name(hint: &str) -> Result<&str> {
    let hint = hint.trim();
    let simple = hint.rsplit(['.', ':']).next().unwrap_or(hint);
    let anonymous = simple.is_empty()
        || simple.starts_with(|c: char| c.is_ascii_digit())
        || simple
            .rsplit_once('$')
            .is_some_and(|(_, tail)| tail.bytes().all(|b| b.is_ascii_digit()));
    if anonymous {
        return Err(Error::InvalidImplementationHint(hint.to_string()));
    }
    Ok(simple)
}

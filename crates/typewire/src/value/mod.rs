// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic object-graph values.
//!
//! Every encode/decode call works on a [`Value`] tree. Typed structs convert
//! to and from [`ObjectValue`] through [`Record`](crate::Record).

mod container;
mod object;

pub use container::{CollectionValue, MapValue};
pub use object::{FromValue, ObjectValue};

use crate::error::Error;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Shared null, for lookups that must hand out a reference.
pub(crate) static NULL: Value = Value::Null;

/// A serializable value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    /// UTF-16 code unit.
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    Collection(CollectionValue),
    Map(MapValue),
    /// Enum constant name.
    Enum(String),
    Object(Box<ObjectValue>),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Char(_) => "char",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::String(_) => "String",
            Value::Array(_) => "array",
            Value::Collection(_) => "collection",
            Value::Map(_) => "map",
            Value::Enum(_) => "enum",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Zero number, `false`, NUL char, or empty string/array/collection/map.
    pub fn is_zero_or_empty(&self) -> bool {
        match self {
            Value::Bool(b) => !b,
            Value::Byte(v) => *v == 0,
            Value::Short(v) => *v == 0,
            Value::Char(v) => *v == 0,
            Value::Int(v) => *v == 0,
            Value::Long(v) => *v == 0,
            Value::Float(v) => *v == 0.0,
            Value::Double(v) => *v == 0.0,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Collection(c) => c.is_empty(),
            Value::Map(m) => m.is_empty(),
            Value::Null | Value::Enum(_) | Value::Object(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&CollectionValue> {
        match self {
            Value::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<ObjectValue> {
        match self {
            Value::Object(o) => Some(*o),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Byte(_) => 2,
            Value::Short(_) => 3,
            Value::Char(_) => 4,
            Value::Int(_) => 5,
            Value::Long(_) => 6,
            Value::Float(_) => 7,
            Value::Double(_) => 8,
            Value::String(_) => 9,
            Value::Enum(_) => 10,
            Value::Array(_) => 11,
            Value::Collection(_) => 12,
            Value::Map(_) => 13,
            Value::Object(_) => 14,
        }
    }

    /// Total order used by sorted collections and maps.
    ///
    /// Values of different kinds order by kind; floats use IEEE total order.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Byte(a), Value::Byte(b)) => a.cmp(b),
            (Value::Short(a), Value::Short(b)) => a.cmp(b),
            (Value::Char(a), Value::Char(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Long(a), Value::Long(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Double(a), Value::Double(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) | (Value::Enum(a), Value::Enum(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => cmp_seq(a, b),
            (Value::Collection(a), Value::Collection(b)) => cmp_seq(a.items(), b.items()),
            (Value::Map(a), Value::Map(b)) => a
                .entries()
                .iter()
                .zip(b.entries())
                .map(|((ka, va), (kb, vb))| ka.total_cmp(kb).then_with(|| va.total_cmp(vb)))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            (Value::Object(a), Value::Object(b)) => a.total_cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Hash consistent with [`total_cmp`](Self::total_cmp): values that
    /// compare equal hash equal.
    pub fn total_hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Null => {}
            Value::Bool(v) => v.hash(state),
            Value::Byte(v) => v.hash(state),
            Value::Short(v) => v.hash(state),
            Value::Char(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Long(v) => v.hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::String(v) | Value::Enum(v) => v.hash(state),
            Value::Array(items) => hash_seq(items, state),
            Value::Collection(c) => hash_seq(c.items(), state),
            Value::Map(m) => {
                m.len().hash(state);
                for (k, v) in m.iter() {
                    k.total_hash(state);
                    v.total_hash(state);
                }
            }
            Value::Object(o) => o.total_hash(state),
        }
    }
}

fn hash_seq<H: Hasher>(items: &[Value], state: &mut H) {
    items.len().hash(state);
    for item in items {
        item.total_hash(state);
    }
}

fn cmp_seq(a: &[Value], b: &[Value]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// Build a [`Error::ValueMismatch`] for `found` where `expected` was declared.
pub(crate) fn mismatch(expected: impl Into<String>, found: &Value) -> Error {
    Error::ValueMismatch {
        expected: expected.into(),
        found: found.kind_name().to_string(),
    }
}

macro_rules! impl_from_scalar {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Value {
            fn from(v: $type) -> Self {
                Value::$variant(v)
            }
        }
    };
}

impl_from_scalar!(bool, Bool);
impl_from_scalar!(i8, Byte);
impl_from_scalar!(i16, Short);
impl_from_scalar!(u16, Char);
impl_from_scalar!(i32, Int);
impl_from_scalar!(i64, Long);
impl_from_scalar!(f32, Float);
impl_from_scalar!(f64, Double);
impl_from_scalar!(String, String);
impl_from_scalar!(CollectionValue, Collection);
impl_from_scalar!(MapValue, Map);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<ObjectValue> for Value {
    fn from(v: ObjectValue) -> Self {
        Value::Object(Box::new(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

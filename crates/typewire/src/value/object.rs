// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Object values and typed extraction.

use super::{mismatch, CollectionValue, Value, NULL};
use crate::error::Result;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// An instance of a schema type: its type name plus named field values.
///
/// A field that was never set reads as [`Value::Null`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectValue {
    type_name: String,
    fields: HashMap<String, Value>,
}

impl ObjectValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: HashMap::new(),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Build from constructor arguments, matched to parameter names by position.
    pub fn from_arguments<'a>(
        type_name: impl Into<String>,
        params: impl IntoIterator<Item = &'a str>,
        args: Vec<Value>,
    ) -> Self {
        let fields = params
            .into_iter()
            .map(str::to_string)
            .zip(args)
            .collect();
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field value, or null when unset.
    pub fn field(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&NULL)
    }

    /// Remove and return a field value (null when unset).
    pub fn take(&mut self, name: &str) -> Value {
        self.fields.remove(name).unwrap_or_default()
    }

    /// Remove a field and convert it.
    pub fn take_as<T: FromValue>(&mut self, name: &str) -> Result<T> {
        T::from_value(self.take(name))
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn sorted_fields(&self) -> Vec<(&String, &Value)> {
        let mut fields: Vec<_> = self.fields.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        fields
    }

    pub(crate) fn total_cmp(&self, other: &ObjectValue) -> Ordering {
        self.type_name.cmp(&other.type_name).then_with(|| {
            let (a, b) = (self.sorted_fields(), other.sorted_fields());
            a.iter()
                .zip(&b)
                .map(|((ka, va), (kb, vb))| ka.cmp(kb).then_with(|| va.total_cmp(vb)))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len()))
        })
    }

    pub(crate) fn total_hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
        let fields = self.sorted_fields();
        fields.len().hash(state);
        for (name, value) in fields {
            name.hash(state);
            value.total_hash(state);
        }
    }
}

/// Conversion out of a decoded [`Value`].
///
/// Null converts to the zero/empty value of non-optional targets.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! impl_from_value {
    ($type:ty, $variant:ident, $name:expr) => {
        impl FromValue for $type {
            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    Value::Null => Ok(<$type>::default()),
                    other => Err(mismatch($name, &other)),
                }
            }
        }
    };
}

impl_from_value!(bool, Bool, "boolean");
impl_from_value!(i8, Byte, "byte");
impl_from_value!(i16, Short, "short");
impl_from_value!(u16, Char, "char");
impl_from_value!(i32, Int, "int");
impl_from_value!(i64, Long, "long");
impl_from_value!(f32, Float, "float");
impl_from_value!(f64, Double, "double");

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) | Value::Enum(s) => Ok(s),
            Value::Null => Ok(String::new()),
            other => Err(mismatch("String", &other)),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for ObjectValue {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(o) => Ok(*o),
            other => Err(mismatch("object", &other)),
        }
    }
}

impl FromValue for CollectionValue {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Collection(c) => Ok(c),
            Value::Null => Ok(CollectionValue::default()),
            other => Err(mismatch("collection", &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            Value::Collection(c) => c.into_items().into_iter().map(T::from_value).collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(mismatch("array", &other)),
        }
    }
}

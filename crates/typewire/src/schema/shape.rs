// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declared value shapes.

use crate::value::Value;
use crate::wire::SizeMode;
use std::sync::Arc;

/// Primitive value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Kinds with a varint encoding; the others are always fixed-width.
    pub fn has_variable_form(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int | PrimitiveKind::Long | PrimitiveKind::Float | PrimitiveKind::Double
        )
    }

    /// Fixed encoded width in bytes.
    pub fn fixed_width(self) -> usize {
        match self {
            PrimitiveKind::Boolean | PrimitiveKind::Byte => 1,
            PrimitiveKind::Short | PrimitiveKind::Char => 2,
            PrimitiveKind::Int | PrimitiveKind::Float => 4,
            PrimitiveKind::Long | PrimitiveKind::Double => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// Name of the nullable (boxed) counterpart.
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Char => "Character",
            PrimitiveKind::Int => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn from_boxed_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.boxed_name() == name)
    }

    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Char,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// The zero value of this kind.
    pub fn zero(self) -> Value {
        match self {
            PrimitiveKind::Boolean => Value::Bool(false),
            PrimitiveKind::Byte => Value::Byte(0),
            PrimitiveKind::Short => Value::Short(0),
            PrimitiveKind::Char => Value::Char(0),
            PrimitiveKind::Int => Value::Int(0),
            PrimitiveKind::Long => Value::Long(0),
            PrimitiveKind::Float => Value::Float(0.0),
            PrimitiveKind::Double => Value::Double(0.0),
        }
    }
}

/// Enum constant table, in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSchema {
    pub name: String,
    pub constants: Vec<String>,
}

impl EnumSchema {
    pub fn new<I, S>(name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            constants: constants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn ordinal_of(&self, constant: &str) -> Option<usize> {
        self.constants.iter().position(|c| c == constant)
    }

    pub fn constant(&self, ordinal: usize) -> Option<&str> {
        self.constants.get(ordinal).map(String::as_str)
    }
}

/// How an enum value is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumRepr {
    /// Ordinal as varint (variable size) or 4-byte int (fixed).
    #[default]
    Ordinal,
    /// Constant name as a string (or char buffer with `string_as_chars`).
    Name,
}

/// Target of an object-typed position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectRef {
    /// Static type known: decoded with this type's schema.
    Concrete(String),
    /// Static type unknown (interface, abstract, `Object`): dispatched by
    /// envelope identifier.
    Dynamic,
}

/// Structural category of a value, with nested shapes for containers.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Non-nullable primitive.
    Primitive(PrimitiveKind),
    /// Nullable primitive.
    Boxed(PrimitiveKind),
    String,
    /// Homogeneous array of the component shape.
    Array(Box<ValueShape>),
    Collection(Box<ValueShape>),
    /// Key and value shapes.
    Map(Box<ValueShape>, Box<ValueShape>),
    Enum(Arc<EnumSchema>, EnumRepr),
    Object(ObjectRef),
}

impl ShapeKind {
    /// Whether a decoded value of this shape may be replaced by null.
    pub fn is_nullable(&self) -> bool {
        !matches!(
            self,
            ShapeKind::Primitive(_) | ShapeKind::Object(ObjectRef::Concrete(_))
        )
    }

    pub fn describe(&self) -> String {
        match self {
            ShapeKind::Primitive(k) => k.name().to_string(),
            ShapeKind::Boxed(k) => k.boxed_name().to_string(),
            ShapeKind::String => "String".to_string(),
            ShapeKind::Array(c) => format!("{}[]", c.kind.describe()),
            ShapeKind::Collection(e) => format!("Collection<{}>", e.kind.describe()),
            ShapeKind::Map(k, v) => format!("Map<{}, {}>", k.kind.describe(), v.kind.describe()),
            ShapeKind::Enum(e, _) => e.name.clone(),
            ShapeKind::Object(ObjectRef::Concrete(name)) => name.clone(),
            ShapeKind::Object(ObjectRef::Dynamic) => "Object".to_string(),
        }
    }
}

/// Declared shape of a field or container component, plus its encoding options.
///
/// Unset options inherit from the owning schema (`size`, `null_is_zero_or_empty`)
/// or from the enclosing container (`charset`).
#[derive(Debug, Clone, PartialEq)]
pub struct ValueShape {
    pub kind: ShapeKind,
    pub size: Option<SizeMode>,
    pub charset: Option<String>,
    /// Strings (and enum names) as UTF-16 code units instead of charset bytes.
    pub string_as_chars: bool,
    pub null_is_zero_or_empty: Option<bool>,
    /// Collection/map implementation name, resolved through the hint tables.
    pub implementation: Option<String>,
    /// Decoded collection/map rejects mutation.
    pub unmodifiable: bool,
}

impl ValueShape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            size: None,
            charset: None,
            string_as_chars: false,
            null_is_zero_or_empty: None,
            implementation: None,
            unmodifiable: false,
        }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(ShapeKind::Primitive(kind))
    }

    pub fn boxed(kind: PrimitiveKind) -> Self {
        Self::new(ShapeKind::Boxed(kind))
    }

    pub fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Boolean)
    }

    pub fn int() -> Self {
        Self::primitive(PrimitiveKind::Int)
    }

    pub fn long() -> Self {
        Self::primitive(PrimitiveKind::Long)
    }

    pub fn double() -> Self {
        Self::primitive(PrimitiveKind::Double)
    }

    pub fn string() -> Self {
        Self::new(ShapeKind::String)
    }

    pub fn array_of(component: ValueShape) -> Self {
        Self::new(ShapeKind::Array(Box::new(component)))
    }

    pub fn collection_of(element: ValueShape) -> Self {
        Self::new(ShapeKind::Collection(Box::new(element)))
    }

    pub fn map_of(key: ValueShape, value: ValueShape) -> Self {
        Self::new(ShapeKind::Map(Box::new(key), Box::new(value)))
    }

    pub fn enumeration(schema: Arc<EnumSchema>, repr: EnumRepr) -> Self {
        Self::new(ShapeKind::Enum(schema, repr))
    }

    /// Object of a known concrete type.
    pub fn object(type_name: impl Into<String>) -> Self {
        Self::new(ShapeKind::Object(ObjectRef::Concrete(type_name.into())))
    }

    /// Object whose concrete type is carried by its envelope.
    pub fn dynamic() -> Self {
        Self::new(ShapeKind::Object(ObjectRef::Dynamic))
    }

    pub fn fixed(mut self, count: usize) -> Self {
        self.size = Some(SizeMode::Fixed(count));
        self
    }

    /// Fixed-width encoding for numeric primitives.
    pub fn fixed_width(mut self) -> Self {
        self.size = Some(SizeMode::FIXED_WIDTH);
        self
    }

    pub fn variable(mut self) -> Self {
        self.size = Some(SizeMode::Variable);
        self
    }

    pub fn charset(mut self, name: impl Into<String>) -> Self {
        self.charset = Some(name.into());
        self
    }

    pub fn as_chars(mut self) -> Self {
        self.string_as_chars = true;
        self
    }

    pub fn null_is_zero_or_empty(mut self, enabled: bool) -> Self {
        self.null_is_zero_or_empty = Some(enabled);
        self
    }

    pub fn implementation(mut self, name: impl Into<String>) -> Self {
        self.implementation = Some(name.into());
        self
    }

    pub fn unmodifiable(mut self) -> Self {
        self.unmodifiable = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_forms() {
        assert!(PrimitiveKind::Int.has_variable_form());
        assert!(PrimitiveKind::Double.has_variable_form());
        assert!(!PrimitiveKind::Char.has_variable_form());
        assert!(!PrimitiveKind::Boolean.has_variable_form());
    }

    #[test]
    fn test_names_roundtrip() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_name(kind.name()), Some(kind));
            assert_eq!(PrimitiveKind::from_boxed_name(kind.boxed_name()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_name("Integer"), None);
    }

    #[test]
    fn test_describe_nested() {
        let shape = ValueShape::map_of(
            ValueShape::string(),
            ValueShape::collection_of(ValueShape::boxed(PrimitiveKind::Int)),
        );
        assert_eq!(shape.kind.describe(), "Map<String, Collection<Integer>>");
    }
}

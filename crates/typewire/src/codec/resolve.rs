// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shape resolution: [`ValueShape`] to [`Codec`], recursively.

use super::{
    ArrayCodec, Codec, CollectionCodec, EnumCodec, MapCodec, ObjectRefCodec, PrimitiveArrayCodec,
    PrimitiveCodec, StringCodec,
};
use crate::error::{Error, Result};
use crate::schema::{
    CollectionKind, EnumRepr, MapKind, ObjectRef, ShapeKind, TypeSchema, ValueShape,
};
use crate::wire::{Charset, SizeMode};

/// Options inherited by shapes that leave them unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveDefaults {
    pub variable_size: bool,
    pub null_is_zero_or_empty: bool,
    pub charset: Charset,
}

impl ResolveDefaults {
    pub fn from_schema(schema: &TypeSchema) -> Self {
        Self {
            variable_size: schema.variable_size,
            null_is_zero_or_empty: schema.null_is_zero_or_empty,
            charset: Charset::default(),
        }
    }

    /// Size mode of a shape that leaves it unset.
    ///
    /// Only numeric primitives and ordinal enums follow the schema default;
    /// strings, name enums and containers without a count stay
    /// length-prefixed.
    pub fn size_for(&self, kind: &ShapeKind) -> SizeMode {
        let numeric = matches!(
            kind,
            ShapeKind::Primitive(_) | ShapeKind::Boxed(_) | ShapeKind::Enum(_, EnumRepr::Ordinal)
        );
        if numeric && !self.variable_size {
            SizeMode::FIXED_WIDTH
        } else {
            SizeMode::Variable
        }
    }
}

impl Default for ResolveDefaults {
    fn default() -> Self {
        Self {
            variable_size: true,
            null_is_zero_or_empty: true,
            charset: Charset::default(),
        }
    }
}

/// Resolve `shape` into its codec.
///
/// Unsupported combinations fail here so that encode and decode never see a
/// malformed shape.
pub fn resolve(shape: &ValueShape, defaults: &ResolveDefaults) -> Result<Codec> {
    let charset = match &shape.charset {
        Some(name) => Charset::from_name(name)?,
        None => defaults.charset,
    };
    let size = shape.size.unwrap_or_else(|| defaults.size_for(&shape.kind));
    let describe = || shape.kind.describe();

    let container = matches!(shape.kind, ShapeKind::Collection(_) | ShapeKind::Map(..));
    if shape.string_as_chars
        && !matches!(
            shape.kind,
            ShapeKind::String | ShapeKind::Enum(_, EnumRepr::Name)
        )
    {
        return Err(Error::UnsupportedShape(format!(
            "char-buffer encoding on {}",
            describe()
        )));
    }
    if let (Some(hint), false) = (&shape.implementation, container) {
        return Err(Error::InvalidImplementationHint(format!(
            "{} on {}",
            hint,
            describe()
        )));
    }
    if shape.unmodifiable && !container {
        return Err(Error::UnsupportedShape(format!(
            "unmodifiable {}",
            describe()
        )));
    }

    // Components inherit the charset; everything else comes from the schema.
    let inner = ResolveDefaults { charset, ..*defaults };

    let codec = match &shape.kind {
        ShapeKind::Primitive(kind) => Codec::Primitive(PrimitiveCodec::new(*kind, size, false)),
        ShapeKind::Boxed(kind) => Codec::Primitive(PrimitiveCodec::new(*kind, size, true)),
        ShapeKind::String => Codec::Str(StringCodec::new(charset, size, shape.string_as_chars)),
        ShapeKind::Array(component) => match resolve(component, &inner)? {
            Codec::Primitive(element) if !element.boxed => {
                Codec::PrimitiveArray(PrimitiveArrayCodec {
                    element,
                    count: size,
                })
            }
            component => Codec::Array(ArrayCodec {
                component: Box::new(component),
                count: size,
            }),
        },
        ShapeKind::Collection(element) => {
            reject_unboxed(element, "collection element")?;
            let kind = match &shape.implementation {
                Some(hint) => CollectionKind::from_hint(hint)?,
                None => CollectionKind::default(),
            };
            Codec::Collection(CollectionCodec {
                element: Box::new(resolve(element, &inner)?),
                count: size,
                kind,
                unmodifiable: shape.unmodifiable,
            })
        }
        ShapeKind::Map(key, value) => {
            reject_unboxed(key, "map key")?;
            reject_unboxed(value, "map value")?;
            let kind = match &shape.implementation {
                Some(hint) => MapKind::from_hint(hint)?,
                None => MapKind::default(),
            };
            Codec::Map(MapCodec {
                key: Box::new(resolve(key, &inner)?),
                value: Box::new(resolve(value, &inner)?),
                count: size,
                kind,
                unmodifiable: shape.unmodifiable,
            })
        }
        ShapeKind::Enum(schema, repr) => {
            if schema.constants.is_empty() {
                return Err(Error::UnsupportedShape(format!(
                    "enum {} has no constants",
                    schema.name
                )));
            }
            Codec::Enum(EnumCodec {
                schema: schema.clone(),
                repr: *repr,
                size,
                text: StringCodec::new(charset, size, shape.string_as_chars),
                null_is_empty: shape
                    .null_is_zero_or_empty
                    .unwrap_or(defaults.null_is_zero_or_empty),
            })
        }
        ShapeKind::Object(ObjectRef::Concrete(name)) if name.is_empty() => {
            return Err(Error::UnsupportedShape(
                "object shape without a type name".to_string(),
            ))
        }
        ShapeKind::Object(ObjectRef::Concrete(name)) => {
            Codec::Object(ObjectRefCodec::Concrete(name.clone()))
        }
        ShapeKind::Object(ObjectRef::Dynamic) => Codec::Object(ObjectRefCodec::Dynamic),
    };
    Ok(codec)
}

fn reject_unboxed(shape: &ValueShape, position: &str) -> Result<()> {
    if let ShapeKind::Primitive(kind) = shape.kind {
        return Err(Error::UnsupportedShape(format!(
            "{} must be boxed ({} instead of {})",
            position,
            kind.boxed_name(),
            kind.name()
        )));
    }
    Ok(())
}

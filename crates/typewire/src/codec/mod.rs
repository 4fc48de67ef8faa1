// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Composite codecs.
//!
//! [`resolve`] maps a [`ValueShape`](crate::ValueShape) to a [`Codec`] once,
//! at schema registration. A codec is a closed set of strategies, one per
//! shape kind; only the object strategy reaches back into the registry, by
//! type name (concrete positions) or by envelope identifier (dynamic ones).
//!
//! ```text
//! serialize(type, value)
//!   -> ObjectCodec (envelope?) -> field codecs in schema order
//!        -> Primitive / Str           -> WireWriter
//!        -> Array / Collection / Map  -> component codecs (recursive)
//!        -> Object                    -> registry -> ObjectCodec (recursive)
//! ```

mod accessor;
mod array;
mod collection;
mod enums;
mod map;
mod object;
mod primitive;
mod resolve;
mod string;

pub use array::{ArrayCodec, PrimitiveArrayCodec};
pub use collection::CollectionCodec;
pub use enums::EnumCodec;
pub use map::MapCodec;
pub use object::{ObjectCodec, ObjectRefCodec};
pub use primitive::PrimitiveCodec;
pub use resolve::{resolve, ResolveDefaults};
pub use string::StringCodec;

pub(crate) use object::decode_polymorphic;

use crate::config::MAX_NESTING_DEPTH;
use crate::error::{Error, Result};
use crate::feature::FeatureContext;
use crate::registry::IdentityRegistry;
use crate::value::{Value, NULL};
use crate::wire::{SizeMode, WireReader, WireWriter};

/// Per-call state threaded through every codec.
///
/// Copied, never re-derived, into nested codecs so one set of overrides
/// covers the whole object graph.
#[derive(Clone, Copy)]
pub struct CodecContext<'a> {
    pub registry: &'a IdentityRegistry,
    pub features: FeatureContext,
    depth: usize,
}

impl<'a> CodecContext<'a> {
    pub fn new(registry: &'a IdentityRegistry, features: FeatureContext) -> Self {
        Self {
            registry,
            features,
            depth: 0,
        }
    }

    /// Context for one object level further down.
    pub(crate) fn nested(self) -> Result<Self> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        Ok(Self {
            depth: self.depth + 1,
            ..self
        })
    }

    /// Size mode after the variable-size override.
    pub(crate) fn size(&self, configured: SizeMode) -> SizeMode {
        configured.forced(self.features.force_variable_size())
    }
}

impl std::fmt::Debug for CodecContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecContext")
            .field("features", &self.features)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

/// Encode/decode strategy for one shape.
#[derive(Debug, Clone)]
pub enum Codec {
    Primitive(PrimitiveCodec),
    Str(StringCodec),
    PrimitiveArray(PrimitiveArrayCodec),
    Array(ArrayCodec),
    Collection(CollectionCodec),
    Map(MapCodec),
    Enum(EnumCodec),
    Object(ObjectRefCodec),
}

impl Codec {
    pub fn encode(&self, value: &Value, w: &mut WireWriter, ctx: CodecContext<'_>) -> Result<()> {
        match self {
            Codec::Primitive(c) => c.encode(value, w, ctx),
            Codec::Str(c) => c.encode(value, w, ctx),
            Codec::PrimitiveArray(c) => c.encode(value, w, ctx),
            Codec::Array(c) => c.encode(value, w, ctx),
            Codec::Collection(c) => c.encode(value, w, ctx),
            Codec::Map(c) => c.encode(value, w, ctx),
            Codec::Enum(c) => c.encode(value, w, ctx),
            Codec::Object(c) => c.encode(value, w, ctx),
        }
    }

    pub fn decode(&self, r: &mut WireReader<'_>, ctx: CodecContext<'_>) -> Result<Value> {
        match self {
            Codec::Primitive(c) => c.decode(r, ctx),
            Codec::Str(c) => c.decode(r, ctx),
            Codec::PrimitiveArray(c) => c.decode(r, ctx),
            Codec::Array(c) => c.decode(r, ctx),
            Codec::Collection(c) => c.decode(r, ctx),
            Codec::Map(c) => c.decode(r, ctx),
            Codec::Enum(c) => c.decode(r, ctx),
            Codec::Object(c) => c.decode(r, ctx),
        }
    }
}

/// Write `items` under a container size mode.
///
/// Variable writes a count then every item; `Fixed(n)` writes exactly `n`
/// items, dropping extras and filling with nulls.
pub(crate) fn encode_items<'v>(
    items: &'v [Value],
    size: SizeMode,
    w: &mut WireWriter,
    mut each: impl FnMut(&'v Value, &mut WireWriter) -> Result<()>,
) -> Result<()> {
    match size {
        SizeMode::Variable => {
            w.write_length(items.len());
            for item in items {
                each(item, w)?;
            }
        }
        SizeMode::Fixed(n) => {
            for idx in 0..n {
                each(items.get(idx).unwrap_or(&NULL), w)?;
            }
        }
    }
    Ok(())
}

/// Read a container count, capping the preallocation by what is left.
pub(crate) fn decode_count(r: &mut WireReader<'_>, size: SizeMode) -> Result<(usize, usize)> {
    let count = r.read_count(size)?;
    Ok((count, count.min(r.remaining())))
}

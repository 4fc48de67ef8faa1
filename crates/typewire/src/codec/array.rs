// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Homogeneous array codecs.

use super::primitive::PrimitiveCodec;
use super::{decode_count, encode_items, Codec, CodecContext};
use crate::error::Result;
use crate::value::{mismatch, Value};
use crate::wire::{SizeMode, WireReader, WireWriter};

/// Array of unboxed primitives. Null elements encode as zero and decoded
/// elements are never null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveArrayCodec {
    pub element: PrimitiveCodec,
    pub count: SizeMode,
}

impl PrimitiveArrayCodec {
    pub fn encode(&self, value: &Value, w: &mut WireWriter, ctx: CodecContext<'_>) -> Result<()> {
        let items = array_items(value, || format!("{}[]", self.element.kind.name()))?;
        encode_items(items, ctx.size(self.count), w, |item, w| {
            self.element.encode(item, w, ctx)
        })
    }

    pub fn decode(&self, r: &mut WireReader<'_>, ctx: CodecContext<'_>) -> Result<Value> {
        let (count, capacity) = decode_count(r, ctx.size(self.count))?;
        let mut items = Vec::with_capacity(capacity);
        for _ in 0..count {
            items.push(self.element.decode(r, ctx)?);
        }
        Ok(Value::Array(items))
    }
}

/// Array of any non-primitive component, including nested arrays and
/// dynamically dispatched objects.
#[derive(Debug, Clone)]
pub struct ArrayCodec {
    pub component: Box<Codec>,
    pub count: SizeMode,
}

impl ArrayCodec {
    pub fn encode(&self, value: &Value, w: &mut WireWriter, ctx: CodecContext<'_>) -> Result<()> {
        let items = array_items(value, || "array".to_string())?;
        encode_items(items, ctx.size(self.count), w, |item, w| {
            self.component.encode(item, w, ctx)
        })
    }

    pub fn decode(&self, r: &mut WireReader<'_>, ctx: CodecContext<'_>) -> Result<Value> {
        let (count, capacity) = decode_count(r, ctx.size(self.count))?;
        let mut items = Vec::with_capacity(capacity);
        for _ in 0..count {
            items.push(self.component.decode(r, ctx)?);
        }
        Ok(Value::Array(items))
    }
}

/// Elements of an array value; null is the empty array.
fn array_items(value: &Value, expected: impl FnOnce() -> String) -> Result<&[Value]> {
    match value {
        Value::Null => Ok(&[]),
        Value::Array(items) => Ok(items),
        other => Err(mismatch(expected(), other)),
    }
}

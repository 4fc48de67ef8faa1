// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Collection codec.

use super::{decode_count, encode_items, Codec, CodecContext};
use crate::error::Result;
use crate::schema::CollectionKind;
use crate::value::{mismatch, CollectionValue, Value};
use crate::wire::{SizeMode, WireReader, WireWriter};

/// Collection encoded in iteration order, decoded into `kind`.
#[derive(Debug, Clone)]
pub struct CollectionCodec {
    pub element: Box<Codec>,
    pub count: SizeMode,
    pub kind: CollectionKind,
    pub unmodifiable: bool,
}

impl CollectionCodec {
    pub fn encode(&self, value: &Value, w: &mut WireWriter, ctx: CodecContext<'_>) -> Result<()> {
        let items: &[Value] = match value {
            Value::Null => &[],
            Value::Collection(c) => c.items(),
            other => return Err(mismatch(format!("Collection<{}>", self.kind.name()), other)),
        };
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
        let mut collection = CollectionValue::from_items(self.kind, items);
        if self.unmodifiable {
            collection = collection.into_unmodifiable();
        }
        Ok(Value::Collection(collection))
    }
}

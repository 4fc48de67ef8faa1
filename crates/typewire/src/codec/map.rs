// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Map codec.

use super::{decode_count, Codec, CodecContext};
use crate::error::Result;
use crate::schema::MapKind;
use crate::value::{mismatch, MapValue, Value, NULL};
use crate::wire::{SizeMode, WireReader, WireWriter};

/// Map as interleaved (key, value) pairs in iteration order.
///
/// `Fixed(n)` writes exactly `n` pairs, padding with null keys and values.
#[derive(Debug, Clone)]
pub struct MapCodec {
    pub key: Box<Codec>,
    pub value: Box<Codec>,
    pub count: SizeMode,
    pub kind: MapKind,
    pub unmodifiable: bool,
}

impl MapCodec {
    pub fn encode(&self, value: &Value, w: &mut WireWriter, ctx: CodecContext<'_>) -> Result<()> {
        let entries: &[(Value, Value)] = match value {
            Value::Null => &[],
            Value::Map(m) => m.entries(),
            other => return Err(mismatch(format!("Map<{}>", self.kind.name()), other)),
        };
        let count = match ctx.size(self.count) {
            SizeMode::Variable => {
                w.write_length(entries.len());
                entries.len()
            }
            SizeMode::Fixed(n) => n,
        };
        for idx in 0..count {
            let (k, v) = entries.get(idx).map_or((&NULL, &NULL), |(k, v)| (k, v));
            self.key.encode(k, w, ctx)?;
            self.value.encode(v, w, ctx)?;
        }
        Ok(())
    }

    pub fn decode(&self, r: &mut WireReader<'_>, ctx: CodecContext<'_>) -> Result<Value> {
        let (count, capacity) = decode_count(r, ctx.size(self.count))?;
        let mut entries = Vec::with_capacity(capacity);
        for _ in 0..count {
            let key = self.key.decode(r, ctx)?;
            let value = self.value.decode(r, ctx)?;
            entries.push((key, value));
        }
        let mut map = MapValue::from_entries(self.kind, entries);
        if self.unmodifiable {
            map = map.into_unmodifiable();
        }
        Ok(Value::Map(map))
    }
}

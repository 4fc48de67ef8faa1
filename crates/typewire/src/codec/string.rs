// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! String codec (charset bytes or UTF-16 char buffer).

use super::CodecContext;
use crate::error::Result;
use crate::value::{mismatch, Value};
use crate::wire::{Charset, SizeMode, WireReader, WireWriter};

/// String as a sized byte buffer in `charset`, or as UTF-16 code units when
/// `as_chars` is set (charset then unused).
///
/// Null encodes as the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringCodec {
    pub charset: Charset,
    pub size: SizeMode,
    pub as_chars: bool,
}

impl StringCodec {
    pub fn new(charset: Charset, size: SizeMode, as_chars: bool) -> Self {
        Self {
            charset,
            size,
            as_chars,
        }
    }

    pub fn encode(&self, value: &Value, w: &mut WireWriter, ctx: CodecContext<'_>) -> Result<()> {
        let text = match value {
            Value::Null => "",
            Value::String(s) => s.as_str(),
            other => return Err(mismatch("String", other)),
        };
        self.write_text(text, w, ctx);
        Ok(())
    }

    pub(crate) fn write_text(&self, text: &str, w: &mut WireWriter, ctx: CodecContext<'_>) {
        let size = ctx.size(self.size);
        if self.as_chars {
            let units: Vec<u16> = text.encode_utf16().collect();
            w.write_char_units(&units, size);
        } else {
            w.write_string(text, self.charset, size);
        }
    }

    pub fn decode(&self, r: &mut WireReader<'_>, ctx: CodecContext<'_>) -> Result<Value> {
        Ok(Value::String(self.read_text(r, ctx)?))
    }

    pub(crate) fn read_text(&self, r: &mut WireReader<'_>, ctx: CodecContext<'_>) -> Result<String> {
        let size = ctx.size(self.size);
        if self.as_chars {
            let mut units = r.read_char_units(size)?;
            if let SizeMode::Fixed(_) = size {
                if let Some(end) = units.iter().position(|&u| u == 0) {
                    units.truncate(end);
                }
            }
            Ok(String::from_utf16_lossy(&units))
        } else {
            r.read_string(self.charset, size)
        }
    }
}

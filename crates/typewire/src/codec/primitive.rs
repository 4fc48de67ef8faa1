// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive and boxed-primitive codec.

use super::CodecContext;
use crate::error::Result;
use crate::schema::PrimitiveKind;
use crate::value::{mismatch, Value};
use crate::wire::{SizeMode, WireReader, WireWriter};

/// Single primitive value, fixed-width or varint.
///
/// Null encodes as zero. Boolean, byte, short and char have no varint form
/// and ignore the size mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveCodec {
    pub kind: PrimitiveKind,
    pub size: SizeMode,
    pub boxed: bool,
}

impl PrimitiveCodec {
    pub fn new(kind: PrimitiveKind, size: SizeMode, boxed: bool) -> Self {
        Self { kind, size, boxed }
    }

    fn variable(&self, ctx: CodecContext<'_>) -> bool {
        self.kind.has_variable_form() && ctx.size(self.size).is_variable()
    }

    pub fn encode(&self, value: &Value, w: &mut WireWriter, ctx: CodecContext<'_>) -> Result<()> {
        let zero;
        let value = if value.is_null() {
            zero = self.kind.zero();
            &zero
        } else {
            value
        };
        let variable = self.variable(ctx);
        match (self.kind, value) {
            (PrimitiveKind::Boolean, Value::Bool(v)) => w.write_bool(*v),
            (PrimitiveKind::Byte, Value::Byte(v)) => w.write_i8(*v),
            (PrimitiveKind::Short, Value::Short(v)) => w.write_i16_le(*v),
            (PrimitiveKind::Char, Value::Char(v)) => w.write_u16_le(*v),
            (PrimitiveKind::Int, Value::Int(v)) if variable => w.write_var_i32(*v),
            (PrimitiveKind::Int, Value::Int(v)) => w.write_i32_le(*v),
            (PrimitiveKind::Long, Value::Long(v)) if variable => w.write_var_i64(*v),
            (PrimitiveKind::Long, Value::Long(v)) => w.write_i64_le(*v),
            (PrimitiveKind::Float, Value::Float(v)) if variable => w.write_var_f32(*v),
            (PrimitiveKind::Float, Value::Float(v)) => w.write_f32_le(*v),
            (PrimitiveKind::Double, Value::Double(v)) if variable => w.write_var_f64(*v),
            (PrimitiveKind::Double, Value::Double(v)) => w.write_f64_le(*v),
            (kind, other) => {
                let expected = if self.boxed {
                    kind.boxed_name()
                } else {
                    kind.name()
                };
                return Err(mismatch(expected, other));
            }
        }
        Ok(())
    }

    pub fn decode(&self, r: &mut WireReader<'_>, ctx: CodecContext<'_>) -> Result<Value> {
        let variable = self.variable(ctx);
        let value = match self.kind {
            PrimitiveKind::Boolean => Value::Bool(r.read_bool()?),
            PrimitiveKind::Byte => Value::Byte(r.read_i8()?),
            PrimitiveKind::Short => Value::Short(r.read_i16_le()?),
            PrimitiveKind::Char => Value::Char(r.read_u16_le()?),
            PrimitiveKind::Int if variable => Value::Int(r.read_var_i32()?),
            PrimitiveKind::Int => Value::Int(r.read_i32_le()?),
            PrimitiveKind::Long if variable => Value::Long(r.read_var_i64()?),
            PrimitiveKind::Long => Value::Long(r.read_i64_le()?),
            PrimitiveKind::Float if variable => Value::Float(r.read_var_f32()?),
            PrimitiveKind::Float => Value::Float(r.read_f32_le()?),
            PrimitiveKind::Double if variable => Value::Double(r.read_var_f64()?),
            PrimitiveKind::Double => Value::Double(r.read_f64_le()?),
        };
        Ok(value)
    }
}

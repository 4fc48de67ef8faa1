// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enum codec (ordinal or constant name).

use super::string::StringCodec;
use super::CodecContext;
use crate::error::{Error, Result};
use crate::schema::{EnumRepr, EnumSchema};
use crate::value::{mismatch, Value};
use crate::wire::{SizeMode, WireReader, WireWriter};
use std::sync::Arc;

/// Enum constant as its ordinal or its name.
///
/// Null encodes as ordinal 0 or the empty name. An empty name decodes to
/// null when the null policy holds and is an unknown constant otherwise.
#[derive(Debug, Clone)]
pub struct EnumCodec {
    pub schema: Arc<EnumSchema>,
    pub repr: EnumRepr,
    pub size: SizeMode,
    /// Codec for the constant name under [`EnumRepr::Name`].
    pub text: StringCodec,
    pub null_is_empty: bool,
}

impl EnumCodec {
    pub fn encode(&self, value: &Value, w: &mut WireWriter, ctx: CodecContext<'_>) -> Result<()> {
        let constant = match value {
            Value::Null => None,
            Value::Enum(name) => Some(name.as_str()),
            other => return Err(mismatch(self.schema.name.clone(), other)),
        };
        match self.repr {
            EnumRepr::Ordinal => {
                let ordinal = match constant {
                    None => 0,
                    Some(name) => self.ordinal_of(name)?,
                };
                if ctx.size(self.size).is_variable() {
                    w.write_var_i32(ordinal);
                } else {
                    w.write_i32_le(ordinal);
                }
            }
            EnumRepr::Name => {
                if let Some(name) = constant {
                    self.ordinal_of(name)?;
                }
                self.text.write_text(constant.unwrap_or_default(), w, ctx);
            }
        }
        Ok(())
    }

    pub fn decode(&self, r: &mut WireReader<'_>, ctx: CodecContext<'_>) -> Result<Value> {
        match self.repr {
            EnumRepr::Ordinal => {
                let ordinal = if ctx.size(self.size).is_variable() {
                    r.read_var_i32()?
                } else {
                    r.read_i32_le()?
                };
                let constant = usize::try_from(ordinal)
                    .ok()
                    .and_then(|idx| self.schema.constant(idx))
                    .ok_or_else(|| Error::InvalidEnumOrdinal {
                        enum_name: self.schema.name.clone(),
                        ordinal,
                    })?;
                Ok(Value::Enum(constant.to_string()))
            }
            EnumRepr::Name => {
                let name = self.text.read_text(r, ctx)?;
                if name.is_empty() && (self.null_is_empty || ctx.features.force_zero_or_empty_as_null()) {
                    return Ok(Value::Null);
                }
                self.ordinal_of(&name)?;
                Ok(Value::Enum(name))
            }
        }
    }

    fn ordinal_of(&self, name: &str) -> Result<i32> {
        self.schema
            .ordinal_of(name)
            .map(|idx| idx as i32)
            .ok_or_else(|| Error::UnknownEnumConstant {
                enum_name: self.schema.name.clone(),
                constant: name.to_string(),
            })
    }
}

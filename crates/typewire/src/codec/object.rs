// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Object codecs: the per-type field sequence and the envelope around it.
//!
//! # Envelope
//!
//! ```text
//! +----------------+----------------+----------------------------+
//! | identifier u32 | version u32    | fields, in schema order    |
//! | (LE)           | (LE, always 0) |                            |
//! +----------------+----------------+----------------------------+
//! ```
//!
//! Present when `(include_header || ForceHeaders) && !SkipHeaders`, and always
//! at dynamic positions. A null object at an enveloped position is written as
//! identifier 0 with no fields.
//!
//! A null at a headerless position is written as an all-default instance. A
//! type whose default instance would contain itself again (through concrete
//! fields or fixed-count containers) is therefore enveloped at every concrete
//! position, like a dynamic one.

use super::accessor::Assembly;
use super::{resolve, Codec, CodecContext, ResolveDefaults};
use crate::config::{ENVELOPE_VERSION, NULL_IDENTIFIER};
use crate::error::{Error, Result};
use crate::registry::IdentityRegistry;
use crate::schema::TypeSchema;
use crate::value::{mismatch, Value};
use crate::wire::{SizeMode, WireReader, WireWriter};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

#[derive(Debug)]
struct FieldSlot {
    name: String,
    codec: Codec,
    /// Decoded zero/empty may become null (false for unboxed primitives and
    /// concrete objects).
    nullable: bool,
    null_policy: bool,
}

/// Codec for one registered type.
#[derive(Debug)]
pub struct ObjectCodec {
    schema: Arc<TypeSchema>,
    identifier: u32,
    fields: Vec<FieldSlot>,
    assembly: Assembly,
    /// Concrete types a default instance of this type contains.
    default_refs: Vec<String>,
    self_referencing: OnceLock<bool>,
}

impl ObjectCodec {
    /// Resolve every field shape and validate accessors.
    ///
    /// All schema errors surface here, never at encode/decode time.
    pub fn build(schema: TypeSchema) -> Result<Self> {
        let defaults = ResolveDefaults::from_schema(&schema);
        let assembly = Assembly::for_schema(&schema)?;

        let mut fields: Vec<FieldSlot> = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            if fields.iter().any(|slot| slot.name == field.name) {
                return Err(Error::UnsupportedShape(format!(
                    "{}: duplicate field {}",
                    schema.name, field.name
                )));
            }
            let codec = resolve(&field.shape, &defaults).map_err(|e| match e {
                Error::UnsupportedShape(msg) => {
                    Error::UnsupportedShape(format!("{}.{}: {}", schema.name, field.name, msg))
                }
                other => other,
            })?;
            fields.push(FieldSlot {
                name: field.name.clone(),
                codec,
                nullable: field.shape.kind.is_nullable(),
                null_policy: field
                    .shape
                    .null_is_zero_or_empty
                    .unwrap_or(schema.null_is_zero_or_empty),
            });
        }

        let mut default_refs = Vec::new();
        for slot in &fields {
            collect_default_refs(&slot.codec, &mut default_refs);
        }

        Ok(Self {
            identifier: schema.identifier(),
            schema: Arc::new(schema),
            fields,
            assembly,
            default_refs,
            self_referencing: OnceLock::new(),
        })
    }

    /// Whether a default instance of this type reaches this type again.
    ///
    /// Computed on first use, once every referenced type can be resolved.
    pub fn is_self_referencing(&self, registry: &IdentityRegistry) -> Result<bool> {
        if let Some(&found) = self.self_referencing.get() {
            return Ok(found);
        }
        let mut pending = self.default_refs.clone();
        let mut seen = HashSet::new();
        let mut found = false;
        while let Some(name) = pending.pop() {
            if name == self.schema.name {
                found = true;
                break;
            }
            if seen.insert(name.clone()) {
                let codec = registry.codec_for_type(&name)?;
                pending.extend(codec.default_refs.iter().cloned());
            }
        }
        if found {
            log::debug!(
                "[object] {} is self-referencing, enveloped at concrete positions",
                self.schema.name
            );
        }
        Ok(*self.self_referencing.get_or_init(|| found))
    }

    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    pub fn type_name(&self) -> &str {
        &self.schema.name
    }

    pub fn identifier(&self) -> u32 {
        self.identifier
    }

    /// Encode `value` (an object of this type, or null).
    ///
    /// `forced` marks a dynamic position: the envelope is written regardless
    /// of schema and context.
    pub fn encode(
        &self,
        value: &Value,
        w: &mut WireWriter,
        ctx: CodecContext<'_>,
        forced: bool,
    ) -> Result<()> {
        let ctx = ctx.nested()?;
        let envelope = ctx
            .features
            .envelope_required(self.schema.include_header, forced);
        let object = match value {
            Value::Null if envelope => {
                w.write_envelope(NULL_IDENTIFIER);
                return Ok(());
            }
            Value::Null => None,
            Value::Object(object) if object.type_name() == self.schema.name => Some(object),
            Value::Object(object) => {
                return Err(Error::ValueMismatch {
                    expected: self.schema.name.clone(),
                    found: object.type_name().to_string(),
                })
            }
            other => return Err(mismatch(self.schema.name.clone(), other)),
        };

        if envelope {
            log::trace!(
                "[object] {} envelope 0x{:08x}",
                self.schema.name,
                self.identifier
            );
            w.write_envelope(self.identifier);
        }
        for slot in &self.fields {
            let field = object.map_or(&crate::value::NULL, |o| o.field(&slot.name));
            slot.codec.encode(field, w, ctx)?;
        }
        Ok(())
    }

    /// Decode an object of this type (or null, from a null envelope).
    pub fn decode(
        &self,
        r: &mut WireReader<'_>,
        ctx: CodecContext<'_>,
        forced: bool,
    ) -> Result<Value> {
        if ctx
            .features
            .envelope_required(self.schema.include_header, forced)
        {
            let (identifier, version) = r.read_envelope()?;
            if identifier != NULL_IDENTIFIER && identifier != self.identifier {
                return Err(Error::InvalidObjectIdentifier {
                    expected: self.identifier,
                    found: identifier,
                });
            }
            check_version(version)?;
            if identifier == NULL_IDENTIFIER {
                return Ok(Value::Null);
            }
        }
        self.decode_fields(r, ctx)
    }

    fn decode_fields(&self, r: &mut WireReader<'_>, ctx: CodecContext<'_>) -> Result<Value> {
        let ctx = ctx.nested()?;
        let force_null = ctx.features.force_zero_or_empty_as_null();
        let mut assembler = self.assembly.begin(&self.schema.name);
        for (index, slot) in self.fields.iter().enumerate() {
            let mut value = slot.codec.decode(r, ctx)?;
            if slot.nullable && (slot.null_policy || force_null) && value.is_zero_or_empty() {
                value = Value::Null;
            }
            assembler.accept(index, &slot.name, value);
        }
        Ok(Value::Object(Box::new(assembler.finish())))
    }
}

/// Concrete object types reached by filling `codec` with nulls.
fn collect_default_refs(codec: &Codec, out: &mut Vec<String>) {
    match codec {
        Codec::Object(ObjectRefCodec::Concrete(name)) => out.push(name.clone()),
        Codec::Array(array) if matches!(array.count, SizeMode::Fixed(_)) => {
            collect_default_refs(&array.component, out)
        }
        Codec::Collection(collection) if matches!(collection.count, SizeMode::Fixed(_)) => {
            collect_default_refs(&collection.element, out)
        }
        Codec::Map(map) if matches!(map.count, SizeMode::Fixed(_)) => {
            collect_default_refs(&map.key, out);
            collect_default_refs(&map.value, out);
        }
        _ => {}
    }
}

fn check_version(version: u32) -> Result<()> {
    if version != ENVELOPE_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(())
}

/// Decode an enveloped object of any registered type.
pub(crate) fn decode_polymorphic(r: &mut WireReader<'_>, ctx: CodecContext<'_>) -> Result<Value> {
    let (identifier, version) = r.read_envelope()?;
    if identifier == NULL_IDENTIFIER {
        check_version(version)?;
        return Ok(Value::Null);
    }
    let codec = ctx.registry.codec_for_identifier(identifier)?;
    check_version(version)?;
    log::trace!(
        "[object] dispatch 0x{:08x} -> {}",
        identifier,
        codec.type_name()
    );
    codec.decode_fields(r, ctx)
}

/// Object-typed position inside a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectRefCodec {
    /// Static type known; envelope only if configured.
    Concrete(String),
    /// Static type unknown; always enveloped, dispatched by identifier.
    Dynamic,
}

impl ObjectRefCodec {
    pub fn encode(&self, value: &Value, w: &mut WireWriter, ctx: CodecContext<'_>) -> Result<()> {
        match self {
            ObjectRefCodec::Concrete(name) => {
                let codec = ctx.registry.codec_for_type(name)?;
                let forced = codec.is_self_referencing(ctx.registry)?;
                codec.encode(value, w, ctx, forced)
            }
            ObjectRefCodec::Dynamic => match value {
                Value::Null => {
                    w.write_envelope(NULL_IDENTIFIER);
                    Ok(())
                }
                Value::Object(object) => ctx
                    .registry
                    .codec_for_type(object.type_name())?
                    .encode(value, w, ctx, true),
                other => Err(mismatch("Object", other)),
            },
        }
    }

    pub fn decode(&self, r: &mut WireReader<'_>, ctx: CodecContext<'_>) -> Result<Value> {
        match self {
            ObjectRefCodec::Concrete(name) => {
                let codec = ctx.registry.codec_for_type(name)?;
                let forced = codec.is_self_referencing(ctx.registry)?;
                codec.decode(r, ctx, forced)
            }
            ObjectRefCodec::Dynamic => decode_polymorphic(r, ctx),
        }
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Identity registry: type name and envelope identifier to object codec.
//!
//! # Architecture
//!
//! ```text
//! register_schema(TypeSchema) ──> ObjectCodec::build ──┬──> by_identifier (u32)
//!                                  (eager validation)  └──> by_name (String)
//!
//! codec_for_type(name)   ── hit ──> Arc<ObjectCodec>
//!                        ── miss ─> SchemaSource chain ──> build ──> publish winner
//! codec_for_identifier(id) ── miss ─> UnknownObjectIdentifier
//! ```
//!
//! Both caches are lock-free on the read path (`DashMap`). Two threads missing
//! the same type may both build a codec; only one is published and both
//! callers get that one.

use crate::codec::{decode_polymorphic, CodecContext, ObjectCodec};
use crate::config::{ENVELOPE_LEN, NULL_IDENTIFIER};
use crate::error::{Error, Result};
use crate::feature::FeatureContext;
use crate::record::Record;
use crate::schema::TypeSchema;
use crate::value::{mismatch, Value};
use crate::wire::{WireReader, WireWriter};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::{Arc, OnceLock};

static GLOBAL_REGISTRY: OnceLock<IdentityRegistry> = OnceLock::new();

/// Lazy look-up of schemas not registered up front.
///
/// Consulted in installation order when a type name misses the cache.
pub trait SchemaSource: Send + Sync {
    fn find_schema(&self, type_name: &str) -> Option<TypeSchema>;
}

/// Registry of object codecs, keyed by type name and by identifier.
///
/// # Example
///
/// ```rust
/// use typewire::{FeatureContext, IdentityRegistry, ObjectValue, TypeSchemaBuilder, ValueShape};
///
/// let registry = IdentityRegistry::new();
/// registry
///     .register_schema(
///         TypeSchemaBuilder::new("demo.Point")
///             .field("x", ValueShape::int())
///             .field("y", ValueShape::int())
///             .build(),
///     )
///     .unwrap();
///
/// let point = ObjectValue::new("demo.Point").with("x", 3).with("y", 4);
/// let bytes = registry
///     .serialize("demo.Point", &point.clone().into(), FeatureContext::new())
///     .unwrap();
/// assert_eq!(bytes, [0x03, 0x04]);
///
/// let decoded = registry
///     .deserialize(Some("demo.Point"), &bytes, FeatureContext::new())
///     .unwrap();
/// assert_eq!(decoded, point.into());
/// ```
pub struct IdentityRegistry {
    by_name: DashMap<String, Arc<ObjectCodec>>,
    by_identifier: DashMap<u32, Arc<ObjectCodec>>,
    sources: RwLock<Vec<Arc<dyn SchemaSource>>>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self {
            by_name: DashMap::new(),
            by_identifier: DashMap::new(),
            sources: RwLock::new(Vec::new()),
        }
    }

    /// Process-wide registry used by the crate-level free functions.
    pub fn global() -> &'static IdentityRegistry {
        GLOBAL_REGISTRY.get_or_init(IdentityRegistry::new)
    }

    /// Validate `schema`, build its codec and bind it to its name and identifier.
    ///
    /// Re-registering a type name replaces its codec. Returns the identifier.
    ///
    /// # Errors
    ///
    /// Every schema-build error: `UnsupportedShape`, `InvalidImplementationHint`,
    /// `UnsupportedCharset`, `NoAccessibleAccessor`, and `DuplicateIdentifier`
    /// when the identifier is already bound to another type (or is 0).
    pub fn register_schema(&self, schema: TypeSchema) -> Result<u32> {
        let codec = Arc::new(ObjectCodec::build(schema)?);
        let codec = self.publish(codec, true)?;
        log::debug!(
            "[registry] registered {} as 0x{:08x}",
            codec.type_name(),
            codec.identifier()
        );
        Ok(codec.identifier())
    }

    /// Register several schemas, all or nothing.
    ///
    /// Every codec is built and every identifier checked before the first one
    /// is published, so a schema error leaves the registry untouched.
    pub fn register_schemas(
        &self,
        schemas: impl IntoIterator<Item = TypeSchema>,
    ) -> Result<Vec<u32>> {
        let codecs = schemas
            .into_iter()
            .map(|schema| ObjectCodec::build(schema).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        let mut claimed: HashMap<u32, &str> = HashMap::new();
        for codec in &codecs {
            let identifier = codec.identifier();
            let existing = match claimed.get(&identifier) {
                Some(name) => Some(name.to_string()),
                None => self
                    .by_identifier
                    .get(&identifier)
                    .map(|bound| bound.type_name().to_string()),
            };
            if identifier == NULL_IDENTIFIER {
                return Err(Error::DuplicateIdentifier {
                    identifier,
                    existing: "null object marker".to_string(),
                    incoming: codec.type_name().to_string(),
                });
            }
            if let Some(existing) = existing.filter(|name| name != codec.type_name()) {
                return Err(Error::DuplicateIdentifier {
                    identifier,
                    existing,
                    incoming: codec.type_name().to_string(),
                });
            }
            claimed.insert(identifier, codec.type_name());
        }

        let mut identifiers = Vec::with_capacity(codecs.len());
        for codec in codecs {
            identifiers.push(self.publish(codec, true)?.identifier());
        }
        log::debug!("[registry] registered {} schemas", identifiers.len());
        Ok(identifiers)
    }

    /// Register the schema of a typed record.
    pub fn register_record<T: Record>(&self) -> Result<u32> {
        self.register_schema(T::type_schema())
    }

    /// Install a lazy schema source.
    pub fn add_source(&self, source: Arc<dyn SchemaSource>) {
        self.sources.write().push(source);
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        self.by_name.contains_key(type_name)
    }

    /// Number of published codecs.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Codec for `type_name`, resolving it through the schema sources on miss.
    pub fn codec_for_type(&self, type_name: &str) -> Result<Arc<ObjectCodec>> {
        if let Some(codec) = self.by_name.get(type_name) {
            return Ok(codec.clone());
        }

        let schema = self
            .sources
            .read()
            .iter()
            .find_map(|source| source.find_schema(type_name))
            .ok_or_else(|| Error::UnregisteredType(type_name.to_string()))?;
        if schema.name != type_name {
            return Err(Error::UnsupportedShape(format!(
                "schema source answered {} with {}",
                type_name, schema.name
            )));
        }

        let codec = self.publish(Arc::new(ObjectCodec::build(schema)?), false)?;
        log::debug!(
            "[registry] resolved {} on demand as 0x{:08x}",
            codec.type_name(),
            codec.identifier()
        );
        Ok(codec)
    }

    /// Codec bound to an envelope identifier.
    ///
    /// Never resolves lazily: a bare identifier does not name a schema.
    pub fn codec_for_identifier(&self, identifier: u32) -> Result<Arc<ObjectCodec>> {
        self.by_identifier
            .get(&identifier)
            .map(|codec| codec.clone())
            .ok_or(Error::UnknownObjectIdentifier(identifier))
    }

    /// Codec of a typed record, registering its schema on first use.
    fn codec_for_record<T: Record>(&self) -> Result<Arc<ObjectCodec>> {
        match self.codec_for_type(T::TYPE_NAME) {
            Err(Error::UnregisteredType(_)) => {
                let codec = Arc::new(ObjectCodec::build(T::type_schema())?);
                self.publish(codec, false)
            }
            other => other,
        }
    }

    /// Bind `codec` under its identifier and name.
    ///
    /// With `replace` unset an already-published codec for the same type wins
    /// and is returned instead.
    fn publish(&self, codec: Arc<ObjectCodec>, replace: bool) -> Result<Arc<ObjectCodec>> {
        let identifier = codec.identifier();
        let name = codec.type_name().to_string();
        if identifier == NULL_IDENTIFIER {
            return Err(Error::DuplicateIdentifier {
                identifier,
                existing: "null object marker".to_string(),
                incoming: name,
            });
        }

        let winner = match self.by_identifier.entry(identifier) {
            Entry::Occupied(mut slot) => {
                if slot.get().type_name() != name {
                    return Err(Error::DuplicateIdentifier {
                        identifier,
                        existing: slot.get().type_name().to_string(),
                        incoming: name,
                    });
                }
                if replace {
                    slot.insert(codec.clone());
                    codec
                } else {
                    slot.get().clone()
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(codec.clone());
                codec
            }
        };

        if let Some(previous) = self.by_name.insert(name.clone(), winner.clone()) {
            if previous.identifier() != identifier {
                self.by_identifier
                    .remove_if(&previous.identifier(), |_, c| c.type_name() == name);
            }
        }
        Ok(winner)
    }

    // ========================================================================
    // Serialization entry points
    // ========================================================================

    /// Serialize `value` as an instance of `type_name`.
    pub fn serialize(
        &self,
        type_name: &str,
        value: &Value,
        features: FeatureContext,
    ) -> Result<Vec<u8>> {
        let codec = self.codec_for_type(type_name)?;
        let mut writer = WireWriter::new();
        codec.encode(value, &mut writer, CodecContext::new(self, features), false)?;
        Ok(writer.into_bytes())
    }

    /// Deserialize an instance of `type_name`, or of whatever type the
    /// envelope names when `type_name` is `None`.
    ///
    /// Without a type name the stream must start with an envelope.
    pub fn deserialize(
        &self,
        type_name: Option<&str>,
        bytes: &[u8],
        features: FeatureContext,
    ) -> Result<Value> {
        let mut reader = WireReader::new(bytes);
        let ctx = CodecContext::new(self, features);
        match type_name {
            Some(name) => self.codec_for_type(name)?.decode(&mut reader, ctx, false),
            None => decode_polymorphic(&mut reader, ctx),
        }
    }

    /// [`serialize`](Self::serialize) into an `io::Write`.
    pub fn serialize_to<W: Write>(
        &self,
        type_name: &str,
        value: &Value,
        features: FeatureContext,
        out: &mut W,
    ) -> Result<()> {
        let bytes = self.serialize(type_name, value, features)?;
        out.write_all(&bytes)?;
        Ok(())
    }

    /// [`deserialize`](Self::deserialize) the whole of an `io::Read`.
    pub fn deserialize_from<R: Read>(
        &self,
        type_name: Option<&str>,
        input: &mut R,
        features: FeatureContext,
    ) -> Result<Value> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        self.deserialize(type_name, &bytes, features)
    }

    /// Serialize a typed record.
    pub fn serialize_record<T: Record>(&self, record: &T, features: FeatureContext) -> Result<Vec<u8>> {
        let codec = self.codec_for_record::<T>()?;
        let value = Value::Object(Box::new(record.to_object()));
        let mut writer = WireWriter::new();
        codec.encode(&value, &mut writer, CodecContext::new(self, features), false)?;
        Ok(writer.into_bytes())
    }

    /// Deserialize a typed record; a null envelope yields `None`.
    pub fn deserialize_record<T: Record>(
        &self,
        bytes: &[u8],
        features: FeatureContext,
    ) -> Result<Option<T>> {
        let codec = self.codec_for_record::<T>()?;
        let mut reader = WireReader::new(bytes);
        match codec.decode(&mut reader, CodecContext::new(self, features), false)? {
            Value::Object(object) => T::from_object(*object).map(Some),
            Value::Null => Ok(None),
            other => Err(mismatch(T::TYPE_NAME, &other)),
        }
    }

    /// Encoded form of a null object at a polymorphic position.
    pub fn null_envelope() -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(ENVELOPE_LEN);
        writer.write_envelope(NULL_IDENTIFIER);
        writer.into_bytes()
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdentityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityRegistry")
            .field("types", &self.by_name.len())
            .field("sources", &self.sources.read().len())
            .finish()
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # typewire - schema-driven binary serialization
//!
//! Converts object graphs to and from a compact byte stream, driven by a
//! per-type schema: ordered fields, each with a declared shape and encoding
//! options (size mode, charset, null policy, implementation hint).
//!
//! ## Quick Start
//!
//! ```rust
//! use typewire::{FeatureContext, IdentityRegistry, ObjectValue, TypeSchemaBuilder, ValueShape};
//!
//! let registry = IdentityRegistry::new();
//! registry.register_schema(
//!     TypeSchemaBuilder::new("demo.Sample")
//!         .field("names", ValueShape::array_of(ValueShape::string()))
//!         .field("scores", ValueShape::array_of(ValueShape::int()))
//!         .build(),
//! )?;
//!
//! let sample = ObjectValue::new("demo.Sample")
//!     .with("names", vec!["A", "BB"])
//!     .with("scores", vec![1, 300]);
//! let bytes = registry.serialize("demo.Sample", &sample.into(), FeatureContext::new())?;
//! assert_eq!(bytes, [0x02, 0x01, 0x41, 0x02, 0x42, 0x42, 0x02, 0x01, 0xAC, 0x02]);
//! # Ok::<(), typewire::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |  IdentityRegistry   type name / identifier -> ObjectCodec           |
//! |                     eager registration, lazy SchemaSource look-up   |
//! +---------------------------------------------------------------------+
//! |  Codecs             resolve(ValueShape) -> Codec, once per field     |
//! |                     primitive | string | array | collection | map    |
//! |                     enum | object (envelope, accessor assembly)     |
//! +---------------------------------------------------------------------+
//! |  Wire               WireWriter / WireReader: LE fixed widths,        |
//! |                     LEB128 varints, sized buffers, charsets         |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeSchema`] | Ordered fields plus type-level policies |
//! | [`ValueShape`] | Declared shape of a field and its encoding options |
//! | [`Value`] | Dynamic object graph being encoded or decoded |
//! | [`IdentityRegistry`] | Codec cache and serialize/deserialize entry points |
//! | [`FeatureContext`] | Per-call overrides (headers, sizing, null policy) |
//! | [`Record`] | Typed struct bound to a schema |
//!
//! ## Wire format
//!
//! - Fixed widths are little-endian.
//! - Varints are base-128, low group first, without zigzag: negative values
//!   take the full width (5 bytes for an int, 10 for a long).
//! - Variable buffers carry a varint count; `Fixed(n)` buffers carry exactly
//!   `n` units, truncated or zero-padded, and no count.
//! - The optional envelope is a 4-byte LE identifier (FNV-1a of the type
//!   name over UTF-16 units) and a 4-byte LE version, always 0.

pub mod codec;
/// Wire constants and schema defaults.
pub mod config;
mod error;
mod feature;
mod identity;
/// Schema document loaders (YAML).
#[cfg(feature = "schema-loaders")]
pub mod loaders;
mod record;
mod registry;
pub mod schema;
/// Dynamic values (objects, containers, scalars).
pub mod value;
pub mod wire;

pub use codec::{resolve, Codec, CodecContext, ObjectCodec};
pub use config::SchemaDefaults;
pub use error::{Error, Result};
pub use feature::{Feature, FeatureContext};
pub use identity::{identifier_for, resolve_identifier};
pub use record::Record;
pub use registry::{IdentityRegistry, SchemaSource};
pub use schema::{
    AccessorStrategy, CollectionKind, EnumRepr, EnumSchema, FieldAccess, FieldDescriptor,
    MapKind, ObjectRef, PrimitiveKind, ShapeKind, TypeSchema, TypeSchemaBuilder, ValueShape,
};
pub use value::{CollectionValue, FromValue, MapValue, ObjectValue, Value};
pub use wire::{Charset, SizeMode, WireReader, WireWriter};

/// Register a schema with the global registry.
pub fn register_schema(schema: TypeSchema) -> Result<u32> {
    IdentityRegistry::global().register_schema(schema)
}

/// Serialize with the global registry.
pub fn serialize(type_name: &str, value: &Value, features: FeatureContext) -> Result<Vec<u8>> {
    IdentityRegistry::global().serialize(type_name, value, features)
}

/// Deserialize with the global registry. `None` dispatches on the envelope.
pub fn deserialize(type_name: Option<&str>, bytes: &[u8], features: FeatureContext) -> Result<Value> {
    IdentityRegistry::global().deserialize(type_name, bytes, features)
}

/// Enable or disable a feature on a context.
pub fn set_feature(ctx: &mut FeatureContext, feature: Feature, enabled: bool) -> Result<()> {
    ctx.set_feature(feature, enabled)
}

pub fn is_feature_enabled(ctx: &FeatureContext, feature: Feature) -> bool {
    ctx.is_feature_enabled(feature)
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_registry_round_trip() {
        register_schema(
            TypeSchemaBuilder::new("lib.tests.Flag")
                .field("on", ValueShape::boolean())
                .build(),
        )
        .unwrap();
        let value: Value = ObjectValue::new("lib.tests.Flag").with("on", true).into();
        let bytes = serialize("lib.tests.Flag", &value, FeatureContext::new()).unwrap();
        assert_eq!(bytes, [0x01]);
        assert_eq!(
            deserialize(Some("lib.tests.Flag"), &bytes, FeatureContext::new()).unwrap(),
            value
        );
    }

    #[test]
    fn test_feature_free_functions() {
        let mut ctx = FeatureContext::new();
        set_feature(&mut ctx, Feature::SkipHeaders, true).unwrap();
        assert!(is_feature_enabled(&ctx, Feature::SkipHeaders));
        assert!(set_feature(&mut ctx, Feature::ForceHeaders, true).is_err());
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed records: Rust structs bound to a [`TypeSchema`].
//!
//! A record converts to and from the dynamic [`ObjectValue`] model; the
//! registry does the encoding. Field names in `to_object`/`from_object` must
//! match the schema.
//!
//! # Example
//!
//! ```rust
//! use typewire::{FeatureContext, IdentityRegistry, ObjectValue, Record, Result};
//! use typewire::{TypeSchema, TypeSchemaBuilder, ValueShape};
//!
//! #[derive(Debug, PartialEq)]
//! struct Temperature {
//!     sensor: String,
//!     celsius: f64,
//! }
//!
//! impl Record for Temperature {
//!     const TYPE_NAME: &'static str = "demo.Temperature";
//!
//!     fn type_schema() -> TypeSchema {
//!         TypeSchemaBuilder::new(Self::TYPE_NAME)
//!             .field("sensor", ValueShape::string())
//!             .field("celsius", ValueShape::double())
//!             .build()
//!     }
//!
//!     fn to_object(&self) -> ObjectValue {
//!         ObjectValue::new(Self::TYPE_NAME)
//!             .with("sensor", self.sensor.as_str())
//!             .with("celsius", self.celsius)
//!     }
//!
//!     fn from_object(mut object: ObjectValue) -> Result<Self> {
//!         Ok(Self {
//!             sensor: object.take_as("sensor")?,
//!             celsius: object.take_as("celsius")?,
//!         })
//!     }
//! }
//!
//! let registry = IdentityRegistry::new();
//! let reading = Temperature { sensor: "t1".into(), celsius: 21.5 };
//! let bytes = registry.serialize_record(&reading, FeatureContext::new()).unwrap();
//! let back: Option<Temperature> = registry.deserialize_record(&bytes, FeatureContext::new()).unwrap();
//! assert_eq!(back, Some(reading));
//! ```

use crate::error::Result;
use crate::schema::TypeSchema;
use crate::value::ObjectValue;

/// Struct with a fixed schema.
///
/// The registry registers [`type_schema`](Record::type_schema) on first use
/// when the type is not already known.
pub trait Record: Sized {
    /// Fully qualified type name; must equal `type_schema().name`.
    const TYPE_NAME: &'static str;

    fn type_schema() -> TypeSchema;

    fn to_object(&self) -> ObjectValue;

    fn from_object(object: ObjectValue) -> Result<Self>;
}

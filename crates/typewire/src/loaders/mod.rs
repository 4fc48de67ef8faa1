// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema document loaders.
//!
//! Schemas can be declared in YAML instead of code and either registered up
//! front or served lazily through a [`SchemaSource`](crate::SchemaSource).
//!
//! # Example
//!
//! ```rust,ignore
//! use typewire::loaders::YamlSchemaLoader;
//!
//! let doc = YamlSchemaLoader::load_from_file("schemas.yaml")?;
//! YamlSchemaLoader::register_all(&doc, typewire::IdentityRegistry::global())?;
//! ```

#[cfg(feature = "schema-loaders")]
pub mod yaml;

#[cfg(feature = "schema-loaders")]
pub use yaml::{
    SchemaCatalog, YamlEnum, YamlField, YamlSchemaDocument, YamlSchemaLoader, YamlShape,
    YamlSize, YamlType,
};

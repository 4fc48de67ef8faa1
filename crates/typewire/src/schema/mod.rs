// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type schemas: what gets serialized and how.
//!
//! A [`TypeSchema`] is an ordered list of [`FieldDescriptor`]s plus the
//! type-level policies (accessor strategy, identifier, envelope, null policy,
//! default size). Schemas are plain data, typically built once at startup
//! with [`TypeSchemaBuilder`] or loaded from a schema document, then handed
//! to the registry.
//!
//! # Example
//!
//! ```rust
//! use typewire::{AccessorStrategy, TypeSchemaBuilder, ValueShape};
//!
//! let customer = TypeSchemaBuilder::new("demo.Customer")
//!     .accessor(AccessorStrategy::Setter)
//!     .variable_size(false)
//!     .field("name", ValueShape::string().fixed(30))
//!     .field("age", ValueShape::int())
//!     .build();
//! assert_eq!(customer.fields.len(), 2);
//! ```

mod builder;
mod descriptor;
mod hint;
mod shape;

pub use builder::TypeSchemaBuilder;
pub use descriptor::{AccessorStrategy, FieldAccess, FieldDescriptor, TypeSchema};
pub use hint::{CollectionKind, MapKind};
pub use shape::{EnumRepr, EnumSchema, ObjectRef, PrimitiveKind, ShapeKind, ValueShape};

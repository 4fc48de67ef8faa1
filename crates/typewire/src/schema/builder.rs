// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for TypeSchema.

use super::descriptor::{AccessorStrategy, FieldAccess, FieldDescriptor, TypeSchema};
use super::shape::{PrimitiveKind, ValueShape};
use crate::config::SchemaDefaults;

/// Builder for creating TypeSchema instances.
#[derive(Debug)]
pub struct TypeSchemaBuilder {
    schema: TypeSchema,
}

impl TypeSchemaBuilder {
    /// Create a new builder starting from [`SchemaDefaults`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: TypeSchema::new(name),
        }
    }

    pub fn with_defaults(name: impl Into<String>, defaults: SchemaDefaults) -> Self {
        Self {
            schema: TypeSchema::with_defaults(name, defaults),
        }
    }

    pub fn accessor(mut self, accessor: AccessorStrategy) -> Self {
        self.schema.accessor = accessor;
        self
    }

    /// Explicit identifier (0 keeps the derived one).
    pub fn identifier(mut self, identifier: u32) -> Self {
        self.schema.identifier = Some(identifier);
        self
    }

    pub fn include_header(mut self, include: bool) -> Self {
        self.schema.include_header = include;
        self
    }

    pub fn null_is_zero_or_empty(mut self, enabled: bool) -> Self {
        self.schema.null_is_zero_or_empty = enabled;
        self
    }

    pub fn variable_size(mut self, variable: bool) -> Self {
        self.schema.variable_size = variable;
        self
    }

    /// Add a field with full access.
    pub fn field(mut self, name: impl Into<String>, shape: ValueShape) -> Self {
        self.schema.fields.push(FieldDescriptor::new(name, shape));
        self
    }

    /// Add a non-nullable primitive field.
    pub fn primitive_field(self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        self.field(name, ValueShape::primitive(kind))
    }

    /// Add a string field.
    pub fn string_field(self, name: impl Into<String>) -> Self {
        self.field(name, ValueShape::string())
    }

    pub fn field_with_access(
        mut self,
        name: impl Into<String>,
        shape: ValueShape,
        access: FieldAccess,
    ) -> Self {
        self.schema
            .fields
            .push(FieldDescriptor::new(name, shape).with_access(access));
        self
    }

    /// Constructor parameter names, in call order.
    pub fn constructor_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema.constructor_params = Some(params.into_iter().map(Into::into).collect());
        self
    }

    pub fn zero_arg_constructor(mut self, available: bool) -> Self {
        self.schema.zero_arg_constructor = available;
        self
    }

    /// Build the TypeSchema.
    pub fn build(self) -> TypeSchema {
        self.schema
    }
}

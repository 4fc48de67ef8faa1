// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field and type descriptors.

use super::shape::ValueShape;
use crate::config::SchemaDefaults;
use crate::identity::resolve_identifier;
use crate::wire::SizeMode;

/// How decoded field values are put into a new instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessorStrategy {
    /// Write directly into fields of a zero-argument instance.
    Field,
    /// Call setters on a zero-argument instance.
    Setter,
    /// Decode everything into locals, then make a single constructor call.
    #[default]
    Constructor,
}

impl AccessorStrategy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "FIELD" => Some(AccessorStrategy::Field),
            "SETTER" => Some(AccessorStrategy::Setter),
            "CONSTRUCTOR" => Some(AccessorStrategy::Constructor),
            _ => None,
        }
    }
}

/// Accessors a field exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldAccess {
    pub getter: bool,
    pub setter: bool,
    /// Directly reachable field.
    pub public: bool,
}

impl FieldAccess {
    /// Getter, setter and direct access.
    pub const ALL: FieldAccess = FieldAccess {
        getter: true,
        setter: true,
        public: true,
    };

    /// Private field with a getter and a setter.
    pub const PROPERTY: FieldAccess = FieldAccess {
        getter: true,
        setter: true,
        public: false,
    };

    /// Private field with a getter only (constructor-initialized).
    pub const READ_ONLY: FieldAccess = FieldAccess {
        getter: true,
        setter: false,
        public: false,
    };

    pub const NONE: FieldAccess = FieldAccess {
        getter: false,
        setter: false,
        public: false,
    };

    pub fn readable(self) -> bool {
        self.getter || self.public
    }
}

impl Default for FieldAccess {
    fn default() -> Self {
        Self::ALL
    }
}

/// One serialized field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub shape: ValueShape,
    pub access: FieldAccess,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, shape: ValueShape) -> Self {
        Self {
            name: name.into(),
            shape,
            access: FieldAccess::default(),
        }
    }

    pub fn with_access(mut self, access: FieldAccess) -> Self {
        self.access = access;
        self
    }
}

/// Schema of one serializable type.
///
/// Field order is wire order: reordering fields breaks compatibility with
/// previously written data.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSchema {
    /// Fully qualified type name.
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    pub accessor: AccessorStrategy,
    /// Explicit identifier; `None` or `Some(0)` derives it from `name`.
    pub identifier: Option<u32>,
    pub include_header: bool,
    pub null_is_zero_or_empty: bool,
    /// Default size mode of shapes that leave it unset.
    pub variable_size: bool,
    /// Constructor parameter names in call order (defaults to field order).
    pub constructor_params: Option<Vec<String>>,
    /// Whether a zero-argument instance can be created (Field/Setter strategies).
    pub zero_arg_constructor: bool,
}

impl TypeSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_defaults(name, SchemaDefaults::new())
    }

    pub fn with_defaults(name: impl Into<String>, defaults: SchemaDefaults) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            accessor: defaults.accessor,
            identifier: None,
            include_header: defaults.include_header,
            null_is_zero_or_empty: defaults.null_is_zero_or_empty,
            variable_size: defaults.variable_size,
            constructor_params: None,
            zero_arg_constructor: true,
        }
    }

    /// Wire identifier of this type.
    pub fn identifier(&self) -> u32 {
        resolve_identifier(&self.name, self.identifier)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Size mode inherited by numeric shapes without one.
    pub fn default_size(&self) -> SizeMode {
        if self.variable_size {
            SizeMode::Variable
        } else {
            SizeMode::FIXED_WIDTH
        }
    }

    /// Constructor parameter order, falling back to field order.
    pub fn constructor_order(&self) -> Vec<&str> {
        match &self.constructor_params {
            Some(params) => params.iter().map(String::as_str).collect(),
            None => self.fields.iter().map(|f| f.name.as_str()).collect(),
        }
    }
}

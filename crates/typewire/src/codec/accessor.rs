// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Accessor strategies: validation at build time, object assembly at decode.

use crate::error::{Error, Result};
use crate::schema::{AccessorStrategy, TypeSchema};
use crate::value::{ObjectValue, Value};

/// Build-time plan for putting decoded values into an instance.
#[derive(Debug, Clone)]
pub(crate) enum Assembly {
    /// Field or setter strategy: populate a zero-argument instance in place.
    Instance,
    /// Collect arguments, then construct once.
    Constructor {
        params: Vec<String>,
        /// Parameter position of each field, in field order.
        positions: Vec<usize>,
    },
}

impl Assembly {
    /// Validate accessors under the schema's strategy and plan assembly.
    pub(crate) fn for_schema(schema: &TypeSchema) -> Result<Self> {
        let no_accessor = |field: &str| Error::NoAccessibleAccessor {
            type_name: schema.name.clone(),
            field: field.to_string(),
        };

        for field in &schema.fields {
            if !field.access.readable() {
                return Err(no_accessor(&field.name));
            }
        }

        match schema.accessor {
            AccessorStrategy::Field | AccessorStrategy::Setter => {
                if !schema.zero_arg_constructor {
                    return Err(Error::UnsupportedShape(format!(
                        "{} has no zero-argument constructor for {:?} access",
                        schema.name, schema.accessor
                    )));
                }
                let writable = |f: &crate::schema::FieldDescriptor| match schema.accessor {
                    AccessorStrategy::Field => f.access.public,
                    _ => f.access.setter || f.access.public,
                };
                if let Some(field) = schema.fields.iter().find(|f| !writable(f)) {
                    return Err(no_accessor(&field.name));
                }
                Ok(Assembly::Instance)
            }
            AccessorStrategy::Constructor => {
                let params: Vec<String> = schema
                    .constructor_order()
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                for (idx, param) in params.iter().enumerate() {
                    if params[..idx].contains(param) {
                        return Err(Error::UnsupportedShape(format!(
                            "{}: constructor parameter {} repeated",
                            schema.name, param
                        )));
                    }
                    if schema.field(param).is_none() {
                        return Err(Error::UnsupportedShape(format!(
                            "{}: constructor parameter {} has no field",
                            schema.name, param
                        )));
                    }
                }
                let positions = schema
                    .fields
                    .iter()
                    .map(|f| {
                        params
                            .iter()
                            .position(|p| *p == f.name)
                            .ok_or_else(|| no_accessor(&f.name))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Assembly::Constructor { params, positions })
            }
        }
    }

    pub(crate) fn begin(&self, type_name: &str) -> Assembler<'_> {
        match self {
            Assembly::Instance => Assembler::Instance(ObjectValue::new(type_name)),
            Assembly::Constructor { params, positions } => Assembler::Arguments {
                type_name: type_name.to_string(),
                params,
                positions,
                args: vec![Value::Null; params.len()],
            },
        }
    }
}

/// In-progress decode of one object.
pub(crate) enum Assembler<'a> {
    Instance(ObjectValue),
    Arguments {
        type_name: String,
        params: &'a [String],
        positions: &'a [usize],
        args: Vec<Value>,
    },
}

impl Assembler<'_> {
    /// Accept the decoded value of field `index`.
    pub(crate) fn accept(&mut self, index: usize, name: &str, value: Value) {
        match self {
            Assembler::Instance(object) => {
                object.set(name, value);
            }
            Assembler::Arguments {
                positions, args, ..
            } => {
                args[positions[index]] = value;
            }
        }
    }

    pub(crate) fn finish(self) -> ObjectValue {
        match self {
            Assembler::Instance(object) => object,
            Assembler::Arguments {
                type_name,
                params,
                args,
                ..
            } => ObjectValue::from_arguments(type_name, params.iter().map(String::as_str), args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldAccess, TypeSchemaBuilder, ValueShape};

    #[test]
    fn test_constructor_reorders_arguments() {
        let schema = TypeSchemaBuilder::new("demo.Pair")
            .field("a", ValueShape::int())
            .field("b", ValueShape::string())
            .constructor_params(["b", "a"])
            .build();
        let assembly = Assembly::for_schema(&schema).unwrap();
        let mut assembler = assembly.begin("demo.Pair");
        assembler.accept(0, "a", Value::Int(1));
        assembler.accept(1, "b", Value::from("x"));
        assert_eq!(
            assembler.finish(),
            ObjectValue::new("demo.Pair").with("a", 1).with("b", "x")
        );
    }

    #[test]
    fn test_field_without_getter_rejected() {
        let schema = TypeSchemaBuilder::new("demo.Hidden")
            .field_with_access("secret", ValueShape::int(), FieldAccess::NONE)
            .build();
        let err = Assembly::for_schema(&schema).unwrap_err();
        assert!(matches!(
            err,
            Error::NoAccessibleAccessor { ref field, .. } if field == "secret"
        ));
    }

    #[test]
    fn test_setter_strategy_needs_setter() {
        let schema = TypeSchemaBuilder::new("demo.Frozen")
            .accessor(AccessorStrategy::Setter)
            .field_with_access("id", ValueShape::int(), FieldAccess::READ_ONLY)
            .build();
        assert!(matches!(
            Assembly::for_schema(&schema),
            Err(Error::NoAccessibleAccessor { .. })
        ));
    }

    #[test]
    fn test_field_strategy_needs_public_field() {
        let schema = TypeSchemaBuilder::new("demo.Bean")
            .accessor(AccessorStrategy::Field)
            .field_with_access("id", ValueShape::int(), FieldAccess::PROPERTY)
            .build();
        assert!(matches!(
            Assembly::for_schema(&schema),
            Err(Error::NoAccessibleAccessor { .. })
        ));
    }

    #[test]
    fn test_constructor_must_cover_every_field() {
        let schema = TypeSchemaBuilder::new("demo.Partial")
            .field("a", ValueShape::int())
            .field("b", ValueShape::int())
            .constructor_params(["a"])
            .build();
        assert!(matches!(
            Assembly::for_schema(&schema),
            Err(Error::NoAccessibleAccessor { ref field, .. }) if field == "b"
        ));

        let schema = TypeSchemaBuilder::new("demo.Extra")
            .field("a", ValueShape::int())
            .constructor_params(["a", "ghost"])
            .build();
        assert!(matches!(
            Assembly::for_schema(&schema),
            Err(Error::UnsupportedShape(_))
        ));
    }

    #[test]
    fn test_setter_strategy_needs_zero_arg_constructor() {
        let schema = TypeSchemaBuilder::new("demo.NoDefault")
            .accessor(AccessorStrategy::Setter)
            .zero_arg_constructor(false)
            .field("a", ValueShape::int())
            .build();
        assert!(matches!(
            Assembly::for_schema(&schema),
            Err(Error::UnsupportedShape(_))
        ));
    }
}

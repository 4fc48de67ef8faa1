// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML schema loader.
//!
//! # Example YAML
//!
//! ```yaml
//! # schemas.yaml
//! enums:
//!   - name: demo.Color
//!     constants: [RED, GREEN, BLUE]
//!
//! types:
//!   - name: demo.Customer
//!     accessor: SETTER
//!     size: FIXED
//!     fields:
//!       - name: name
//!         type: string
//!         size: 30
//!       - name: age
//!         type: int
//!       - name: favorite
//!         type: enum
//!         enum: demo.Color
//!         repr: NAME
//!       - name: tags
//!         type: collection
//!         implementation: TreeSet
//!         element:
//!           type: string
//!       - name: owner
//!         type: object           # no `object:` name means dynamic dispatch
//! ```

use crate::error::{Error, Result};
use crate::registry::{IdentityRegistry, SchemaSource};
use crate::schema::{
    AccessorStrategy, EnumRepr, EnumSchema, FieldAccess, FieldDescriptor, PrimitiveKind,
    ShapeKind, TypeSchema, ValueShape,
};
use crate::wire::SizeMode;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// YAML schema loader.
pub struct YamlSchemaLoader;

/// Root YAML document structure.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct YamlSchemaDocument {
    pub enums: Vec<YamlEnum>,
    pub types: Vec<YamlType>,
}

#[derive(Debug, Deserialize)]
pub struct YamlEnum {
    pub name: String,
    pub constants: Vec<String>,
}

/// One type in YAML format. Unset attributes keep the schema defaults.
#[derive(Debug, Deserialize)]
pub struct YamlType {
    pub name: String,
    /// FIELD, SETTER or CONSTRUCTOR
    pub accessor: Option<String>,
    pub identifier: Option<u32>,
    pub include_header: Option<bool>,
    pub null_is_zero_or_empty: Option<bool>,
    /// VARIABLE or FIXED (default size mode of the numeric fields)
    pub size: Option<YamlSize>,
    /// Constructor parameter names in call order
    pub constructor: Option<Vec<String>>,
    pub zero_arg_constructor: Option<bool>,
    #[serde(default)]
    pub fields: Vec<YamlField>,
}

/// One field: its name, its accessors and its shape.
#[derive(Debug, Deserialize)]
pub struct YamlField {
    pub name: String,
    pub getter: Option<bool>,
    pub setter: Option<bool>,
    pub public: Option<bool>,
    #[serde(flatten)]
    pub shape: YamlShape,
}

/// A value shape in YAML format, nested for container components.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct YamlShape {
    /// Primitive (`int`), boxed (`Integer`), `string`, `array`, `collection`,
    /// `map`, `enum` or `object`
    #[serde(rename = "type")]
    pub kind: String,
    pub size: Option<YamlSize>,
    pub charset: Option<String>,
    pub as_chars: bool,
    pub null_is_zero_or_empty: Option<bool>,
    pub implementation: Option<String>,
    pub unmodifiable: bool,
    /// Array or collection component
    pub element: Option<Box<YamlShape>>,
    pub key: Option<Box<YamlShape>>,
    pub value: Option<Box<YamlShape>>,
    /// Concrete object type; absent means dynamic
    pub object: Option<String>,
    #[serde(rename = "enum")]
    pub enumeration: Option<String>,
    /// ORDINAL or NAME
    pub repr: Option<String>,
}

/// Size as a fixed count or a keyword (VARIABLE, FIXED).
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum YamlSize {
    Count(usize),
    Keyword(String),
}

impl YamlSize {
    fn to_size_mode(&self) -> Result<SizeMode> {
        match self {
            YamlSize::Count(n) => Ok(SizeMode::Fixed(*n)),
            YamlSize::Keyword(k) => match k.to_ascii_uppercase().as_str() {
                "VARIABLE" => Ok(SizeMode::Variable),
                "FIXED" | "FIXED_WIDTH" => Ok(SizeMode::FIXED_WIDTH),
                other => Err(doc_error(format!("Invalid size: {}", other))),
            },
        }
    }
}

fn doc_error(msg: String) -> Error {
    Error::SchemaDocument(msg)
}

impl YamlSchemaLoader {
    /// Load a schema document from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<YamlSchemaDocument> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            doc_error(format!("Failed to read YAML file {}: {}", path.display(), e))
        })?;
        Self::parse_yaml(&content)
    }

    /// Parse a schema document from a YAML string.
    pub fn parse_yaml(yaml_content: &str) -> Result<YamlSchemaDocument> {
        serde_yaml::from_str(yaml_content).map_err(|e| doc_error(format!("Failed to parse YAML: {}", e)))
    }

    /// Convert every type of `doc` into a [`TypeSchema`], in document order.
    pub fn to_schemas(doc: &YamlSchemaDocument) -> Result<Vec<TypeSchema>> {
        let mut enums: HashMap<&str, Arc<EnumSchema>> = HashMap::new();
        for e in &doc.enums {
            let schema = Arc::new(EnumSchema::new(e.name.clone(), e.constants.iter().cloned()));
            if enums.insert(e.name.as_str(), schema).is_some() {
                return Err(doc_error(format!("Duplicate enum: {}", e.name)));
            }
        }
        doc.types.iter().map(|t| Self::type_to_schema(t, &enums)).collect()
    }

    /// Register every type of `doc`, returning their identifiers.
    ///
    /// Nothing is registered when any type of the document fails.
    pub fn register_all(doc: &YamlSchemaDocument, registry: &IdentityRegistry) -> Result<Vec<u32>> {
        let schemas = Self::to_schemas(doc)?;
        log::debug!("[loaders] registering {} schemas from YAML", schemas.len());
        registry.register_schemas(schemas)
    }

    /// Load a file and register its types.
    pub fn load_and_register<P: AsRef<Path>>(path: P, registry: &IdentityRegistry) -> Result<Vec<u32>> {
        let doc = Self::load_from_file(path)?;
        Self::register_all(&doc, registry)
    }

    fn type_to_schema(
        yaml: &YamlType,
        enums: &HashMap<&str, Arc<EnumSchema>>,
    ) -> Result<TypeSchema> {
        let mut schema = TypeSchema::new(yaml.name.clone());

        if let Some(ref accessor) = yaml.accessor {
            schema.accessor = AccessorStrategy::from_name(accessor)
                .ok_or_else(|| doc_error(format!("Invalid accessor: {}", accessor)))?;
        }
        schema.identifier = yaml.identifier;
        if let Some(include) = yaml.include_header {
            schema.include_header = include;
        }
        if let Some(null) = yaml.null_is_zero_or_empty {
            schema.null_is_zero_or_empty = null;
        }
        if let Some(ref size) = yaml.size {
            schema.variable_size = match size.to_size_mode()? {
                SizeMode::Variable => true,
                SizeMode::Fixed(_) => false,
            };
        }
        schema.constructor_params = yaml.constructor.clone();
        if let Some(available) = yaml.zero_arg_constructor {
            schema.zero_arg_constructor = available;
        }

        for field in &yaml.fields {
            let shape = Self::shape_to_value_shape(&field.shape, enums)
                .map_err(|e| doc_error(format!("{}.{}: {}", yaml.name, field.name, e)))?;
            let defaults = FieldAccess::default();
            let access = FieldAccess {
                getter: field.getter.unwrap_or(defaults.getter),
                setter: field.setter.unwrap_or(defaults.setter),
                public: field.public.unwrap_or(defaults.public),
            };
            schema
                .fields
                .push(FieldDescriptor::new(field.name.clone(), shape).with_access(access));
        }
        Ok(schema)
    }

    fn shape_to_value_shape(
        yaml: &YamlShape,
        enums: &HashMap<&str, Arc<EnumSchema>>,
    ) -> Result<ValueShape> {
        let component = |child: &Option<Box<YamlShape>>, role: &str| -> Result<ValueShape> {
            match child {
                Some(child) => Self::shape_to_value_shape(child, enums),
                None => Err(doc_error(format!("{} requires `{}`", yaml.kind, role))),
            }
        };

        let kind = match yaml.kind.as_str() {
            "" => return Err(doc_error("missing `type`".to_string())),
            "string" | "String" => ShapeKind::String,
            "array" => ShapeKind::Array(Box::new(component(&yaml.element, "element")?)),
            "collection" => ShapeKind::Collection(Box::new(component(&yaml.element, "element")?)),
            "map" => ShapeKind::Map(
                Box::new(component(&yaml.key, "key")?),
                Box::new(component(&yaml.value, "value")?),
            ),
            "enum" => {
                let name = yaml
                    .enumeration
                    .as_deref()
                    .ok_or_else(|| doc_error("enum requires `enum`".to_string()))?;
                let schema = enums
                    .get(name)
                    .cloned()
                    .ok_or_else(|| doc_error(format!("Unknown enum: {}", name)))?;
                let repr = match yaml.repr.as_deref().map(str::to_ascii_uppercase).as_deref() {
                    None | Some("ORDINAL") => EnumRepr::Ordinal,
                    Some("NAME") => EnumRepr::Name,
                    Some(other) => return Err(doc_error(format!("Invalid enum repr: {}", other))),
                };
                ShapeKind::Enum(schema, repr)
            }
            "object" => {
                let shape = match yaml.object {
                    Some(ref name) => ValueShape::object(name.clone()),
                    None => ValueShape::dynamic(),
                };
                return Self::apply_options(shape, yaml);
            }
            other => {
                if let Some(kind) = PrimitiveKind::from_name(other) {
                    ShapeKind::Primitive(kind)
                } else if let Some(kind) = PrimitiveKind::from_boxed_name(other) {
                    ShapeKind::Boxed(kind)
                } else {
                    return Err(doc_error(format!("Unknown type: {}", other)));
                }
            }
        };
        Self::apply_options(ValueShape::new(kind), yaml)
    }

    fn apply_options(mut shape: ValueShape, yaml: &YamlShape) -> Result<ValueShape> {
        shape.size = yaml.size.as_ref().map(YamlSize::to_size_mode).transpose()?;
        shape.charset = yaml.charset.clone();
        shape.string_as_chars = yaml.as_chars;
        shape.null_is_zero_or_empty = yaml.null_is_zero_or_empty;
        shape.implementation = yaml.implementation.clone();
        shape.unmodifiable = yaml.unmodifiable;
        Ok(shape)
    }
}

/// Schemas of a loaded document, served on demand.
///
/// Install with [`IdentityRegistry::add_source`] to resolve types lazily
/// instead of registering them all up front.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    schemas: HashMap<String, TypeSchema>,
}

impl SchemaCatalog {
    pub fn from_document(doc: &YamlSchemaDocument) -> Result<Self> {
        let schemas = YamlSchemaLoader::to_schemas(doc)?
            .into_iter()
            .map(|schema| (schema.name.clone(), schema))
            .collect();
        Ok(Self { schemas })
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl SchemaSource for SchemaCatalog {
    fn find_schema(&self, type_name: &str) -> Option<TypeSchema> {
        self.schemas.get(type_name).cloned()
    }
}

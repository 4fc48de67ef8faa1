// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// End-to-end encode/decode scenarios: sizing, null policy, charsets,
// enums, containers and accessor strategies.

#![allow(clippy::float_cmp)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;
use typewire::{
    AccessorStrategy, CollectionKind, CollectionValue, EnumRepr, EnumSchema, Error, Feature,
    FeatureContext, FieldAccess, IdentityRegistry, MapKind, MapValue, ObjectValue, PrimitiveKind,
    TypeSchema, TypeSchemaBuilder, Value, ValueShape,
};

fn registry_with(schemas: impl IntoIterator<Item = TypeSchema>) -> IdentityRegistry {
    let registry = IdentityRegistry::new();
    for schema in schemas {
        registry.register_schema(schema).expect("schema should register");
    }
    registry
}

fn roundtrip(registry: &IdentityRegistry, type_name: &str, value: &Value, ctx: FeatureContext) -> (Vec<u8>, Value) {
    let bytes = registry.serialize(type_name, value, ctx).expect("encode");
    let decoded = registry
        .deserialize(Some(type_name), &bytes, ctx)
        .expect("decode");
    (bytes, decoded)
}

fn into_object(value: Value) -> ObjectValue {
    value.into_object().expect("decoded value should be an object")
}

// ============================================================================
// Null / empty policy
// ============================================================================

fn nullable_schema(policy: bool) -> TypeSchema {
    TypeSchemaBuilder::new("demo.Nullable")
        .null_is_zero_or_empty(policy)
        .field("label", ValueShape::string())
        .field("count", ValueShape::boxed(PrimitiveKind::Int))
        .field("tags", ValueShape::collection_of(ValueShape::string()))
        .field("code", ValueShape::int())
        .build()
}

fn empty_nullable() -> Value {
    ObjectValue::new("demo.Nullable")
        .with("label", "")
        .with("count", 0)
        .with("tags", CollectionValue::new(CollectionKind::List))
        .with("code", 0)
        .into()
}

#[test]
fn null_policy_turns_zero_and_empty_into_null() {
    let registry = registry_with([nullable_schema(true)]);
    let (bytes, decoded) = roundtrip(&registry, "demo.Nullable", &empty_nullable(), FeatureContext::new());
    assert_eq!(bytes, [0x00, 0x00, 0x00, 0x00]);

    let expected = ObjectValue::new("demo.Nullable")
        .with("label", Value::Null)
        .with("count", Value::Null)
        .with("tags", Value::Null)
        .with("code", 0);
    assert_eq!(into_object(decoded), expected);
}

#[test]
fn null_encodes_like_empty() {
    let registry = registry_with([nullable_schema(true)]);
    let nulls: Value = ObjectValue::new("demo.Nullable").into();
    let null_bytes = registry
        .serialize("demo.Nullable", &nulls, FeatureContext::new())
        .unwrap();
    let empty_bytes = registry
        .serialize("demo.Nullable", &empty_nullable(), FeatureContext::new())
        .unwrap();
    assert_eq!(null_bytes, empty_bytes);
}

#[test]
fn null_policy_off_keeps_zero_and_empty() {
    let registry = registry_with([nullable_schema(false)]);
    let (_, decoded) = roundtrip(&registry, "demo.Nullable", &empty_nullable(), FeatureContext::new());
    assert_eq!(decoded, empty_nullable());
}

#[test]
fn force_zero_or_empty_as_null_overrides_policy() {
    let registry = registry_with([nullable_schema(false)]);
    let ctx = FeatureContext::new()
        .with(Feature::ForceZeroOrEmptyAsNull)
        .unwrap();
    let (_, decoded) = roundtrip(&registry, "demo.Nullable", &empty_nullable(), ctx);
    let decoded = into_object(decoded);
    assert!(decoded.field("label").is_null());
    assert!(decoded.field("count").is_null());
    assert!(decoded.field("tags").is_null());
    assert_eq!(decoded.field("code"), &Value::Int(0));
}

#[test]
fn field_policy_overrides_schema_policy() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Labelled")
        .field("label", ValueShape::string().null_is_zero_or_empty(false))
        .field("note", ValueShape::string())
        .build()]);
    let value: Value = ObjectValue::new("demo.Labelled")
        .with("label", "")
        .with("note", "")
        .into();
    let (_, decoded) = roundtrip(&registry, "demo.Labelled", &value, FeatureContext::new());
    let decoded = into_object(decoded);
    assert_eq!(decoded.field("label"), &Value::from(""));
    assert!(decoded.field("note").is_null());
}

// ============================================================================
// Fixed sizes
// ============================================================================

fn code_schema() -> TypeSchema {
    TypeSchemaBuilder::new("demo.Code")
        .field("code", ValueShape::string().fixed(4))
        .build()
}

fn code(text: &str) -> Value {
    ObjectValue::new("demo.Code").with("code", text).into()
}

#[test]
fn fixed_string_truncates_long_values() {
    let registry = registry_with([code_schema()]);
    let (bytes, decoded) = roundtrip(&registry, "demo.Code", &code("ABCDEFG"), FeatureContext::new());
    assert_eq!(bytes, b"ABCD");
    assert_eq!(decoded, code("ABCD"));
}

#[test]
fn fixed_string_pads_short_values() {
    let registry = registry_with([code_schema()]);
    let (bytes, decoded) = roundtrip(&registry, "demo.Code", &code("AB"), FeatureContext::new());
    assert_eq!(bytes, [0x41, 0x42, 0x00, 0x00]);
    assert_eq!(decoded, code("AB"));
}

#[test]
fn fixed_string_stops_at_embedded_nul() {
    let registry = registry_with([code_schema()]);
    let (_, decoded) = roundtrip(&registry, "demo.Code", &code("A\0B"), FeatureContext::new());
    assert_eq!(decoded, code("A"));
}

#[test]
fn fixed_char_buffer_string() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Chars")
        .field("text", ValueShape::string().as_chars().fixed(4))
        .build()]);
    let value: Value = ObjectValue::new("demo.Chars").with("text", "ab").into();
    let (bytes, decoded) = roundtrip(&registry, "demo.Chars", &value, FeatureContext::new());
    assert_eq!(bytes, [0x61, 0x00, 0x62, 0x00, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(decoded, value);
}

#[test]
fn fixed_container_pads_with_defaults() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Slots")
        .field("slots", ValueShape::collection_of(ValueShape::string()).fixed(3))
        .build()]);
    let value: Value = ObjectValue::new("demo.Slots")
        .with(
            "slots",
            CollectionValue::from_items(CollectionKind::List, ["x"]),
        )
        .into();
    let (bytes, decoded) = roundtrip(&registry, "demo.Slots", &value, FeatureContext::new());
    assert_eq!(bytes, [0x01, 0x78, 0x00, 0x00]);

    let slots = into_object(decoded).take("slots");
    assert_eq!(
        slots,
        Value::Collection(CollectionValue::from_items(CollectionKind::List, ["x", "", ""]))
    );
}

// ============================================================================
// Feature propagation
// ============================================================================

fn sizing_schemas() -> [TypeSchema; 2] {
    [
        TypeSchemaBuilder::new("demo.Inner")
            .field("name", ValueShape::string().fixed(8))
            .field("values", ValueShape::array_of(ValueShape::int()).fixed(3))
            .build(),
        TypeSchemaBuilder::new("demo.Outer")
            .field("id", ValueShape::int().fixed_width())
            .field("inner", ValueShape::object("demo.Inner"))
            .build(),
    ]
}

fn outer(values: Vec<i32>) -> Value {
    ObjectValue::new("demo.Outer")
        .with("id", 7)
        .with(
            "inner",
            ObjectValue::new("demo.Inner")
                .with("name", "hi")
                .with("values", values),
        )
        .into()
}

#[test]
fn configured_fixed_sizes_without_override() {
    let registry = registry_with(sizing_schemas());
    let (bytes, decoded) = roundtrip(&registry, "demo.Outer", &outer(vec![1, 2]), FeatureContext::new());
    assert_eq!(
        bytes,
        [
            0x07, 0x00, 0x00, 0x00, // id
            0x68, 0x69, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // name
            0x01, 0x02, 0x00, // values
        ]
    );
    assert_eq!(decoded, outer(vec![1, 2, 0]));
}

#[test]
fn force_variable_size_reaches_nested_objects() {
    let registry = registry_with(sizing_schemas());
    let ctx = FeatureContext::new().with(Feature::ForceVariableSize).unwrap();
    let (bytes, decoded) = roundtrip(&registry, "demo.Outer", &outer(vec![1, 2]), ctx);
    assert_eq!(bytes, [0x07, 0x02, 0x68, 0x69, 0x02, 0x01, 0x02]);
    assert_eq!(decoded, outer(vec![1, 2]));
}

#[test]
fn fixed_width_default_keeps_unsized_buffers_length_prefixed() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Person")
        .variable_size(false)
        .field("name", ValueShape::string())
        .field("tags", ValueShape::collection_of(ValueShape::string()))
        .field("age", ValueShape::int())
        .build()]);
    let value: Value = ObjectValue::new("demo.Person")
        .with("name", "Robinson")
        .with(
            "tags",
            CollectionValue::from_items(CollectionKind::List, ["a", "b"]),
        )
        .with("age", 42)
        .into();
    let (bytes, decoded) = roundtrip(&registry, "demo.Person", &value, FeatureContext::new());

    let mut expected = vec![0x08];
    expected.extend_from_slice(b"Robinson");
    expected.extend_from_slice(&[0x02, 0x01, b'a', 0x01, b'b']);
    expected.extend_from_slice(&42i32.to_le_bytes());
    assert_eq!(bytes, expected);
    assert_eq!(decoded, value);
}

// ============================================================================
// Primitives and charsets
// ============================================================================

#[test]
fn primitives_fixed_and_variable() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Prims")
        .field("flag", ValueShape::boolean())
        .field("byte", ValueShape::primitive(PrimitiveKind::Byte))
        .field("short", ValueShape::primitive(PrimitiveKind::Short))
        .field("letter", ValueShape::primitive(PrimitiveKind::Char))
        .field("small", ValueShape::int())
        .field("big", ValueShape::long())
        .field("ratio", ValueShape::primitive(PrimitiveKind::Float).fixed_width())
        .build()]);
    let value: Value = ObjectValue::new("demo.Prims")
        .with("flag", true)
        .with("byte", -2i8)
        .with("short", 0x1234i16)
        .with("letter", u16::from(b'Z'))
        .with("small", -1)
        .with("big", -1i64)
        .with("ratio", 1.5f32)
        .into();
    let (bytes, decoded) = roundtrip(&registry, "demo.Prims", &value, FeatureContext::new());

    let mut expected = vec![0x01, 0xfe, 0x34, 0x12, 0x5a, 0x00];
    expected.extend_from_slice(&[0xff, 0xff, 0xff, 0xff, 0x0f]);
    expected.extend_from_slice(&[0xff; 9]);
    expected.push(0x01);
    expected.extend_from_slice(&1.5f32.to_le_bytes());
    assert_eq!(bytes, expected);
    assert_eq!(decoded, value);
}

#[test]
fn utf16_charset_string() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Wide")
        .field("text", ValueShape::string().charset("UTF-16LE"))
        .build()]);
    let value: Value = ObjectValue::new("demo.Wide").with("text", "h\u{e9}").into();
    let (bytes, decoded) = roundtrip(&registry, "demo.Wide", &value, FeatureContext::new());
    assert_eq!(bytes, [0x04, 0x68, 0x00, 0xe9, 0x00]);
    assert_eq!(decoded, value);
}

#[test]
fn latin1_charset_inherited_by_collection_elements() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Words")
        .field(
            "words",
            ValueShape::collection_of(ValueShape::string()).charset("ISO-8859-1"),
        )
        .build()]);
    let value: Value = ObjectValue::new("demo.Words")
        .with(
            "words",
            CollectionValue::from_items(CollectionKind::List, ["caf\u{e9}"]),
        )
        .into();
    let (bytes, decoded) = roundtrip(&registry, "demo.Words", &value, FeatureContext::new());
    assert_eq!(bytes, [0x01, 0x04, 0x63, 0x61, 0x66, 0xe9]);
    assert_eq!(decoded, value);
}

#[test]
fn unknown_charset_fails_at_registration() {
    let registry = IdentityRegistry::new();
    let err = registry
        .register_schema(
            TypeSchemaBuilder::new("demo.Bad")
                .field("text", ValueShape::string().charset("KOI8-R"))
                .build(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedCharset(_)));
    assert!(!registry.is_registered("demo.Bad"));
}

// ============================================================================
// Enums
// ============================================================================

fn color() -> Arc<EnumSchema> {
    Arc::new(EnumSchema::new("demo.Color", ["RED", "GREEN", "BLUE"]))
}

fn paint_registry() -> IdentityRegistry {
    registry_with([TypeSchemaBuilder::new("demo.Paint")
        .field("base", ValueShape::enumeration(color(), EnumRepr::Ordinal))
        .field("accent", ValueShape::enumeration(color(), EnumRepr::Name))
        .build()])
}

#[test]
fn enum_ordinal_and_name() {
    let registry = paint_registry();
    let value: Value = ObjectValue::new("demo.Paint")
        .with("base", Value::Enum("GREEN".into()))
        .with("accent", Value::Enum("BLUE".into()))
        .into();
    let (bytes, decoded) = roundtrip(&registry, "demo.Paint", &value, FeatureContext::new());
    assert_eq!(bytes, [0x01, 0x04, 0x42, 0x4c, 0x55, 0x45]);
    assert_eq!(decoded, value);
}

#[test]
fn null_enums() {
    let registry = paint_registry();
    let (bytes, decoded) = roundtrip(
        &registry,
        "demo.Paint",
        &ObjectValue::new("demo.Paint").into(),
        FeatureContext::new(),
    );
    assert_eq!(bytes, [0x00, 0x00]);
    let decoded = into_object(decoded);
    assert_eq!(decoded.field("base"), &Value::Enum("RED".into()));
    assert!(decoded.field("accent").is_null());
}

#[test]
fn enum_errors() {
    let registry = paint_registry();
    let err = registry
        .deserialize(Some("demo.Paint"), &[0x05, 0x00], FeatureContext::new())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidEnumOrdinal { ordinal: 5, .. }));

    let err = registry
        .deserialize(Some("demo.Paint"), &[0x00, 0x02, 0x4e, 0x4f], FeatureContext::new())
        .unwrap_err();
    assert!(matches!(err, Error::UnknownEnumConstant { .. }));

    let purple: Value = ObjectValue::new("demo.Paint")
        .with("base", Value::Enum("PURPLE".into()))
        .into();
    assert!(matches!(
        registry.serialize("demo.Paint", &purple, FeatureContext::new()),
        Err(Error::UnknownEnumConstant { .. })
    ));
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn tree_set_hint_sorts_and_decodes_as_set() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Ranks")
        .field(
            "ranks",
            ValueShape::collection_of(ValueShape::boxed(PrimitiveKind::Int))
                .implementation("java.util.TreeSet"),
        )
        .build()]);
    let value: Value = ObjectValue::new("demo.Ranks")
        .with(
            "ranks",
            CollectionValue::from_items(CollectionKind::HashSet, [3, 1, 2]),
        )
        .into();
    let (bytes, decoded) = roundtrip(&registry, "demo.Ranks", &value, FeatureContext::new());
    assert_eq!(bytes, [0x03, 0x03, 0x01, 0x02]);

    let Value::Collection(ranks) = into_object(decoded).take("ranks") else {
        panic!("expected a collection");
    };
    assert_eq!(ranks.kind(), CollectionKind::TreeSet);
    assert_eq!(ranks.items(), &[Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn unmodifiable_collection_rejects_mutation() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Frozen")
        .field(
            "tags",
            ValueShape::collection_of(ValueShape::string()).unmodifiable(),
        )
        .build()]);
    let value: Value = ObjectValue::new("demo.Frozen")
        .with("tags", CollectionValue::from_items(CollectionKind::List, ["a"]))
        .into();
    let (_, decoded) = roundtrip(&registry, "demo.Frozen", &value, FeatureContext::new());
    assert_eq!(decoded, value);

    let Value::Collection(mut tags) = into_object(decoded).take("tags") else {
        panic!("expected a collection");
    };
    assert!(tags.is_read_only());
    assert!(matches!(tags.insert("b"), Err(Error::UnmodifiableContainer)));
}

#[test]
fn nested_map_of_collections() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Index")
        .field(
            "index",
            ValueShape::map_of(
                ValueShape::string(),
                ValueShape::collection_of(ValueShape::boxed(PrimitiveKind::Long)),
            )
            .implementation("TreeMap"),
        )
        .build()]);
    let index = MapValue::from_entries(
        MapKind::Tree,
        [
            ("b", CollectionValue::from_items(CollectionKind::List, [2i64, 3])),
            ("a", CollectionValue::from_items(CollectionKind::List, [1i64])),
        ],
    );
    let value: Value = ObjectValue::new("demo.Index").with("index", index).into();
    let (bytes, decoded) = roundtrip(&registry, "demo.Index", &value, FeatureContext::new());
    assert_eq!(
        bytes,
        [0x02, 0x01, 0x61, 0x01, 0x01, 0x01, 0x62, 0x02, 0x02, 0x03]
    );
    assert_eq!(decoded, value);
}

#[test]
fn unboxed_collection_element_fails_at_registration() {
    let registry = IdentityRegistry::new();
    let err = registry
        .register_schema(
            TypeSchemaBuilder::new("demo.Bad")
                .field("values", ValueShape::collection_of(ValueShape::int()))
                .build(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedShape(_)));
}

#[test]
fn anonymous_implementation_hint_rejected() {
    let registry = IdentityRegistry::new();
    let err = registry
        .register_schema(
            TypeSchemaBuilder::new("demo.Bad")
                .field(
                    "values",
                    ValueShape::collection_of(ValueShape::string()).implementation("Outer$1"),
                )
                .build(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidImplementationHint(_)));
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn constructor_parameters_do_not_change_wire_order() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Pair")
        .field("left", ValueShape::int())
        .field("right", ValueShape::string())
        .constructor_params(["right", "left"])
        .build()]);
    let value: Value = ObjectValue::new("demo.Pair")
        .with("left", 5)
        .with("right", "r")
        .into();
    let (bytes, decoded) = roundtrip(&registry, "demo.Pair", &value, FeatureContext::new());
    assert_eq!(bytes, [0x05, 0x01, 0x72]);
    assert_eq!(decoded, value);
}

#[test]
fn field_strategy_requires_public_fields() {
    let registry = IdentityRegistry::new();
    let err = registry
        .register_schema(
            TypeSchemaBuilder::new("demo.Bean")
                .accessor(AccessorStrategy::Field)
                .field("open", ValueShape::int())
                .field_with_access("hidden", ValueShape::int(), FieldAccess::PROPERTY)
                .build(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        Error::NoAccessibleAccessor { ref field, .. } if field == "hidden"
    ));
}

// ============================================================================
// Stream errors
// ============================================================================

#[test]
fn truncated_stream_is_fatal() {
    let registry = registry_with(sizing_schemas());
    let bytes = registry
        .serialize("demo.Outer", &outer(vec![1, 2, 3]), FeatureContext::new())
        .unwrap();
    let err = registry
        .deserialize(Some("demo.Outer"), &bytes[..bytes.len() - 1], FeatureContext::new())
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedEndOfStream { .. }));
}

#[test]
fn overlong_varint_is_fatal() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Count")
        .field("count", ValueShape::int())
        .build()]);
    let err = registry
        .deserialize(
            Some("demo.Count"),
            &[0x80, 0x80, 0x80, 0x80, 0x80, 0x01],
            FeatureContext::new(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::VarIntTooLarge { .. }));
}

#[test]
fn large_hash_and_tree_sets_decode() {
    let registry = registry_with([TypeSchemaBuilder::new("demo.Ids")
        .field(
            "seen",
            ValueShape::collection_of(ValueShape::boxed(PrimitiveKind::Int)).implementation("HashSet"),
        )
        .field(
            "ordered",
            ValueShape::collection_of(ValueShape::boxed(PrimitiveKind::Int)).implementation("TreeSet"),
        )
        .build()]);
    let value: Value = ObjectValue::new("demo.Ids")
        .with(
            "seen",
            CollectionValue::from_items(CollectionKind::HashSet, 0..40_000),
        )
        .with(
            "ordered",
            CollectionValue::from_items(CollectionKind::List, (0..40_000).rev()),
        )
        .into();
    let (_, decoded) = roundtrip(&registry, "demo.Ids", &value, FeatureContext::new());
    let decoded = into_object(decoded);
    let Value::Collection(seen) = decoded.field("seen") else {
        panic!("expected a collection");
    };
    assert_eq!(seen.len(), 40_000);
    let Value::Collection(ordered) = decoded.field("ordered") else {
        panic!("expected a collection");
    };
    assert_eq!(ordered.kind(), CollectionKind::TreeSet);
    assert_eq!(ordered.items().first(), Some(&Value::Int(0)));
    assert_eq!(ordered.items().last(), Some(&Value::Int(39_999)));
}

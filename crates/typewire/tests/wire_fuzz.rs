// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Randomized wire-level checks: varint widths, fixed-width layouts and
// decoder robustness against arbitrary input.

#![allow(clippy::missing_panics_doc)]

use typewire::{
    Charset, FeatureContext, IdentityRegistry, ObjectValue, SizeMode, TypeSchemaBuilder,
    ValueShape, WireReader, WireWriter,
};

const ITERATIONS: usize = 2_000;

fn int_samples(rng: &mut fastrand::Rng) -> Vec<i32> {
    let mut samples = vec![i32::MIN, i32::MAX, -1, 0, 1, 127, 128, 16_383, 16_384];
    samples.extend((0..ITERATIONS).map(|_| rng.i32(..)));
    samples
}

fn long_samples(rng: &mut fastrand::Rng) -> Vec<i64> {
    let mut samples = vec![i64::MIN, i64::MAX, -1, 0, 1, 127, 128];
    samples.extend((0..ITERATIONS).map(|_| rng.i64(..)));
    samples
}

#[test]
fn var_int_round_trip_and_width() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    for value in int_samples(&mut rng) {
        let mut w = WireWriter::new();
        w.write_var_i32(value);
        let bytes = w.into_bytes();

        let expected_width = match value as u32 {
            0..=0x7F => 1,
            0x80..=0x3FFF => 2,
            0x4000..=0x1F_FFFF => 3,
            0x20_0000..=0x0FFF_FFFF => 4,
            _ => 5,
        };
        assert_eq!(bytes.len(), expected_width, "width of {value}");

        let mut r = WireReader::new(&bytes);
        assert_eq!(r.read_var_i32().unwrap(), value);
        assert!(r.is_empty());
    }
}

#[test]
fn var_long_round_trip() {
    let mut rng = fastrand::Rng::with_seed(0x1046);
    for value in long_samples(&mut rng) {
        let mut w = WireWriter::new();
        w.write_var_i64(value);
        let bytes = w.into_bytes();
        if value < 0 {
            assert_eq!(bytes.len(), 10, "negative longs take the full width");
        }
        let mut r = WireReader::new(&bytes);
        assert_eq!(r.read_var_i64().unwrap(), value);
        assert!(r.is_empty());
    }
}

#[test]
fn fixed_width_layouts_are_little_endian() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..ITERATIONS {
        let a = rng.i32(..);
        let b = rng.u64(..);
        let c = f64::from_bits(rng.u64(..));
        let mut w = WireWriter::new();
        w.write_i32_le(a);
        w.write_u64_le(b);
        w.write_f64_le(c);
        let bytes = w.into_bytes();
        assert_eq!(&bytes[..4], &a.to_le_bytes());
        assert_eq!(&bytes[4..12], &b.to_le_bytes());
        assert_eq!(&bytes[12..], &c.to_bits().to_le_bytes());

        let mut r = WireReader::new(&bytes);
        assert_eq!(r.read_i32_le().unwrap(), a);
        assert_eq!(r.read_u64_le().unwrap(), b);
        assert_eq!(r.read_f64_le().unwrap().to_bits(), c.to_bits());
    }
}

#[test]
fn random_ascii_strings_round_trip() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..200 {
        let len = rng.usize(0..64);
        let text: String = (0..len).map(|_| rng.alphanumeric()).collect();
        for charset in [Charset::Utf8, Charset::Latin1, Charset::Utf16Le] {
            let mut w = WireWriter::new();
            w.write_string(&text, charset, SizeMode::Variable);
            let bytes = w.into_bytes();
            let mut r = WireReader::new(&bytes);
            assert_eq!(r.read_string(charset, SizeMode::Variable).unwrap(), text);
            assert!(r.is_empty());
        }
    }
}

#[test]
fn arbitrary_input_never_panics() {
    let registry = IdentityRegistry::new();
    registry
        .register_schema(
            TypeSchemaBuilder::new("fuzz.Target")
                .field("id", ValueShape::long())
                .field("tag", ValueShape::string().fixed(4))
                .field("items", ValueShape::array_of(ValueShape::int()))
                .field("next", ValueShape::dynamic())
                .build(),
        )
        .unwrap();

    // Sanity: a valid payload still decodes.
    let target = ObjectValue::new("fuzz.Target")
        .with("id", 9i64)
        .with("tag", "abcd")
        .with("items", vec![1, 2])
        .with("next", typewire::Value::Null);
    let valid = registry
        .serialize("fuzz.Target", &target.into(), FeatureContext::new())
        .unwrap();
    assert!(registry
        .deserialize(Some("fuzz.Target"), &valid, FeatureContext::new())
        .is_ok());

    let mut rng = fastrand::Rng::with_seed(0xf022);
    for _ in 0..ITERATIONS {
        let len = rng.usize(0..48);
        let bytes: Vec<u8> = (0..len).map(|_| rng.u8(..)).collect();
        let _ = registry.deserialize(Some("fuzz.Target"), &bytes, FeatureContext::new());
        let _ = registry.deserialize(None, &bytes, FeatureContext::new());
    }
}

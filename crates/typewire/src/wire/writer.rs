// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Growable little-endian writer.

use super::{Charset, SizeMode};
use crate::config::ENVELOPE_VERSION;

/// Generate fixed-width little-endian write methods.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) {
            self.buffer.extend_from_slice(&value.to_le_bytes());
        }
    };
}

/// Append-only writer backing every encode call.
#[derive(Debug, Default, Clone)]
pub struct WireWriter {
    buffer: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    // Fixed widths
    impl_write_le!(write_u8, u8);
    impl_write_le!(write_i8, i8);
    impl_write_le!(write_u16_le, u16);
    impl_write_le!(write_i16_le, i16);
    impl_write_le!(write_u32_le, u32);
    impl_write_le!(write_i32_le, i32);
    impl_write_le!(write_u64_le, u64);
    impl_write_le!(write_i64_le, i64);

    pub fn write_bool(&mut self, value: bool) {
        self.buffer.push(u8::from(value));
    }

    pub fn write_f32_le(&mut self, value: f32) {
        self.write_u32_le(value.to_bits());
    }

    pub fn write_f64_le(&mut self, value: f64) {
        self.write_u64_le(value.to_bits());
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    // Varints

    pub fn write_var_u32(&mut self, mut value: u32) {
        while value >= 0x80 {
            self.buffer.push((value as u8) | 0x80);
            value >>= 7;
        }
        self.buffer.push(value as u8);
    }

    pub fn write_var_i32(&mut self, value: i32) {
        self.write_var_u32(value as u32);
    }

    pub fn write_var_u64(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buffer.push((value as u8) | 0x80);
            value >>= 7;
        }
        self.buffer.push(value as u8);
    }

    pub fn write_var_i64(&mut self, value: i64) {
        self.write_var_u64(value as u64);
    }

    pub fn write_var_f32(&mut self, value: f32) {
        self.write_var_u32(value.to_bits());
    }

    pub fn write_var_f64(&mut self, value: f64) {
        self.write_var_u64(value.to_bits());
    }

    /// Varint count prefix of a variable-size buffer or container.
    pub fn write_length(&mut self, len: usize) {
        self.write_var_u32(len as u32);
    }

    // Sized buffers

    /// Write raw bytes under `size`: prefixed, or truncated/zero-padded to `n`.
    pub fn write_byte_buffer(&mut self, data: &[u8], size: SizeMode) {
        match size {
            SizeMode::Variable => {
                self.write_length(data.len());
                self.write_bytes(data);
            }
            SizeMode::Fixed(n) => {
                let take = data.len().min(n);
                self.write_bytes(&data[..take]);
                self.buffer.resize(self.buffer.len() + (n - take), 0);
            }
        }
    }

    /// Write UTF-16 code units as 2-byte LE words under `size`.
    pub fn write_char_units(&mut self, units: &[u16], size: SizeMode) {
        let take = match size {
            SizeMode::Variable => {
                self.write_length(units.len());
                units.len()
            }
            SizeMode::Fixed(n) => units.len().min(n),
        };
        for &unit in &units[..take] {
            self.write_u16_le(unit);
        }
        if let SizeMode::Fixed(n) = size {
            self.buffer.resize(self.buffer.len() + (n - take) * 2, 0);
        }
    }

    /// Encode `value` with `charset`, then write it as a byte buffer.
    ///
    /// `Fixed(n)` counts bytes, so a multi-byte sequence may be cut.
    pub fn write_string(&mut self, value: &str, charset: Charset, size: SizeMode) {
        let encoded = charset.encode(value);
        self.write_byte_buffer(&encoded, size);
    }

    /// Write an envelope for `identifier` with the current version.
    pub fn write_envelope(&mut self, identifier: u32) {
        self.write_u32_le(identifier);
        self.write_u32_le(ENVELOPE_VERSION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_encoding() {
        let mut w = WireWriter::new();
        w.write_var_i32(300);
        assert_eq!(w.as_slice(), &[0xAC, 0x02]);

        let mut w = WireWriter::new();
        w.write_var_i32(-1);
        assert_eq!(w.as_slice(), &[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);

        let mut w = WireWriter::new();
        w.write_var_i64(-1);
        assert_eq!(w.len(), 10);
    }

    #[test]
    fn test_fixed_buffer_truncates_and_pads() {
        let mut w = WireWriter::new();
        w.write_string("Robinson", Charset::Utf8, SizeMode::Fixed(4));
        w.write_string("ab", Charset::Utf8, SizeMode::Fixed(4));
        assert_eq!(w.as_slice(), b"Robiab\0\0");
    }

    #[test]
    fn test_char_units_are_le_words() {
        let mut w = WireWriter::new();
        w.write_char_units(&[0x0041, 0x20AC], SizeMode::Variable);
        assert_eq!(w.as_slice(), &[0x02, 0x41, 0x00, 0xAC, 0x20]);

        let mut w = WireWriter::new();
        w.write_char_units(&[0x0041], SizeMode::Fixed(2));
        assert_eq!(w.as_slice(), &[0x41, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_envelope_layout() {
        let mut w = WireWriter::new();
        w.write_envelope(0x4ebd82e2);
        assert_eq!(w.as_slice(), &[0xe2, 0x82, 0xbd, 0x4e, 0, 0, 0, 0]);
    }
}

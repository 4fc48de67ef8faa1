// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounds-checked little-endian reader.

use super::{Charset, SizeMode};
use crate::config::{VARINT_BITS, VARLONG_BITS};
use crate::error::{Error, Result};

/// Generate fixed-width little-endian read methods.
///
/// Each generated method checks bounds, decodes `$size` bytes via
/// `from_le_bytes()` and advances the offset.
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type> {
            let bytes = self.take($size)?;
            let mut raw = [0u8; $size];
            raw.copy_from_slice(bytes);
            Ok(<$type>::from_le_bytes(raw))
        }
    };
}

/// Forward-only cursor over an encoded buffer.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::UnexpectedEndOfStream {
                offset: self.offset,
                needed: len - self.remaining(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    // Fixed widths
    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_i8, i8, 1);
    impl_read_le!(read_u16_le, u16, 2);
    impl_read_le!(read_i16_le, i16, 2);
    impl_read_le!(read_u32_le, u32, 4);
    impl_read_le!(read_i32_le, i32, 4);
    impl_read_le!(read_u64_le, u64, 8);
    impl_read_le!(read_i64_le, i64, 8);

    /// Any nonzero byte reads as `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_f32_le(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32_le()?))
    }

    pub fn read_f64_le(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64_le()?))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    // Varints

    pub fn read_var_u32(&mut self) -> Result<u32> {
        let start = self.offset;
        let mut value = 0u32;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift >= VARINT_BITS {
                return Err(Error::VarIntTooLarge { offset: start });
            }
        }
    }

    pub fn read_var_i32(&mut self) -> Result<i32> {
        Ok(self.read_var_u32()? as i32)
    }

    pub fn read_var_u64(&mut self) -> Result<u64> {
        let start = self.offset;
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            value |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift >= VARLONG_BITS {
                return Err(Error::VarLongTooLarge { offset: start });
            }
        }
    }

    pub fn read_var_i64(&mut self) -> Result<i64> {
        Ok(self.read_var_u64()? as i64)
    }

    pub fn read_var_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_var_u32()?))
    }

    pub fn read_var_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_var_u64()?))
    }

    /// Varint count prefix; negative counts are rejected.
    pub fn read_length(&mut self) -> Result<usize> {
        let offset = self.offset;
        let length = self.read_var_i32()?;
        usize::try_from(length).map_err(|_| Error::InvalidLength { offset, length })
    }

    /// Unit count to read under `size`.
    pub fn read_count(&mut self, size: SizeMode) -> Result<usize> {
        match size {
            SizeMode::Variable => self.read_length(),
            SizeMode::Fixed(n) => Ok(n),
        }
    }

    // Sized buffers

    pub fn read_byte_buffer(&mut self, size: SizeMode) -> Result<Vec<u8>> {
        let len = self.read_count(size)?;
        Ok(self.take(len)?.to_vec())
    }

    pub fn read_char_units(&mut self, size: SizeMode) -> Result<Vec<u16>> {
        let len = self.read_count(size)?;
        let bytes = self.take(len.saturating_mul(2))?;
        Ok(bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }

    /// Read a byte-encoded string.
    ///
    /// Under `Fixed(n)` the whole `n`-byte window is consumed and only the
    /// prefix before the first zero unit is decoded.
    pub fn read_string(&mut self, charset: Charset, size: SizeMode) -> Result<String> {
        match size {
            SizeMode::Variable => {
                let len = self.read_length()?;
                Ok(charset.decode(self.take(len)?))
            }
            SizeMode::Fixed(n) => {
                let window = self.take(n)?;
                let end = charset.terminated_len(window);
                Ok(charset.decode(&window[..end]))
            }
        }
    }

    /// Read an envelope, returning `(identifier, version)` unchecked.
    pub fn read_envelope(&mut self) -> Result<(u32, u32)> {
        let identifier = self.read_u32_le()?;
        let version = self.read_u32_le()?;
        Ok((identifier, version))
    }
}

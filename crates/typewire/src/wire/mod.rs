// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire primitives: little-endian fixed widths, base-128 varints and
//! sized byte/char/string buffers.
//!
//! # Format
//!
//! | Item            | Encoding                                             |
//! |-----------------|------------------------------------------------------|
//! | bool / byte     | 1 byte                                               |
//! | short / char    | 2 bytes LE                                           |
//! | int / float     | 4 bytes LE, or varint of the (raw) bits              |
//! | long / double   | 8 bytes LE, or varint of the (raw) bits              |
//! | Variable buffer | varint unit count, then the units                    |
//! | Fixed(n) buffer | exactly n units, truncated or zero-padded            |
//! | Envelope        | 4-byte LE identifier, 4-byte LE version (always 0)   |
//!
//! Varints carry 7 data bits per byte, least-significant group first, with
//! the high bit set when more bytes follow. There is no zigzag step, so a
//! negative int always takes the full 5 bytes.

mod charset;
mod reader;
mod writer;

pub use charset::Charset;
pub use reader::WireReader;
pub use writer::WireWriter;

/// Size mode of a buffer, container or numeric field.
///
/// For buffers and containers `Fixed(n)` is an exact unit count. For numeric
/// primitives any `Fixed` selects the fixed-width encoding and `n` is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeMode {
    /// Varint prefix (containers, buffers) or varint packing (numbers).
    #[default]
    Variable,
    /// Exactly `n` units, no prefix.
    Fixed(usize),
}

impl SizeMode {
    /// Fixed mode for numeric primitives, where the count is irrelevant.
    pub const FIXED_WIDTH: SizeMode = SizeMode::Fixed(0);

    pub fn is_variable(self) -> bool {
        matches!(self, SizeMode::Variable)
    }

    /// Apply a runtime variable-size override.
    pub fn forced(self, force_variable: bool) -> SizeMode {
        if force_variable {
            SizeMode::Variable
        } else {
            self
        }
    }
}

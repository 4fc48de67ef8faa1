// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire constants and schema defaults.
//!
//! All wire-level magic numbers live here. **Never hardcode them elsewhere.**
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: compile-time wire constants (envelope layout,
//!   varint budgets, identifier hash parameters, nesting limit)
//! - **Level 2 (Per schema)**: [`SchemaDefaults`], the values a [`TypeSchema`]
//!   starts from when its author leaves an attribute unset
//!
//! Per-call overrides are not configuration; they travel in a
//! [`FeatureContext`](crate::FeatureContext).
//!
//! [`TypeSchema`]: crate::TypeSchema

use crate::schema::AccessorStrategy;

// =======================================================================
// Envelope
// =======================================================================

/// Envelope length on the wire: 4-byte identifier + 4-byte version.
pub const ENVELOPE_LEN: usize = 8;

/// Only envelope version accepted on decode (always written on encode).
pub const ENVELOPE_VERSION: u32 = 0;

/// Identifier written in place of a type identifier for a null object.
///
/// Never assigned to a registered type.
pub const NULL_IDENTIFIER: u32 = 0;

// =======================================================================
// Identifier hash (32-bit FNV-1a over UTF-16 code units)
// =======================================================================

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

// =======================================================================
// Varint budgets
// =======================================================================

/// Meaningful bits of a varint-encoded int.
pub const VARINT_BITS: u32 = 32;

/// Meaningful bits of a varint-encoded long.
pub const VARLONG_BITS: u32 = 64;

// =======================================================================
// Object graph
// =======================================================================

/// Deepest object nesting accepted by encode and decode.
pub const MAX_NESTING_DEPTH: usize = 64;

// =======================================================================
// Schema defaults
// =======================================================================

/// Attribute values a schema inherits when left unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaDefaults {
    /// How decoded objects are assembled.
    pub accessor: AccessorStrategy,
    /// Numeric shapes without an explicit size mode are varints.
    pub variable_size: bool,
    /// Zero/empty decodes to null unless a field overrides it.
    pub null_is_zero_or_empty: bool,
    /// Emit the envelope even at concrete positions.
    pub include_header: bool,
}

impl SchemaDefaults {
    pub const fn new() -> Self {
        Self {
            accessor: AccessorStrategy::Constructor,
            variable_size: true,
            null_is_zero_or_empty: true,
            include_header: false,
        }
    }
}

impl Default for SchemaDefaults {
    fn default() -> Self {
        Self::new()
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for schema registration and wire encoding/decoding.
//!
//! Errors fall into two groups:
//!
//! - **Schema-build errors** (`UnsupportedShape`, `InvalidImplementationHint`,
//!   `UnsupportedCharset`, `DuplicateIdentifier`, `NoAccessibleAccessor`) are
//!   raised by [`IdentityRegistry::register_schema`](crate::IdentityRegistry::register_schema)
//!   and never surface from a serialize/deserialize call on a registered type.
//! - **Per-call errors** (stream, envelope and value errors) abort the call that
//!   produced them. No partial value is ever returned.

use crate::feature::Feature;

/// Unified error type for the crate.
///
/// # Example
///
/// ```rust
/// use typewire::{Error, WireReader};
///
/// let mut reader = WireReader::new(&[0x80, 0x80]);
/// match reader.read_var_u32() {
///     Err(Error::UnexpectedEndOfStream { offset, .. }) => assert_eq!(offset, 2),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug)]
pub enum Error {
    // ========================================================================
    // Stream Errors
    // ========================================================================
    /// Stream ended while `needed` more bytes were required at `offset`.
    UnexpectedEndOfStream { offset: usize, needed: usize },
    /// Varint continuation ran past 32 meaningful bits.
    VarIntTooLarge { offset: usize },
    /// Varint continuation ran past 64 meaningful bits.
    VarLongTooLarge { offset: usize },
    /// A length or count prefix decoded to a negative value.
    InvalidLength { offset: usize, length: i32 },

    // ========================================================================
    // Envelope Errors
    // ========================================================================
    /// Envelope carried a different identifier than the decoding type.
    InvalidObjectIdentifier { expected: u32, found: u32 },
    /// Envelope version other than 0.
    UnsupportedVersion(u32),
    /// Polymorphic decode hit an identifier with no registered type.
    UnknownObjectIdentifier(u32),

    // ========================================================================
    // Schema Errors
    // ========================================================================
    /// Two distinct types resolve to the same identifier.
    DuplicateIdentifier {
        identifier: u32,
        existing: String,
        incoming: String,
    },
    /// Header policy enabled while the opposite policy is active.
    ConflictingFeatures { requested: Feature, active: Feature },
    /// Shape cannot be mapped to a codec.
    UnsupportedShape(String),
    /// Collection or map implementation hint is anonymous or unknown.
    InvalidImplementationHint(String),
    /// Field has no usable accessor under the configured strategy.
    NoAccessibleAccessor { type_name: String, field: String },
    /// Charset name not supported by the string codecs.
    UnsupportedCharset(String),
    /// Type name has no schema, neither registered nor resolvable.
    UnregisteredType(String),
    /// Malformed schema document.
    SchemaDocument(String),

    // ========================================================================
    // Value Errors
    // ========================================================================
    /// Value does not match the declared shape.
    ValueMismatch { expected: String, found: String },
    /// Decoded enum ordinal is outside the constant table.
    InvalidEnumOrdinal { enum_name: String, ordinal: i32 },
    /// Enum constant name not declared by the enum.
    UnknownEnumConstant { enum_name: String, constant: String },
    /// Mutation attempted on a read-only container.
    UnmodifiableContainer,
    /// Object graph nested deeper than `limit`.
    NestingTooDeep { limit: usize },

    // ========================================================================
    // Other Errors
    // ========================================================================
    /// I/O error from a stream adapter.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Stream
            Error::UnexpectedEndOfStream { offset, needed } => write!(
                f,
                "Unexpected end of stream at offset {} ({} more bytes needed)",
                offset, needed
            ),
            Error::VarIntTooLarge { offset } => {
                write!(f, "VarInt too large at offset {}", offset)
            }
            Error::VarLongTooLarge { offset } => {
                write!(f, "VarLong too large at offset {}", offset)
            }
            Error::InvalidLength { offset, length } => {
                write!(f, "Invalid length {} at offset {}", length, offset)
            }
            // Envelope
            Error::InvalidObjectIdentifier { expected, found } => write!(
                f,
                "Invalid object identifier: expected 0x{:08x}, found 0x{:08x}",
                expected, found
            ),
            Error::UnsupportedVersion(v) => {
                write!(f, "Unsupported version {} (versioning not yet supported)", v)
            }
            Error::UnknownObjectIdentifier(id) => {
                write!(f, "Unknown object identifier 0x{:08x}", id)
            }
            // Schema
            Error::DuplicateIdentifier {
                identifier,
                existing,
                incoming,
            } => write!(
                f,
                "Duplicate identifier 0x{:08x}: {} already bound to {}",
                identifier, incoming, existing
            ),
            Error::ConflictingFeatures { requested, active } => write!(
                f,
                "Conflicting features {:?} and {:?}",
                requested, active
            ),
            Error::UnsupportedShape(msg) => write!(f, "Unsupported shape: {}", msg),
            Error::InvalidImplementationHint(hint) => {
                write!(f, "Invalid implementation hint: {}", hint)
            }
            Error::NoAccessibleAccessor { type_name, field } => {
                write!(f, "{}.{} has no accessor", type_name, field)
            }
            Error::UnsupportedCharset(name) => write!(f, "Unsupported charset: {}", name),
            Error::UnregisteredType(name) => write!(f, "No schema registered for {}", name),
            Error::SchemaDocument(msg) => write!(f, "Schema document error: {}", msg),
            // Value
            Error::ValueMismatch { expected, found } => {
                write!(f, "Value mismatch: expected {}, found {}", expected, found)
            }
            Error::InvalidEnumOrdinal { enum_name, ordinal } => {
                write!(f, "Invalid ordinal {} for enum {}", ordinal, enum_name)
            }
            Error::UnknownEnumConstant {
                enum_name,
                constant,
            } => write!(f, "Unknown constant '{}' for enum {}", constant, enum_name),
            Error::UnmodifiableContainer => write!(f, "Container is unmodifiable"),
            Error::NestingTooDeep { limit } => {
                write!(f, "Object nesting exceeds {} levels", limit)
            }
            // Other
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// Convenient alias for results using the crate [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_hex_identifier() {
        let err = Error::UnknownObjectIdentifier(0x4ebd82e2);
        assert_eq!(err.to_string(), "Unknown object identifier 0x4ebd82e2");
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(err.source().is_some());
        assert!(Error::UnmodifiableContainer.source().is_none());
    }
}

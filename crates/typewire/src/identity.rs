// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type identifiers.
//!
//! An identifier is the 32-bit FNV-1a hash of a type's fully qualified name,
//! folded over its UTF-16 code units. It doubles as the on-wire envelope tag,
//! so any implementation hashing the same name must land on the same value.

use crate::config::{FNV_OFFSET_BASIS, FNV_PRIME, NULL_IDENTIFIER};

/// Compute the identifier for a fully qualified type name.
///
/// ```rust
/// assert_eq!(typewire::identifier_for(""), 0x811c9dc5);
/// assert_eq!(typewire::identifier_for("Customer"), 0x09f3c039);
/// ```
pub fn identifier_for(qualified_name: &str) -> u32 {
    qualified_name
        .encode_utf16()
        .fold(FNV_OFFSET_BASIS, |hash, unit| {
            (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
        })
}

/// Explicit identifier when set (nonzero), derived identifier otherwise.
pub fn resolve_identifier(qualified_name: &str, explicit: Option<u32>) -> u32 {
    match explicit {
        Some(id) if id != NULL_IDENTIFIER => id,
        _ => identifier_for(qualified_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_identifiers() {
        assert_eq!(
            identifier_for("org.gittorr.ccerial.fixed.pojos.Customer"),
            0x4ebd82e2
        );
        assert_eq!(
            identifier_for("org.gittorr.ccerial.nested.objects.OrderItem"),
            0xc032b7b9
        );
    }

    #[test]
    fn test_explicit_zero_means_derive() {
        assert_eq!(resolve_identifier("Customer", Some(0)), 0x09f3c039);
        assert_eq!(resolve_identifier("Customer", None), 0x09f3c039);
        assert_eq!(resolve_identifier("Customer", Some(42)), 42);
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-call feature overrides.
//!
//! A [`FeatureContext`] is built by the caller before a serialize/deserialize
//! call and copied unchanged into every nested codec reached from that call.

use crate::error::{Error, Result};

/// Runtime-overridable behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Emit/expect an envelope on every object, including concrete positions.
    ForceHeaders,
    /// Omit envelopes on objects whose schema asks for one.
    SkipHeaders,
    /// Treat every fixed-size field as variable-size.
    ForceVariableSize,
    /// Decode zero/empty values as null regardless of schema policy.
    ForceZeroOrEmptyAsNull,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::ForceHeaders,
        Feature::SkipHeaders,
        Feature::ForceVariableSize,
        Feature::ForceZeroOrEmptyAsNull,
    ];

    fn bit(self) -> u8 {
        match self {
            Feature::ForceHeaders => 0b0001,
            Feature::SkipHeaders => 0b0010,
            Feature::ForceVariableSize => 0b0100,
            Feature::ForceZeroOrEmptyAsNull => 0b1000,
        }
    }

    /// The mutually exclusive counterpart, if any.
    pub fn opposite(self) -> Option<Feature> {
        match self {
            Feature::ForceHeaders => Some(Feature::SkipHeaders),
            Feature::SkipHeaders => Some(Feature::ForceHeaders),
            _ => None,
        }
    }
}

/// Set of enabled [`Feature`]s.
///
/// # Example
///
/// ```rust
/// use typewire::{Feature, FeatureContext};
///
/// let mut ctx = FeatureContext::new();
/// ctx.set_feature(Feature::ForceHeaders, true).unwrap();
/// assert!(ctx.set_feature(Feature::SkipHeaders, true).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeatureContext {
    bits: u8,
}

impl FeatureContext {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Enable or disable `feature`.
    ///
    /// Enabling a header policy while the opposite one is active fails with
    /// [`Error::ConflictingFeatures`] and leaves the context unchanged.
    pub fn set_feature(&mut self, feature: Feature, enabled: bool) -> Result<()> {
        if enabled {
            if let Some(opposite) = feature.opposite() {
                if self.is_feature_enabled(opposite) {
                    return Err(Error::ConflictingFeatures {
                        requested: feature,
                        active: opposite,
                    });
                }
            }
            self.bits |= feature.bit();
        } else {
            self.bits &= !feature.bit();
        }
        Ok(())
    }

    /// Builder-style [`set_feature`](Self::set_feature).
    pub fn with(mut self, feature: Feature) -> Result<Self> {
        self.set_feature(feature, true)?;
        Ok(self)
    }

    pub fn is_feature_enabled(&self, feature: Feature) -> bool {
        self.bits & feature.bit() != 0
    }

    pub fn force_headers(&self) -> bool {
        self.is_feature_enabled(Feature::ForceHeaders)
    }

    pub fn skip_headers(&self) -> bool {
        self.is_feature_enabled(Feature::SkipHeaders)
    }

    pub fn force_variable_size(&self) -> bool {
        self.is_feature_enabled(Feature::ForceVariableSize)
    }

    pub fn force_zero_or_empty_as_null(&self) -> bool {
        self.is_feature_enabled(Feature::ForceZeroOrEmptyAsNull)
    }

    /// Whether an object writes/expects an envelope.
    ///
    /// `forced` marks positions whose static type is unknown; those always
    /// carry one.
    pub fn envelope_required(&self, include_header: bool, forced: bool) -> bool {
        forced || ((include_header || self.force_headers()) && !self.skip_headers())
    }

    /// Enabled features, in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL
            .into_iter()
            .filter(move |f| self.is_feature_enabled(*f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_policies_conflict() {
        let mut ctx = FeatureContext::new();
        ctx.set_feature(Feature::SkipHeaders, true).unwrap();
        let err = ctx.set_feature(Feature::ForceHeaders, true).unwrap_err();
        assert!(matches!(
            err,
            Error::ConflictingFeatures {
                requested: Feature::ForceHeaders,
                active: Feature::SkipHeaders
            }
        ));
        assert!(!ctx.force_headers());

        // Disabling never conflicts, and clears the way
        ctx.set_feature(Feature::ForceHeaders, false).unwrap();
        ctx.set_feature(Feature::SkipHeaders, false).unwrap();
        ctx.set_feature(Feature::ForceHeaders, true).unwrap();
        assert!(ctx.force_headers());
    }

    #[test]
    fn test_independent_flags() {
        let ctx = FeatureContext::new()
            .with(Feature::ForceVariableSize)
            .and_then(|c| c.with(Feature::ForceZeroOrEmptyAsNull))
            .and_then(|c| c.with(Feature::SkipHeaders))
            .unwrap();
        assert_eq!(
            ctx.enabled().collect::<Vec<_>>(),
            vec![
                Feature::SkipHeaders,
                Feature::ForceVariableSize,
                Feature::ForceZeroOrEmptyAsNull
            ]
        );
    }

    #[test]
    fn test_envelope_required() {
        let plain = FeatureContext::new();
        assert!(!plain.envelope_required(false, false));
        assert!(plain.envelope_required(true, false));

        let skip = FeatureContext::new().with(Feature::SkipHeaders).unwrap();
        assert!(!skip.envelope_required(true, false));
        assert!(skip.envelope_required(false, true));

        let force = FeatureContext::new().with(Feature::ForceHeaders).unwrap();
        assert!(force.envelope_required(false, false));
    }
}

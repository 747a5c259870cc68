// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Bounds applied to the live transform after every gesture update.
///
/// The defaults keep the map between half and triple size and never let it
/// drift more than 500 units from its resting position, which is enough to
/// keep part of a screen-sized image visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformLimits {
    /// Smallest allowed scale factor.
    pub min_scale: f64,
    /// Largest allowed scale factor.
    pub max_scale: f64,
    /// Largest allowed absolute translation on either axis.
    pub max_offset: f64,
}

impl TransformLimits {
    /// Default minimum scale factor.
    pub const DEFAULT_MIN_SCALE: f64 = 0.5;
    /// Default maximum scale factor.
    pub const DEFAULT_MAX_SCALE: f64 = 3.0;
    /// Default translation bound, in the caller's translation unit (points).
    pub const DEFAULT_MAX_OFFSET: f64 = 500.0;

    /// Creates limits from explicit values.
    ///
    /// The result is normalized: see [`TransformLimits::normalized`].
    #[must_use]
    pub fn new(min_scale: f64, max_scale: f64, max_offset: f64) -> Self {
        Self {
            min_scale,
            max_scale,
            max_offset,
        }
        .normalized()
    }

    /// Returns a copy that is safe to clamp against.
    ///
    /// - Non-finite or non-positive scale bounds fall back to the defaults.
    /// - The scale bounds are swapped if needed so that `min_scale <= max_scale`.
    /// - `max_offset` is made non-negative; a non-finite value falls back to
    ///   the default.
    #[must_use]
    pub fn normalized(self) -> Self {
        let min_scale = if self.min_scale.is_finite() && self.min_scale > 0.0 {
            self.min_scale
        } else {
            Self::DEFAULT_MIN_SCALE
        };
        let max_scale = if self.max_scale.is_finite() && self.max_scale > 0.0 {
            self.max_scale
        } else {
            Self::DEFAULT_MAX_SCALE
        };
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        let max_offset = if self.max_offset.is_finite() {
            self.max_offset.abs()
        } else {
            Self::DEFAULT_MAX_OFFSET
        };
        Self {
            min_scale,
            max_scale,
            max_offset,
        }
    }

    /// Clamps a scale factor into `[min_scale, max_scale]`.
    ///
    /// NaN is passed through unchanged so callers can detect it.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Clamps one translation component into `[-max_offset, max_offset]`.
    #[must_use]
    pub fn clamp_offset(&self, offset: f64) -> f64 {
        offset.clamp(-self.max_offset, self.max_offset)
    }
}

impl Default for TransformLimits {
    fn default() -> Self {
        Self {
            min_scale: Self::DEFAULT_MIN_SCALE,
            max_scale: Self::DEFAULT_MAX_SCALE,
            max_offset: Self::DEFAULT_MAX_OFFSET,
        }
    }
}

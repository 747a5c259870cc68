// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How the displayed heading relates to the smoothed device heading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayPolicy {
    /// Show the device heading as-is; map rotation does not move the needle.
    #[default]
    DeviceHeading,
    /// Add the map north offset, so the needle turns with the map.
    MapLocked,
}

/// Tuning for [`HeadingFilter`](crate::HeadingFilter).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadingConfig {
    /// Exponential smoothing factor in `[0, 1]`. `1.0` passes samples
    /// through, `0.0` holds the current heading.
    pub smoothing_factor: f64,
    /// Largest accepted sample accuracy, in degrees.
    pub max_accuracy: f64,
    /// How the displayed heading is derived.
    pub display_policy: DisplayPolicy,
}

impl HeadingConfig {
    /// Default smoothing factor; settles in roughly 150 to 300 ms at common
    /// sensor rates.
    pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.15;
    /// Default accuracy gate, in degrees.
    pub const DEFAULT_MAX_ACCURACY: f64 = 25.0;

    /// Returns a copy with out-of-range values repaired.
    ///
    /// The smoothing factor is clamped into `[0, 1]` and the accuracy gate
    /// made non-negative; NaN or infinite values fall back to the defaults.
    #[must_use]
    pub fn normalized(self) -> Self {
        let smoothing_factor = if self.smoothing_factor.is_finite() {
            self.smoothing_factor.clamp(0.0, 1.0)
        } else {
            Self::DEFAULT_SMOOTHING_FACTOR
        };
        let max_accuracy = if self.max_accuracy.is_finite() {
            self.max_accuracy.abs()
        } else {
            Self::DEFAULT_MAX_ACCURACY
        };
        Self {
            smoothing_factor,
            max_accuracy,
            display_policy: self.display_policy,
        }
    }

    /// Whether a sample with this accuracy passes the gate.
    #[must_use]
    pub fn accepts_accuracy(&self, accuracy: f64) -> bool {
        (0.0..=self.max_accuracy).contains(&accuracy)
    }
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: Self::DEFAULT_SMOOTHING_FACTOR,
            max_accuracy: Self::DEFAULT_MAX_ACCURACY,
            display_policy: DisplayPolicy::default(),
        }
    }
}

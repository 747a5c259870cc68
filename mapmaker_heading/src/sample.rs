// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inbound sensor messages.

use core::fmt;

/// One raw reading from the heading sensor.
///
/// Platforms report a true-north heading when location is known and a
/// magnetic heading always. A negative `true_heading` means true north is not
/// available. A negative `accuracy` marks the whole sample as invalid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadingSample {
    /// Heading relative to true north in degrees, or negative if unavailable.
    pub true_heading: f64,
    /// Heading relative to magnetic north in degrees.
    pub magnetic_heading: f64,
    /// Maximum deviation of the heading in degrees, or negative if invalid.
    pub accuracy: f64,
}

impl HeadingSample {
    /// Creates a sample from the separate true and magnetic readings.
    #[must_use]
    pub fn new(true_heading: f64, magnetic_heading: f64, accuracy: f64) -> Self {
        Self {
            true_heading,
            magnetic_heading,
            accuracy,
        }
    }

    /// Creates a sample whose north reference was already chosen upstream.
    #[must_use]
    pub fn resolved(heading: f64, accuracy: f64) -> Self {
        Self::new(heading, heading, accuracy)
    }

    /// The heading the filter should use: true north when it is available
    /// (finite and non-negative), magnetic north otherwise.
    #[must_use]
    pub fn raw_heading(&self) -> f64 {
        if self.true_heading.is_finite() && self.true_heading >= 0.0 {
            self.true_heading
        } else {
            self.magnetic_heading
        }
    }
}

/// Authorization state reported by the platform location service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Authorization {
    /// The user has not been asked yet.
    #[default]
    NotDetermined,
    /// Heading updates may be requested.
    Authorized,
    /// The user or a policy refused access.
    DeniedOrRestricted,
}

/// Category of a platform sensor failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SensorErrorKind {
    /// The service could not determine a reading right now.
    LocationUnknown,
    /// Access was denied while updates were running.
    Denied,
    /// The heading could not be determined, typically from strong magnetic
    /// interference.
    HeadingFailure,
    /// Any other platform error code.
    Other(i32),
}

/// A failure reported by the platform sensor.
///
/// Failures are informational: the filter reports them to its trace sink and
/// keeps its state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorError {
    /// What went wrong.
    pub kind: SensorErrorKind,
}

impl SensorError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: SensorErrorKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SensorErrorKind::LocationUnknown => f.write_str("heading sensor has no reading yet"),
            SensorErrorKind::Denied => f.write_str("heading sensor access was denied"),
            SensorErrorKind::HeadingFailure => {
                f.write_str("heading could not be determined (magnetic interference)")
            }
            SensorErrorKind::Other(code) => write!(f, "heading sensor failed with code {code}"),
        }
    }
}

impl core::error::Error for SensorError {}

/// Everything the sensor source can tell the filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SensorEvent {
    /// A new heading reading.
    HeadingSample(HeadingSample),
    /// The authorization state changed.
    AuthorizationChanged(Authorization),
    /// The sensor can no longer deliver headings.
    Unavailable,
    /// The platform reported a failure.
    Failed(SensorError),
}

impl From<HeadingSample> for SensorEvent {
    fn from(sample: HeadingSample) -> Self {
        Self::HeadingSample(sample)
    }
}

impl From<Authorization> for SensorEvent {
    fn from(state: Authorization) -> Self {
        Self::AuthorizationChanged(state)
    }
}

impl From<SensorError> for SensorEvent {
    fn from(error: SensorError) -> Self {
        Self::Failed(error)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn prefers_true_north_when_available() {
        assert_eq!(HeadingSample::new(12.0, 15.0, 5.0).raw_heading(), 12.0);
        assert_eq!(HeadingSample::new(0.0, 15.0, 5.0).raw_heading(), 0.0);
    }

    #[test]
    fn falls_back_to_magnetic() {
        assert_eq!(HeadingSample::new(-1.0, 15.0, 5.0).raw_heading(), 15.0);
        assert_eq!(HeadingSample::new(f64::NAN, 15.0, 5.0).raw_heading(), 15.0);
    }

    #[test]
    fn resolved_uses_single_heading() {
        let sample = HeadingSample::resolved(270.0, 3.0);
        assert_eq!(sample.raw_heading(), 270.0);
        assert_eq!(sample.accuracy, 3.0);
    }

    #[test]
    fn errors_display_their_kind() {
        let error = SensorError::new(SensorErrorKind::Other(7));
        assert_eq!(error.to_string(), "heading sensor failed with code 7");
        let event: SensorEvent = error.into();
        assert_eq!(event, SensorEvent::Failed(error));
    }
}

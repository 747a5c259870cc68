// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured tracing for [`HeadingFilter`](crate::HeadingFilter).
//!
//! Like the transform, the filter does not log. It reports heading changes,
//! activity transitions, dropped samples, and sensor failures to a
//! caller-supplied [`HeadingTrace`]. `()` discards everything and
//! [`HeadingLog`] keeps it all.

use alloc::vec::Vec;

use crate::sample::{HeadingSample, SensorError};

/// A heading value that can change.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HeadingField {
    /// The smoothed device heading.
    Smoothed,
    /// The heading shown to the user.
    Displayed,
    /// The map north offset.
    MapNorthOffset,
}

/// Why a heading value changed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HeadingReason {
    /// An accepted sensor sample.
    Sample,
    /// A new map north offset.
    MapNorthOffset,
    /// A non-finite input was replaced by its default.
    Repaired,
    /// The configuration changed.
    ConfigChanged,
}

/// One structured heading change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HeadingChange {
    /// The value that changed.
    pub field: HeadingField,
    /// Value before the change, in degrees.
    pub old: f64,
    /// Value after the change, in degrees.
    pub new: f64,
    /// Why it changed.
    pub reason: HeadingReason,
}

/// Why the filter switched on or off.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ActivityReason {
    /// The user asked for it.
    Requested,
    /// The device has no heading hardware.
    HardwareUnavailable,
    /// Authorization was denied or restricted.
    AuthorizationDenied,
    /// The sensor source reported that it can no longer deliver headings.
    SensorUnavailable,
}

/// Why a sample was dropped.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SampleRejection {
    /// The filter is not active.
    Inactive,
    /// Accuracy was negative (invalid) or above the configured maximum.
    AccuracyOutOfRange,
    /// The resolved heading was NaN or infinite.
    InvalidHeading,
}

/// A callback sink for heading filter events.
///
/// Every method defaults to doing nothing.
pub trait HeadingTrace {
    /// Called after a heading value changed.
    fn changed(&mut self, change: HeadingChange) {
        let _ = change;
    }

    /// Called when the filter switched on or off.
    fn activity(&mut self, active: bool, reason: ActivityReason) {
        let _ = (active, reason);
    }

    /// Called when a sample was dropped.
    fn sample_rejected(&mut self, sample: HeadingSample, rejection: SampleRejection) {
        let _ = (sample, rejection);
    }

    /// Called when the platform reported a sensor failure.
    fn sensor_error(&mut self, error: &SensorError) {
        let _ = error;
    }
}

impl HeadingTrace for () {}

impl<T: HeadingTrace + ?Sized> HeadingTrace for &mut T {
    fn changed(&mut self, change: HeadingChange) {
        (**self).changed(change);
    }

    fn activity(&mut self, active: bool, reason: ActivityReason) {
        (**self).activity(active, reason);
    }

    fn sample_rejected(&mut self, sample: HeadingSample, rejection: SampleRejection) {
        (**self).sample_rejected(sample, rejection);
    }

    fn sensor_error(&mut self, error: &SensorError) {
        (**self).sensor_error(error);
    }
}

/// A record kept by [`HeadingLog`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HeadingEvent {
    /// See [`HeadingTrace::changed`].
    Changed(HeadingChange),
    /// See [`HeadingTrace::activity`].
    Activity {
        /// New activity state.
        active: bool,
        /// Why it changed.
        reason: ActivityReason,
    },
    /// See [`HeadingTrace::sample_rejected`].
    Rejected {
        /// The dropped sample.
        sample: HeadingSample,
        /// Why it was dropped.
        rejection: SampleRejection,
    },
    /// See [`HeadingTrace::sensor_error`].
    SensorError(SensorError),
}

/// Records every trace callback in order.
#[derive(Clone, Debug, Default)]
pub struct HeadingLog {
    events: Vec<HeadingEvent>,
}

impl HeadingLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[HeadingEvent] {
        &self.events
    }

    /// Rejections recorded so far.
    pub fn rejections(&self) -> impl Iterator<Item = SampleRejection> + '_ {
        self.events.iter().filter_map(|event| match event {
            HeadingEvent::Rejected { rejection, .. } => Some(*rejection),
            _ => None,
        })
    }

    /// Clears all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl HeadingTrace for HeadingLog {
    fn changed(&mut self, change: HeadingChange) {
        self.events.push(HeadingEvent::Changed(change));
    }

    fn activity(&mut self, active: bool, reason: ActivityReason) {
        self.events.push(HeadingEvent::Activity { active, reason });
    }

    fn sample_rejected(&mut self, sample: HeadingSample, rejection: SampleRejection) {
        self.events.push(HeadingEvent::Rejected { sample, rejection });
    }

    fn sensor_error(&mut self, error: &SensorError) {
        self.events.push(HeadingEvent::SensorError(*error));
    }
}

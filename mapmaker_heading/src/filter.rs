// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::PI;

use kurbo::Vec2;

use crate::config::{DisplayPolicy, HeadingConfig};
use crate::sample::{Authorization, HeadingSample, SensorError, SensorEvent};
use crate::sensor::HeadingSensor;
use crate::trace::{
    ActivityReason, HeadingChange, HeadingField, HeadingReason, HeadingTrace, SampleRejection,
};

/// Smoothed compass heading with sensor activity gating.
///
/// The filter owns three angles, all in degrees:
/// - the **smoothed** device heading, in `[0, 360)`;
/// - the **map north offset**, set from the map rotation or by the user;
/// - the **displayed** heading, in `[0, 360)`, derived from the other two
///   according to [`DisplayPolicy`].
///
/// Samples only have an effect while the filter is active. Activation is
/// advisory to the sensor: turning the filter on starts sensor updates,
/// turning it off stops them, and each transition issues exactly one request.
#[derive(Clone, Debug)]
pub struct HeadingFilter<T = ()> {
    config: HeadingConfig,
    smoothed_heading: f64,
    map_north_offset: f64,
    displayed_heading: f64,
    active: bool,
    trace: T,
}

impl HeadingFilter {
    /// Creates an inactive filter with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_trace(())
    }
}

impl Default for HeadingFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HeadingTrace> HeadingFilter<T> {
    /// Creates an inactive filter that reports to `trace`.
    #[must_use]
    pub fn with_trace(trace: T) -> Self {
        Self {
            config: HeadingConfig::default(),
            smoothed_heading: 0.0,
            map_north_offset: 0.0,
            displayed_heading: 0.0,
            active: false,
            trace,
        }
    }

    /// Returns the smoothed device heading in `[0, 360)`.
    #[must_use]
    pub fn smoothed_heading(&self) -> f64 {
        self.smoothed_heading
    }

    /// Returns the map north offset in degrees.
    #[must_use]
    pub fn map_north_offset(&self) -> f64 {
        self.map_north_offset
    }

    /// Returns the heading to show, in `[0, 360)`.
    #[must_use]
    pub fn displayed_heading(&self) -> f64 {
        self.displayed_heading
    }

    /// Whether samples are currently accepted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> HeadingConfig {
        self.config
    }

    /// Replaces the configuration and re-derives the displayed heading.
    ///
    /// The configuration is normalized first; see [`HeadingConfig::normalized`].
    pub fn set_config(&mut self, config: HeadingConfig) {
        self.config = config.normalized();
        self.refresh_display(HeadingReason::ConfigChanged);
    }

    /// Returns the trace sink.
    #[must_use]
    pub fn trace(&self) -> &T {
        &self.trace
    }

    /// Returns the trace sink mutably.
    pub fn trace_mut(&mut self) -> &mut T {
        &mut self.trace
    }

    /// Consumes the filter and returns the trace sink.
    #[must_use]
    pub fn into_trace(self) -> T {
        self.trace
    }

    /// Switches the filter on or off.
    ///
    /// Turning on starts sensor updates if the device has heading hardware;
    /// without it the filter stays off. Turning off stops sensor updates.
    /// Requesting the current state does nothing.
    pub fn set_active<S: HeadingSensor + ?Sized>(&mut self, active: bool, sensor: &mut S) {
        if active == self.active {
            return;
        }
        if !active {
            self.deactivate(ActivityReason::Requested, sensor);
            return;
        }
        if sensor.is_heading_available() {
            sensor.start_heading_updates();
            self.active = true;
            self.trace.activity(true, ActivityReason::Requested);
        } else {
            // Report the refusal even though `active` does not move.
            self.trace.activity(false, ActivityReason::HardwareUnavailable);
        }
    }

    /// Flips the activity state; see [`HeadingFilter::set_active`].
    pub fn toggle_active<S: HeadingSensor + ?Sized>(&mut self, sensor: &mut S) {
        self.set_active(!self.active, sensor);
    }

    /// Reacts to an authorization change from the platform.
    ///
    /// - `Authorized` while active (re)starts updates, or switches off if the
    ///   hardware is missing.
    /// - `DeniedOrRestricted` switches off.
    ///
    /// Switching off here stops sensor updates like [`HeadingFilter::set_active`].
    /// - `NotDetermined` asks the user for permission.
    pub fn on_authorization_changed<S: HeadingSensor + ?Sized>(
        &mut self,
        state: Authorization,
        sensor: &mut S,
    ) {
        match state {
            Authorization::Authorized => {
                if !self.active {
                    return;
                }
                if sensor.is_heading_available() {
                    sensor.start_heading_updates();
                } else {
                    self.deactivate(ActivityReason::HardwareUnavailable, sensor);
                }
            }
            Authorization::DeniedOrRestricted => {
                self.deactivate(ActivityReason::AuthorizationDenied, sensor);
            }
            Authorization::NotDetermined => sensor.request_authorization(),
        }
    }

    /// The sensor source can no longer deliver headings; switch off and stop
    /// updates.
    pub fn on_sensor_unavailable<S: HeadingSensor + ?Sized>(&mut self, sensor: &mut S) {
        self.deactivate(ActivityReason::SensorUnavailable, sensor);
    }

    /// Reports a sensor failure. The filter state is unchanged.
    pub fn on_sensor_error(&mut self, error: &SensorError) {
        self.trace.sensor_error(error);
    }

    /// Feeds one heading sample through the gate and the smoother.
    ///
    /// The sample is dropped if the filter is inactive, if its accuracy is
    /// outside `[0, max_accuracy]`, or if its resolved heading is not finite.
    /// Otherwise the heading is wrapped into `[0, 360)` and the smoothed
    /// heading moves a `smoothing_factor` fraction of the shortest angular
    /// distance towards it.
    pub fn on_heading_sample(&mut self, sample: HeadingSample) {
        if !self.active {
            self.trace.sample_rejected(sample, SampleRejection::Inactive);
            return;
        }
        if !self.config.accepts_accuracy(sample.accuracy) {
            self.trace.sample_rejected(sample, SampleRejection::AccuracyOutOfRange);
            return;
        }
        let raw = sample.raw_heading();
        if !raw.is_finite() {
            self.trace.sample_rejected(sample, SampleRejection::InvalidHeading);
            return;
        }

        let smoothed = self.smooth_towards(wrap_degrees(raw));
        if !smoothed.is_finite() {
            self.trace.sample_rejected(sample, SampleRejection::InvalidHeading);
            return;
        }
        let old = core::mem::replace(&mut self.smoothed_heading, smoothed);
        self.report(HeadingField::Smoothed, old, smoothed, HeadingReason::Sample);
        self.refresh_display(HeadingReason::Sample);
    }

    /// Dispatches one inbound sensor event.
    pub fn handle_event<S: HeadingSensor + ?Sized>(&mut self, event: SensorEvent, sensor: &mut S) {
        match event {
            SensorEvent::HeadingSample(sample) => self.on_heading_sample(sample),
            SensorEvent::AuthorizationChanged(state) => {
                self.on_authorization_changed(state, sensor);
            }
            SensorEvent::Unavailable => self.on_sensor_unavailable(sensor),
            SensorEvent::Failed(error) => self.on_sensor_error(&error),
        }
    }

    /// Sets the map north offset and re-derives the displayed heading.
    ///
    /// A non-finite offset is replaced by `0.0`.
    pub fn set_map_north_offset(&mut self, degrees: f64) {
        let (offset, reason) = if degrees.is_finite() {
            (degrees, HeadingReason::MapNorthOffset)
        } else {
            (0.0, HeadingReason::Repaired)
        };
        let old = core::mem::replace(&mut self.map_north_offset, offset);
        self.report(HeadingField::MapNorthOffset, old, offset, reason);
        self.refresh_display(reason);
    }

    /// Circular exponential smoothing: step along the shortest arc.
    fn smooth_towards(&self, raw_degrees: f64) -> f64 {
        let current = self.smoothed_heading * PI / 180.0;
        let target = raw_degrees * PI / 180.0;
        // atan2(sin, cos) of the difference, in (-pi, pi].
        let diff = Vec2::from_angle(target - current).atan2();
        let smoothed = current + self.config.smoothing_factor * diff;
        wrap_degrees(smoothed * 180.0 / PI)
    }

    fn refresh_display(&mut self, reason: HeadingReason) {
        let displayed = match self.config.display_policy {
            DisplayPolicy::DeviceHeading => self.smoothed_heading,
            DisplayPolicy::MapLocked => {
                wrap_degrees(self.smoothed_heading + wrap_degrees(self.map_north_offset))
            }
        };
        let old = core::mem::replace(&mut self.displayed_heading, displayed);
        self.report(HeadingField::Displayed, old, displayed, reason);
    }

    /// Switches off, stopping sensor updates once per transition.
    fn deactivate<S: HeadingSensor + ?Sized>(&mut self, reason: ActivityReason, sensor: &mut S) {
        if self.active {
            sensor.stop_heading_updates();
            self.active = false;
            self.trace.activity(false, reason);
        }
    }

    fn report(&mut self, field: HeadingField, old: f64, new: f64, reason: HeadingReason) {
        if old != new {
            self.trace.changed(HeadingChange {
                field,
                old,
                new,
                reason,
            });
        }
    }
}

/// Wraps a finite angle into `[0, 360)`.
fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    // A tiny negative remainder rounds up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

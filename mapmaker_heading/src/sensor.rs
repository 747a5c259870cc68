// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability handle the filter uses to drive the platform sensor.

/// Outbound control of a heading sensor.
///
/// The filter never holds on to the sensor; it is passed in by `&mut` for the
/// calls that may need to start, stop, or authorize it.
pub trait HeadingSensor {
    /// Whether the device has heading hardware at all.
    fn is_heading_available(&self) -> bool;

    /// Begins delivering heading samples.
    fn start_heading_updates(&mut self);

    /// Stops delivering heading samples.
    fn stop_heading_updates(&mut self);

    /// Asks the user for permission to use the sensor.
    fn request_authorization(&mut self);
}

impl<S: HeadingSensor + ?Sized> HeadingSensor for &mut S {
    fn is_heading_available(&self) -> bool {
        (**self).is_heading_available()
    }

    fn start_heading_updates(&mut self) {
        (**self).start_heading_updates();
    }

    fn stop_heading_updates(&mut self) {
        (**self).stop_heading_updates();
    }

    fn request_authorization(&mut self) {
        (**self).request_authorization();
    }
}

/// An in-memory sensor that records the requests it receives.
///
/// Useful for tests, demos, and headless hosts without heading hardware.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulatedSensor {
    available: bool,
    running: bool,
    starts: u32,
    stops: u32,
    authorization_requests: u32,
}

impl SimulatedSensor {
    /// Creates a sensor that reports heading hardware as present.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    /// Creates a sensor that reports no heading hardware.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Changes whether heading hardware is reported as present.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Whether updates are currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of start requests received.
    #[must_use]
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Number of stop requests received.
    #[must_use]
    pub fn stops(&self) -> u32 {
        self.stops
    }

    /// Number of authorization requests received.
    #[must_use]
    pub fn authorization_requests(&self) -> u32 {
        self.authorization_requests
    }
}

impl HeadingSensor for SimulatedSensor {
    fn is_heading_available(&self) -> bool {
        self.available
    }

    fn start_heading_updates(&mut self) {
        self.starts += 1;
        self.running = true;
    }

    fn stop_heading_updates(&mut self) {
        self.stops += 1;
        self.running = false;
    }

    fn request_authorization(&mut self) {
        self.authorization_requests += 1;
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use mapmaker_heading::SensorEvent;

/// One step of a gesture stream.
///
/// Every `*Changed` value is cumulative since the gesture began; the matching
/// `*Ended` event terminates the stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// Drag translation since the drag began, in surface units.
    PanChanged(Vec2),
    /// The drag finished.
    PanEnded,
    /// Pinch magnification factor since the pinch began.
    ZoomChanged(f64),
    /// The pinch finished.
    ZoomEnded,
    /// Twist angle since the twist began, in degrees.
    RotationChanged(f64),
    /// The twist finished.
    RotationEnded,
}

/// Everything a [`MapScreen`](crate::MapScreen) reacts to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScreenEvent {
    /// A gesture stream update.
    Gesture(GestureEvent),
    /// A message from the heading sensor.
    Sensor(SensorEvent),
    /// Switch the compass on or off.
    SetCompassActive(bool),
    /// Flip the compass on or off.
    ToggleCompass,
    /// Ask the platform for permission to use the heading sensor.
    RequestAuthorization,
    /// Override the map north offset, in degrees.
    SetMapNorthOffset(f64),
    /// Put the map back to its resting transform.
    ResetMap,
}

impl From<GestureEvent> for ScreenEvent {
    fn from(event: GestureEvent) -> Self {
        Self::Gesture(event)
    }
}

impl From<SensorEvent> for ScreenEvent {
    fn from(event: SensorEvent) -> Self {
        Self::Sensor(event)
    }
}

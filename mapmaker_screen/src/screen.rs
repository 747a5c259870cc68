// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use mapmaker_heading::{HeadingConfig, HeadingFilter, HeadingSensor, HeadingTrace, SensorEvent};
use mapmaker_transform::{TransformLimits, TransformState, TransformTrace};

use crate::event::{GestureEvent, ScreenEvent};
use crate::render::{RenderState, ScreenChanges};

/// The single owner of a map screen's state.
///
/// `MapScreen` holds one [`TransformState`], one [`HeadingFilter`], and the
/// heading sensor handle `S`. All input arrives through
/// [`MapScreen::dispatch`], one event at a time; each call runs to completion
/// and returns the [`ScreenChanges`] the renderer should act on.
///
/// Beyond routing, the screen couples the two components the way the map
/// expects: the map north offset follows the map rotation during and after a
/// twist, and resetting the map also clears the offset.
///
/// `TT` and `HT` are the trace sinks of the transform and the heading filter.
#[derive(Clone, Debug)]
pub struct MapScreen<S, TT = (), HT = ()> {
    transform: TransformState<TT>,
    heading: HeadingFilter<HT>,
    sensor: S,
}

impl<S: HeadingSensor> MapScreen<S> {
    /// Creates a resting screen that drives `sensor`, without tracing.
    #[must_use]
    pub fn new(sensor: S) -> Self {
        Self::with_traces(sensor, (), ())
    }
}

impl<S, TT, HT> MapScreen<S, TT, HT>
where
    S: HeadingSensor,
    TT: TransformTrace,
    HT: HeadingTrace,
{
    /// Creates a resting screen that reports to the given trace sinks.
    #[must_use]
    pub fn with_traces(sensor: S, transform_trace: TT, heading_trace: HT) -> Self {
        Self {
            transform: TransformState::with_trace(transform_trace),
            heading: HeadingFilter::with_trace(heading_trace),
            sensor,
        }
    }

    /// Applies new transform limits; see [`TransformState::set_limits`].
    pub fn set_transform_limits(&mut self, limits: TransformLimits) -> ScreenChanges {
        self.tracked(|screen| screen.transform.set_limits(limits))
    }

    /// Applies a new heading configuration; see [`HeadingFilter::set_config`].
    pub fn set_heading_config(&mut self, config: HeadingConfig) -> ScreenChanges {
        self.tracked(|screen| screen.heading.set_config(config))
    }

    /// Returns the transform state.
    #[must_use]
    pub fn transform(&self) -> &TransformState<TT> {
        &self.transform
    }

    /// Returns the heading filter.
    #[must_use]
    pub fn heading(&self) -> &HeadingFilter<HT> {
        &self.heading
    }

    /// Returns the sensor handle.
    #[must_use]
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Returns the sensor handle mutably.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Snapshot of everything the renderer draws.
    #[must_use]
    pub fn render_state(&self) -> RenderState {
        RenderState {
            transform: self.transform.current(),
            displayed_heading: self.heading.displayed_heading(),
            compass_active: self.heading.is_active(),
        }
    }

    /// Processes one event and reports what changed on screen.
    pub fn dispatch(&mut self, event: impl Into<ScreenEvent>) -> ScreenChanges {
        let event = event.into();
        self.tracked(|screen| screen.apply(event))
    }

    /// Processes events in order and returns the union of their changes.
    pub fn dispatch_all<I>(&mut self, events: I) -> ScreenChanges
    where
        I: IntoIterator,
        I::Item: Into<ScreenEvent>,
    {
        events
            .into_iter()
            .fold(ScreenChanges::empty(), |changes, event| {
                changes | self.dispatch(event)
            })
    }

    /// Applies one gesture stream step; same as dispatching it.
    pub fn handle_gesture(&mut self, gesture: GestureEvent) -> ScreenChanges {
        self.dispatch(gesture)
    }

    /// Applies one sensor message; same as dispatching it.
    pub fn handle_sensor_event(&mut self, event: SensorEvent) -> ScreenChanges {
        self.dispatch(event)
    }

    /// Switches the compass on or off.
    pub fn set_compass_active(&mut self, active: bool) -> ScreenChanges {
        self.dispatch(ScreenEvent::SetCompassActive(active))
    }

    /// Flips the compass on or off.
    pub fn toggle_compass(&mut self) -> ScreenChanges {
        self.dispatch(ScreenEvent::ToggleCompass)
    }

    /// Asks the platform for permission to use the heading sensor.
    pub fn request_authorization(&mut self) -> ScreenChanges {
        self.dispatch(ScreenEvent::RequestAuthorization)
    }

    /// Overrides the map north offset until the next twist.
    pub fn set_map_north_offset(&mut self, degrees: f64) -> ScreenChanges {
        self.dispatch(ScreenEvent::SetMapNorthOffset(degrees))
    }

    /// Puts the map back at rest and clears the map north offset.
    pub fn reset_map(&mut self) -> ScreenChanges {
        self.dispatch(ScreenEvent::ResetMap)
    }

    fn tracked(&mut self, f: impl FnOnce(&mut Self)) -> ScreenChanges {
        let before = self.render_state();
        f(self);
        self.render_state().changes_since(&before)
    }

    fn apply(&mut self, event: ScreenEvent) {
        match event {
            ScreenEvent::Gesture(gesture) => self.apply_gesture(gesture),
            ScreenEvent::Sensor(sensor_event) => {
                self.heading.handle_event(sensor_event, &mut self.sensor);
            }
            ScreenEvent::SetCompassActive(active) => {
                self.heading.set_active(active, &mut self.sensor);
            }
            ScreenEvent::ToggleCompass => self.heading.toggle_active(&mut self.sensor),
            ScreenEvent::RequestAuthorization => self.sensor.request_authorization(),
            ScreenEvent::SetMapNorthOffset(degrees) => self.heading.set_map_north_offset(degrees),
            ScreenEvent::ResetMap => {
                self.transform.reset();
                self.heading.set_map_north_offset(0.0);
            }
        }
    }

    fn apply_gesture(&mut self, gesture: GestureEvent) {
        match gesture {
            GestureEvent::PanChanged(delta) => self.transform.update_pan(delta),
            GestureEvent::PanEnded => self.transform.end_pan(),
            GestureEvent::ZoomChanged(magnification) => self.transform.update_zoom(magnification),
            GestureEvent::ZoomEnded => self.transform.end_zoom(),
            GestureEvent::RotationChanged(degrees) => {
                self.transform.update_rotation(degrees);
                self.follow_map_rotation();
            }
            GestureEvent::RotationEnded => {
                self.transform.end_rotation();
                self.follow_map_rotation();
            }
        }
    }

    fn follow_map_rotation(&mut self) {
        let rotation = self.transform.rotation();
        if rotation != self.heading.map_north_offset() {
            self.heading.set_map_north_offset(rotation);
        }
    }
}

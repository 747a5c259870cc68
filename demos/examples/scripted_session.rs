// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted map session.
//!
//! Replay a short session against a `MapScreen` with a simulated sensor and
//! print what changed after every event, plus the traces both components
//! recorded.
//!
//! Run:
//! - `cargo run -p mapmaker_demos --example scripted_session`

use kurbo::{Point, Vec2};
use mapmaker_demos::wobbling_headings;
use mapmaker_heading::{
    Authorization, DisplayPolicy, HeadingConfig, HeadingLog, SensorEvent, SimulatedSensor,
};
use mapmaker_screen::{GestureEvent, MapScreen, ScreenEvent};
use mapmaker_transform::TransformLog;

fn main() {
    let mut screen = MapScreen::with_traces(
        SimulatedSensor::new(),
        TransformLog::new(),
        HeadingLog::new(),
    );
    screen.set_heading_config(HeadingConfig {
        display_policy: DisplayPolicy::MapLocked,
        ..HeadingConfig::default()
    });

    let mut script: Vec<ScreenEvent> = vec![
        // The user opens the compass before granting permission.
        ScreenEvent::ToggleCompass,
        SensorEvent::AuthorizationChanged(Authorization::NotDetermined).into(),
        SensorEvent::AuthorizationChanged(Authorization::Authorized).into(),
        // Drag, pinch, then twist the map a quarter turn.
        GestureEvent::PanChanged(Vec2::new(40.0, 0.0)).into(),
        GestureEvent::PanChanged(Vec2::new(120.0, 35.0)).into(),
        GestureEvent::PanEnded.into(),
        GestureEvent::ZoomChanged(1.4).into(),
        GestureEvent::ZoomChanged(2.2).into(),
        GestureEvent::ZoomEnded.into(),
        GestureEvent::RotationChanged(45.0).into(),
        GestureEvent::RotationChanged(90.0).into(),
        GestureEvent::RotationEnded.into(),
        // Dragging right now moves along the rotated map's own axis.
        GestureEvent::PanChanged(Vec2::new(50.0, 0.0)).into(),
        GestureEvent::PanEnded.into(),
    ];
    script.extend(wobbling_headings(350.0, 14).map(|s| ScreenEvent::from(SensorEvent::from(s))));
    script.push(ScreenEvent::ResetMap);

    for event in script {
        let changes = screen.dispatch(event);
        let frame = screen.render_state();
        println!(
            "{event:?}\n    -> {changes:?} scale={:.2} offset=({:.1}, {:.1}) rotation={:.1} heading={:.1}",
            frame.transform.scale,
            frame.transform.translation.x,
            frame.transform.translation.y,
            frame.transform.rotation,
            frame.displayed_heading,
        );
    }

    let frame = screen.render_state();
    let affine = frame.image_transform(Point::new(195.0, 422.0));
    println!("final image transform: {:?}", affine.as_coeffs());

    println!(
        "transform trace: {} records",
        screen.transform().trace().events().len()
    );
    for event in screen.heading().trace().events() {
        println!("heading trace: {event:?}");
    }
    let sensor = screen.sensor();
    println!(
        "sensor: starts={} stops={} authorization requests={}",
        sensor.starts(),
        sensor.stops(),
        sensor.authorization_requests()
    );
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `mapmaker_screen` crate.
//!
//! These drive a `MapScreen` through whole gesture and sensor sessions and
//! check the invariants the renderer relies on: the transform is always
//! finite and in bounds, commits are idempotent, and the compass only moves
//! while it is switched on.

use kurbo::Vec2;
use mapmaker_heading::{
    ActivityReason, Authorization, HeadingEvent, HeadingLog, HeadingSample, SensorError,
    SensorErrorKind, SensorEvent, SimulatedSensor,
};
use mapmaker_screen::{GestureEvent, MapScreen, ScreenChanges, ScreenEvent};
use mapmaker_transform::{ChangeReason, TransformLog};

const AWKWARD: [f64; 10] = [
    0.0,
    1.0,
    -1.0,
    499.9,
    -12_345.0,
    1e12,
    -1e300,
    f64::MAX,
    f64::MIN_POSITIVE,
    f64::INFINITY,
];

fn traced_screen() -> MapScreen<SimulatedSensor, TransformLog, HeadingLog> {
    MapScreen::with_traces(SimulatedSensor::new(), TransformLog::new(), HeadingLog::new())
}

fn assert_in_bounds(screen: &MapScreen<SimulatedSensor, TransformLog, HeadingLog>) {
    let t = screen.render_state().transform;
    assert!((0.5..=3.0).contains(&t.scale), "scale {}", t.scale);
    assert!((-500.0..=500.0).contains(&t.translation.x), "x {}", t.translation.x);
    assert!((-500.0..=500.0).contains(&t.translation.y), "y {}", t.translation.y);
    assert!(t.rotation.is_finite(), "rotation {}", t.rotation);
}

#[test]
fn pan_stays_in_bounds_for_any_finite_input() {
    let rotations = [0.0, 33.0, 90.0, 180.0, -270.0, 1e15];
    for rotation in rotations {
        for dx in AWKWARD {
            for dy in AWKWARD {
                let mut screen = traced_screen();
                screen.dispatch(GestureEvent::RotationChanged(rotation));
                screen.dispatch(GestureEvent::RotationEnded);

                screen.dispatch(GestureEvent::PanChanged(Vec2::new(dx, dy)));
                assert_in_bounds(&screen);
                screen.dispatch(GestureEvent::PanChanged(Vec2::new(-dy, -dx)));
                screen.dispatch(GestureEvent::PanEnded);
                assert_in_bounds(&screen);
            }
        }
    }
}

#[test]
fn zoom_stays_in_bounds_for_any_positive_factor() {
    let mut screen = traced_screen();
    for factor in [
        1e-9,
        0.1,
        0.5,
        0.99,
        1.0,
        1.01,
        2.0,
        7.5,
        1e9,
        f64::MAX,
        0.0,
        -1.0,
        f64::NEG_INFINITY,
    ] {
        screen.dispatch(GestureEvent::ZoomChanged(factor));
        assert_in_bounds(&screen);
        screen.dispatch(GestureEvent::ZoomEnded);
        assert_in_bounds(&screen);
    }
}

#[test]
fn zoom_session_commits_relative_to_previous_pinch() {
    let mut screen = traced_screen();
    screen.dispatch(GestureEvent::ZoomChanged(2.0));
    assert_eq!(screen.render_state().transform.scale, 2.0);
    screen.dispatch(GestureEvent::ZoomEnded);

    screen.dispatch(GestureEvent::ZoomChanged(0.5));
    assert_eq!(screen.render_state().transform.scale, 1.0);
    screen.dispatch(GestureEvent::ZoomEnded);

    assert_eq!(screen.render_state().transform.scale, 1.0);
    assert_eq!(screen.transform().committed_scale(), 1.0);
}

#[test]
fn reset_always_returns_to_rest() {
    let mut screen = traced_screen();
    screen.dispatch_all([
        GestureEvent::PanChanged(Vec2::new(250.0, -600.0)),
        GestureEvent::PanEnded,
        GestureEvent::ZoomChanged(2.5),
        GestureEvent::ZoomEnded,
        GestureEvent::RotationChanged(721.0),
    ]);

    let changes = screen.dispatch(ScreenEvent::ResetMap);

    assert_eq!(changes, ScreenChanges::TRANSFORM);
    let t = screen.render_state().transform;
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.translation, Vec2::ZERO);
    assert_eq!(t.rotation, 0.0);

    // The next gesture starts from the reset baseline, not the old one.
    screen.dispatch(GestureEvent::PanChanged(Vec2::new(5.0, 5.0)));
    assert_eq!(screen.render_state().transform.translation, Vec2::new(5.0, 5.0));
}

#[test]
fn gesture_ends_are_idempotent() {
    let mut screen = traced_screen();
    screen.dispatch_all([
        GestureEvent::PanChanged(Vec2::new(17.0, -3.0)),
        GestureEvent::ZoomChanged(1.25),
        GestureEvent::RotationChanged(-725.0),
        GestureEvent::PanEnded,
        GestureEvent::ZoomEnded,
        GestureEvent::RotationEnded,
    ]);
    let before = screen.render_state();
    let committed = screen.transform().debug_info().committed;

    let changes = screen.dispatch_all([
        GestureEvent::PanEnded,
        GestureEvent::ZoomEnded,
        GestureEvent::RotationEnded,
    ]);

    assert!(changes.is_empty());
    assert_eq!(screen.render_state(), before);
    assert_eq!(screen.transform().debug_info().committed, committed);
    // -725 wraps to 355 at commit.
    assert!((before.transform.rotation - 355.0).abs() < 1e-9);
}

#[test]
fn invalid_gesture_input_is_absorbed() {
    let mut screen = traced_screen();
    screen.dispatch_all([
        GestureEvent::RotationChanged(30.0),
        GestureEvent::RotationChanged(f64::NAN),
        GestureEvent::ZoomChanged(f64::NAN),
        GestureEvent::PanChanged(Vec2::new(f64::NAN, f64::NAN)),
        GestureEvent::RotationEnded,
        GestureEvent::ZoomEnded,
        GestureEvent::PanEnded,
    ]);

    let t = screen.render_state().transform;
    assert_eq!(t.rotation, 30.0);
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.translation, Vec2::ZERO);
    assert_eq!(
        screen
            .transform()
            .trace()
            .changes_with(ChangeReason::Repaired)
            .count(),
        0
    );
}

#[test]
fn zero_magnification_shrinks_to_min_scale() {
    let mut screen = traced_screen();
    screen.dispatch_all([GestureEvent::ZoomChanged(3.0), GestureEvent::ZoomEnded]);

    let changes = screen.dispatch(GestureEvent::ZoomChanged(0.0));

    assert_eq!(changes, ScreenChanges::SCALE);
    assert_eq!(screen.render_state().transform.scale, 0.5);
}

#[test]
fn huge_heading_sample_does_not_poison_compass() {
    let mut screen = traced_screen();
    screen.dispatch(ScreenEvent::ToggleCompass);

    screen.dispatch(SensorEvent::HeadingSample(HeadingSample::resolved(1.0e308, 5.0)));
    screen.dispatch(SensorEvent::HeadingSample(HeadingSample::resolved(90.0, 5.0)));

    let heading = screen.render_state().displayed_heading;
    assert!((0.0..360.0).contains(&heading), "heading {heading}");
}

#[test]
fn compass_is_gated_until_switched_on() {
    let mut screen = traced_screen();
    let sample = SensorEvent::HeadingSample(HeadingSample::resolved(120.0, 5.0));

    let changes = screen.dispatch(sample);

    assert!(changes.is_empty());
    assert_eq!(screen.heading().smoothed_heading(), 0.0);

    screen.dispatch(ScreenEvent::SetCompassActive(true));
    let changes = screen.dispatch(sample);
    assert_eq!(changes, ScreenChanges::HEADING);
    assert!((screen.heading().smoothed_heading() - 18.0).abs() < 1e-9);
}

#[test]
fn low_quality_samples_leave_heading_unchanged() {
    let mut screen = traced_screen();
    screen.dispatch(ScreenEvent::SetCompassActive(true));
    screen.dispatch(SensorEvent::HeadingSample(HeadingSample::resolved(60.0, 5.0)));
    let before = screen.render_state();

    for accuracy in [30.0, -1.0, f64::NAN] {
        let changes = screen.dispatch(SensorEvent::HeadingSample(HeadingSample::resolved(
            240.0, accuracy,
        )));
        assert!(changes.is_empty());
    }

    assert_eq!(screen.render_state(), before);
}

#[test]
fn authorization_session() {
    let mut screen = traced_screen();

    screen.dispatch(SensorEvent::AuthorizationChanged(
        Authorization::NotDetermined,
    ));
    assert_eq!(screen.sensor().authorization_requests(), 1);

    screen.dispatch(ScreenEvent::ToggleCompass);
    screen.dispatch(SensorEvent::AuthorizationChanged(Authorization::Authorized));
    assert!(screen.render_state().compass_active);
    assert!(screen.sensor().is_running());

    let changes = screen.dispatch(SensorEvent::AuthorizationChanged(
        Authorization::DeniedOrRestricted,
    ));
    assert_eq!(changes, ScreenChanges::COMPASS_ACTIVE);
    assert!(!screen.sensor().is_running());
    assert_eq!(screen.sensor().stops(), 1);
    assert!(screen.heading().trace().events().contains(&HeadingEvent::Activity {
        active: false,
        reason: ActivityReason::AuthorizationDenied,
    }));
}

#[test]
fn missing_hardware_keeps_compass_off() {
    let mut screen = MapScreen::new(SimulatedSensor::unavailable());

    let changes = screen.dispatch(ScreenEvent::ToggleCompass);

    assert!(changes.is_empty());
    assert!(!screen.render_state().compass_active);
    assert_eq!(screen.sensor().starts(), 0);
}

#[test]
fn sensor_failures_do_not_change_state() {
    let mut screen = traced_screen();
    screen.dispatch(ScreenEvent::ToggleCompass);
    let error = SensorError::new(SensorErrorKind::HeadingFailure);

    let changes = screen.dispatch(SensorEvent::Failed(error));

    assert!(changes.is_empty());
    assert!(screen.render_state().compass_active);
    assert!(
        screen
            .heading()
            .trace()
            .events()
            .contains(&HeadingEvent::SensorError(error))
    );

    let changes = screen.dispatch(SensorEvent::Unavailable);
    assert_eq!(changes, ScreenChanges::COMPASS_ACTIVE);
    assert!(!screen.sensor().is_running());

    // Switching back on resubscribes exactly once.
    screen.dispatch(ScreenEvent::ToggleCompass);
    assert_eq!(screen.sensor().starts(), 2);
    assert_eq!(screen.sensor().stops(), 1);
}

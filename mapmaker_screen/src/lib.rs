// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=mapmaker_screen --heading-base-level=0

//! MapMaker Screen: the event-driven core of a map-viewing screen.
//!
//! A map screen shows one background image that the user can pan, pinch, and
//! twist, with a compass overlay driven by the device heading sensor. This
//! crate owns that state on a single thread:
//!
//! - [`ScreenEvent`]: the tagged union of gesture stream steps
//!   ([`GestureEvent`]), sensor messages, and user commands.
//! - [`MapScreen`]: routes each event to a
//!   [`TransformState`](mapmaker_transform::TransformState) or a
//!   [`HeadingFilter`](mapmaker_heading::HeadingFilter), keeps the map north
//!   offset in step with the map rotation, and returns [`ScreenChanges`].
//! - [`RenderState`]: a snapshot with everything needed to draw a frame,
//!   including the image [`Affine`](kurbo::Affine).
//!
//! Platform callbacks (gesture recognizers, location services) are expected
//! to post events to the thread that owns the `MapScreen`. Nothing here
//! blocks, so each event runs to completion before the next one.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use mapmaker_heading::{HeadingSample, SensorEvent, SimulatedSensor};
//! use mapmaker_screen::{GestureEvent, MapScreen, ScreenChanges, ScreenEvent};
//!
//! let mut screen = MapScreen::new(SimulatedSensor::new());
//!
//! // A drag: cumulative translation, then the end of the stream.
//! screen.dispatch(GestureEvent::PanChanged(Vec2::new(30.0, 10.0)));
//! let changes = screen.dispatch(GestureEvent::PanEnded);
//! assert!(changes.is_empty());
//!
//! // Switch the compass on and feed one reading.
//! screen.dispatch(ScreenEvent::ToggleCompass);
//! let changes = screen.dispatch(SensorEvent::HeadingSample(HeadingSample::resolved(40.0, 5.0)));
//! assert_eq!(changes, ScreenChanges::HEADING);
//!
//! // Draw the image centered at (160, 240).
//! let frame = screen.render_state();
//! let affine = frame.image_transform(Point::new(160.0, 240.0));
//! assert_eq!(affine * Point::new(160.0, 240.0), Point::new(190.0, 250.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod event;
mod render;
mod screen;

pub use event::{GestureEvent, ScreenEvent};
pub use render::{RenderState, ScreenChanges};
pub use screen::MapScreen;

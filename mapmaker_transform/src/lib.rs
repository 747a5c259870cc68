// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=mapmaker_transform --heading-base-level=0

//! MapMaker Transform: gesture-driven pan / zoom / rotate state for a map image.
//!
//! This crate provides a small, headless model of the transform applied to a
//! single background image. It focuses on:
//! - Turning cumulative gesture streams (pan, pinch, rotate) into a live
//!   transform, with a committed baseline per gesture.
//! - Keeping drag direction screen-relative when the map is rotated.
//! - Clamping scale and translation to [`TransformLimits`].
//! - Absorbing NaN and infinite inputs so that the exposed state is always
//!   finite.
//!
//! It does **not** recognize gestures or draw anything. Callers are expected
//! to:
//! - Feed `update_*` calls while a gesture is live and one `end_*` call when
//!   it finishes.
//! - Read [`TransformState::current`] and build an image transform with
//!   [`MapTransform::to_affine`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Vec2;
//! use mapmaker_transform::TransformState;
//!
//! let mut map = TransformState::new();
//!
//! // Pinch: the factor is cumulative since the pinch began.
//! map.update_zoom(1.5);
//! map.update_zoom(2.0);
//! map.end_zoom();
//! assert_eq!(map.scale(), 2.0);
//!
//! // A second pinch starts from the committed scale.
//! map.update_zoom(0.5);
//! map.end_zoom();
//! assert_eq!(map.scale(), 1.0);
//!
//! // Pans are clamped to the default +/-500 bound.
//! map.update_pan(Vec2::new(800.0, -20.0));
//! map.end_pan();
//! assert_eq!(map.translation(), Vec2::new(500.0, -20.0));
//! ```
//!
//! ## Tracing
//!
//! Construct the state with [`TransformState::with_trace`] to receive a
//! [`TransformChange`] for every mutation, including fallbacks and repairs.
//! [`TransformLog`] records them in memory:
//!
//! ```rust
//! use mapmaker_transform::{ChangeReason, TransformLog, TransformState};
//!
//! let mut map = TransformState::with_trace(TransformLog::new());
//! map.update_rotation(f64::NAN);
//! map.update_rotation(30.0);
//! map.end_rotation();
//!
//! assert_eq!(map.rotation(), 30.0);
//! assert_eq!(map.trace().changes_with(ChangeReason::Gesture).count(), 1);
//! ```
//!
//! ## Design notes
//!
//! - Rotation is not wrapped while a gesture is live; the committed rotation
//!   is wrapped into `[0, 360)` when the gesture ends.
//! - Zoom is a uniform scalar about the image center.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod limits;
mod state;
pub mod trace;

pub use limits::TransformLimits;
pub use state::{MapTransform, TransformDebugInfo, TransformState};
pub use trace::{
    ChangeReason, TransformChange, TransformEvent, TransformField, TransformLog, TransformTrace,
};

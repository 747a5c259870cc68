// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sin` / `cos`
use kurbo::{Affine, Point, Vec2};

use crate::limits::TransformLimits;
use crate::trace::{ChangeReason, TransformChange, TransformField, TransformTrace};

/// A read-only view of the transform the renderer should draw with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapTransform {
    /// Uniform scale factor.
    pub scale: f64,
    /// Offset of the image from its resting position.
    pub translation: Vec2,
    /// Rotation in degrees, clockwise on a y-down surface.
    pub rotation: f64,
}

impl MapTransform {
    /// The resting transform: unit scale, no offset, no rotation.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translation: Vec2::ZERO,
        rotation: 0.0,
    };

    /// Builds the affine image transform.
    ///
    /// The image is scaled and rotated about `center` (normally the center of
    /// the image in surface coordinates), then offset by the translation.
    #[must_use]
    pub fn to_affine(&self, center: Point) -> Affine {
        Affine::translate(self.translation)
            * Affine::rotate_about(self.rotation * PI / 180.0, center)
            * Affine::scale_about(self.scale, center)
    }
}

impl Default for MapTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Pan / zoom / rotate state for a single map image.
///
/// Gesture recognizers report *cumulative* values measured from the start of
/// the gesture. `TransformState` therefore keeps two copies of every field:
///
/// - the **live** value the renderer sees, recomputed on every update as
///   `committed ⊕ cumulative input` and clamped to [`TransformLimits`];
/// - the **committed** baseline, which only moves when a gesture ends.
///
/// Every value exposed through the accessors is finite. Invalid numeric input
/// is absorbed locally: pan falls back to an unrotated delta, rotation keeps
/// its last good value, and the validation pass that runs on every gesture
/// end restores any non-finite field to its default.
///
/// Changes are reported to the trace sink `T`; see [`crate::trace`].
#[derive(Clone, Debug)]
pub struct TransformState<T = ()> {
    limits: TransformLimits,
    scale: f64,
    translation: Vec2,
    rotation: f64,
    committed_scale: f64,
    committed_translation: Vec2,
    committed_rotation: f64,
    trace: T,
}

impl TransformState {
    /// Creates a resting transform with default limits and no tracing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_trace(())
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TransformTrace> TransformState<T> {
    /// Creates a resting transform that reports changes to `trace`.
    #[must_use]
    pub fn with_trace(trace: T) -> Self {
        Self {
            limits: TransformLimits::default(),
            scale: 1.0,
            translation: Vec2::ZERO,
            rotation: 0.0,
            committed_scale: 1.0,
            committed_translation: Vec2::ZERO,
            committed_rotation: 0.0,
            trace,
        }
    }

    /// Returns the current live scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the current live translation.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Returns the current live rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Returns the scale baseline of the current gesture.
    #[must_use]
    pub fn committed_scale(&self) -> f64 {
        self.committed_scale
    }

    /// Returns the translation baseline of the current gesture.
    #[must_use]
    pub fn committed_translation(&self) -> Vec2 {
        self.committed_translation
    }

    /// Returns the rotation baseline of the current gesture.
    #[must_use]
    pub fn committed_rotation(&self) -> f64 {
        self.committed_rotation
    }

    /// Returns the live values as a single snapshot.
    #[must_use]
    pub fn current(&self) -> MapTransform {
        MapTransform {
            scale: self.scale,
            translation: self.translation,
            rotation: self.rotation,
        }
    }

    /// Returns the active limits.
    #[must_use]
    pub fn limits(&self) -> TransformLimits {
        self.limits
    }

    /// Replaces the limits and re-clamps live and committed values.
    ///
    /// The limits are normalized first; see [`TransformLimits::normalized`].
    pub fn set_limits(&mut self, limits: TransformLimits) {
        let limits = limits.normalized();
        if self.limits == limits {
            return;
        }
        self.limits = limits;
        self.committed_scale = limits.clamp_scale(self.committed_scale);
        self.committed_translation = Vec2::new(
            limits.clamp_offset(self.committed_translation.x),
            limits.clamp_offset(self.committed_translation.y),
        );
        let reason = ChangeReason::LimitsChanged;
        self.set_scale(limits.clamp_scale(self.scale), reason);
        self.set_translation_x(limits.clamp_offset(self.translation.x), reason);
        self.set_translation_y(limits.clamp_offset(self.translation.y), reason);
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

    /// Consumes the state and returns the trace sink.
    #[must_use]
    pub fn into_trace(self) -> T {
        self.trace
    }

    /// Applies a pan gesture update.
    ///
    /// `delta` is the cumulative screen-space translation since the gesture
    /// began. It is rotated by the inverse of the current map rotation so that
    /// dragging follows the finger however the map is turned. If the rotation
    /// or the rotated vector is not finite, the raw delta is used instead.
    ///
    /// Each axis is clamped to `[-max_offset, max_offset]`. An axis whose
    /// result is NaN keeps its previous value.
    pub fn update_pan(&mut self, delta: Vec2) {
        let (offset, reason) = match self.rotated_delta(delta) {
            Some(rotated) => (rotated, ChangeReason::Gesture),
            None => (delta, ChangeReason::UnrotatedFallback),
        };
        let target = self.committed_translation + offset;

        let x = self.limits.clamp_offset(target.x);
        if x.is_nan() {
            self.trace.ignored(TransformField::TranslationX, delta.x);
        } else {
            self.set_translation_x(x, reason);
        }

        let y = self.limits.clamp_offset(target.y);
        if y.is_nan() {
            self.trace.ignored(TransformField::TranslationY, delta.y);
        } else {
            self.set_translation_y(y, reason);
        }
    }

    /// Ends a pan gesture: the live translation becomes the new baseline.
    pub fn end_pan(&mut self) {
        self.committed_translation = self.translation;
        self.validate();
    }

    /// Applies a pinch gesture update.
    ///
    /// `magnification` is the cumulative factor since the gesture began. The
    /// result is clamped to `[min_scale, max_scale]`, so zero and negative
    /// factors land on `min_scale`. A NaN factor is ignored.
    pub fn update_zoom(&mut self, magnification: f64) {
        if magnification.is_nan() {
            self.trace.ignored(TransformField::Scale, magnification);
            return;
        }
        let scale = self
            .limits
            .clamp_scale(self.committed_scale * magnification);
        if scale.is_nan() {
            self.trace.ignored(TransformField::Scale, magnification);
            return;
        }
        self.set_scale(scale, ChangeReason::Gesture);
    }

    /// Ends a pinch gesture: the live scale becomes the new baseline.
    pub fn end_zoom(&mut self) {
        self.committed_scale = self.scale;
        self.validate();
    }

    /// Applies a rotation gesture update.
    ///
    /// `delta_degrees` is the cumulative rotation since the gesture began. A
    /// non-finite delta is ignored. If the sum with the baseline is not
    /// finite, the live rotation returns to the baseline.
    pub fn update_rotation(&mut self, delta_degrees: f64) {
        if !delta_degrees.is_finite() {
            self.trace.ignored(TransformField::Rotation, delta_degrees);
            return;
        }
        let rotation = self.committed_rotation + delta_degrees;
        if rotation.is_finite() {
            self.set_rotation(rotation, ChangeReason::Gesture);
        } else {
            self.set_rotation(self.committed_rotation, ChangeReason::RevertedToCommitted);
        }
    }

    /// Ends a rotation gesture.
    ///
    /// The live rotation is wrapped into `[0, 360)` and becomes the new
    /// baseline. A non-finite live rotation is put back to the baseline
    /// instead.
    pub fn end_rotation(&mut self) {
        if self.rotation.is_finite() {
            let wrapped = wrap_degrees(self.rotation);
            self.set_rotation(wrapped, ChangeReason::Commit);
            self.committed_rotation = wrapped;
        } else {
            self.set_rotation(self.committed_rotation, ChangeReason::RevertedToCommitted);
        }
        self.validate();
    }

    /// Returns every field, live and committed, to its default.
    pub fn reset(&mut self) {
        let reason = ChangeReason::Reset;
        self.set_scale(1.0, reason);
        self.set_translation_x(0.0, reason);
        self.set_translation_y(0.0, reason);
        self.set_rotation(0.0, reason);
        self.committed_scale = 1.0;
        self.committed_translation = Vec2::ZERO;
        self.committed_rotation = 0.0;
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> TransformDebugInfo {
        TransformDebugInfo {
            live: self.current(),
            committed: MapTransform {
                scale: self.committed_scale,
                translation: self.committed_translation,
                rotation: self.committed_rotation,
            },
            limits: self.limits,
        }
    }

    /// Restores any non-finite field, together with its baseline, to the
    /// default. Fields are checked independently.
    fn validate(&mut self) {
        let reason = ChangeReason::Repaired;
        if !(self.scale.is_finite() && self.committed_scale.is_finite()) {
            self.set_scale(1.0, reason);
            self.committed_scale = 1.0;
        }
        if !(self.translation.x.is_finite() && self.committed_translation.x.is_finite()) {
            self.set_translation_x(0.0, reason);
            self.committed_translation.x = 0.0;
        }
        if !(self.translation.y.is_finite() && self.committed_translation.y.is_finite()) {
            self.set_translation_y(0.0, reason);
            self.committed_translation.y = 0.0;
        }
        if !(self.rotation.is_finite() && self.committed_rotation.is_finite()) {
            self.set_rotation(0.0, reason);
            self.committed_rotation = 0.0;
        }
    }

    fn rotated_delta(&self, delta: Vec2) -> Option<Vec2> {
        if !self.rotation.is_finite() {
            return None;
        }
        let radians = self.rotation * PI / 180.0;
        let cos = radians.cos();
        let sin = radians.sin();
        if !(cos.is_finite() && sin.is_finite()) {
            return None;
        }
        let rotated = Vec2::new(
            delta.x * cos + delta.y * sin,
            -delta.x * sin + delta.y * cos,
        );
        rotated.is_finite().then_some(rotated)
    }

    fn set_scale(&mut self, value: f64, reason: ChangeReason) {
        let old = core::mem::replace(&mut self.scale, value);
        self.report(TransformField::Scale, old, value, reason);
    }

    fn set_translation_x(&mut self, value: f64, reason: ChangeReason) {
        let old = core::mem::replace(&mut self.translation.x, value);
        self.report(TransformField::TranslationX, old, value, reason);
    }

    fn set_translation_y(&mut self, value: f64, reason: ChangeReason) {
        let old = core::mem::replace(&mut self.translation.y, value);
        self.report(TransformField::TranslationY, old, value, reason);
    }

    fn set_rotation(&mut self, value: f64, reason: ChangeReason) {
        let old = core::mem::replace(&mut self.rotation, value);
        self.report(TransformField::Rotation, old, value, reason);
    }

    fn report(&mut self, field: TransformField, old: f64, new: f64, reason: ChangeReason) {
        // NaN never compares equal, so repairs of NaN fields are reported.
        if old != new {
            self.trace.changed(TransformChange {
                field,
                old,
                new,
                reason,
            });
        }
    }
}

/// Debug snapshot of a [`TransformState`].
#[derive(Clone, Copy, Debug)]
pub struct TransformDebugInfo {
    /// Values the renderer currently sees.
    pub live: MapTransform,
    /// Baselines for the next gesture.
    pub committed: MapTransform,
    /// Active limits.
    pub limits: TransformLimits,
}

/// Wraps a finite angle into `[0, 360)`.
fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    // A tiny negative remainder rounds up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point};
use mapmaker_transform::MapTransform;

bitflags::bitflags! {
    /// Which parts of the rendered screen changed after an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ScreenChanges: u8 {
        /// The image scale changed.
        const SCALE          = 0b0000_0001;
        /// The image translation changed.
        const TRANSLATION    = 0b0000_0010;
        /// The image rotation changed.
        const ROTATION       = 0b0000_0100;
        /// The compass needle angle changed.
        const HEADING        = 0b0000_1000;
        /// The compass was switched on or off.
        const COMPASS_ACTIVE = 0b0001_0000;
        /// Any image transform change.
        const TRANSFORM = Self::SCALE.bits() | Self::TRANSLATION.bits() | Self::ROTATION.bits();
    }
}

/// Everything the rendering surface needs to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    /// Image scale, translation, and rotation.
    pub transform: MapTransform,
    /// Compass needle angle in degrees, `[0, 360)`.
    pub displayed_heading: f64,
    /// Whether the compass overlay is live.
    pub compass_active: bool,
}

impl RenderState {
    /// Builds the affine image transform about the image `center`.
    ///
    /// See [`MapTransform::to_affine`].
    #[must_use]
    pub fn image_transform(&self, center: Point) -> Affine {
        self.transform.to_affine(center)
    }

    /// Returns the flags for every field that differs from `previous`.
    #[must_use]
    pub fn changes_since(&self, previous: &Self) -> ScreenChanges {
        let mut changes = ScreenChanges::empty();
        changes.set(
            ScreenChanges::SCALE,
            self.transform.scale != previous.transform.scale,
        );
        changes.set(
            ScreenChanges::TRANSLATION,
            self.transform.translation != previous.transform.translation,
        );
        changes.set(
            ScreenChanges::ROTATION,
            self.transform.rotation != previous.transform.rotation,
        );
        changes.set(
            ScreenChanges::HEADING,
            self.displayed_heading != previous.displayed_heading,
        );
        changes.set(
            ScreenChanges::COMPASS_ACTIVE,
            self.compass_active != previous.compass_active,
        );
        changes
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            transform: MapTransform::IDENTITY,
            displayed_heading: 0.0,
            compass_active: false,
        }
    }
}

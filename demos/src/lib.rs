// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the MapMaker demos.

use mapmaker_heading::HeadingSample;

/// A deterministic stream of compass readings wobbling around `center`.
///
/// Every seventh reading has poor accuracy so the gate has something to drop.
pub fn wobbling_headings(center: f64, count: usize) -> impl Iterator<Item = HeadingSample> {
    (0..count).map(move |i| {
        let wobble = [-6.0, -2.0, 3.0, 7.0, 1.0, -4.0][i % 6];
        let accuracy = if i % 7 == 6 { 40.0 } else { 8.0 };
        HeadingSample::new(-1.0, center + wobble, accuracy)
    })
}

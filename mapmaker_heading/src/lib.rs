// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=mapmaker_heading --heading-base-level=0

//! MapMaker Heading: a smoothed compass heading driven by a platform sensor.
//!
//! This crate turns raw, noisy heading readings into a stable needle angle:
//!
//! - [`HeadingFilter`]: accuracy gating, circular exponential smoothing, map
//!   north offset, and the displayed heading.
//! - [`HeadingSensor`]: the capability handle used to start, stop, and
//!   authorize the platform sensor, plus [`SimulatedSensor`] for headless use.
//! - [`SensorEvent`]: the tagged union of everything the sensor reports back
//!   (samples, authorization changes, unavailability, failures).
//! - [`trace`]: structured change records through [`HeadingTrace`].
//!
//! The filter never talks to a platform API directly and never blocks. Hosts
//! marshal sensor callbacks onto the thread that owns the filter and feed
//! them in one at a time.
//!
//! ## Minimal example
//!
//! ```rust
//! use mapmaker_heading::{HeadingFilter, HeadingSample, SimulatedSensor};
//!
//! let mut sensor = SimulatedSensor::new();
//! let mut compass = HeadingFilter::new();
//!
//! // Samples are ignored until the compass is switched on.
//! compass.on_heading_sample(HeadingSample::resolved(90.0, 5.0));
//! assert_eq!(compass.smoothed_heading(), 0.0);
//!
//! compass.set_active(true, &mut sensor);
//! assert!(sensor.is_running());
//!
//! // Each accepted sample moves 15% of the way along the shortest arc.
//! compass.on_heading_sample(HeadingSample::resolved(20.0, 5.0));
//! assert!((compass.smoothed_heading() - 3.0).abs() < 1e-9);
//!
//! // Readings with poor accuracy are dropped.
//! compass.on_heading_sample(HeadingSample::resolved(180.0, 40.0));
//! assert!((compass.displayed_heading() - 3.0).abs() < 1e-9);
//! ```
//!
//! ## Display policy
//!
//! [`DisplayPolicy::DeviceHeading`] (the default) shows the device heading
//! regardless of map rotation. [`DisplayPolicy::MapLocked`] adds the map
//! north offset so the needle turns with the map.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod filter;
mod sample;
mod sensor;
pub mod trace;

pub use config::{DisplayPolicy, HeadingConfig};
pub use filter::HeadingFilter;
pub use sample::{Authorization, HeadingSample, SensorError, SensorErrorKind, SensorEvent};
pub use sensor::{HeadingSensor, SimulatedSensor};
pub use trace::{
    ActivityReason, HeadingChange, HeadingEvent, HeadingField, HeadingLog, HeadingReason,
    HeadingTrace, SampleRejection,
};

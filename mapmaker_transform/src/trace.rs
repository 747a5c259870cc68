// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured change tracing for [`TransformState`](crate::TransformState).
//!
//! The transform never logs on its own. Instead, every mutation is reported
//! to a caller-supplied [`TransformTrace`] sink as a [`TransformChange`]
//! record naming the field, its old and new value, and why it moved. Inputs
//! that were discarded are reported through [`TransformTrace::ignored`].
//!
//! `()` is the no-op sink used by [`TransformState::new`](crate::TransformState::new).
//! [`TransformLog`] keeps every record in memory, which is handy in tests and
//! debug overlays.

use alloc::vec::Vec;

/// A transform field that can change.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TransformField {
    /// The uniform scale factor.
    Scale,
    /// The horizontal translation component.
    TranslationX,
    /// The vertical translation component.
    TranslationY,
    /// The rotation, in degrees.
    Rotation,
}

/// Why a transform field changed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ChangeReason {
    /// A live gesture update, after clamping.
    Gesture,
    /// A pan update that could not apply the rotation compensation and used
    /// the raw screen-space delta instead.
    UnrotatedFallback,
    /// A rotation update whose result was not finite; the live value was put
    /// back to the committed baseline.
    RevertedToCommitted,
    /// A gesture-end commit that normalized the live value.
    Commit,
    /// The validation pass found a non-finite value and restored the default.
    Repaired,
    /// An explicit reset to defaults.
    Reset,
    /// New limits re-clamped the value.
    LimitsChanged,
}

/// One structured change record.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformChange {
    /// The field that changed.
    pub field: TransformField,
    /// Value before the change.
    pub old: f64,
    /// Value after the change.
    pub new: f64,
    /// Why the value changed.
    pub reason: ChangeReason,
}

/// A callback sink for transform changes.
///
/// Both methods default to doing nothing, so a sink only implements what it
/// cares about.
pub trait TransformTrace {
    /// Called after a field took a new value.
    fn changed(&mut self, change: TransformChange) {
        let _ = change;
    }

    /// Called when a gesture input for `field` was discarded because it was
    /// not usable (NaN, or a non-finite rotation delta).
    fn ignored(&mut self, field: TransformField, input: f64) {
        let _ = (field, input);
    }
}

impl TransformTrace for () {}

impl<T: TransformTrace + ?Sized> TransformTrace for &mut T {
    fn changed(&mut self, change: TransformChange) {
        (**self).changed(change);
    }

    fn ignored(&mut self, field: TransformField, input: f64) {
        (**self).ignored(field, input);
    }
}

/// A record kept by [`TransformLog`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TransformEvent {
    /// See [`TransformTrace::changed`].
    Changed(TransformChange),
    /// See [`TransformTrace::ignored`].
    Ignored {
        /// The field the input was meant for.
        field: TransformField,
        /// The discarded input.
        input: f64,
    },
}

/// Records every trace callback in order.
#[derive(Clone, Debug, Default)]
pub struct TransformLog {
    events: Vec<TransformEvent>,
}

impl TransformLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[TransformEvent] {
        &self.events
    }

    /// Recorded changes with the given reason.
    pub fn changes_with(&self, reason: ChangeReason) -> impl Iterator<Item = &TransformChange> {
        self.events.iter().filter_map(move |event| match event {
            TransformEvent::Changed(change) if change.reason == reason => Some(change),
            _ => None,
        })
    }

    /// Clears all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TransformTrace for TransformLog {
    fn changed(&mut self, change: TransformChange) {
        self.events.push(TransformEvent::Changed(change));
    }

    fn ignored(&mut self, field: TransformField, input: f64) {
        self.events.push(TransformEvent::Ignored { field, input });
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility state machine: hidden → entering → visible → hidden.
//!
//! ## Transitions
//!
//! | from       | input                     | to       | side effect        |
//! |------------|---------------------------|----------|--------------------|
//! | `Hidden`   | show (enabled)            | `Entering` | arm `delay` timer |
//! | `Entering` | hide                      | `Hidden` | cancel timer       |
//! | `Entering` | timer fired (current id)  | `Visible` |                   |
//! | `Visible`  | hide                      | `Hidden` |                    |
//! | any        | disabled                  | `Hidden` | cancel timer       |
//!
//! A show while `Entering` or `Visible` does nothing. There is no hide delay.
//!
//! The machine owns the only timer handle. Every path out of `Entering` other
//! than the timer itself cancels it, and [`VisibilityMachine::reset`] does the
//! same for teardown, so a late callback can only arrive with an id the machine
//! no longer holds, and [`VisibilityMachine::timer_fired`] ignores it.
//!
//! ```
//! use understory_floating::host::{FrameId, TimerId, Timers};
//! use understory_floating::visibility::{VisibilityMachine, VisibilityPhase};
//!
//! #[derive(Default)]
//! struct Clock { next: u64 }
//! impl Timers for Clock {
//!     fn set_timeout(&mut self, _ms: u64) -> TimerId { self.next += 1; TimerId::from_raw(self.next) }
//!     fn clear_timeout(&mut self, _id: TimerId) {}
//!     fn request_frame(&mut self) -> FrameId { FrameId::from_raw(0) }
//!     fn cancel_frame(&mut self, _id: FrameId) {}
//! }
//!
//! let mut clock = Clock::default();
//! let mut vis = VisibilityMachine::new(200, false);
//! vis.show(&mut clock);
//! assert_eq!(vis.phase(), VisibilityPhase::Entering);
//! let id = vis.pending_timer().unwrap();
//! vis.timer_fired(id);
//! assert_eq!(vis.phase(), VisibilityPhase::Visible);
//! ```

use crate::host::{TimerId, Timers};

/// Lifecycle phase of the floating element.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum VisibilityPhase {
    /// Not mounted.
    #[default]
    Hidden,
    /// Show delay running; not mounted yet.
    Entering,
    /// Mounted and being positioned.
    Visible,
}

/// A phase change reported by the machine.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Transition {
    /// Phase before the input.
    pub from: VisibilityPhase,
    /// Phase after the input.
    pub to: VisibilityPhase,
}

impl Transition {
    /// Returns `true` if this transition mounts the floating element.
    #[must_use]
    pub fn is_mount(&self) -> bool {
        self.to == VisibilityPhase::Visible
    }

    /// Returns `true` if this transition unmounts the floating element.
    #[must_use]
    pub fn is_unmount(&self) -> bool {
        self.from == VisibilityPhase::Visible
    }
}

/// Owner of the visibility phase and the show-delay timer.
#[derive(Clone, Debug, Default)]
pub struct VisibilityMachine {
    phase: VisibilityPhase,
    delay_ms: u64,
    disabled: bool,
    timer: Option<TimerId>,
}

impl VisibilityMachine {
    /// Create a hidden machine.
    #[must_use]
    pub const fn new(delay_ms: u64, disabled: bool) -> Self {
        Self {
            phase: VisibilityPhase::Hidden,
            delay_ms,
            disabled,
            timer: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> VisibilityPhase {
        self.phase
    }

    /// Show delay in milliseconds.
    #[must_use]
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Whether show intents are ignored.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The armed show-delay timer, if `Entering`.
    #[must_use]
    pub const fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Change the show delay. Takes effect on the next show intent.
    pub fn set_delay(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// Show intent: arm the delay timer if hidden and enabled.
    pub fn show<T: Timers + ?Sized>(&mut self, timers: &mut T) -> Option<Transition> {
        if self.disabled || self.phase != VisibilityPhase::Hidden {
            return None;
        }
        self.timer = Some(timers.set_timeout(self.delay_ms));
        self.enter(VisibilityPhase::Entering)
    }

    /// Hide intent: go to `Hidden` immediately, canceling any pending timer.
    pub fn hide<T: Timers + ?Sized>(&mut self, timers: &mut T) -> Option<Transition> {
        self.cancel_timer(timers);
        self.enter(VisibilityPhase::Hidden)
    }

    /// The host reports that timer `id` fired.
    ///
    /// Only the currently armed timer moves `Entering` to `Visible`; anything
    /// else is a stale callback and is ignored.
    pub fn timer_fired(&mut self, id: TimerId) -> Option<Transition> {
        if self.timer != Some(id) {
            log::debug!("ignoring stale show timer {id:?}");
            return None;
        }
        self.timer = None;
        self.enter(VisibilityPhase::Visible)
    }

    /// Enable or disable. Disabling hides from any phase.
    pub fn set_disabled<T: Timers + ?Sized>(
        &mut self,
        disabled: bool,
        timers: &mut T,
    ) -> Option<Transition> {
        self.disabled = disabled;
        if disabled {
            self.hide(timers)
        } else {
            None
        }
    }

    /// Teardown: cancel the timer and return to `Hidden`.
    pub fn reset<T: Timers + ?Sized>(&mut self, timers: &mut T) -> Option<Transition> {
        self.hide(timers)
    }

    fn cancel_timer<T: Timers + ?Sized>(&mut self, timers: &mut T) {
        if let Some(id) = self.timer.take() {
            timers.clear_timeout(id);
        }
    }

    fn enter(&mut self, to: VisibilityPhase) -> Option<Transition> {
        let from = self.phase;
        if from == to {
            return None;
        }
        self.phase = to;
        log::trace!("visibility {from:?} -> {to:?}");
        Some(Transition { from, to })
    }
}

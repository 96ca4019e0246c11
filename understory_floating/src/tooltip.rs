// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip: one trigger, one piece of floating content, and the full lifecycle.
//!
//! ## Flow
//!
//! 1. The [trigger observer](crate::trigger) maps pointer/focus events to show and hide intents.
//! 2. The [visibility machine](crate::visibility) delays shows and hides immediately.
//! 3. When the show timer fires, the [portal](crate::portal) mounts the content
//!    (carrying the trigger's theme) and the [geometry observer](crate::geometry)
//!    measures, solves, and places it in the same call, before the host paints.
//! 4. Scroll and resize re-solve while visible. Hiding detaches and unmounts.
//!
//! Dropping a [`Tooltip`] cancels its timer, releases every subscription, and
//! unmounts the floating node, so no callback can reach a dead instance.
//!
//! ## Driving a tooltip
//!
//! The host forwards subscribed events to [`Tooltip::handle`], fired timeouts to
//! [`Tooltip::on_timer`], and animation frames to [`Tooltip::on_frame`].

use crate::geometry::GeometryObserver;
use crate::host::{FrameId, Host, HostEvent, NodeHandle, TimerId};
use crate::portal::Portal;
use crate::trigger::{Intent, TriggerObserver};
use crate::types::{PlacementOptions, Position, Side, Theme};
use crate::visibility::{Transition, VisibilityMachine, VisibilityPhase};

/// Consumer-facing tooltip options.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TooltipConfig {
    /// Requested side. The resolved side may be its opposite after a flip.
    pub placement: Side,
    /// Delay between show intent and mount, in milliseconds.
    pub delay_ms: u64,
    /// When set, show intents are ignored and a visible tooltip hides.
    pub disabled: bool,
    /// Geometry tuning.
    pub options: PlacementOptions,
}

impl TooltipConfig {
    /// Default show delay.
    pub const DEFAULT_DELAY_MS: u64 = 200;
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            placement: Side::Top,
            delay_ms: Self::DEFAULT_DELAY_MS,
            disabled: false,
            options: PlacementOptions::default(),
        }
    }
}

/// A positioned, delayed floating element attached to a trigger.
pub struct Tooltip<H: Host> {
    host: H,
    trigger: TriggerObserver,
    visibility: VisibilityMachine,
    geometry: GeometryObserver,
    portal: Portal,
}

impl<H: Host> core::fmt::Debug for Tooltip<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tooltip")
            .field("trigger", &self.trigger)
            .field("visibility", &self.visibility)
            .field("geometry", &self.geometry)
            .field("portal", &self.portal)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Tooltip<H> {
    /// Create a tooltip for `trigger` showing `content`, and start listening.
    pub fn new(
        mut host: H,
        trigger: NodeHandle,
        content: NodeHandle,
        config: TooltipConfig,
    ) -> Self {
        let mut observer = TriggerObserver::new(trigger);
        observer.attach(&mut host);
        Self {
            host,
            trigger: observer,
            visibility: VisibilityMachine::new(config.delay_ms, config.disabled),
            geometry: GeometryObserver::new(trigger, config.placement, config.options),
            portal: Portal::new(content),
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> TooltipConfig {
        TooltipConfig {
            placement: self.geometry.placement(),
            delay_ms: self.visibility.delay_ms(),
            disabled: self.visibility.is_disabled(),
            options: *self.geometry.options(),
        }
    }

    /// Current visibility phase.
    #[must_use]
    pub fn phase(&self) -> VisibilityPhase {
        self.visibility.phase()
    }

    /// Returns `true` once the floating element is mounted and placed.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.phase() == VisibilityPhase::Visible && self.geometry.position().is_some()
    }

    /// Last applied position in this cycle.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.geometry.position()
    }

    /// The mounted floating node.
    #[must_use]
    pub fn floating(&self) -> Option<NodeHandle> {
        self.portal.floating()
    }

    /// Theme copied onto the floating node at mount.
    #[must_use]
    pub fn theme(&self) -> Option<Theme> {
        self.portal.theme()
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Deliver a subscribed event.
    ///
    /// Trigger events drive visibility; scroll and resize re-solve while visible.
    pub fn handle(&mut self, event: HostEvent) -> Option<Transition> {
        match TriggerObserver::intent(event) {
            Some(Intent::Show) => self.visibility.show(&mut self.host),
            Some(Intent::Hide) => {
                let transition = self.visibility.hide(&mut self.host);
                self.apply(transition);
                transition
            }
            None => {
                let _ = self.geometry.on_viewport_change(&mut self.host);
                None
            }
        }
    }

    /// Deliver a fired timeout. Stale ids are ignored.
    pub fn on_timer(&mut self, id: TimerId) -> Option<Transition> {
        let transition = self.visibility.timer_fired(id);
        self.apply(transition);
        transition
    }

    /// Deliver an animation frame. Returns the position if this frame placed the element.
    pub fn on_frame(&mut self, id: FrameId) -> Option<Position> {
        self.geometry.on_frame(id, &mut self.host)
    }

    /// Enable or disable the tooltip; disabling hides it at once.
    pub fn set_disabled(&mut self, disabled: bool) -> Option<Transition> {
        let transition = self.visibility.set_disabled(disabled, &mut self.host);
        self.apply(transition);
        transition
    }

    /// Change the show delay for subsequent show intents.
    pub fn set_delay(&mut self, delay_ms: u64) {
        self.visibility.set_delay(delay_ms);
    }

    /// Change the requested side; re-solves while visible.
    pub fn set_placement(&mut self, placement: Side) -> Option<Position> {
        self.geometry.set_placement(placement, &mut self.host)
    }

    /// Replace the placement options; re-solves while visible.
    pub fn set_options(&mut self, options: PlacementOptions) -> Option<Position> {
        self.geometry.set_options(options, &mut self.host)
    }

    fn apply(&mut self, transition: Option<Transition>) {
        let Some(transition) = transition else {
            return;
        };
        if transition.is_mount() {
            let floating = self.portal.mount(self.trigger.node(), &mut self.host);
            let _ = self.geometry.attach(floating, &mut self.host);
        } else if transition.is_unmount() {
            self.geometry.detach(&mut self.host);
            self.portal.unmount(&mut self.host);
        }
    }
}

impl<H: Host> Drop for Tooltip<H> {
    fn drop(&mut self) {
        let transition = self.visibility.reset(&mut self.host);
        self.apply(transition);
        self.trigger.detach(&mut self.host);
    }
}

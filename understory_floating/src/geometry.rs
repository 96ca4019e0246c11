// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry observer: measure, solve, place, and keep placing while visible.
//!
//! ## Lifecycle
//!
//! - [`GeometryObserver::attach`] runs when the floating element has just been
//!   mounted. It measures both nodes, runs the [solver](crate::solver), applies
//!   the result through [`RenderTarget::place`], and only then subscribes to
//!   window scroll (capture phase) and resize.
//! - While attached, [`GeometryObserver::on_viewport_change`] re-solves.
//! - [`GeometryObserver::detach`] releases the subscription and any pending
//!   frame. It must run on every exit from the visible phase; a leaked scroll
//!   listener would keep measuring a detached node.
//!
//! ## First layout
//!
//! A freshly mounted node may not be laid out yet and measure as zero-size.
//! The observer then requests one animation frame and tries again from
//! [`GeometryObserver::on_frame`], repeating until the node has a size.
//! Nothing is placed until a solve succeeds, so the element never paints at a
//! stale position first.

use crate::host::{
    EventKinds, EventTarget, FrameId, Measure, NodeHandle, RenderTarget, Subscribe,
    SubscriptionToken, Timers,
};
use crate::solver::try_solve;
use crate::types::{PlacementOptions, Position, Side};

/// Tracks one trigger/floating pair while the floating element is mounted.
#[derive(Clone, Debug)]
pub struct GeometryObserver {
    trigger: NodeHandle,
    placement: Side,
    options: PlacementOptions,
    floating: Option<NodeHandle>,
    token: Option<SubscriptionToken>,
    frame: Option<FrameId>,
    position: Option<Position>,
}

impl GeometryObserver {
    /// Create a detached observer for `trigger`.
    #[must_use]
    pub fn new(trigger: NodeHandle, placement: Side, options: PlacementOptions) -> Self {
        Self {
            trigger,
            placement,
            options,
            floating: None,
            token: None,
            frame: None,
            position: None,
        }
    }

    /// Requested side.
    #[must_use]
    pub const fn placement(&self) -> Side {
        self.placement
    }

    /// Placement options in use.
    #[must_use]
    pub const fn options(&self) -> &PlacementOptions {
        &self.options
    }

    /// Last applied position, if any solve succeeded this cycle.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// The floating node being tracked.
    #[must_use]
    pub const fn floating(&self) -> Option<NodeHandle> {
        self.floating
    }

    /// Returns `true` between [`attach`](Self::attach) and [`detach`](Self::detach).
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.floating.is_some()
    }

    /// Frame requested while waiting for the first layout.
    #[must_use]
    pub const fn pending_frame(&self) -> Option<FrameId> {
        self.frame
    }

    /// Start tracking the freshly mounted `floating` node.
    ///
    /// Returns the applied position, or `None` if the node is not measurable
    /// yet (a frame has been requested).
    pub fn attach<H>(&mut self, floating: NodeHandle, host: &mut H) -> Option<Position>
    where
        H: Measure + Subscribe + Timers + RenderTarget + ?Sized,
    {
        self.floating = Some(floating);
        self.position = None;
        let position = self.update(host);
        if self.token.is_none() {
            self.token = Some(host.subscribe(EventTarget::Window, EventKinds::VIEWPORT, true));
        }
        position
    }

    /// Stop tracking: release the viewport subscription and any pending frame.
    pub fn detach<H>(&mut self, host: &mut H)
    where
        H: Subscribe + Timers + ?Sized,
    {
        if let Some(token) = self.token.take() {
            host.unsubscribe(token);
        }
        if let Some(frame) = self.frame.take() {
            host.cancel_frame(frame);
        }
        self.floating = None;
        self.position = None;
    }

    /// Scroll or resize happened. Re-solves while attached.
    pub fn on_viewport_change<H>(&mut self, host: &mut H) -> Option<Position>
    where
        H: Measure + Timers + RenderTarget + ?Sized,
    {
        if !self.is_attached() {
            return None;
        }
        self.update(host)
    }

    /// The host reports that frame `id` ran.
    pub fn on_frame<H>(&mut self, id: FrameId, host: &mut H) -> Option<Position>
    where
        H: Measure + Timers + RenderTarget + ?Sized,
    {
        if self.frame != Some(id) {
            log::debug!("ignoring stale frame {id:?}");
            return None;
        }
        self.frame = None;
        self.update(host)
    }

    /// Change the requested side; re-solves while attached.
    pub fn set_placement<H>(&mut self, placement: Side, host: &mut H) -> Option<Position>
    where
        H: Measure + Timers + RenderTarget + ?Sized,
    {
        self.placement = placement;
        self.on_viewport_change(host)
    }

    /// Replace the placement options; re-solves while attached.
    pub fn set_options<H>(&mut self, options: PlacementOptions, host: &mut H) -> Option<Position>
    where
        H: Measure + Timers + RenderTarget + ?Sized,
    {
        self.options = options;
        self.on_viewport_change(host)
    }

    fn update<H>(&mut self, host: &mut H) -> Option<Position>
    where
        H: Measure + Timers + RenderTarget + ?Sized,
    {
        let floating = self.floating?;
        let solved = match (host.measure(self.trigger), host.measure(floating)) {
            (Some(trigger), Some(rect)) => try_solve(
                trigger,
                rect,
                self.placement,
                host.viewport(),
                &self.options,
            ),
            _ => None,
        };
        let Some(position) = solved else {
            if self.frame.is_none() {
                log::trace!("floating {floating:?} not measurable yet, waiting a frame");
                self.frame = Some(host.request_frame());
            }
            return None;
        };
        if let Some(frame) = self.frame.take() {
            host.cancel_frame(frame);
        }
        if self.position != Some(position) {
            log::trace!("placing {floating:?} at {position:?}");
        }
        host.place(floating, &position);
        self.position = Some(position);
        Some(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::FakeHost;
    use kurbo::{Rect, Size};

    fn setup() -> (FakeHost, GeometryObserver, NodeHandle) {
        let mut host = FakeHost::new();
        host.set_viewport(Size::new(800.0, 600.0));
        let trigger = host.add_node(Rect::new(380.0, 300.0, 420.0, 320.0));
        host.set_floating_size(Size::new(80.0, 24.0));
        let floating = host.mount(trigger, None);
        let observer = GeometryObserver::new(trigger, Side::Top, PlacementOptions::default());
        (host, observer, floating)
    }

    #[test]
    fn attach_places_before_subscribing() {
        let (mut host, mut observer, floating) = setup();
        let pos = observer.attach(floating, &mut host).unwrap();
        // 80×24 at 0.8 is 100×30.
        assert_eq!(pos.side, Side::Top);
        assert_eq!((pos.left, pos.top), (350.0, 260.0));
        assert_eq!(host.placements(), &[(floating, pos)]);

        let subs = host.subscriptions();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].target, EventTarget::Window);
        assert_eq!(subs[0].kinds, EventKinds::VIEWPORT);
        assert!(subs[0].capture);
    }

    #[test]
    fn detach_releases_everything() {
        let (mut host, mut observer, floating) = setup();
        let _ = observer.attach(floating, &mut host);
        observer.detach(&mut host);
        assert!(host.subscriptions().is_empty());
        assert!(!observer.is_attached());
        assert_eq!(observer.position(), None);
        // Detached observers ignore viewport notifications.
        assert_eq!(observer.on_viewport_change(&mut host), None);
        assert_eq!(host.placements().len(), 1);
    }

    #[test]
    fn zero_size_waits_for_a_frame() {
        let (mut host, mut observer, _) = setup();
        host.set_floating_size(Size::ZERO);
        let floating = host.mount(NodeHandle::from_raw(0), None);

        assert_eq!(observer.attach(floating, &mut host), None);
        assert!(host.placements().is_empty());
        let frame = observer.pending_frame().unwrap();
        assert_eq!(host.pending_frames(), &[frame]);

        // Still not laid out: wait another frame.
        let _ = host.take_frames();
        assert_eq!(observer.on_frame(frame, &mut host), None);
        let next = observer.pending_frame().unwrap();
        assert_ne!(next, frame);

        host.set_rect(floating, Rect::new(-1e4, -1e4, -1e4 + 80.0, -1e4 + 24.0));
        let _ = host.take_frames();
        let pos = observer.on_frame(next, &mut host).unwrap();
        assert_eq!(pos.left, 350.0);
        assert_eq!(observer.pending_frame(), None);
        // Stale frame ids are ignored.
        assert_eq!(observer.on_frame(frame, &mut host), None);
    }

    #[test]
    fn detach_cancels_pending_frame() {
        let (mut host, mut observer, _) = setup();
        host.set_floating_size(Size::ZERO);
        let floating = host.mount(NodeHandle::from_raw(0), None);
        let _ = observer.attach(floating, &mut host);
        assert_eq!(host.pending_frames().len(), 1);
        observer.detach(&mut host);
        assert!(host.pending_frames().is_empty());
    }

    #[test]
    fn resize_can_flip_the_side() {
        let (mut host, mut observer, floating) = setup();
        let first = observer.attach(floating, &mut host).unwrap();
        assert_eq!(first.side, Side::Top);

        // Layout moved the trigger near the top edge.
        host.set_rect(observer.trigger, Rect::new(380.0, 20.0, 420.0, 40.0));
        let second = observer.on_viewport_change(&mut host).unwrap();
        assert_eq!(second.side, Side::Bottom);
        assert_eq!(second.top, 50.0);
        assert_eq!(observer.position(), Some(second));
    }

    #[test]
    fn placement_change_resolves_while_attached() {
        let (mut host, mut observer, floating) = setup();
        assert_eq!(observer.set_placement(Side::Right, &mut host), None);
        let _ = observer.attach(floating, &mut host);
        let pos = observer.set_placement(Side::Right, &mut host).unwrap();
        assert_eq!(pos.side, Side::Right);
        assert_eq!(pos.left, 430.0);
    }
}

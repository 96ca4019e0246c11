// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording in-memory host for unit tests.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::host::{
    EventKinds, EventTarget, FrameId, Measure, NodeHandle, RenderTarget, Subscribe,
    SubscriptionToken, ThemeLookup, TimerId, Timers,
};
use crate::types::{Position, Theme};

/// Off-screen origin for freshly mounted floating nodes.
const OFFSCREEN: Point = Point::new(-10_000.0, -10_000.0);

#[derive(Copy, Clone, Debug)]
pub(crate) struct Subscription {
    pub(crate) token: SubscriptionToken,
    pub(crate) target: EventTarget,
    pub(crate) kinds: EventKinds,
    pub(crate) capture: bool,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Mounted {
    pub(crate) node: NodeHandle,
    pub(crate) content: NodeHandle,
    pub(crate) theme: Option<Theme>,
}

#[derive(Debug)]
pub(crate) struct FakeHost {
    next_id: u64,
    now_ms: u64,
    viewport: Size,
    floating_size: Size,
    rects: BTreeMap<NodeHandle, Rect>,
    themes: BTreeMap<NodeHandle, Theme>,
    timers: Vec<(TimerId, u64)>,
    frames: Vec<FrameId>,
    subscriptions: Vec<Subscription>,
    mounted: Vec<Mounted>,
    placements: Vec<(NodeHandle, Position)>,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            now_ms: 0,
            viewport: Size::new(1024.0, 768.0),
            floating_size: Size::ZERO,
            rects: BTreeMap::new(),
            themes: BTreeMap::new(),
            timers: Vec::new(),
            frames: Vec::new(),
            subscriptions: Vec::new(),
            mounted: Vec::new(),
            placements: Vec::new(),
        }
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub(crate) fn add_node(&mut self, rect: Rect) -> NodeHandle {
        let node = NodeHandle::from_raw(self.next());
        self.rects.insert(node, rect);
        node
    }

    pub(crate) fn set_rect(&mut self, node: NodeHandle, rect: Rect) {
        self.rects.insert(node, rect);
    }

    pub(crate) fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub(crate) fn set_theme(&mut self, node: NodeHandle, theme: Theme) {
        self.themes.insert(node, theme);
    }

    /// Size (as measured, i.e. scaled) given to floating nodes mounted from now on.
    pub(crate) fn set_floating_size(&mut self, size: Size) {
        self.floating_size = size;
    }

    /// Move the clock forward and return the timers that came due, in order.
    pub(crate) fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        self.now_ms += ms;
        let now = self.now_ms;
        let timers = core::mem::take(&mut self.timers);
        let (due, pending): (Vec<_>, Vec<_>) =
            timers.into_iter().partition(|(_, at)| *at <= now);
        self.timers = pending;
        due.into_iter().map(|(id, _)| id).collect()
    }

    pub(crate) fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub(crate) fn pending_frames(&self) -> &[FrameId] {
        &self.frames
    }

    /// Run the frame queue: returns and clears the requested frames.
    pub(crate) fn take_frames(&mut self) -> Vec<FrameId> {
        core::mem::take(&mut self.frames)
    }

    pub(crate) fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub(crate) fn mounted(&self) -> &[Mounted] {
        &self.mounted
    }

    pub(crate) fn placements(&self) -> &[(NodeHandle, Position)] {
        &self.placements
    }
}

impl Measure for FakeHost {
    fn measure(&self, node: NodeHandle) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}

impl Subscribe for FakeHost {
    fn subscribe(
        &mut self,
        target: EventTarget,
        kinds: EventKinds,
        capture: bool,
    ) -> SubscriptionToken {
        let token = SubscriptionToken::from_raw(self.next());
        self.subscriptions.push(Subscription {
            token,
            target,
            kinds,
            capture,
        });
        token
    }

    fn unsubscribe(&mut self, token: SubscriptionToken) {
        self.subscriptions.retain(|s| s.token != token);
    }
}

impl Timers for FakeHost {
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        let id = TimerId::from_raw(self.next());
        self.timers.push((id, self.now_ms + delay_ms));
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.retain(|(t, _)| *t != id);
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId::from_raw(self.next());
        self.frames.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.retain(|f| *f != id);
    }
}

impl RenderTarget for FakeHost {
    fn mount(&mut self, content: NodeHandle, theme: Option<Theme>) -> NodeHandle {
        let node = self.add_node(Rect::from_origin_size(OFFSCREEN, self.floating_size));
        self.mounted.push(Mounted {
            node,
            content,
            theme,
        });
        node
    }

    fn place(&mut self, floating: NodeHandle, position: &Position) {
        if let Some(rect) = self.rects.get_mut(&floating) {
            *rect = Rect::from_origin_size(position.origin(), rect.size());
        }
        self.placements.push((floating, *position));
    }

    fn unmount(&mut self, floating: NodeHandle) {
        self.mounted.retain(|m| m.node != floating);
        self.rects.remove(&floating);
    }
}

impl ThemeLookup for FakeHost {
    fn theme_of(&self, node: NodeHandle) -> Option<Theme> {
        self.themes.get(&node).copied()
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip lifecycle against a scripted host.
//!
//! Hovers a trigger, lets the show delay elapse, scrolls the page so the
//! trigger nears the top edge, then leaves. Every host call is logged at `info`.
//!
//! Run:
//! - `cargo run -p understory_demos --example tooltip_lifecycle`
//! - `RUST_LOG=trace cargo run -p understory_demos --example tooltip_lifecycle`

use std::collections::BTreeMap;

use kurbo::{Point, Rect, Size, Vec2};
use understory_floating::host::{
    EventKinds, EventTarget, FrameId, Measure, RenderTarget, Subscribe, SubscriptionToken,
    ThemeLookup, TimerId, Timers,
};
use understory_floating::{
    HostEvent, NodeHandle, Position, Theme, Tooltip, TooltipConfig, VisibilityPhase,
};

/// A tiny document: fixed rects, a clock, and printed side effects.
#[derive(Default)]
struct ScriptedHost {
    next_id: u64,
    now_ms: u64,
    rects: BTreeMap<NodeHandle, Rect>,
    timers: Vec<(TimerId, u64)>,
    frames: Vec<FrameId>,
    dark: Option<NodeHandle>,
}

impl ScriptedHost {
    fn id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn node(&mut self, rect: Rect) -> NodeHandle {
        let node = NodeHandle::from_raw(self.id());
        self.rects.insert(node, rect);
        node
    }

    fn scroll_by(&mut self, node: NodeHandle, dy: f64) {
        if let Some(rect) = self.rects.get_mut(&node) {
            *rect = *rect - Vec2::new(0.0, dy);
        }
    }

    fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        self.now_ms += ms;
        let now = self.now_ms;
        let (due, pending): (Vec<_>, Vec<_>) = self.timers.drain(..).partition(|t| t.1 <= now);
        self.timers = pending;
        due.into_iter().map(|t| t.0).collect()
    }
}

impl Measure for ScriptedHost {
    fn measure(&self, node: NodeHandle) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    fn viewport(&self) -> Size {
        Size::new(800.0, 600.0)
    }
}

impl Subscribe for ScriptedHost {
    fn subscribe(
        &mut self,
        target: EventTarget,
        kinds: EventKinds,
        capture: bool,
    ) -> SubscriptionToken {
        let token = SubscriptionToken::from_raw(self.id());
        log::info!("subscribe {target:?} {kinds:?} capture={capture} -> {token:?}");
        token
    }

    fn unsubscribe(&mut self, token: SubscriptionToken) {
        log::info!("unsubscribe {token:?}");
    }
}

impl Timers for ScriptedHost {
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        let id = TimerId::from_raw(self.id());
        self.timers.push((id, self.now_ms + delay_ms));
        log::info!("set_timeout {delay_ms}ms -> {id:?}");
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.retain(|t| t.0 != id);
        log::info!("clear_timeout {id:?}");
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId::from_raw(self.id());
        self.frames.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.retain(|f| *f != id);
    }
}

impl RenderTarget for ScriptedHost {
    fn mount(&mut self, content: NodeHandle, theme: Option<Theme>) -> NodeHandle {
        // Laid out off-screen, at the transition's 0.8 scale.
        let node = self.node(Rect::from_origin_size(
            Point::new(-10_000.0, -10_000.0),
            (160.0, 40.0),
        ));
        log::info!("mount {content:?} theme={theme:?} -> {node:?}");
        node
    }

    fn place(&mut self, floating: NodeHandle, position: &Position) {
        if let Some(rect) = self.rects.get_mut(&floating) {
            *rect = Rect::from_origin_size(position.origin(), rect.size());
        }
        log::info!("place {floating:?} at {position:?}");
    }

    fn unmount(&mut self, floating: NodeHandle) {
        self.rects.remove(&floating);
        log::info!("unmount {floating:?}");
    }
}

impl ThemeLookup for ScriptedHost {
    fn theme_of(&self, node: NodeHandle) -> Option<Theme> {
        (self.dark == Some(node)).then_some(Theme::Dark)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut host = ScriptedHost::default();
    let trigger = host.node(Rect::new(380.0, 200.0, 420.0, 224.0));
    let content = host.node(Rect::ZERO);
    host.dark = Some(trigger);

    log::info!("== Create ==");
    let mut tip = Tooltip::new(&mut host, trigger, content, TooltipConfig::default());

    log::info!("== Pointer enter ==");
    let _ = tip.handle(HostEvent::PointerEnter);

    log::info!("== 200ms later ==");
    for id in tip.host_mut().advance(TooltipConfig::DEFAULT_DELAY_MS) {
        let _ = tip.on_timer(id);
    }
    assert_eq!(tip.phase(), VisibilityPhase::Visible);
    let before = tip.position().expect("placed in the timer callback");

    log::info!("== Scroll the trigger up to the edge ==");
    tip.host_mut().scroll_by(trigger, 180.0);
    let _ = tip.handle(HostEvent::Scroll);
    let after = tip.position().expect("still visible");
    log::info!("side {} -> {}", before.side, after.side);

    log::info!("== Pointer leave ==");
    let _ = tip.handle(HostEvent::PointerLeave);
    assert_eq!(tip.phase(), VisibilityPhase::Hidden);

    log::info!("== Drop ==");
    drop(tip);
}

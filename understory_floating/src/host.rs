// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract: what the rendering toolkit provides to the positioning engine.
//!
//! ## Overview
//!
//! The engine never touches a real rendering surface.
//! Instead, a toolkit implements a handful of small traits:
//!
//! - [`Measure`]: bounding boxes of mounted nodes and the viewport size.
//! - [`Subscribe`]: scoped event subscriptions that return a [`SubscriptionToken`].
//! - [`Timers`]: cancelable timeouts and animation-frame callbacks.
//! - [`RenderTarget`]: portal mounting under a fixed, top-level root.
//! - [`ThemeLookup`]: the nearest theme marker above a node.
//!
//! Anything implementing all five is a [`Host`].
//!
//! Handles ([`NodeHandle`], [`TimerId`], [`FrameId`], [`SubscriptionToken`]) are
//! opaque identifiers minted by the host. The engine only stores and returns them.
//!
//! ## Delivering events
//!
//! When a subscribed event, timer, or frame fires, the host calls back into
//! [`Tooltip`](crate::tooltip::Tooltip) with a [`HostEvent`],
//! [`Tooltip::on_timer`](crate::tooltip::Tooltip::on_timer), or
//! [`Tooltip::on_frame`](crate::tooltip::Tooltip::on_frame). Callbacks carrying ids that
//! were already canceled are ignored.

use kurbo::{Rect, Size};

use crate::types::{Position, Theme};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a host-side raw identifier.
            #[must_use]
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// The host-side raw identifier.
            #[must_use]
            pub const fn raw(self) -> u64 {
                self.0
            }
        }
    };
}

opaque_id!(
    /// A mounted node the host can measure, subscribe to, or portal.
    NodeHandle
);
opaque_id!(
    /// A pending timeout created by [`Timers::set_timeout`].
    TimerId
);
opaque_id!(
    /// A pending animation-frame callback created by [`Timers::request_frame`].
    FrameId
);
opaque_id!(
    /// A live subscription created by [`Subscribe::subscribe`].
    SubscriptionToken
);

bitflags::bitflags! {
    /// Set of event kinds a subscription listens for.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventKinds: u8 {
        /// Pointer entered the node.
        const POINTER_ENTER = 0b0000_0001;
        /// Pointer left the node.
        const POINTER_LEAVE = 0b0000_0010;
        /// Node gained focus.
        const FOCUS         = 0b0000_0100;
        /// Node lost focus.
        const BLUR          = 0b0000_1000;
        /// Any scroll, including ancestors of the trigger when captured.
        const SCROLL        = 0b0001_0000;
        /// Viewport resize.
        const RESIZE        = 0b0010_0000;

        /// Everything the trigger observer listens for.
        const TRIGGER = Self::POINTER_ENTER.bits()
            | Self::POINTER_LEAVE.bits()
            | Self::FOCUS.bits()
            | Self::BLUR.bits();
        /// Everything the geometry observer listens for.
        const VIEWPORT = Self::SCROLL.bits() | Self::RESIZE.bits();
    }
}

/// A single event delivered by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HostEvent {
    /// Pointer entered the trigger.
    PointerEnter,
    /// Pointer left the trigger.
    PointerLeave,
    /// Trigger gained focus.
    Focus,
    /// Trigger lost focus.
    Blur,
    /// Something scrolled.
    Scroll,
    /// The viewport was resized.
    Resize,
}

impl HostEvent {
    /// The [`EventKinds`] bit for this event.
    #[must_use]
    pub const fn kind(self) -> EventKinds {
        match self {
            Self::PointerEnter => EventKinds::POINTER_ENTER,
            Self::PointerLeave => EventKinds::POINTER_LEAVE,
            Self::Focus => EventKinds::FOCUS,
            Self::Blur => EventKinds::BLUR,
            Self::Scroll => EventKinds::SCROLL,
            Self::Resize => EventKinds::RESIZE,
        }
    }
}

/// Where a subscription is attached.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventTarget {
    /// A specific node.
    Node(NodeHandle),
    /// The window / document.
    Window,
}

/// Measure mounted nodes in viewport coordinates.
pub trait Measure {
    /// Bounding box of `node`, or `None` if it is not mounted.
    fn measure(&self, node: NodeHandle) -> Option<Rect>;
    /// Current viewport size.
    fn viewport(&self) -> Size;
}

/// Scoped event subscriptions.
pub trait Subscribe {
    /// Start listening for `kinds` on `target`.
    ///
    /// With `capture`, the host must deliver events during the capture phase so
    /// that, for example, scrolling any ancestor is observed.
    fn subscribe(
        &mut self,
        target: EventTarget,
        kinds: EventKinds,
        capture: bool,
    ) -> SubscriptionToken;
    /// Stop a subscription. Unknown tokens are ignored.
    fn unsubscribe(&mut self, token: SubscriptionToken);
}

/// Cancelable deferred callbacks.
pub trait Timers {
    /// Schedule a timeout after `delay_ms` milliseconds.
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId;
    /// Cancel a pending timeout. Unknown or fired ids are ignored.
    fn clear_timeout(&mut self, id: TimerId);
    /// Schedule a callback before the next paint.
    fn request_frame(&mut self) -> FrameId;
    /// Cancel a pending frame callback.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Portal rendering under a fixed, top-level root.
pub trait RenderTarget {
    /// Mount `content` under the top-level root and return the floating node.
    ///
    /// The node must stay invisible (for example off-screen) until the first
    /// [`place`](Self::place) call, but must be laid out so it can be measured.
    /// `theme` is applied to the mounted subtree when present.
    fn mount(&mut self, content: NodeHandle, theme: Option<Theme>) -> NodeHandle;
    /// Move the floating node to `position` using fixed coordinates.
    fn place(&mut self, floating: NodeHandle, position: &Position);
    /// Remove the floating node.
    fn unmount(&mut self, floating: NodeHandle);
}

/// Theme discovery.
pub trait ThemeLookup {
    /// Theme marker of the nearest ancestor of `node` (inclusive) carrying one.
    fn theme_of(&self, node: NodeHandle) -> Option<Theme>;
}

/// Everything a [`Tooltip`](crate::tooltip::Tooltip) needs from its toolkit.
///
/// Implemented automatically; `&mut H` is a host whenever `H` is, so a tooltip
/// can borrow a toolkit-wide host instead of owning it.
pub trait Host: Measure + Subscribe + Timers + RenderTarget + ThemeLookup {}

impl<T: Measure + Subscribe + Timers + RenderTarget + ThemeLookup + ?Sized> Host for T {}

impl<T: Measure + ?Sized> Measure for &mut T {
    #[inline]
    fn measure(&self, node: NodeHandle) -> Option<Rect> {
        (**self).measure(node)
    }

    #[inline]
    fn viewport(&self) -> Size {
        (**self).viewport()
    }
}

impl<T: Subscribe + ?Sized> Subscribe for &mut T {
    #[inline]
    fn subscribe(
        &mut self,
        target: EventTarget,
        kinds: EventKinds,
        capture: bool,
    ) -> SubscriptionToken {
        (**self).subscribe(target, kinds, capture)
    }

    #[inline]
    fn unsubscribe(&mut self, token: SubscriptionToken) {
        (**self).unsubscribe(token);
    }
}

impl<T: Timers + ?Sized> Timers for &mut T {
    #[inline]
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        (**self).set_timeout(delay_ms)
    }

    #[inline]
    fn clear_timeout(&mut self, id: TimerId) {
        (**self).clear_timeout(id);
    }

    #[inline]
    fn request_frame(&mut self) -> FrameId {
        (**self).request_frame()
    }

    #[inline]
    fn cancel_frame(&mut self, id: FrameId) {
        (**self).cancel_frame(id);
    }
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    #[inline]
    fn mount(&mut self, content: NodeHandle, theme: Option<Theme>) -> NodeHandle {
        (**self).mount(content, theme)
    }

    #[inline]
    fn place(&mut self, floating: NodeHandle, position: &Position) {
        (**self).place(floating, position);
    }

    #[inline]
    fn unmount(&mut self, floating: NodeHandle) {
        (**self).unmount(floating);
    }
}

impl<T: ThemeLookup + ?Sized> ThemeLookup for &mut T {
    #[inline]
    fn theme_of(&self, node: NodeHandle) -> Option<Theme> {
        (**self).theme_of(node)
    }
}

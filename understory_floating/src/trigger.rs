// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger observer: turns pointer and focus events on the trigger into intents.
//!
//! Enter and focus ask to show; leave and blur ask to hide. The observer does
//! not know about delays; the [visibility machine](crate::visibility) does.

use crate::host::{EventKinds, EventTarget, HostEvent, NodeHandle, Subscribe, SubscriptionToken};

/// What the trigger wants the floating element to do.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Intent {
    /// Show after the configured delay.
    Show,
    /// Hide immediately.
    Hide,
}

/// Holds the trigger node and its event subscription.
#[derive(Debug)]
pub struct TriggerObserver {
    node: NodeHandle,
    token: Option<SubscriptionToken>,
}

impl TriggerObserver {
    /// Create an observer for `node`. It does not listen until [`attach`](Self::attach).
    #[must_use]
    pub const fn new(node: NodeHandle) -> Self {
        Self { node, token: None }
    }

    /// The trigger node.
    #[must_use]
    pub const fn node(&self) -> NodeHandle {
        self.node
    }

    /// Returns `true` while subscribed.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.token.is_some()
    }

    /// Subscribe to pointer and focus events on the trigger. Idempotent.
    pub fn attach<S: Subscribe + ?Sized>(&mut self, host: &mut S) {
        if self.token.is_none() {
            let token = host.subscribe(EventTarget::Node(self.node), EventKinds::TRIGGER, false);
            self.token = Some(token);
        }
    }

    /// Release the subscription, if any.
    pub fn detach<S: Subscribe + ?Sized>(&mut self, host: &mut S) {
        if let Some(token) = self.token.take() {
            host.unsubscribe(token);
        }
    }

    /// Map a host event to an intent. Viewport events yield `None`.
    #[must_use]
    pub const fn intent(event: HostEvent) -> Option<Intent> {
        match event {
            HostEvent::PointerEnter | HostEvent::Focus => Some(Intent::Show),
            HostEvent::PointerLeave | HostEvent::Blur => Some(Intent::Hide),
            HostEvent::Scroll | HostEvent::Resize => None,
        }
    }
}

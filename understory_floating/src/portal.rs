// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portal: mounts the floating content under the host's top-level root.
//!
//! Rendering outside the trigger's subtree escapes ancestor clipping and
//! stacking contexts, but it also loses inherited styling. The theme marker of
//! the trigger's nearest themed ancestor is therefore read once at mount time
//! and handed to [`RenderTarget::mount`].

use crate::host::{NodeHandle, RenderTarget, ThemeLookup};
use crate::types::Theme;

/// Mount state for one piece of floating content.
#[derive(Clone, Debug)]
pub struct Portal {
    content: NodeHandle,
    mounted: Option<Mounted>,
}

#[derive(Copy, Clone, Debug)]
struct Mounted {
    node: NodeHandle,
    theme: Option<Theme>,
}

impl Portal {
    /// Create an unmounted portal for `content`.
    #[must_use]
    pub const fn new(content: NodeHandle) -> Self {
        Self {
            content,
            mounted: None,
        }
    }

    /// The consumer content rendered inside the floating element.
    #[must_use]
    pub const fn content(&self) -> NodeHandle {
        self.content
    }

    /// The mounted floating node, if any.
    #[must_use]
    pub fn floating(&self) -> Option<NodeHandle> {
        self.mounted.map(|m| m.node)
    }

    /// Theme copied at mount time.
    #[must_use]
    pub fn theme(&self) -> Option<Theme> {
        self.mounted.and_then(|m| m.theme)
    }

    /// Mount the content, copying the theme found above `trigger`.
    ///
    /// Returns the floating node; mounting twice returns the existing node.
    pub fn mount<H>(&mut self, trigger: NodeHandle, host: &mut H) -> NodeHandle
    where
        H: RenderTarget + ThemeLookup + ?Sized,
    {
        if let Some(mounted) = self.mounted {
            return mounted.node;
        }
        let theme = host.theme_of(trigger);
        let node = host.mount(self.content, theme);
        log::trace!("mounted {node:?} for {:?} with theme {theme:?}", self.content);
        self.mounted = Some(Mounted { node, theme });
        node
    }

    /// Unmount the floating node, if mounted.
    pub fn unmount<H: RenderTarget + ?Sized>(&mut self, host: &mut H) {
        if let Some(mounted) = self.mounted.take() {
            host.unmount(mounted.node);
        }
    }
}

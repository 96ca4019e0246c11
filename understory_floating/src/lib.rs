// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_floating --heading-base-level=0

//! Understory Floating: headless positioning for tooltips and other floating elements.
//!
//! ## Overview
//!
//! This crate decides where a floating element (tooltip, popover body) goes relative to
//! the element that triggered it, and when it should exist at all.
//! It does not render anything.
//! A toolkit plugs in through the small traits in [`host`] and forwards events, timers, and
//! animation frames; the crate calls back to measure nodes, subscribe to events, and mount
//! and place the floating node.
//!
//! ## Pieces
//!
//! - [`solver`]: a pure function from trigger rect, floating rect, requested [`Side`],
//!   and viewport size to a [`Position`]. Handles scale correction, one flip, cross-axis
//!   clamping, and the arrow offset.
//! - [`visibility`]: the hidden → entering → visible state machine and its show-delay timer.
//! - [`trigger`]: pointer/focus events on the trigger as show/hide intents.
//! - [`geometry`]: measures, solves, and places while visible; re-solves on scroll and resize.
//! - [`portal`]: mounts the content under the host's top-level root, carrying the theme.
//! - [`tooltip`]: [`Tooltip`] wires all of the above for one trigger.
//!
//! ## Coordinates
//!
//! Rects are [`kurbo::Rect`] in viewport coordinates (`x0` is left, `y0` is top), and
//! positions are meant for fixed positioning under a top-level root.
//!
//! The floating element is measured while its entry transition is still scaled down.
//! [`PlacementOptions::scale`] must equal the transition's initial scale; the solver divides
//! measured sizes by it before doing anything else.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_floating::{PlacementOptions, Side, solve};
//!
//! // A trigger close to the top of the viewport.
//! let trigger = Rect::new(300.0, 20.0, 340.0, 40.0);
//! // Measured mid-transition at 0.8: true size 150×50.
//! let floating = Rect::new(0.0, 0.0, 120.0, 40.0);
//!
//! let pos = solve(trigger, floating, Side::Top, Size::new(800.0, 600.0), &PlacementOptions::default());
//! // Not enough room above, so it flips below.
//! assert_eq!(pos.side, Side::Bottom);
//! assert_eq!(pos.top, 50.0);
//! assert_eq!(pos.left, 245.0);
//! // The arrow points at the trigger's center.
//! assert_eq!(pos.arrow_offset, 75.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod geometry;
pub mod host;
pub mod portal;
pub mod solver;
pub mod tooltip;
pub mod trigger;
pub mod types;
pub mod visibility;

#[cfg(test)]
mod test_host;

pub use host::{Host, HostEvent, NodeHandle};
pub use solver::{solve, try_solve};
pub use tooltip::{Tooltip, TooltipConfig};
pub use types::{ParseSideError, PlacementOptions, Position, Side, Theme};
pub use visibility::{Transition, VisibilityPhase};

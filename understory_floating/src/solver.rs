// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement solver: a pure function from geometry to a [`Position`].
//!
//! ## Algorithm
//!
//! 1. Undo the entry-transition scale on the floating rect
//!    (true size = measured size / [`PlacementOptions::scale`]).
//!    This happens before anything else; skipping it is the usual cause of misplaced boxes.
//! 2. Build a candidate for the requested side: centered on the cross axis,
//!    offset by `gap` on the main axis.
//! 3. Flip: if the candidate leaves `[padding, viewport − padding]` on the main axis,
//!    recompute once for the opposite side. There is no second flip; if the
//!    opposite side overflows as well it is kept anyway.
//! 4. Clamp the cross-axis coordinate into `[padding, viewport − size − padding]`.
//!    When the box is wider than that range, `padding` wins.
//! 5. Arrow: trigger center minus the clamped cross coordinate, clamped to
//!    `[arrow_margin, size − arrow_margin]`.
//!
//! The main-axis coordinate is never clamped; a trigger that sits off-screen
//! yields a box that may overlap it.
//!
//! ## Degenerate input
//!
//! A zero-size floating rect means "not laid out yet". [`try_solve`] returns
//! `None` for it (and for non-finite input); callers should wait and measure again.

use kurbo::{Point, Rect, Size};

use crate::types::{PlacementOptions, Position, Side};

/// Solve the placement of `floating` next to `trigger`.
///
/// `floating` is the rect as measured, i.e. still scaled by the entry
/// transition. Only its size is used.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_floating::{PlacementOptions, Side, solve};
///
/// let trigger = Rect::new(100.0, 100.0, 140.0, 120.0);
/// // Measured at 0.8 scale: the true size is 200×50.
/// let floating = Rect::new(0.0, 0.0, 160.0, 40.0);
/// let pos = solve(trigger, floating, Side::Top, Size::new(800.0, 600.0), &PlacementOptions::default());
/// assert_eq!(pos.side, Side::Top);
/// assert_eq!((pos.left, pos.top), (20.0, 40.0));
/// assert_eq!(pos.arrow_offset, 100.0);
/// ```
#[must_use]
pub fn solve(
    trigger: Rect,
    floating: Rect,
    requested: Side,
    viewport: Size,
    options: &PlacementOptions,
) -> Position {
    let scale = options.scale_factor();
    let size = Size::new(floating.width() / scale, floating.height() / scale);
    let padding = options.padding;

    let mut side = requested;
    let mut origin = candidate(trigger, size, side, options.gap);
    if overflows_main_axis(origin, size, side, viewport, padding) {
        side = side.opposite();
        origin = candidate(trigger, size, side, options.gap);
    }

    let center = trigger.center();
    if side.is_vertical() {
        let left = clamp_lower_wins(origin.x, padding, viewport.width - size.width - padding);
        Position {
            top: origin.y,
            left,
            arrow_offset: arrow_offset(center.x - left, size.width, options.arrow_margin),
            side,
        }
    } else {
        let top = clamp_lower_wins(origin.y, padding, viewport.height - size.height - padding);
        Position {
            top,
            left: origin.x,
            arrow_offset: arrow_offset(center.y - top, size.height, options.arrow_margin),
            side,
        }
    }
}

/// Like [`solve`], but returns `None` when the floating element cannot be placed yet.
///
/// That is the case for a zero-area (not yet laid out) floating rect, or when
/// any input coordinate or option distance is not finite.
#[must_use]
pub fn try_solve(
    trigger: Rect,
    floating: Rect,
    requested: Side,
    viewport: Size,
    options: &PlacementOptions,
) -> Option<Position> {
    if !is_measurable(floating)
        || !rect_is_finite(trigger)
        || !viewport.is_finite()
        || !options.is_finite()
    {
        return None;
    }
    Some(solve(trigger, floating, requested, viewport, options))
}

/// Returns `true` if `rect` has a positive, finite area.
#[must_use]
pub fn is_measurable(rect: Rect) -> bool {
    rect_is_finite(rect) && rect.width() > 0.0 && rect.height() > 0.0
}

fn rect_is_finite(rect: Rect) -> bool {
    rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite()
}

/// Top-left corner for `side`, before flip and clamp.
fn candidate(trigger: Rect, size: Size, side: Side, gap: f64) -> Point {
    let centered_x = trigger.x0 + (trigger.width() - size.width) / 2.0;
    let centered_y = trigger.y0 + (trigger.height() - size.height) / 2.0;
    match side {
        Side::Top => Point::new(centered_x, trigger.y0 - size.height - gap),
        Side::Bottom => Point::new(centered_x, trigger.y1 + gap),
        Side::Left => Point::new(trigger.x0 - size.width - gap, centered_y),
        Side::Right => Point::new(trigger.x1 + gap, centered_y),
    }
}

fn overflows_main_axis(
    origin: Point,
    size: Size,
    side: Side,
    viewport: Size,
    padding: f64,
) -> bool {
    let (start, extent, limit) = if side.is_vertical() {
        (origin.y, size.height, viewport.height)
    } else {
        (origin.x, size.width, viewport.width)
    };
    start < padding || start + extent > limit - padding
}

/// `value` clamped into `[lo, hi]`; an empty range collapses to `lo`.
fn clamp_lower_wins(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

fn arrow_offset(raw: f64, extent: f64, margin: f64) -> f64 {
    // Too small to keep clear of both corners. NaN never reaches the clamp.
    if extent.is_nan() || margin.is_nan() || extent < 2.0 * margin {
        return extent / 2.0;
    }
    raw.max(margin).min(extent - margin)
}

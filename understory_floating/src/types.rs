// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: sides, solved positions, placement options, and theme markers.

use alloc::string::{String, ToString};
use core::str::FromStr;

use kurbo::Point;

/// Which side of the trigger the floating element is anchored to.
///
/// The requested side comes from [`TooltipConfig::placement`](crate::tooltip::TooltipConfig::placement);
/// the resolved side in [`Position::side`] may be the opposite one after a flip.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Above the trigger.
    #[default]
    Top,
    /// Below the trigger.
    Bottom,
    /// Left of the trigger.
    Left,
    /// Right of the trigger.
    Right,
}

impl Side {
    /// The side a flip swaps to: top ↔ bottom, left ↔ right.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns `true` for `Top` and `Bottom`, whose main axis is vertical.
    ///
    /// For these sides the cross axis (centering, clamping, arrow) is horizontal.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Parse a side name, falling back to [`Side::Top`] for anything unrecognized.
    ///
    /// ```
    /// use understory_floating::Side;
    /// assert_eq!(Side::parse_or_default("Left"), Side::Left);
    /// assert_eq!(Side::parse_or_default("diagonal"), Side::Top);
    /// ```
    #[must_use]
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Error returned by the strict [`FromStr`] impl of [`Side`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown side `{0}`, expected one of top, bottom, left, right")]
pub struct ParseSideError(String);

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [Self::Top, Self::Bottom, Self::Left, Self::Right]
            .into_iter()
            .find(|side| side.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSideError(s.to_string()))
    }
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.name())
    }
}

/// Tuning knobs for [`solve`](crate::solver::solve).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementOptions {
    /// Distance between trigger and floating element along the main axis.
    pub gap: f64,
    /// Minimum distance kept between the floating element and the viewport edges.
    pub padding: f64,
    /// Initial scale of the floating element's entry transition.
    ///
    /// Measurements are taken while that transition is in effect, so the true
    /// size is the measured size divided by this factor. It must match the
    /// transition exactly.
    pub scale: f64,
    /// Minimum distance between the arrow and either end of the floating element.
    ///
    /// Tied to the floating element's corner radius.
    pub arrow_margin: f64,
}

impl PlacementOptions {
    /// Default gap between trigger and floating element.
    pub const DEFAULT_GAP: f64 = 10.0;
    /// Default viewport padding.
    pub const DEFAULT_PADDING: f64 = 8.0;
    /// Default entry-transition scale.
    pub const DEFAULT_SCALE: f64 = 0.8;
    /// Default arrow margin.
    pub const DEFAULT_ARROW_MARGIN: f64 = 16.0;

    /// The scale factor actually applied; `1.0` when [`scale`](Self::scale) is not
    /// a positive finite number.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    /// Returns `true` if `gap`, `padding`, and `arrow_margin` are all finite.
    ///
    /// [`scale`](Self::scale) is not checked; [`scale_factor`](Self::scale_factor)
    /// already falls back for it.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.gap.is_finite() && self.padding.is_finite() && self.arrow_margin.is_finite()
    }
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            gap: Self::DEFAULT_GAP,
            padding: Self::DEFAULT_PADDING,
            scale: Self::DEFAULT_SCALE,
            arrow_margin: Self::DEFAULT_ARROW_MARGIN,
        }
    }
}

/// Result of a placement solve, in viewport (fixed) coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Position {
    /// Top edge of the floating element.
    pub top: f64,
    /// Left edge of the floating element.
    pub left: f64,
    /// Arrow position along the cross axis, relative to the floating element's origin.
    ///
    /// Horizontal from the left edge for `Top`/`Bottom`, vertical from the top
    /// edge for `Left`/`Right`.
    pub arrow_offset: f64,
    /// Side the floating element ended up on, after any flip.
    pub side: Side,
}

impl Position {
    /// Top-left corner of the floating element.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Edge of the floating element that faces the trigger (where the arrow is drawn).
    #[must_use]
    pub const fn arrow_edge(&self) -> Side {
        self.side.opposite()
    }

    /// Returns `true` if the resolved side differs from `requested`.
    #[must_use]
    pub fn flipped(&self, requested: Side) -> bool {
        self.side != requested
    }
}

/// Light/dark marker copied from the trigger's nearest themed ancestor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Theme {
    /// Light appearance.
    Light,
    /// Dark appearance.
    Dark,
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement solver walkthrough.
//!
//! Solves one floating box against triggers in the middle and at each edge of
//! the viewport, printing the resolved side, clamped origin, and arrow offset.
//!
//! Run:
//! - `cargo run -p understory_demos --example placement_solver`

use kurbo::{Rect, Size};
use understory_floating::{PlacementOptions, Side, solve, try_solve};

fn main() {
    let viewport = Size::new(640.0, 480.0);
    let opts = PlacementOptions::default();
    // Measured at the entry transition's 0.8 scale: the true size is 200×50.
    let floating = Rect::new(0.0, 0.0, 160.0, 40.0);

    let triggers = [
        ("center", Rect::new(300.0, 220.0, 340.0, 240.0)),
        ("top edge", Rect::new(300.0, 12.0, 340.0, 32.0)),
        ("bottom edge", Rect::new(300.0, 450.0, 340.0, 470.0)),
        ("left edge", Rect::new(4.0, 220.0, 44.0, 240.0)),
        ("right edge", Rect::new(600.0, 220.0, 636.0, 240.0)),
    ];

    for (label, trigger) in triggers {
        println!("== Trigger at {label} {trigger:?} ==");
        for side in [Side::Top, Side::Bottom, Side::Left, Side::Right] {
            let pos = solve(trigger, floating, side, viewport, &opts);
            let flip = if pos.flipped(side) { " (flipped)" } else { "" };
            println!(
                "  {side:>6} -> {:>6}{flip:<10} origin=({:.1}, {:.1}) arrow={:.1} on {} edge",
                pos.side,
                pos.left,
                pos.top,
                pos.arrow_offset,
                pos.arrow_edge(),
            );
        }
    }

    // Not laid out yet: nothing to place.
    let unmeasured = try_solve(triggers[0].1, Rect::ZERO, Side::Top, viewport, &opts);
    println!("== Unmeasured floating ==\n  {unmeasured:?}");
    assert!(unmeasured.is_none());

    let top = solve(triggers[1].1, floating, Side::Top, viewport, &opts);
    assert_eq!(top.side, Side::Bottom);
}

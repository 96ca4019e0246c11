// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_floating::{PlacementOptions, Side, solve, try_solve};

const VIEWPORT: Size = Size::new(1920.0, 1080.0);
const SIDES: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

/// Deterministic xorshift source for bench geometry.
struct Coords(u64);

impl Coords {
    fn seeded(seed: u64) -> Self {
        Self(seed | 1)
    }

    /// Uniform in `[lo, hi)`.
    fn between(&mut self, lo: f64, hi: f64) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        let unit = (self.0 >> 11) as f64 / (1u64 << 53) as f64;
        lo + unit * (hi - lo)
    }

    /// A floating rect as measured at the origin.
    fn floating(&mut self, max_w: f64, max_h: f64) -> Rect {
        Rect::new(0.0, 0.0, self.between(40.0, max_w), self.between(20.0, max_h))
    }
}

/// Triggers scattered over (and slightly past) the viewport, paired with a floating size.
fn gen_cases(count: usize, seed: u64) -> Vec<(Rect, Rect)> {
    let mut coords = Coords::seeded(seed);
    (0..count)
        .map(|_| {
            let x0 = coords.between(-100.0, VIEWPORT.width + 100.0);
            let y0 = coords.between(-100.0, VIEWPORT.height + 100.0);
            let trigger = Rect::new(x0, y0, x0 + coords.between(16.0, 136.0), y0 + 24.0);
            (trigger, coords.floating(360.0, 140.0))
        })
        .collect()
}

/// Triggers hugging the top and left edges, so most requests flip and clamp.
fn gen_edge_cases(count: usize) -> Vec<(Rect, Rect)> {
    let mut coords = Coords::seeded(0x7001_71B5_ED6E_0001);
    (0..count)
        .map(|_| {
            let x0 = coords.between(0.0, 40.0);
            let y0 = coords.between(0.0, 40.0);
            (
                Rect::new(x0, y0, x0 + 32.0, y0 + 20.0),
                Rect::new(0.0, 0.0, 240.0, 64.0),
            )
        })
        .collect()
}

fn bench_solve(c: &mut Criterion) {
    let opts = PlacementOptions::default();
    let mut group = c.benchmark_group("solve");
    for &n in &[256usize, 4096] {
        let cases = gen_cases(n, 0x5CA1_ED0F_F5E7_0008);
        group.throughput(Throughput::Elements((n * SIDES.len()) as u64));
        group.bench_function(format!("scattered_n{}", n), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for &(trigger, floating) in &cases {
                    for side in SIDES {
                        let pos = solve(trigger, floating, side, VIEWPORT, &opts);
                        acc += pos.left + pos.top + pos.arrow_offset;
                    }
                }
                black_box(acc)
            });
        });
    }
    let cases = gen_edge_cases(1024);
    group.throughput(Throughput::Elements(1024));
    group.bench_function("edge_flip_clamp", |b| {
        b.iter(|| {
            let flips = cases
                .iter()
                .filter(|&&(trigger, floating)| {
                    solve(trigger, floating, Side::Top, VIEWPORT, &opts).flipped(Side::Top)
                })
                .count();
            black_box(flips)
        });
    });
    group.finish();
}

fn bench_try_solve(c: &mut Criterion) {
    let opts = PlacementOptions::default();
    let mut cases = gen_cases(1024, 0x0F10_A7E5_0000_0200);
    // Every fourth floating rect has not been laid out yet.
    for (i, case) in cases.iter_mut().enumerate() {
        if i % 4 == 0 {
            case.1 = Rect::ZERO;
        }
    }
    let mut group = c.benchmark_group("try_solve");
    group.throughput(Throughput::Elements(cases.len() as u64));
    group.bench_function("mixed_unmeasured", |b| {
        b.iter(|| {
            let placed = cases
                .iter()
                .filter_map(|&(trigger, floating)| {
                    try_solve(trigger, floating, Side::Bottom, VIEWPORT, &opts)
                })
                .count();
            black_box(placed)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_solve, bench_try_solve);
criterion_main!(benches);

// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use underlay_region::{Rect, Region, RegionOp, combine, sort_rects};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_range_i32(&mut self, upper_exclusive: i32) -> i32 {
        (self.next_u32() % upper_exclusive as u32) as i32
    }
}

/// Random small rectangles scattered over a 1024x1024 area.
fn scattered_rects(n: usize, seed: u64) -> Vec<Rect> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| {
            let x = rng.gen_range_i32(1000);
            let y = rng.gen_range_i32(1000);
            let w = 1 + rng.gen_range_i32(24);
            let h = 1 + rng.gen_range_i32(24);
            Rect::new(x, y, x + w, y + h)
        })
        .collect()
}

fn bench_region(c: &mut Criterion) {
    let mut group = c.benchmark_group("underlay_region");
    group.sample_size(50);

    for &n in &[16_usize, 256, 1024] {
        group.bench_function(format!("sort_rects(n={n})"), |b| {
            b.iter_batched(
                || scattered_rects(n, 0x5EED_0000_0000_0001),
                |mut rects| {
                    sort_rects(&mut rects);
                    black_box(rects);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("from_rect_list(n={n})"), |b| {
            let rects = scattered_rects(n, 0x5EED_0000_0000_0002);
            b.iter(|| black_box(Region::from_rect_list(black_box(&rects)).unwrap()));
        });
    }

    for &n in &[16_usize, 256] {
        let a = Region::from_rect_list(&scattered_rects(n, 0x5EED_0000_0000_0003)).unwrap();
        let b_region = Region::from_rect_list(&scattered_rects(n, 0x5EED_0000_0000_0004)).unwrap();

        for (name, op) in [
            ("union", RegionOp::Union),
            ("intersect", RegionOp::Intersect),
            ("subtract", RegionOp::Subtract),
            ("xor", RegionOp::Xor),
        ] {
            group.bench_function(format!("combine_{name}(n={n})"), |bch| {
                bch.iter(|| black_box(combine(op, black_box(&a), black_box(&b_region)).unwrap()));
            });
        }
    }

    // The clip gate: cutting a span list against a busy region.
    let clip = Region::from_rect_list(&scattered_rects(256, 0x5EED_0000_0000_0005)).unwrap();
    let draws = scattered_rects(64, 0x5EED_0000_0000_0006);
    group.bench_function("clip_spans(region=256,draws=64)", |b| {
        b.iter_batched(
            Vec::new,
            |mut out| {
                clip.clip_spans(&draws, &mut out);
                black_box(out);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_region);
criterion_main!(benches);

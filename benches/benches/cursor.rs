// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use underlay_cursor::CursorOverlay;
use underlay_raster::{MemoryRaster, RenderContext, SpriteImage};
use underlay_region::{Point, Rect};

fn visible_cursor() -> (CursorOverlay, RenderContext<MemoryRaster>) {
    let mut ctx = RenderContext::new(MemoryRaster::new(640, 480));
    ctx.fill_rect(0x20, Rect::new(0, 0, 640, 480));

    let block = SpriteImage::from_rows(16, &[0xFFFF_0000; 16]);
    let mut cursor = CursorOverlay::new();
    cursor.set_backing_surface(&mut ctx);
    cursor.define_cursor(&mut ctx, 0, Point::ZERO, block.clone(), block);
    cursor.show(&mut ctx);
    (cursor, ctx)
}

fn bench_cursor(c: &mut Criterion) {
    let mut group = c.benchmark_group("underlay_cursor");
    group.sample_size(50);

    // One full move: restore backing, save at the new spot, composite.
    group.bench_function("move_visible", |b| {
        b.iter_batched(
            visible_cursor,
            |(mut cursor, mut ctx)| {
                for i in 0..64 {
                    cursor.move_to(&mut ctx, 16 + i * 4, 200);
                }
                black_box((cursor, ctx));
            },
            BatchSize::SmallInput,
        );
    });

    // Tracking under a paused frame: deferrals collapse to one move.
    group.bench_function("track_paused", |b| {
        b.iter_batched(
            visible_cursor,
            |(mut cursor, mut ctx)| {
                cursor.pause();
                for i in 0..256 {
                    cursor.track(&mut ctx, i, i);
                }
                cursor.resume(&mut ctx);
                black_box((cursor, ctx));
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_cursor);
criterion_main!(benches);

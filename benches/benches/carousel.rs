// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Size;
use understory_carousel::{
    AutoplayConfig, Axis, AxisGeometry, CarouselConfig, CarouselController, PhysicalWindow,
    RecycleEngine,
};
use understory_timing::TimerQueue;

const TILE: f64 = 390.0;

fn manual_carousel(pages: usize) -> CarouselController<u32, TimerQueue> {
    let config = CarouselConfig {
        autoplay: AutoplayConfig {
            enabled: false,
            ..AutoplayConfig::default()
        },
        ..CarouselConfig::default()
    };
    let pages = (0..pages as u32).collect();
    let mut carousel = CarouselController::with_config(pages, config, TimerQueue::new())
        .expect("enough pages");
    carousel
        .set_viewport_size(Size::new(TILE, 844.0))
        .expect("valid viewport");
    carousel
}

/// A fling: positions every 8 px along the axis, shifting roughly every
/// `TILE / 8` frames.
fn fling_positions(frames: usize) -> Vec<f64> {
    (0..frames).map(|i| TILE + (i as f64) * 8.0).collect()
}

fn bench_recycle_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/evaluate");

    // Hypothesis: evaluation cost is flat in page count since only the
    // three slots are touched.
    for pages in [4usize, 64, 4_096] {
        let engine = RecycleEngine::new(AxisGeometry::new(Axis::Horizontal));
        group.throughput(Throughput::Elements(1));

        group.bench_with_input(BenchmarkId::new("at_rest", pages), &pages, |b, &pages| {
            let mut window = PhysicalWindow::new((0..pages as u32).collect(), 0).unwrap();
            b.iter(|| black_box(engine.evaluate(&mut window, black_box(TILE * 1.2), TILE)));
        });

        group.bench_with_input(BenchmarkId::new("shift", pages), &pages, |b, &pages| {
            let mut window = PhysicalWindow::new((0..pages as u32).collect(), 0).unwrap();
            b.iter(|| black_box(engine.evaluate(&mut window, black_box(TILE * 1.9), TILE)));
        });
    }

    group.finish();
}

fn bench_fling(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/fling");

    for frames in [120usize, 1_200] {
        let positions = fling_positions(frames);
        group.throughput(Throughput::Elements(frames as u64));

        group.bench_with_input(
            BenchmarkId::new("on_viewport_position_changed", frames),
            &positions,
            |b, positions| {
                b.iter_batched(
                    || manual_carousel(32),
                    |mut carousel| {
                        // Track the host's view of the position across rewinds.
                        let mut offset = 0.0;
                        for &p in positions {
                            let update = carousel.on_viewport_position_changed(p - offset);
                            offset = p - update.position;
                        }
                        black_box(carousel.middle_index());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_recycle_evaluate, bench_fling);
criterion_main!(benches);

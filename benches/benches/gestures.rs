// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Vec2;
use mapmaker_heading::SimulatedSensor;
use mapmaker_screen::{GestureEvent, MapScreen};
use mapmaker_transform::{TransformLog, TransformState};

/// Cumulative drag deltas for one gesture, like a recognizer at 120 Hz.
fn drag_stream(frames: usize) -> Vec<Vec2> {
    (0..frames)
        .map(|i| {
            let t = i as f64;
            Vec2::new(t * 3.5, (t * 0.05).sin() * 80.0)
        })
        .collect()
}

fn bench_pan_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform/update_pan");

    for frames in [120usize, 1_200] {
        let stream = drag_stream(frames);
        group.throughput(Throughput::Elements(frames as u64));

        for rotation in [0.0, 37.0] {
            group.bench_with_input(
                BenchmarkId::new(format!("rotation_{rotation}"), frames),
                &stream,
                |b, stream| {
                    b.iter_batched(
                        || {
                            let mut state = TransformState::new();
                            state.update_rotation(rotation);
                            state.end_rotation();
                            state
                        },
                        |mut state| {
                            for delta in stream {
                                state.update_pan(*delta);
                            }
                            state.end_pan();
                            black_box(state.translation());
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }

        // Same stream with a recording trace sink, to see the cost of tracing.
        group.bench_with_input(BenchmarkId::new("traced", frames), &stream, |b, stream| {
            b.iter_batched(
                || TransformState::with_trace(TransformLog::new()),
                |mut state| {
                    for delta in stream {
                        state.update_pan(*delta);
                    }
                    state.end_pan();
                    black_box(state.into_trace());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_screen_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen/dispatch");
    let frames = 600usize;
    let events: Vec<GestureEvent> = drag_stream(frames)
        .into_iter()
        .map(GestureEvent::PanChanged)
        .chain([GestureEvent::PanEnded])
        .chain((1..=frames).map(|i| GestureEvent::RotationChanged(i as f64 * 0.3)))
        .chain([GestureEvent::RotationEnded])
        .collect();
    group.throughput(Throughput::Elements(events.len() as u64));

    group.bench_function("pan_then_twist", |b| {
        b.iter_batched(
            || MapScreen::new(SimulatedSensor::new()),
            |mut screen| {
                black_box(screen.dispatch_all(events.iter().copied()));
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_pan_updates, bench_screen_dispatch);
criterion_main!(benches);

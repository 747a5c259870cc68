// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use mapmaker_heading::{HeadingFilter, HeadingSample, SimulatedSensor};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Noisy readings around north, so the smoother keeps crossing 0/360.
fn samples_near_north(count: usize, seed: u64) -> Vec<HeadingSample> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|_| {
            let heading = (rng.next_f64() - 0.5) * 40.0;
            let accuracy = rng.next_f64() * 30.0;
            HeadingSample::new(-1.0, (heading + 360.0) % 360.0, accuracy)
        })
        .collect()
}

fn bench_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("heading/on_heading_sample");

    for count in [64usize, 1_024, 16_384] {
        let samples = samples_near_north(count, 0x5eed);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &samples, |b, samples| {
            b.iter_batched(
                || {
                    let mut sensor = SimulatedSensor::new();
                    let mut filter = HeadingFilter::new();
                    filter.set_active(true, &mut sensor);
                    filter
                },
                |mut filter| {
                    for sample in samples {
                        filter.on_heading_sample(*sample);
                    }
                    black_box(filter.displayed_heading());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_samples);
criterion_main!(benches);

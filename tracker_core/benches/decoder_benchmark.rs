//! Decoder hot-path micro-benchmark.
//!
//! Measures:
//! - Raw table lookup
//! - `AxisState::apply_pin_state` (lock + atomic add)
//! - `Tracker::sample` over three axes

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::{Duration, Instant};

use tracker_common::config::TrackerConfig;
use tracker_common::hal::types::{AxisId, PinState};
use tracker_core::Tracker;
use tracker_core::decoder::{step_forward, transition_delta};
use tracker_core::state::axis::AxisState;

fn bench_table_lookup(c: &mut Criterion) {
    let mut s = PinState::S00;
    c.bench_function("transition_delta", |b| {
        b.iter(|| {
            let next = step_forward(s);
            let d = transition_delta(black_box(s), black_box(next));
            s = next;
            d
        });
    });
}

fn bench_apply_pin_state(c: &mut Criterion) {
    let axis = AxisState::new(AxisId::X, Instant::now());
    let mut s = PinState::S00;
    c.bench_function("apply_pin_state", |b| {
        b.iter(|| {
            s = step_forward(s);
            axis.apply_pin_state(black_box(s))
        });
    });
}

fn bench_sampler_tick(c: &mut Criterion) {
    let origin = Instant::now();
    let tracker = Tracker::with_origin(&TrackerConfig::with_service_name("bench"), origin);
    let mut tick = 0u32;
    c.bench_function("tracker_sample", |b| {
        b.iter(|| {
            tick += 1;
            tracker.sample(origin + Duration::from_millis(100) * tick)
        });
    });
}

criterion_group!(
    benches,
    bench_table_lookup,
    bench_apply_pin_state,
    bench_sampler_tick
);
criterion_main!(benches);

//! Integration test: rpm estimation across sampler ticks.

use std::time::{Duration, Instant};
use tracker_common::hal::types::{AxisId, PinState};
use tracker_core::decoder::step_forward;

use super::tracker_at;

#[test]
fn one_revolution_per_second_is_sixty_rpm() {
    let origin = Instant::now();
    let tracker = tracker_at(origin);
    let tick = Duration::from_millis(100);
    let mut s = PinState::S00;

    // 2400 counts spread uniformly over ten 100 ms ticks.
    for i in 1..=10u32 {
        for _ in 0..240 {
            s = step_forward(s);
            tracker.on_encoder_edge(AxisId::X, s);
        }
        tracker.sample(origin + tick * i);
        let rpm = tracker.read_axis(AxisId::X).rpm;
        assert!((rpm - 60.0).abs() < 1e-6, "tick {i}: rpm {rpm}");
    }
    assert_eq!(tracker.read_axis(AxisId::X).count, 2400);
    assert_eq!(tracker.history().len(), 10);
}

#[test]
fn idle_axis_drops_to_zero_rpm() {
    let origin = Instant::now();
    let tracker = tracker_at(origin);
    tracker.on_encoder_edge(AxisId::Y, PinState::S10);
    tracker.sample(origin + Duration::from_millis(100));
    assert!(tracker.read_axis(AxisId::Y).rpm > 0.0);

    tracker.sample(origin + Duration::from_millis(200));
    assert_eq!(tracker.read_axis(AxisId::Y).rpm, 0.0);
}

#[test]
fn repeated_tick_at_same_instant_keeps_rpm() {
    let origin = Instant::now();
    let tracker = tracker_at(origin);
    tracker.on_encoder_edge(AxisId::Z, PinState::S10);
    let t = origin + Duration::from_millis(100);
    tracker.sample(t);
    let rpm = tracker.read_axis(AxisId::Z).rpm;
    tracker.sample(t);
    assert_eq!(tracker.read_axis(AxisId::Z).rpm, rpm);
}

#[test]
fn history_timestamps_are_relative_to_origin() {
    let origin = Instant::now();
    let tracker = tracker_at(origin);
    tracker.sample(origin + Duration::from_millis(100));
    tracker.sample(origin + Duration::from_millis(200));
    let stamps: Vec<u64> = tracker.history().iter().map(|s| s.timestamp_us).collect();
    assert_eq!(stamps, vec![100_000, 200_000]);
}

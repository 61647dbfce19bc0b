//! Integration test: quadrature decoding through `Tracker::handle_event`.

use proptest::prelude::*;
use std::time::Instant;
use tracker_common::hal::types::{AxisId, InputEvent, PinState};
use tracker_core::decoder::{step_backward, step_forward};

use super::tracker_at;

fn feed(tracker: &tracker_core::Tracker, axis: AxisId, states: &[PinState]) {
    let now = Instant::now();
    for &state in states {
        tracker.handle_event(InputEvent::Encoder { axis, state }, now);
    }
}

#[test]
fn full_revolution_is_one_circumference() {
    let tracker = tracker_at(Instant::now());
    let mut s = PinState::S00;
    let mut states = Vec::with_capacity(2400);
    for _ in 0..2400 {
        s = step_forward(s);
        states.push(s);
    }
    feed(&tracker, AxisId::X, &states);

    let reading = tracker.read_axis(AxisId::X);
    assert_eq!(reading.count, 2400);
    let circumference = std::f64::consts::PI * 50.0;
    assert!((reading.distance_mm - circumference).abs() < 1e-9);
}

#[test]
fn diagonal_transitions_leave_counter_unchanged() {
    let tracker = tracker_at(Instant::now());
    feed(&tracker, AxisId::Y, &[PinState::S11]);
    assert_eq!(tracker.read_axis(AxisId::Y).count, 0);

    feed(&tracker, AxisId::Y, &[PinState::S01, PinState::S10]);
    // 11 → 01 counts +1, 01 → 10 is a skip.
    assert_eq!(tracker.read_axis(AxisId::Y).count, 1);
}

#[test]
fn zero_all_is_idempotent() {
    let tracker = tracker_at(Instant::now());
    feed(&tracker, AxisId::Z, &[PinState::S10, PinState::S11]);
    tracker.zero_all();
    let once = tracker.read_all().map(|r| r.count);
    tracker.zero_all();
    let twice = tracker.read_all().map(|r| r.count);
    assert_eq!(once, [0, 0, 0]);
    assert_eq!(once, twice);
}

proptest! {
    /// Any walk made of valid single steps ends at its net step count.
    #[test]
    fn valid_walk_counts_net_steps(moves in prop::collection::vec(any::<bool>(), 0..2000)) {
        let tracker = tracker_at(Instant::now());
        let mut s = PinState::S00;
        let mut states = Vec::with_capacity(moves.len());
        let mut expected = 0i64;
        for forward in moves {
            if forward {
                s = step_forward(s);
                expected += 1;
            } else {
                s = step_backward(s);
                expected -= 1;
            }
            states.push(s);
        }
        feed(&tracker, AxisId::X, &states);
        prop_assert_eq!(tracker.read_axis(AxisId::X).count, expected);
    }

    /// Arbitrary line noise never moves the counter by more than one per event.
    #[test]
    fn noise_moves_at_most_one_per_event(raw in prop::collection::vec(0u8..4, 0..500)) {
        let tracker = tracker_at(Instant::now());
        let states: Vec<PinState> = raw.into_iter().map(PinState::from_bits).collect();
        let n = states.len() as i64;
        feed(&tracker, AxisId::Z, &states);
        prop_assert!(tracker.read_axis(AxisId::Z).count.abs() <= n);
    }
}

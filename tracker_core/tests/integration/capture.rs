//! Integration test: button bursts and fallback through the tracker.

use std::time::{Duration, Instant};
use tracker_common::config::{CaptureConfig, CaptureMode, TrackerConfig};
use tracker_common::hal::types::{AxisId, Edge, InputEvent, Level, PinState};
use tracker_core::Tracker;

use super::tracker_at;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn button(tracker: &Tracker, edge: Edge, level: Level, at: Instant) {
    tracker.handle_event(InputEvent::Button { edge, level }, at);
}

#[test]
fn burst_of_rising_edges_captures_once() {
    let origin = Instant::now();
    let tracker = tracker_at(origin);

    for n in 2..=6u64 {
        let start = origin + ms(1000 * n);
        for i in 0..n {
            button(&tracker, Edge::Rising, Level::High, start + ms(i * 4));
        }
    }
    assert_eq!(tracker.point_count(), 5);
}

#[test]
fn isolated_edge_after_fallback_is_not_lost() {
    let origin = Instant::now();
    let tracker = tracker_at(origin);
    button(&tracker, Edge::Rising, Level::High, origin);
    assert_eq!(tracker.point_count(), 1);

    // Inside the fallback interval an isolated edge is dropped...
    button(&tracker, Edge::Rising, Level::High, origin + ms(400));
    assert_eq!(tracker.point_count(), 1);

    // ...but past it, one clean edge is enough.
    button(&tracker, Edge::Rising, Level::High, origin + ms(1100));
    assert_eq!(tracker.point_count(), 2);
}

#[test]
fn captured_point_reflects_axes_at_press_time() {
    let origin = Instant::now();
    let tracker = tracker_at(origin);
    tracker.on_encoder_edge(AxisId::X, PinState::S10);
    tracker.on_encoder_edge(AxisId::Z, PinState::S01);

    button(&tracker, Edge::Rising, Level::High, origin + ms(10));
    let points = tracker.drain_points();
    assert_eq!(points.len(), 1);
    let step = tracker.geometry().distance_mm(1);
    assert!((points[0].x - step).abs() < 1e-12);
    assert_eq!(points[0].y, 0.0);
    assert!((points[0].z + step).abs() < 1e-12);
    assert_eq!(tracker.point_count(), 0);
}

#[test]
fn falling_edge_mode_debounces_presses() {
    let origin = Instant::now();
    let mut config = TrackerConfig::with_service_name("falling");
    config.capture = CaptureConfig {
        mode: CaptureMode::FallingEdge,
        ..CaptureConfig::default()
    };
    let tracker = Tracker::with_origin(&config, origin);

    button(&tracker, Edge::Falling, Level::Low, origin);
    button(&tracker, Edge::Rising, Level::High, origin + ms(5));
    button(&tracker, Edge::Falling, Level::Low, origin + ms(10));
    button(&tracker, Edge::Falling, Level::Low, origin + ms(80));
    assert_eq!(tracker.point_count(), 2);
}

#[test]
fn software_and_button_captures_share_the_store() {
    let origin = Instant::now();
    let tracker = tracker_at(origin);
    tracker.capture_point();
    button(&tracker, Edge::Rising, Level::High, origin + ms(10));
    tracker.capture_point();
    assert_eq!(tracker.point_count(), 3);
}

//! Integration test: concurrent edge streams, sampler and point store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;
use tracker_common::hal::types::{AxisId, PinState};
use tracker_core::decoder::{step_backward, step_forward};
use tracker_core::{CapturedPoint, PointStore};

use super::tracker_at;

#[test]
fn per_axis_streams_and_sampler_run_concurrently() {
    let tracker = Arc::new(tracker_at(Instant::now()));
    let running = Arc::new(AtomicBool::new(true));

    let sampler = {
        let tracker = Arc::clone(&tracker);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut ticks = 0u64;
            while running.load(Ordering::Acquire) {
                tracker.sample(Instant::now());
                for r in tracker.read_all() {
                    assert!(r.rpm.is_finite());
                }
                ticks += 1;
            }
            ticks
        })
    };

    let expected = [10_000i64, -7_000, 4_000];
    let streams: Vec<_> = AxisId::ALL
        .into_iter()
        .zip(expected)
        .map(|(axis, steps)| {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                let mut s = PinState::S00;
                for _ in 0..steps.unsigned_abs() {
                    s = if steps > 0 { step_forward(s) } else { step_backward(s) };
                    tracker.on_encoder_edge(axis, s);
                }
            })
        })
        .collect();

    for handle in streams {
        handle.join().unwrap();
    }
    running.store(false, Ordering::Release);
    assert!(sampler.join().unwrap() > 0);

    let counts = tracker.read_all().map(|r| r.count);
    assert_eq!(counts, expected);
}

#[test]
fn appends_racing_clears_are_never_lost() {
    const WRITERS: usize = 4;
    const PER_WRITER: usize = 5_000;

    let store = Arc::new(PointStore::new());
    let writers: Vec<_> = (0..WRITERS)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..PER_WRITER {
                    store.append(CapturedPoint::from_array([w as f64, i as f64, 0.0]));
                }
            })
        })
        .collect();

    let mut drained = 0usize;
    while writers.iter().any(|h| !h.is_finished()) {
        drained += store.drain().len();
    }
    for handle in writers {
        handle.join().unwrap();
    }
    drained += store.drain().len();

    assert_eq!(drained, WRITERS * PER_WRITER);
    assert_eq!(store.count(), 0);
}

#[test]
fn drained_points_keep_per_writer_order() {
    let store = Arc::new(PointStore::new());
    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..10_000 {
                store.append(CapturedPoint::from_array([0.0, i as f64, 0.0]));
            }
        })
    };

    let mut all = Vec::new();
    while !writer.is_finished() {
        all.extend(store.drain());
    }
    writer.join().unwrap();
    all.extend(store.drain());

    assert_eq!(all.len(), 10_000);
    assert!(all.windows(2).all(|w| w[0].y < w[1].y));
}

//! Coordinating structure for the three axes, the capture button and the
//! stores.
//!
//! `Tracker` is `Sync` and meant to be shared behind an `Arc` between the
//! edge dispatcher, the sampler thread and any query layer.

use parking_lot::Mutex;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, trace};
use tracker_common::config::TrackerConfig;
use tracker_common::consts::AXIS_COUNT;
use tracker_common::hal::types::{AxisId, Edge, InputEvent, Level, PinState};

use crate::history::{TrajectoryHistory, TrajectorySample};
use crate::points::{CapturedPoint, PointStore};
use crate::sampler::{EncoderGeometry, Sampler};
use crate::state::axis::Axes;
use crate::trigger::{CaptureTrigger, TriggerDecision, TriggerStats};

/// Snapshot of one axis for the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisReading {
    /// Axis identifier.
    pub axis: AxisId,
    /// Display label.
    pub label: &'static str,
    /// Signed quadrature count since the last zero.
    pub count: i64,
    /// Rotational speed from the last sampler tick.
    pub rpm: f64,
    /// Linear distance from zero [mm].
    pub distance_mm: f64,
}

/// Axes, sampler, capture trigger, point store and history.
#[derive(Debug)]
pub struct Tracker {
    origin: Instant,
    axes: Axes,
    sampler: Sampler,
    trigger: Mutex<CaptureTrigger>,
    points: PointStore,
    history: TrajectoryHistory,
}

impl Tracker {
    /// Create a tracker whose clock starts now.
    pub fn new(config: &TrackerConfig) -> Self {
        Self::with_origin(config, Instant::now())
    }

    /// Create a tracker with an explicit start instant. Sampler references
    /// and history timestamps are relative to `origin`.
    pub fn with_origin(config: &TrackerConfig, origin: Instant) -> Self {
        let geometry = EncoderGeometry::from_config(&config.encoder);
        debug!(
            cpr = geometry.counts_per_revolution,
            circumference_mm = geometry.wheel_circumference_mm,
            mode = ?config.capture.mode,
            "Tracker created"
        );
        Self {
            origin,
            axes: Axes::new(origin),
            sampler: Sampler::new(geometry),
            trigger: Mutex::new(CaptureTrigger::from_config(&config.capture)),
            points: PointStore::new(),
            history: TrajectoryHistory::new(config.history.max_points),
        }
    }

    /// Encoder geometry in use.
    pub fn geometry(&self) -> EncoderGeometry {
        self.sampler.geometry()
    }

    /// Route one input event. `at` is when the edge was observed.
    pub fn handle_event(&self, event: InputEvent, at: Instant) {
        match event {
            InputEvent::Encoder { axis, state } => {
                self.on_encoder_edge(axis, state);
            }
            InputEvent::Button { edge, level } => {
                self.on_button_edge(edge, level, at);
            }
        }
    }

    /// Decoder entry point. Returns the applied delta.
    pub fn on_encoder_edge(&self, axis: AxisId, state: PinState) -> i8 {
        self.axes.get(axis).apply_pin_state(state)
    }

    /// Button entry point. Returns the captured point when the edge is
    /// accepted as a press.
    pub fn on_button_edge(&self, edge: Edge, level: Level, at: Instant) -> Option<CapturedPoint> {
        let decision = self.trigger.lock().on_edge(edge, level, at);
        match decision {
            TriggerDecision::Accepted(reason) => {
                let point = self.capture_point();
                debug!(?reason, x = point.x, y = point.y, z = point.z, "Button capture");
                Some(point)
            }
            TriggerDecision::Rejected(reason) => {
                trace!(?edge, ?level, ?reason, "Button edge rejected");
                None
            }
        }
    }

    /// Sampler tick: update every axis rpm and record the distances.
    pub fn sample(&self, now: Instant) -> TrajectorySample {
        let [x, y, z] = self.sampler.tick(&self.axes, now);
        let sample = TrajectorySample {
            x,
            y,
            z,
            timestamp_us: now.saturating_duration_since(self.origin).as_micros() as u64,
        };
        self.history.record(sample);
        sample
    }

    /// Count, rpm and distance of one axis.
    pub fn read_axis(&self, axis: AxisId) -> AxisReading {
        let state = self.axes.get(axis);
        let count = state.count();
        AxisReading {
            axis,
            label: axis.label(),
            count,
            rpm: state.rpm(),
            distance_mm: self.sampler.geometry().distance_mm(count),
        }
    }

    /// Readings for X, Y, Z.
    pub fn read_all(&self) -> [AxisReading; AXIS_COUNT] {
        AxisId::ALL.map(|axis| self.read_axis(axis))
    }

    /// Reset every axis counter. Each axis is zeroed under its own lock;
    /// the point store is left alone.
    pub fn zero_all(&self) {
        for axis in self.axes.iter() {
            axis.zero();
        }
        info!("All axis counters zeroed");
    }

    /// Append the current distances as a point.
    pub fn capture_point(&self) -> CapturedPoint {
        let point = CapturedPoint::from_array(self.sampler.distances(&self.axes));
        let total = self.points.append(point);
        debug!(total, "Point captured");
        point
    }

    /// Number of captured points.
    pub fn point_count(&self) -> usize {
        self.points.count()
    }

    /// Take every captured point in capture order.
    pub fn drain_points(&self) -> Vec<CapturedPoint> {
        let points = self.points.drain();
        info!(count = points.len(), "Points drained");
        points
    }

    /// Return drained points to the store, ahead of newer captures.
    pub fn restore_points(&self, points: Vec<CapturedPoint>) {
        let count = points.len();
        self.points.restore(points);
        info!(count, "Points restored");
    }

    /// Copy of the captured points.
    pub fn points_snapshot(&self) -> Vec<CapturedPoint> {
        self.points.snapshot()
    }

    /// Discard every captured point.
    pub fn clear_points(&self) {
        self.points.clear();
    }

    /// Recorded sampler trajectory, oldest first.
    pub fn history(&self) -> Vec<TrajectorySample> {
        self.history.snapshot()
    }

    /// Capture trigger counters.
    pub fn trigger_stats(&self) -> TriggerStats {
        self.trigger.lock().stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::step_forward;
    use std::time::Duration;

    fn tracker() -> (Tracker, Instant) {
        let origin = Instant::now();
        let config = TrackerConfig::with_service_name("tracker-test");
        (Tracker::with_origin(&config, origin), origin)
    }

    fn forward(t: &Tracker, axis: AxisId, steps: usize) {
        let mut s = t.axes.get(axis).last_pin_state();
        for _ in 0..steps {
            s = step_forward(s);
            t.handle_event(InputEvent::Encoder { axis, state: s }, Instant::now());
        }
    }

    #[test]
    fn read_axis_reports_count_and_distance() {
        let (t, _) = tracker();
        forward(&t, AxisId::X, 2400);
        let r = t.read_axis(AxisId::X);
        assert_eq!(r.count, 2400);
        assert_eq!(r.label, "X");
        assert!((r.distance_mm - t.geometry().wheel_circumference_mm).abs() < 1e-9);
        assert_eq!(t.read_axis(AxisId::Y).count, 0);
    }

    #[test]
    fn capture_point_uses_current_distances() {
        let (t, _) = tracker();
        forward(&t, AxisId::Y, 1200);
        let p = t.capture_point();
        assert_eq!(p.x, 0.0);
        assert!((p.y - t.geometry().wheel_circumference_mm / 2.0).abs() < 1e-9);
        assert_eq!(t.point_count(), 1);
    }

    #[test]
    fn zero_all_keeps_points() {
        let (t, _) = tracker();
        forward(&t, AxisId::Z, 10);
        t.capture_point();
        t.zero_all();
        assert_eq!(t.read_axis(AxisId::Z).count, 0);
        assert_eq!(t.point_count(), 1);
    }

    #[test]
    fn restored_points_keep_capture_order() {
        let (t, _) = tracker();
        forward(&t, AxisId::X, 24);
        let first = t.capture_point();
        let drained = t.drain_points();
        forward(&t, AxisId::X, 24);
        let second = t.capture_point();
        t.restore_points(drained);
        assert_eq!(t.points_snapshot(), vec![first, second]);
    }

    #[test]
    fn button_edge_captures_once() {
        let (t, origin) = tracker();
        let at = origin + Duration::from_secs(1);
        assert!(t.on_button_edge(Edge::Rising, Level::High, at).is_some());
        assert!(t.on_button_edge(Edge::Rising, Level::High, at + Duration::from_millis(5)).is_none());
        assert_eq!(t.point_count(), 1);
        assert_eq!(t.trigger_stats().accepted, 1);
        assert_eq!(t.trigger_stats().rejected, 1);
    }

    #[test]
    fn sample_records_history() {
        let (t, origin) = tracker();
        forward(&t, AxisId::X, 24);
        let s = t.sample(origin + Duration::from_millis(100));
        assert_eq!(s.timestamp_us, 100_000);
        assert!(s.x > 0.0);
        assert_eq!(t.history(), vec![s]);
        assert!((t.read_axis(AxisId::X).rpm - 6.0).abs() < 1e-9);
    }
}

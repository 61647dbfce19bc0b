//! Rate and distance derivation.
//!
//! ```text
//! rpm         = (Δcount / cpr) × (60 / elapsed_s)
//! distance_mm = (count / cpr) × π × wheel_diameter_mm
//! ```
//!
//! Rate needs the previous snapshot and is updated once per tick.
//! Distance is a pure function of the counter and can be read any time.

use std::time::Instant;
use tracker_common::config::EncoderConfig;
use tracker_common::consts::AXIS_COUNT;
use tracker_common::hal::types::AxisId;

use crate::state::axis::Axes;

/// Fixed encoder geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderGeometry {
    /// Counts per shaft revolution (`ppr × 4`).
    pub counts_per_revolution: f64,
    /// Wheel circumference [mm].
    pub wheel_circumference_mm: f64,
}

impl EncoderGeometry {
    /// Geometry from the encoder config section.
    pub fn from_config(config: &EncoderConfig) -> Self {
        Self {
            counts_per_revolution: f64::from(config.counts_per_revolution()),
            wheel_circumference_mm: config.wheel_circumference_mm(),
        }
    }

    /// Linear distance for a signed count.
    #[inline]
    pub fn distance_mm(&self, count: i64) -> f64 {
        (count as f64 / self.counts_per_revolution) * self.wheel_circumference_mm
    }
}

/// Periodic rpm estimator.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    geometry: EncoderGeometry,
}

impl Sampler {
    /// Create a sampler for the given geometry.
    pub fn new(geometry: EncoderGeometry) -> Self {
        Self { geometry }
    }

    /// Geometry in use.
    pub fn geometry(&self) -> EncoderGeometry {
        self.geometry
    }

    /// Run one tick over every axis. Returns the distances the tick saw,
    /// in X, Y, Z order.
    pub fn tick(&self, axes: &Axes, now: Instant) -> [f64; AXIS_COUNT] {
        AxisId::ALL.map(|id| {
            let count = axes
                .get(id)
                .sample(now, self.geometry.counts_per_revolution);
            self.geometry.distance_mm(count)
        })
    }

    /// Distances from the current counters, without touching rpm.
    pub fn distances(&self, axes: &Axes) -> [f64; AXIS_COUNT] {
        axes.counts().map(|c| self.geometry.distance_mm(c))
    }
}

//! Ordered store of captured 3D points.
//!
//! Appends, snapshots, clears and drains all go through one lock, so any
//! interleaving of them resolves to a single total order: an append either
//! lands before a clear (and is removed or drained by it) or after it.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// One captured position [mm].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapturedPoint {
    /// X distance from zero [mm].
    pub x: f64,
    /// Y distance from zero [mm].
    pub y: f64,
    /// Z distance from zero [mm].
    pub z: f64,
}

impl CapturedPoint {
    /// Point from an `[x, y, z]` array.
    pub const fn from_array(v: [f64; 3]) -> Self {
        Self {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }
}

/// Unbounded, insertion-ordered point list.
#[derive(Debug, Default)]
pub struct PointStore {
    points: Mutex<Vec<CapturedPoint>>,
}

impl PointStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point at the end. Returns the new length.
    pub fn append(&self, point: CapturedPoint) -> usize {
        let mut points = self.points.lock();
        points.push(point);
        points.len()
    }

    /// Copy of the current sequence.
    pub fn snapshot(&self) -> Vec<CapturedPoint> {
        self.points.lock().clone()
    }

    /// Remove every point.
    pub fn clear(&self) {
        self.points.lock().clear();
    }

    /// Take every point, leaving the store empty.
    pub fn drain(&self) -> Vec<CapturedPoint> {
        std::mem::take(&mut *self.points.lock())
    }

    /// Put previously drained points back in front of anything appended
    /// since, keeping capture order.
    pub fn restore(&self, mut drained: Vec<CapturedPoint>) {
        let mut points = self.points.lock();
        drained.append(&mut *points);
        *points = drained;
    }

    /// Current length.
    pub fn count(&self) -> usize {
        self.points.lock().len()
    }

    /// True when no point is stored.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

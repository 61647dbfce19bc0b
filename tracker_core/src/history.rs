//! Bounded trajectory history.
//!
//! Every sampler tick records the three distances it saw. When full, the
//! oldest sample is dropped.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Distances at one sampler tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    /// X distance [mm].
    pub x: f64,
    /// Y distance [mm].
    pub y: f64,
    /// Z distance [mm].
    pub z: f64,
    /// Microseconds since the tracker was created.
    pub timestamp_us: u64,
}

/// Ring of the most recent samples.
#[derive(Debug)]
pub struct TrajectoryHistory {
    capacity: usize,
    samples: Mutex<VecDeque<TrajectorySample>>,
}

impl TrajectoryHistory {
    /// History holding at most `capacity` samples (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Maximum number of samples kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a sample, evicting the oldest when full.
    pub fn record(&self, sample: TrajectorySample) {
        let mut samples = self.samples.lock();
        if samples.len() == self.capacity {
            samples.pop_front();
        }
        samples.push_back(sample);
    }

    /// Oldest-first copy of the history.
    pub fn snapshot(&self) -> Vec<TrajectorySample> {
        self.samples.lock().iter().copied().collect()
    }

    /// Number of samples held.
    pub fn len(&self) -> usize {
        self.samples.lock().len()
    }

    /// True when empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every sample.
    pub fn clear(&self) {
        self.samples.lock().clear();
    }
}

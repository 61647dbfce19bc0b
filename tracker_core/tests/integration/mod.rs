mod capture;
mod concurrency;
mod quadrature;
mod sampling;

use std::time::Instant;
use tracker_common::config::TrackerConfig;
use tracker_core::Tracker;

/// Tracker with default config and an explicit origin.
pub fn tracker_at(origin: Instant) -> Tracker {
    Tracker::with_origin(&TrackerConfig::with_service_name("integration"), origin)
}

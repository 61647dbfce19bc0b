//! Capture button edge filtering.
//!
//! Two heuristics are available, selected by [`CaptureMode`]:
//!
//! - **FallingEdge**: a falling edge is a press when at least `debounce`
//!   has passed since the last accepted one.
//! - **BouncePattern**: for wiring where only rising edges are reliably
//!   delivered. A rising edge is a press when all of these hold:
//!   1. at least `floor` has passed since the last accepted press
//!   2. the line reads the released level
//!   3. one of: two or more rising edges inside the `window`, the previous
//!      observed level was pressed, or more than `fallback` has passed
//!
//! The trigger only decides. Reading axes and storing the point is done by
//! the caller, so decisions can be logged outside this module.

use heapless::Deque;
use std::time::{Duration, Instant};
use tracker_common::config::{CaptureConfig, CaptureMode};
use tracker_common::consts::BOUNCE_WINDOW_CAPACITY;
use tracker_common::hal::types::{Edge, Level};

/// Why an edge was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptReason {
    /// Debounced falling edge.
    FallingEdge,
    /// Two or more rising edges inside the window.
    BouncePattern,
    /// Previous observed level was the pressed level.
    ReleaseObserved,
    /// Long enough since the last capture that an isolated edge counts.
    Fallback,
}

/// Why an edge was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Edge direction not used by the active mode.
    IgnoredEdge,
    /// Inside the debounce interval of the last capture.
    Debounce,
    /// Line does not read the released level.
    NotReleased,
    /// Single clean edge without press evidence.
    Isolated,
}

/// Outcome of one button edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerDecision {
    /// Capture a point.
    Accepted(AcceptReason),
    /// Drop the edge.
    Rejected(RejectReason),
}

impl TriggerDecision {
    /// True when the edge should produce a capture.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, TriggerDecision::Accepted(_))
    }
}

/// Interval set used by the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerTimings {
    /// Falling-edge debounce.
    pub debounce: Duration,
    /// Minimum spacing between rising-edge captures.
    pub floor: Duration,
    /// Bounce window horizon.
    pub window: Duration,
    /// Isolated-edge fallback.
    pub fallback: Duration,
}

impl TriggerTimings {
    /// Timings from the capture config section.
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            floor: Duration::from_millis(config.debounce_floor_ms),
            window: Duration::from_millis(config.bounce_window_ms),
            fallback: Duration::from_millis(config.fallback_ms),
        }
    }
}

/// Accept/reject counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerStats {
    /// Edges that produced a capture.
    pub accepted: u64,
    /// Edges dropped.
    pub rejected: u64,
}

/// Per-button bookkeeping.
#[derive(Debug)]
pub struct CaptureTrigger {
    mode: CaptureMode,
    timings: TriggerTimings,
    released: Level,
    last_accepted: Option<Instant>,
    /// Level of the most recent edge, accepted or rejected. Read by the
    /// release-observed rule.
    last_level: Option<Level>,
    rising_edges: Deque<Instant, BOUNCE_WINDOW_CAPACITY>,
    stats: TriggerStats,
}

impl CaptureTrigger {
    /// Create a trigger with explicit parameters.
    pub fn new(mode: CaptureMode, timings: TriggerTimings, released: Level) -> Self {
        Self {
            mode,
            timings,
            released,
            last_accepted: None,
            last_level: None,
            rising_edges: Deque::new(),
            stats: TriggerStats::default(),
        }
    }

    /// Create a trigger from the capture config section.
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self::new(
            config.mode,
            TriggerTimings::from_config(config),
            config.released_level,
        )
    }

    /// Active heuristic.
    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Time of the last accepted press.
    pub fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }

    /// Accept/reject counters.
    pub fn stats(&self) -> TriggerStats {
        self.stats
    }

    /// Number of rising edges currently inside the bounce window.
    pub fn window_len(&self) -> usize {
        self.rising_edges.len()
    }

    /// Feed one button edge observed at `now` with the line's current level.
    pub fn on_edge(&mut self, edge: Edge, level: Level, now: Instant) -> TriggerDecision {
        let decision = match self.mode {
            CaptureMode::FallingEdge => self.falling_edge(edge, now),
            CaptureMode::BouncePattern => self.bounce_pattern(edge, level, now),
        };

        match decision {
            TriggerDecision::Accepted(_) => {
                self.rising_edges.clear();
                self.last_accepted = Some(now);
                self.stats.accepted += 1;
            }
            TriggerDecision::Rejected(_) => self.stats.rejected += 1,
        }
        self.last_level = Some(level);
        decision
    }

    fn since_last(&self, now: Instant) -> Option<Duration> {
        self.last_accepted
            .map(|t| now.saturating_duration_since(t))
    }

    fn falling_edge(&mut self, edge: Edge, now: Instant) -> TriggerDecision {
        if edge != Edge::Falling {
            return TriggerDecision::Rejected(RejectReason::IgnoredEdge);
        }
        match self.since_last(now) {
            Some(elapsed) if elapsed < self.timings.debounce => {
                TriggerDecision::Rejected(RejectReason::Debounce)
            }
            _ => TriggerDecision::Accepted(AcceptReason::FallingEdge),
        }
    }

    fn bounce_pattern(&mut self, edge: Edge, level: Level, now: Instant) -> TriggerDecision {
        if edge != Edge::Rising {
            return TriggerDecision::Rejected(RejectReason::IgnoredEdge);
        }
        self.record_rising(now);

        let since = self.since_last(now);
        if since.is_some_and(|elapsed| elapsed < self.timings.floor) {
            return TriggerDecision::Rejected(RejectReason::Debounce);
        }
        if level != self.released {
            return TriggerDecision::Rejected(RejectReason::NotReleased);
        }

        if self.rising_edges.len() >= 2 {
            TriggerDecision::Accepted(AcceptReason::BouncePattern)
        } else if self.last_level == Some(self.released.opposite()) {
            TriggerDecision::Accepted(AcceptReason::ReleaseObserved)
        } else if since.is_none_or(|elapsed| elapsed > self.timings.fallback) {
            TriggerDecision::Accepted(AcceptReason::Fallback)
        } else {
            TriggerDecision::Rejected(RejectReason::Isolated)
        }
    }

    /// Drop timestamps older than the window, then push `now`.
    fn record_rising(&mut self, now: Instant) {
        while let Some(&oldest) = self.rising_edges.front() {
            if now.saturating_duration_since(oldest) > self.timings.window {
                self.rising_edges.pop_front();
            } else {
                break;
            }
        }
        if self.rising_edges.is_full() {
            self.rising_edges.pop_front();
        }
        // Cannot fail: a slot was freed above when full.
        let _ = self.rising_edges.push_back(now);
    }
}

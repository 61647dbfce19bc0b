//! Per-axis counter and sampling bookkeeping.
//!
//! The counter lives in an atomic so readers can derive distance without
//! taking the lock. Every write to it still happens under the axis lock,
//! which keeps the decoder's read-modify-write of `(last_pin_state, counter)`
//! and the sampler's snapshot mutually exclusive.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;
use tracing::trace;
use tracker_common::consts::AXIS_COUNT;
use tracker_common::hal::types::{AxisId, PinState};

use crate::decoder::transition_delta;

/// Lock-protected part of an axis.
#[derive(Debug, Clone, Copy)]
struct Registers {
    last_pin_state: PinState,
    last_sample_time: Instant,
    last_sample_count: i64,
    rpm: f64,
}

/// State of one encoder axis.
#[derive(Debug)]
pub struct AxisState {
    id: AxisId,
    counter: AtomicI64,
    registers: Mutex<Registers>,
}

impl AxisState {
    /// Counter at 0, line state `00`, sampler reference at `now`.
    pub fn new(id: AxisId, now: Instant) -> Self {
        Self {
            id,
            counter: AtomicI64::new(0),
            registers: Mutex::new(Registers {
                last_pin_state: PinState::S00,
                last_sample_time: now,
                last_sample_count: 0,
                rpm: 0.0,
            }),
        }
    }

    /// Axis identifier.
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Apply one notified edge with the freshly read line state.
    ///
    /// Returns the applied delta. A repeated state is a no-op; a skipped
    /// state contributes 0 but still becomes the new reference.
    pub fn apply_pin_state(&self, current: PinState) -> i8 {
        let mut regs = self.registers.lock();
        if current == regs.last_pin_state {
            return 0;
        }
        let delta = transition_delta(regs.last_pin_state, current);
        if delta != 0 {
            self.counter.fetch_add(i64::from(delta), Ordering::AcqRel);
        } else {
            trace!(
                axis = %self.id,
                from = regs.last_pin_state.bits(),
                to = current.bits(),
                "discarded skipped quadrature state"
            );
        }
        regs.last_pin_state = current;
        delta
    }

    /// Current signed count. Lock-free.
    #[inline]
    pub fn count(&self) -> i64 {
        self.counter.load(Ordering::Acquire)
    }

    /// Most recent rpm estimate.
    pub fn rpm(&self) -> f64 {
        self.registers.lock().rpm
    }

    /// Last line state seen by the decoder.
    pub fn last_pin_state(&self) -> PinState {
        self.registers.lock().last_pin_state
    }

    /// Sampler step: estimate rpm from the counts accumulated since the
    /// previous call and move the reference to `now`.
    ///
    /// When no time has elapsed the previous rpm is kept. Returns the
    /// counter value the estimate was based on.
    pub fn sample(&self, now: Instant, counts_per_revolution: f64) -> i64 {
        let mut regs = self.registers.lock();
        let count = self.counter.load(Ordering::Acquire);
        let delta = count - regs.last_sample_count;
        let elapsed = now
            .saturating_duration_since(regs.last_sample_time)
            .as_secs_f64();

        if elapsed > 0.0 {
            regs.rpm = (delta as f64 / counts_per_revolution) * (60.0 / elapsed);
        }

        regs.last_sample_count = count;
        regs.last_sample_time = now;
        count
    }

    /// Reset the counter to 0. Sampling bookkeeping is left as is.
    pub fn zero(&self) {
        let _regs = self.registers.lock();
        self.counter.store(0, Ordering::Release);
    }
}

/// Collection of all axis states, one lock each.
#[derive(Debug)]
pub struct Axes {
    axes: [AxisState; AXIS_COUNT],
}

impl Axes {
    /// Create X, Y and Z with their sampler reference at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            axes: AxisId::ALL.map(|id| AxisState::new(id, now)),
        }
    }

    /// Access one axis.
    #[inline]
    pub fn get(&self, id: AxisId) -> &AxisState {
        &self.axes[id.index()]
    }

    /// Iterate in X, Y, Z order.
    pub fn iter(&self) -> impl Iterator<Item = &AxisState> {
        self.axes.iter()
    }

    /// Current counts in X, Y, Z order.
    pub fn counts(&self) -> [i64; AXIS_COUNT] {
        AxisId::ALL.map(|id| self.get(id).count())
    }
}

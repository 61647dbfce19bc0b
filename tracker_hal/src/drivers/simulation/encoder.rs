//! Synthetic quadrature encoder.

use std::time::Duration;
use tracker_common::hal::types::{AxisId, InputEvent, PinState};
use tracker_core::decoder::{step_backward, step_forward};

/// Upper bound on edges emitted per axis in one cycle.
const MAX_STEPS_PER_CYCLE: u32 = 10_000;

/// Encoder turning at a constant speed.
#[derive(Debug, Clone)]
pub struct EncoderSimulator {
    axis: AxisId,
    counts_per_second: f64,
    phase: f64,
    state: PinState,
    position: i64,
}

impl EncoderSimulator {
    /// Encoder on `axis` turning at `rpm` (negative = counter-clockwise).
    pub fn new(axis: AxisId, rpm: f64, counts_per_revolution: u32) -> Self {
        Self {
            axis,
            counts_per_second: rpm / 60.0 * f64::from(counts_per_revolution),
            phase: 0.0,
            state: PinState::S00,
            position: 0,
        }
    }

    /// Net steps emitted so far.
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Advance by `dt` and append one event per whole step.
    pub fn advance(&mut self, dt: Duration, events: &mut Vec<InputEvent>) -> u32 {
        self.phase += self.counts_per_second * dt.as_secs_f64();
        let mut steps = 0;

        while self.phase >= 1.0 && steps < MAX_STEPS_PER_CYCLE {
            self.state = step_forward(self.state);
            self.position += 1;
            self.phase -= 1.0;
            steps += 1;
            events.push(self.event());
        }
        while self.phase <= -1.0 && steps < MAX_STEPS_PER_CYCLE {
            self.state = step_backward(self.state);
            self.position -= 1;
            self.phase += 1.0;
            steps += 1;
            events.push(self.event());
        }
        if steps == MAX_STEPS_PER_CYCLE {
            self.phase = self.phase.fract();
        }
        steps
    }

    fn event(&self) -> InputEvent {
        InputEvent::Encoder {
            axis: self.axis,
            state: self.state,
        }
    }
}

//! Synthetic momentary switch.
//!
//! Each press is one clean edge to the pressed level, a hold, then a burst
//! of edges back to the released level. The burst models the contact
//! bounce that makes a single press look like several edges.

use std::time::Duration;
use tracker_common::hal::types::{Edge, InputEvent, Level};

fn edge_to(level: Level) -> Edge {
    match level {
        Level::High => Edge::Rising,
        Level::Low => Edge::Falling,
    }
}

/// Button pressed at a fixed period.
#[derive(Debug, Clone)]
pub struct ButtonSimulator {
    period: Duration,
    hold: Duration,
    bounce_edges: u32,
    released: Level,
    elapsed: Duration,
    next_press: Duration,
    pressed_at: Option<Duration>,
    presses: u64,
}

impl ButtonSimulator {
    /// Press every `period`, hold for `hold`, release with `bounce_edges`
    /// edges (at least one).
    pub fn new(period: Duration, hold: Duration, bounce_edges: u32, released: Level) -> Self {
        Self {
            period,
            hold,
            bounce_edges: bounce_edges.max(1),
            released,
            elapsed: Duration::ZERO,
            next_press: period,
            pressed_at: None,
            presses: 0,
        }
    }

    /// Completed presses.
    pub fn presses(&self) -> u64 {
        self.presses
    }

    /// Advance by `dt` and append any button edges.
    pub fn advance(&mut self, dt: Duration, events: &mut Vec<InputEvent>) {
        self.elapsed += dt;

        match self.pressed_at {
            None if self.elapsed >= self.next_press => {
                let pressed = self.released.opposite();
                events.push(InputEvent::Button {
                    edge: edge_to(pressed),
                    level: pressed,
                });
                self.pressed_at = Some(self.elapsed);
            }
            Some(at) if self.elapsed - at >= self.hold => {
                for _ in 0..self.bounce_edges {
                    events.push(InputEvent::Button {
                        edge: edge_to(self.released),
                        level: self.released,
                    });
                }
                self.pressed_at = None;
                self.next_press += self.period;
                self.presses += 1;
            }
            _ => {}
        }
    }
}

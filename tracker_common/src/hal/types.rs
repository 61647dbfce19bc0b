//! Edge and level types exchanged between input drivers and the core.
//!
//! This module defines:
//! - `AxisId` - The three tracked axes
//! - `Level` / `Edge` - Single-line electrical state and transition direction
//! - `PinState` - 2-bit (A, B) quadrature line state
//! - `InputEvent` - One notified edge, as delivered by a driver

use crate::consts::AXIS_COUNT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tracked axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisId {
    /// X axis (index 0).
    X = 0,
    /// Y axis (index 1).
    Y = 1,
    /// Z axis (index 2).
    Z = 2,
}

impl AxisId {
    /// All axes in index order.
    pub const ALL: [AxisId; AXIS_COUNT] = [AxisId::X, AxisId::Y, AxisId::Z];

    /// Array index of this axis.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            AxisId::X => "X",
            AxisId::Y => "Y",
            AxisId::Z => "Z",
        }
    }

    /// Axis for an array index, `None` when out of range.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(AxisId::X),
            1 => Some(AxisId::Y),
            2 => Some(AxisId::Z),
            _ => None,
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Logical level of a single digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Line reads 0.
    #[default]
    Low,
    /// Line reads 1.
    High,
}

impl Level {
    /// The other level.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// Level as a single bit.
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

impl From<bool> for Level {
    fn from(value: bool) -> Self {
        if value { Level::High } else { Level::Low }
    }
}

/// Direction of a notified edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Low → High.
    Rising,
    /// High → Low.
    Falling,
}

/// Combined level of an encoder's A and B lines, `(A << 1) | B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PinState(u8);

impl PinState {
    /// A=0, B=0.
    pub const S00: PinState = PinState(0b00);
    /// A=0, B=1.
    pub const S01: PinState = PinState(0b01);
    /// A=1, B=0.
    pub const S10: PinState = PinState(0b10);
    /// A=1, B=1.
    pub const S11: PinState = PinState(0b11);

    /// Build from the two line levels.
    #[inline]
    pub const fn from_levels(a: Level, b: Level) -> Self {
        PinState((a.bit() << 1) | b.bit())
    }

    /// Build from raw bits. Only the two low bits are kept.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        PinState(bits & 0b11)
    }

    /// Raw 2-bit value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Level of line A.
    pub const fn a(self) -> Level {
        if self.0 & 0b10 != 0 { Level::High } else { Level::Low }
    }

    /// Level of line B.
    pub const fn b(self) -> Level {
        if self.0 & 0b01 != 0 { Level::High } else { Level::Low }
    }
}

/// One edge notification from the digital-input layer.
///
/// Levels are the values read back from the lines when the edge was
/// delivered. Events for the same line pair arrive in real-time order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Either line of an axis encoder changed.
    Encoder {
        /// Axis the line pair belongs to.
        axis: AxisId,
        /// Current (A, B) levels.
        state: PinState,
    },
    /// The capture button line changed.
    Button {
        /// Edge direction reported by the line.
        edge: Edge,
        /// Current line level.
        level: Level,
    },
}

//! Quadrature transition decoding.
//!
//! Index = `(last << 2) | current` over 2-bit `(A << 1) | B` states.
//!
//! ```text
//!             current: 00   01   10   11
//! last 00             0   -1   +1    0
//! last 01            +1    0    0   -1
//! last 10            -1    0    0   +1
//! last 11             0   +1   -1    0
//! ```
//!
//! Clockwise runs `00 → 10 → 11 → 01 → 00`. The diagonals (00↔11, 01↔10)
//! mean a step was missed; they count as 0 rather than being guessed.

use tracker_common::hal::types::PinState;

/// Delta per transition, `+1` clockwise, `-1` counter-clockwise.
pub const TRANSITION_TABLE: [i8; 16] = [
    0, -1, 1, 0, //
    1, 0, 0, -1, //
    -1, 0, 0, 1, //
    0, 1, -1, 0, //
];

/// Table index for a transition.
#[inline]
pub const fn transition_index(last: PinState, current: PinState) -> usize {
    ((last.bits() << 2) | current.bits()) as usize
}

/// Count delta for a transition.
#[inline]
pub const fn transition_delta(last: PinState, current: PinState) -> i8 {
    TRANSITION_TABLE[transition_index(last, current)]
}

/// True for the two transitions that skip a state.
#[inline]
pub const fn is_skip(last: PinState, current: PinState) -> bool {
    (last.bits() ^ current.bits()) == 0b11
}

/// Next state in the clockwise cycle.
pub const fn step_forward(state: PinState) -> PinState {
    match state.bits() {
        0b00 => PinState::S10,
        0b10 => PinState::S11,
        0b11 => PinState::S01,
        _ => PinState::S00,
    }
}

/// Next state in the counter-clockwise cycle.
pub const fn step_backward(state: PinState) -> PinState {
    match state.bits() {
        0b00 => PinState::S01,
        0b01 => PinState::S11,
        0b11 => PinState::S10,
        _ => PinState::S00,
    }
}

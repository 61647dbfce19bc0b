//! Prelude module for common re-exports.
//!
//! ```rust
//! use tracker_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    CaptureConfig, CaptureMode, ConfigError, ConfigLoader, EncoderConfig, SharedConfig,
    TrackerConfig,
};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{AXIS_COUNT, CYCLE_TIME_US};

// ─── Input ──────────────────────────────────────────────────────────
pub use crate::hal::driver::{HalError, InputDriver};
pub use crate::hal::types::{AxisId, Edge, InputEvent, Level, PinState};

//! System-wide constants for the tracker workspace.
//!
//! Single source of truth for encoder geometry defaults and trigger timings.

/// Number of tracked axes (X, Y, Z).
pub const AXIS_COUNT: usize = 3;

/// Quadrature decoding resolves every encoder pulse into 4 sub-states.
pub const QUADRATURE_MULTIPLIER: u32 = 4;

/// Default encoder resolution, pulses per revolution.
pub const DEFAULT_PPR: u32 = 600;

/// Default measuring wheel diameter [mm].
pub const DEFAULT_WHEEL_DIAMETER_MM: f64 = 50.0;

/// Default rate sampler period [ms].
pub const DEFAULT_SAMPLE_PERIOD_MS: u64 = 100;

/// Default driver poll period in microseconds (1 kHz).
pub const CYCLE_TIME_US: u32 = 1000;

/// Falling-edge debounce interval [ms].
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Minimum spacing between two accepted rising-edge captures [ms].
pub const DEFAULT_DEBOUNCE_FLOOR_MS: u64 = 300;

/// Horizon of the rising-edge bounce window [ms].
pub const DEFAULT_BOUNCE_WINDOW_MS: u64 = 100;

/// After this long without a capture, an isolated clean edge is accepted [ms].
pub const DEFAULT_FALLBACK_MS: u64 = 500;

/// Capacity of the fixed-size bounce window.
pub const BOUNCE_WINDOW_CAPACITY: usize = 16;

/// Default trajectory history capacity (samples).
pub const DEFAULT_HISTORY_SIZE: usize = 10_000;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/tracker/tracker.toml";

//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load the tracker's TOML
//! configuration and the typed sections it is made of.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tracker_common::config::{ConfigError, TrackerConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = TrackerConfig::load_validated(Path::new("tracker.toml"))?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use crate::consts::{
    CYCLE_TIME_US, DEFAULT_BOUNCE_WINDOW_MS, DEFAULT_DEBOUNCE_FLOOR_MS, DEFAULT_DEBOUNCE_MS,
    DEFAULT_FALLBACK_MS, DEFAULT_HISTORY_SIZE, DEFAULT_PPR, DEFAULT_SAMPLE_PERIOD_MS,
    DEFAULT_WHEEL_DIAMETER_MM, QUADRATURE_MULTIPLIER,
};
use crate::hal::types::Level;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

/// Common configuration fields.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "tracker-bench-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation: any serde-deserializable struct can use ConfigLoader.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

fn default_cycle_time_us() -> u32 {
    CYCLE_TIME_US
}

fn default_ppr() -> u32 {
    DEFAULT_PPR
}

fn default_wheel_diameter_mm() -> f64 {
    DEFAULT_WHEEL_DIAMETER_MM
}

fn default_sample_period_ms() -> u64 {
    DEFAULT_SAMPLE_PERIOD_MS
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_debounce_floor_ms() -> u64 {
    DEFAULT_DEBOUNCE_FLOOR_MS
}

fn default_bounce_window_ms() -> u64 {
    DEFAULT_BOUNCE_WINDOW_MS
}

fn default_fallback_ms() -> u64 {
    DEFAULT_FALLBACK_MS
}

fn default_released_level() -> Level {
    Level::High
}

fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}

/// Encoder geometry and sampler period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Encoder pulses per revolution (before quadrature multiplication).
    #[serde(default = "default_ppr")]
    pub ppr: u32,

    /// Measuring wheel diameter [mm].
    #[serde(default = "default_wheel_diameter_mm")]
    pub wheel_diameter_mm: f64,

    /// Rate sampler period [ms].
    #[serde(default = "default_sample_period_ms")]
    pub sample_period_ms: u64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            ppr: DEFAULT_PPR,
            wheel_diameter_mm: DEFAULT_WHEEL_DIAMETER_MM,
            sample_period_ms: DEFAULT_SAMPLE_PERIOD_MS,
        }
    }
}

impl EncoderConfig {
    /// Counts per revolution, `ppr × 4`.
    pub fn counts_per_revolution(&self) -> u32 {
        self.ppr * QUADRATURE_MULTIPLIER
    }

    /// Wheel circumference [mm].
    pub fn wheel_circumference_mm(&self) -> f64 {
        PI * self.wheel_diameter_mm
    }

    /// Sampler period.
    pub fn sample_period(&self) -> Duration {
        Duration::from_millis(self.sample_period_ms)
    }
}

/// Which edge heuristic the capture button uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Rising edges, bounce window, floor and fallback.
    #[default]
    BouncePattern,
    /// Plain falling-edge debounce, for wiring that delivers clean falls.
    FallingEdge,
}

/// Capture button timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Edge heuristic.
    #[serde(default)]
    pub mode: CaptureMode,

    /// Falling-edge debounce [ms] (`falling_edge` mode).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum spacing between accepted captures [ms] (`bounce_pattern` mode).
    #[serde(default = "default_debounce_floor_ms")]
    pub debounce_floor_ms: u64,

    /// Rolling window horizon for bounce detection [ms].
    #[serde(default = "default_bounce_window_ms")]
    pub bounce_window_ms: u64,

    /// Isolated edges are accepted after this long without a capture [ms].
    #[serde(default = "default_fallback_ms")]
    pub fallback_ms: u64,

    /// Line level of the button when not pressed.
    #[serde(default = "default_released_level")]
    pub released_level: Level,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            mode: CaptureMode::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            debounce_floor_ms: DEFAULT_DEBOUNCE_FLOOR_MS,
            bounce_window_ms: DEFAULT_BOUNCE_WINDOW_MS,
            fallback_ms: DEFAULT_FALLBACK_MS,
            released_level: Level::High,
        }
    }
}

/// Trajectory history sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of samples kept (oldest dropped first).
    #[serde(default = "default_history_size")]
    pub max_points: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_HISTORY_SIZE,
        }
    }
}

/// Point export target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where drained points are written on shutdown. `None` disables export.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Complete tracker configuration, loaded from `tracker.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Common fields.
    pub shared: SharedConfig,

    /// Driver poll period in microseconds.
    #[serde(default = "default_cycle_time_us")]
    pub cycle_time_us: u32,

    /// Encoder geometry.
    #[serde(default)]
    pub encoder: EncoderConfig,

    /// Capture button.
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Trajectory history.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Point export.
    #[serde(default)]
    pub export: ExportConfig,

    /// Per-driver configuration sections.
    /// Key = driver name, Value = driver-specific TOML table.
    #[serde(default)]
    pub driver_config: HashMap<String, toml::Value>,
}

impl TrackerConfig {
    /// Minimal configuration with every section at its default.
    pub fn with_service_name(name: impl Into<String>) -> Self {
        Self {
            shared: SharedConfig {
                log_level: LogLevel::default(),
                service_name: name.into(),
            },
            cycle_time_us: CYCLE_TIME_US,
            encoder: EncoderConfig::default(),
            capture: CaptureConfig::default(),
            history: HistoryConfig::default(),
            export: ExportConfig::default(),
            driver_config: HashMap::new(),
        }
    }

    /// Load from a TOML file and validate.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        debug!(
            "Loaded tracker config '{}' from {:?}",
            config.shared.service_name, path
        );
        Ok(config)
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Validation Rules
    /// 1. `shared.service_name` not empty
    /// 2. `cycle_time_us` > 0
    /// 3. `encoder.ppr` > 0, `encoder.sample_period_ms` > 0
    /// 4. `encoder.wheel_diameter_mm` finite and > 0
    /// 5. `capture.debounce_floor_ms` <= `capture.fallback_ms`
    /// 6. `history.max_points` > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        if self.cycle_time_us == 0 {
            return Err(ConfigError::ValidationError(
                "cycle_time_us must be greater than 0".to_string(),
            ));
        }
        if self.encoder.ppr == 0 {
            return Err(ConfigError::ValidationError(
                "encoder.ppr must be greater than 0".to_string(),
            ));
        }
        if self.encoder.sample_period_ms == 0 {
            return Err(ConfigError::ValidationError(
                "encoder.sample_period_ms must be greater than 0".to_string(),
            ));
        }
        if !self.encoder.wheel_diameter_mm.is_finite() || self.encoder.wheel_diameter_mm <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "encoder.wheel_diameter_mm must be positive, got {}",
                self.encoder.wheel_diameter_mm
            )));
        }
        if self.capture.debounce_floor_ms > self.capture.fallback_ms {
            return Err(ConfigError::ValidationError(format!(
                "capture.debounce_floor_ms ({}) exceeds capture.fallback_ms ({})",
                self.capture.debounce_floor_ms, self.capture.fallback_ms
            )));
        }
        if self.history.max_points == 0 {
            return Err(ConfigError::ValidationError(
                "history.max_points must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

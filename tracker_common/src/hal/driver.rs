//! Input driver trait and error types.
//!
//! This module defines:
//! - `InputDriver` trait - Interface for pluggable digital-input backends
//! - `HalError` enum - Error types for driver and runtime operations
//! - `DriverFactory` type alias - Factory function type
//! - `DriverDiagnostics` struct - Optional driver diagnostics

use crate::config::TrackerConfig;
use crate::hal::types::InputEvent;
use std::time::Duration;
use thiserror::Error;

/// Error types for driver and runtime operations.
#[derive(Debug, Clone, Error)]
pub enum HalError {
    /// Driver initialization failed (lines could not be claimed, etc.)
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Communication with the driver thread failed
    #[error("Communication error: {0}")]
    CommunicationError(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    /// Point export failed
    #[error("Export error: {0}")]
    ExportError(String),
}

impl From<crate::config::ConfigError> for HalError {
    fn from(e: crate::config::ConfigError) -> Self {
        HalError::ConfigError(e.to_string())
    }
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn() -> Box<dyn InputDriver>;

/// Optional driver diagnostics.
#[derive(Debug, Clone, Default)]
pub struct DriverDiagnostics {
    /// Number of cycles executed
    pub cycle_count: u64,
    /// Number of edge events produced
    pub events_emitted: u64,
}

/// Trait defining the interface for digital-input drivers.
///
/// A driver owns the encoder line pairs and the button line. It reports
/// every observed edge as an [`InputEvent`]; it never interprets them.
///
/// # Lifecycle
///
/// 1. `init()` - Called once before the poll loop starts
/// 2. `cycle()` - Called every `cycle_time_us` from the driver thread
/// 3. `shutdown()` - Called when the runtime is stopping
///
/// A failing `init()` is not fatal to the process: the runtime logs it and
/// keeps running without edges.
pub trait InputDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Claim lines and prepare internal state.
    ///
    /// # Errors
    /// Return `HalError::InitFailed` if the lines cannot be acquired.
    fn init(&mut self, config: &TrackerConfig) -> Result<(), HalError>;

    /// Poll once and append every edge observed since the last call.
    ///
    /// Events for one line pair must be appended in the order they happened.
    fn cycle(&mut self, dt: Duration, events: &mut Vec<InputEvent>);

    /// Release lines.
    fn shutdown(&mut self) -> Result<(), HalError>;

    /// Get driver-specific diagnostics.
    /// Default: None
    fn diagnostics(&self) -> Option<DriverDiagnostics> {
        None
    }
}

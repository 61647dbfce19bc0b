//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements the `InputDriver` trait with one
//! [`EncoderSimulator`] per axis and an optional [`ButtonSimulator`].
//! Parameters come from `[driver_config.simulation]`.

use super::DRIVER_NAME;
use super::button::ButtonSimulator;
use super::encoder::EncoderSimulator;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use tracker_common::config::TrackerConfig;
use tracker_common::consts::AXIS_COUNT;
use tracker_common::hal::driver::{DriverDiagnostics, HalError, InputDriver};
use tracker_common::hal::types::{AxisId, InputEvent};

fn default_rpm() -> [f64; AXIS_COUNT] {
    [30.0, -15.0, 0.0]
}

fn default_button_period_ms() -> u64 {
    2000
}

fn default_hold_ms() -> u64 {
    150
}

fn default_bounce_edges() -> u32 {
    3
}

/// `[driver_config.simulation]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Shaft speed per axis, X/Y/Z. Negative turns counter-clockwise.
    #[serde(default = "default_rpm")]
    pub rpm: [f64; AXIS_COUNT],

    /// Button press period [ms]. 0 disables the button.
    #[serde(default = "default_button_period_ms")]
    pub button_period_ms: u64,

    /// How long each press is held [ms].
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,

    /// Edges emitted on release.
    #[serde(default = "default_bounce_edges")]
    pub bounce_edges: u32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            rpm: default_rpm(),
            button_period_ms: default_button_period_ms(),
            hold_ms: default_hold_ms(),
            bounce_edges: default_bounce_edges(),
        }
    }
}

impl SimulationParams {
    /// Read the simulation section, falling back to defaults when absent.
    pub fn from_config(config: &TrackerConfig) -> Result<Self, HalError> {
        let params: SimulationParams = match config.driver_config.get(DRIVER_NAME) {
            Some(value) => value.clone().try_into().map_err(|e| {
                HalError::ConfigError(format!("Invalid [driver_config.{DRIVER_NAME}]: {e}"))
            })?,
            None => Self::default(),
        };

        if let Some(bad) = params.rpm.iter().find(|r| !r.is_finite()) {
            return Err(HalError::InitFailed(format!(
                "simulated rpm must be finite, got {bad}"
            )));
        }
        if params.button_period_ms > 0 && params.hold_ms >= params.button_period_ms {
            return Err(HalError::InitFailed(format!(
                "hold_ms ({}) must be shorter than button_period_ms ({})",
                params.hold_ms, params.button_period_ms
            )));
        }
        Ok(params)
    }
}

/// Simulation driver implementing the InputDriver trait.
pub struct SimulationDriver {
    initialized: bool,
    encoders: Vec<EncoderSimulator>,
    button: Option<ButtonSimulator>,
    diagnostics: DriverDiagnostics,
}

impl SimulationDriver {
    /// Create an uninitialized simulation driver.
    pub fn new() -> Self {
        Self {
            initialized: false,
            encoders: Vec::new(),
            button: None,
            diagnostics: DriverDiagnostics::default(),
        }
    }

    /// Net simulated position of an axis, in counts.
    pub fn position(&self, axis: AxisId) -> Option<i64> {
        self.encoders.get(axis.index()).map(EncoderSimulator::position)
    }

    /// Completed simulated button presses.
    pub fn presses(&self) -> u64 {
        self.button.as_ref().map_or(0, ButtonSimulator::presses)
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn init(&mut self, config: &TrackerConfig) -> Result<(), HalError> {
        let params = SimulationParams::from_config(config)?;
        let cpr = config.encoder.counts_per_revolution();

        self.encoders = AxisId::ALL
            .iter()
            .map(|&axis| EncoderSimulator::new(axis, params.rpm[axis.index()], cpr))
            .collect();

        self.button = (params.button_period_ms > 0).then(|| {
            ButtonSimulator::new(
                Duration::from_millis(params.button_period_ms),
                Duration::from_millis(params.hold_ms),
                params.bounce_edges,
                config.capture.released_level,
            )
        });

        self.diagnostics = DriverDiagnostics::default();
        self.initialized = true;

        info!(
            "Simulation driver initialized: rpm={:?}, cpr={}, button period={}ms",
            params.rpm, cpr, params.button_period_ms
        );
        Ok(())
    }

    fn cycle(&mut self, dt: Duration, events: &mut Vec<InputEvent>) {
        if !self.initialized {
            return;
        }
        let before = events.len();

        for encoder in &mut self.encoders {
            encoder.advance(dt, events);
        }
        if let Some(button) = &mut self.button {
            button.advance(dt, events);
        }

        self.diagnostics.cycle_count += 1;
        self.diagnostics.events_emitted += (events.len() - before) as u64;
    }

    fn shutdown(&mut self) -> Result<(), HalError> {
        debug!(
            "Simulation driver shutting down after {} cycles, {} events",
            self.diagnostics.cycle_count, self.diagnostics.events_emitted
        );
        self.encoders.clear();
        self.button = None;
        self.initialized = false;
        Ok(())
    }

    fn diagnostics(&self) -> Option<DriverDiagnostics> {
        Some(self.diagnostics.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(section: &str) -> TrackerConfig {
        TrackerConfig::from_toml(&format!(
            "[shared]\nservice_name = \"sim\"\n\n[driver_config.simulation]\n{section}"
        ))
        .unwrap()
    }

    #[test]
    fn params_default_when_section_missing() {
        let config = TrackerConfig::with_service_name("sim");
        assert_eq!(
            SimulationParams::from_config(&config).unwrap(),
            SimulationParams::default()
        );
    }

    #[test]
    fn params_parse_from_section() {
        let config = config_with("rpm = [1.0, 2.0, 3.0]\nbutton_period_ms = 0\n");
        let params = SimulationParams::from_config(&config).unwrap();
        assert_eq!(params.rpm, [1.0, 2.0, 3.0]);
        assert_eq!(params.button_period_ms, 0);
        assert_eq!(params.bounce_edges, 3);
    }

    #[test]
    fn invalid_section_fails_init() {
        let config = config_with("rpm = \"fast\"\n");
        let mut driver = SimulationDriver::new();
        assert!(matches!(
            driver.init(&config),
            Err(HalError::ConfigError(_))
        ));

        let config = config_with("button_period_ms = 100\nhold_ms = 200\n");
        assert!(matches!(
            driver.init(&config),
            Err(HalError::InitFailed(_))
        ));
    }

    #[test]
    fn uninitialized_driver_is_silent() {
        let mut driver = SimulationDriver::new();
        let mut events = Vec::new();
        driver.cycle(Duration::from_secs(1), &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn cycle_emits_edges_per_axis() {
        let config = config_with("rpm = [60.0, -60.0, 0.0]\nbutton_period_ms = 0\n");
        let mut driver = SimulationDriver::new();
        driver.init(&config).unwrap();

        let mut events = Vec::new();
        driver.cycle(Duration::from_millis(100), &mut events);

        assert_eq!(driver.position(AxisId::X), Some(240));
        assert_eq!(driver.position(AxisId::Y), Some(-240));
        assert_eq!(driver.position(AxisId::Z), Some(0));
        assert_eq!(events.len(), 480);

        let diag = driver.diagnostics().unwrap();
        assert_eq!(diag.cycle_count, 1);
        assert_eq!(diag.events_emitted, 480);

        driver.shutdown().unwrap();
        assert_eq!(driver.position(AxisId::X), None);
    }
}

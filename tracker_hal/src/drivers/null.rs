//! Driver without any lines.
//!
//! Used when no hardware is attached: the tracker runs, answers queries and
//! accepts software captures, but counts never move.

use std::time::Duration;
use tracing::info;
use tracker_common::config::TrackerConfig;
use tracker_common::hal::driver::{HalError, InputDriver};
use tracker_common::hal::types::InputEvent;

/// Registry name.
pub const DRIVER_NAME: &str = "null";

/// Driver that never reports an edge.
#[derive(Debug, Default)]
pub struct NullDriver;

impl InputDriver for NullDriver {
    fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn init(&mut self, config: &TrackerConfig) -> Result<(), HalError> {
        info!(
            "Null driver for '{}': no input lines attached",
            config.shared.service_name
        );
        Ok(())
    }

    fn cycle(&mut self, _dt: Duration, _events: &mut Vec<InputEvent>) {}

    fn shutdown(&mut self) -> Result<(), HalError> {
        Ok(())
    }
}

/// Factory function to create a null driver instance.
pub fn create_driver() -> Box<dyn InputDriver> {
    Box::new(NullDriver)
}

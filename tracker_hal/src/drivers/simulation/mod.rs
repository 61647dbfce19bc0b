//! Simulation driver module.
//!
//! Produces Gray-code edge streams for each axis at a fixed rpm and a
//! periodic button press with contact bounce, for development and testing
//! without hardware.

mod button;
mod driver;
mod encoder;

pub use button::ButtonSimulator;
pub use driver::{SimulationDriver, SimulationParams};
pub use encoder::EncoderSimulator;

use tracker_common::hal::driver::InputDriver;

/// Registry name.
pub const DRIVER_NAME: &str = "simulation";

/// Factory function to create a simulation driver instance.
pub fn create_driver() -> Box<dyn InputDriver> {
    Box::new(SimulationDriver::new())
}

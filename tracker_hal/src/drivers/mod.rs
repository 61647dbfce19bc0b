//! Input driver implementations.
//!
//! - [`simulation`] - Synthetic encoders and a bouncing button
//! - [`null`] - No lines at all; counts stay static
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `InputDriver` trait from `tracker_common::hal::driver`
//! 3. Register it in [`builtin_registry`]

pub mod null;
pub mod simulation;

use crate::driver_registry::DriverRegistry;

/// Registry populated with every built-in driver.
pub fn builtin_registry() -> DriverRegistry {
    let mut registry = DriverRegistry::new();
    registry.register(
        simulation::DRIVER_NAME,
        "synthetic encoders at fixed rpm and a bouncing button",
        simulation::create_driver,
    );
    registry.register(
        null::DRIVER_NAME,
        "no input lines, counts stay static",
        null::create_driver,
    );
    registry
}

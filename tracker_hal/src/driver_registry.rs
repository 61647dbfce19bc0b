//! Named input-driver factories.
//!
//! Entries keep registration order, which is the order `--list-drivers`
//! prints. Registering an existing name replaces that entry in place, so a
//! caller can swap a built-in driver for its own before handing the
//! registry to `TrackerCore`.

use tracker_common::hal::driver::{DriverFactory, HalError, InputDriver};

/// One registered driver.
#[derive(Debug, Clone, Copy)]
pub struct DriverEntry {
    /// Name used with `--driver`.
    pub name: &'static str,
    /// One-line description.
    pub summary: &'static str,
    factory: DriverFactory,
}

/// Ordered set of driver factories.
#[derive(Debug, Default)]
pub struct DriverRegistry {
    entries: Vec<DriverEntry>,
}

impl DriverRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a driver, or replace the one registered under `name`.
    /// Returns true when an entry was replaced.
    pub fn register(
        &mut self,
        name: &'static str,
        summary: &'static str,
        factory: DriverFactory,
    ) -> bool {
        let entry = DriverEntry {
            name,
            summary,
            factory,
        };
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => {
                *existing = entry;
                true
            }
            None => {
                self.entries.push(entry);
                false
            }
        }
    }

    /// Instantiate the driver registered as `name`.
    ///
    /// # Errors
    /// `HalError::DriverNotFound` naming the drivers that do exist.
    pub fn create_driver(&self, name: &str) -> Result<Box<dyn InputDriver>, HalError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| (e.factory)())
            .ok_or_else(|| {
                HalError::DriverNotFound(format!(
                    "{name} (available: {})",
                    self.names().collect::<Vec<_>>().join(", ")
                ))
            })
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    /// Registered entries, in registration order.
    pub fn entries(&self) -> &[DriverEntry] {
        &self.entries
    }
}

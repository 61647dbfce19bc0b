//! Digital-input abstraction shared between the core and the drivers.
//!
//! The core never touches hardware lines. Drivers translate whatever they
//! observe into [`types::InputEvent`]s and hand them over through the
//! [`driver::InputDriver`] contract.

pub mod driver;
pub mod types;

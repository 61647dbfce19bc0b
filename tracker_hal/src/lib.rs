//! # Tracker HAL Library
//!
//! Runtime around the tracker core: input drivers, the driver poll thread,
//! the edge dispatcher, the periodic sampler and point export.
//!
//! # Module Structure
//!
//! - [`core`] - TrackerCore struct, thread management
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - Input driver implementations
//! - [`export`] - Point list export
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐  InputEvent   ┌──────────────┐        ┌───────────────┐
//! │ driver thread │ ────mpsc────► │  dispatcher  │ ─────► │               │
//! │ (InputDriver) │               │  (run loop)  │        │    Tracker    │
//! └───────────────┘               └──────────────┘        │ (tracker_core)│
//!                                 ┌──────────────┐        │               │
//!                                 │ sampler thr. │ ─────► │               │
//!                                 └──────────────┘        └───────────────┘
//! ```

#![deny(warnings)]
#![deny(missing_docs)]

pub mod core;
pub mod driver_registry;
pub mod drivers;
pub mod export;

pub use crate::core::TrackerCore;
pub use crate::driver_registry::DriverRegistry;

//! Tracker Common Library
//!
//! This crate provides shared constants, configuration loading and the
//! input-driver contract for all tracker workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - Encoder, sampling and capture defaults
//! - [`config`] - Configuration loading traits and the tracker config tree
//! - [`hal`] - Edge/level types and the `InputDriver` trait
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use tracker_common::prelude::*;
//!
//! let axis = AxisId::X;
//! assert_eq!(axis.label(), "X");
//! ```

pub mod config;
pub mod consts;
pub mod hal;
pub mod prelude;

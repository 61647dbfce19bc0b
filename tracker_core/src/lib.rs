//! # Tracker Core Library
//!
//! Real-time part of the 3-axis encoder tracker. Turns edge notifications
//! into signed counts, samples them into rpm and distance, and captures
//! 3D points from a debounced button.
//!
//! ## Components (leaf-first)
//!
//! 1. [`decoder`] - Gray-code transition table
//! 2. [`state`] - Per-axis counter and sampling bookkeeping, each axis
//!    behind its own lock
//! 3. [`sampler`] - Periodic rpm estimation, stateless distance derivation
//! 4. [`trigger`] - Button edge filtering
//! 5. [`points`] - Ordered capture store
//! 6. [`history`] - Bounded trajectory of sampler ticks
//! 7. [`tracker`] - Coordinating structure exposing the query operations
//!
//! ## Locking
//!
//! Axis locks are disjoint from each other and from the point store lock.
//! Distances are derived from a single atomic load of the counter and never
//! need a lock.

pub mod decoder;
pub mod history;
pub mod points;
pub mod sampler;
pub mod state;
pub mod tracker;
pub mod trigger;

pub use crate::points::{CapturedPoint, PointStore};
pub use crate::tracker::{AxisReading, Tracker};

//! Axis state module root.
//!
//! One [`axis::AxisState`] per tracked axis, collected in [`axis::Axes`].

pub mod axis;

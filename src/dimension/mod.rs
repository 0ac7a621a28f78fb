//! Cumulative dimension constraints.
//!
//! A dimension accumulates an evaluator's transit along a route and bounds
//! the running value by a capacity, an optional per-arc slack, and optional
//! per-location windows.
//!
//! - [`Dimension`] — one named cumulative quantity
//! - [`DimensionSet`] — the registered dimensions, primary first
//! - [`SlackPreset`] — the two named slack configurations

mod cumul;
mod set;

pub use cumul::{CumulRange, Dimension, SlackPreset};
pub use set::DimensionSet;

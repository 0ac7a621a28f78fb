//! Distance and travel time matrices.
//!
//! Provides a dense integer matrix for routing problems.

mod matrix;

pub use matrix::DistanceMatrix;

//! Constructive route building under dimension constraints.
//!
//! - [`RoutingModel`] — vehicle endpoints, arc cost, and registered dimensions
//! - [`CheapestArcBuilder`] — path-cheapest-arc greedy, O(v·n²·d)

mod cheapest_arc;
mod model;

pub use cheapest_arc::{CheapestArcBuilder, VehicleState};
pub use model::RoutingModel;

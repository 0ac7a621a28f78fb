//! # u-dispatch
//!
//! Capacitated vehicle routing with time windows: over-capacity demands are
//! split into dedicated trips, the remainder is routed greedily under
//! cumulative dimension constraints.
//!
//! ## Modules
//!
//! - [`models`] — Problem snapshot, vehicle, time windows, routes, solutions
//! - [`distance`] — Integer distance/travel-time matrix
//! - [`evaluation`] — Arc evaluators and solution checking
//! - [`formulator`] — Demand splitting into dedicated trips
//! - [`dimension`] — Cumulative dimensions with slack and per-location ranges
//! - [`constructive`] — Routing model and the cheapest-arc route builder
//! - [`config`] — Constraint profiles and solver settings
//! - [`planner`] — End-to-end pipeline
//! - [`report`] — Plain-text plan report
//! - [`error`] — Error taxonomy

pub mod config;
pub mod constructive;
pub mod dimension;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod formulator;
pub mod models;
pub mod planner;
pub mod report;

pub use config::SolverConfig;
pub use error::RoutingError;
pub use planner::{plan, Plan};

//! Domain model types for vehicle routing problems.
//!
//! Provides the core abstractions: a homogeneous vehicle, time windows, the
//! immutable problem snapshot, routes as ordered steps with cumulative
//! dimension values, and solutions collecting routes per vehicle slot.

mod problem;
mod route;
mod solution;
mod time_window;
mod vehicle;

pub use problem::{ProblemData, ProblemInput};
pub use route::{Route, RouteStep};
pub use solution::{Solution, Violation, ViolationType};
pub use time_window::TimeWindow;
pub use vehicle::Vehicle;

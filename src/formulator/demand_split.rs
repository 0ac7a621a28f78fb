//! Demand splitting for locations a single vehicle cannot serve.
//!
//! # Algorithm
//!
//! Serving location `x` from the depot costs a fixed overhead of
//! `2·d(depot, x)` on top of its demand. While `demand[x] + overhead`
//! exceeds the vehicle capacity, one vehicle is dedicated to a
//! `depot → x → depot` trip carrying `capacity − overhead`, and that load is
//! taken off `demand[x]`. What is left of every demand fits a single vehicle
//! and is handed to the route builder.
//!
//! # Complexity
//!
//! O(n + Σ demand / capacity).

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{ConfigurationError, RoutingError};
use crate::models::ProblemData;

/// A dedicated `depot → location → depot` trip produced by splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dispatch {
    /// 1-based vehicle number among the split-off vehicles.
    pub vehicle_number: usize,
    /// Depot the trip starts and ends at.
    pub depot: usize,
    /// Location being served.
    pub location: usize,
    /// Load delivered on this trip.
    pub load: i64,
    /// Vehicle capacity (the cumul on returning to the depot).
    pub capacity: i64,
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Load(0) -> {} Load({}) -> {} Load({})",
            self.depot, self.location, self.load, self.depot, self.capacity
        )
    }
}

/// Result of a splitting pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitOutcome {
    /// Demands left for the route builder.
    pub residual_demands: Vec<i64>,
    /// Vehicles consumed by the dedicated trips.
    pub required_vehicles: usize,
    /// The dedicated trips, in creation order.
    pub dispatches: Vec<Dispatch>,
}

/// Splits every over-capacity demand into dedicated trips.
///
/// The snapshot is left untouched; the residual demand vector is returned in
/// the outcome.
///
/// Fails with [`ConfigurationError::UnservableLocation`] when a location with
/// positive demand has a round-trip overhead of at least the capacity, since
/// no trip could carry anything there.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::formulator::split_demands;
/// use u_dispatch::models::{ProblemData, Vehicle};
///
/// let dm = DistanceMatrix::from_rows(vec![vec![0, 2], vec![2, 0]]).unwrap();
/// let problem = ProblemData::new(Vehicle::new(10).unwrap(), vec![0, 15], dm).unwrap();
///
/// let outcome = split_demands(&problem).unwrap();
/// assert_eq!(outcome.required_vehicles, 2);
/// assert_eq!(outcome.residual_demands, vec![0, 3]);
/// ```
pub fn split_demands(problem: &ProblemData) -> Result<SplitOutcome, RoutingError> {
    let capacity = problem.capacity();
    let depot = problem.depot();
    let mut demands = problem.demands().to_vec();
    let mut dispatches = Vec::new();

    for (location, demand) in demands.iter_mut().enumerate() {
        let overhead = problem.distance(depot, location).saturating_mul(2);
        let fits = |demand: i64| {
            demand
                .checked_add(overhead)
                .is_some_and(|total| total <= capacity)
        };
        if *demand == 0 || fits(*demand) {
            continue;
        }
        if overhead >= capacity {
            return Err(ConfigurationError::UnservableLocation {
                location,
                overhead,
                capacity,
            }
            .into());
        }

        let load = capacity - overhead;
        while !fits(*demand) {
            *demand -= load;
            let dispatch = Dispatch {
                vehicle_number: dispatches.len() + 1,
                depot,
                location,
                load,
                capacity,
            };
            debug!(vehicle = dispatch.vehicle_number, %dispatch, "dedicated trip");
            dispatches.push(dispatch);
        }
    }

    Ok(SplitOutcome {
        residual_demands: demands,
        required_vehicles: dispatches.len(),
        dispatches,
    })
}

//! Immutable problem snapshot and its external input shape.

use serde::Deserialize;

use super::{TimeWindow, Vehicle};
use crate::distance::DistanceMatrix;
use crate::error::{ConfigurationError, RoutingError, ShapeError};

/// Read-only snapshot of a CVRPTW instance.
///
/// Location 0 is conventionally the depot with demand 0. There is one
/// potential vehicle per non-depot location (`num_vehicles == n - 1`), an
/// upper bound the route builder need not fully use. Unless per-vehicle
/// start/end locations are given, every vehicle starts and ends at the depot.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::models::{ProblemData, Vehicle};
///
/// let distances = DistanceMatrix::from_rows(vec![
///     vec![0, 3, 3, 3],
///     vec![3, 0, 3, 3],
///     vec![3, 3, 0, 3],
///     vec![3, 3, 3, 0],
/// ]).unwrap();
/// let problem = ProblemData::new(Vehicle::new(30).unwrap(), vec![0, 4, 4, 6], distances).unwrap();
///
/// assert_eq!(problem.num_locations(), 4);
/// assert_eq!(problem.num_vehicles(), 3);
/// assert_eq!(problem.vehicle_start(0), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemData {
    vehicle: Vehicle,
    depot: usize,
    demands: Vec<i64>,
    distances: DistanceMatrix,
    time_windows: Option<Vec<TimeWindow>>,
    starts: Option<Vec<usize>>,
    ends: Option<Vec<usize>>,
}

impl ProblemData {
    /// Creates a problem with the depot at location 0.
    ///
    /// Fails if the matrix size differs from the number of demands, if there
    /// are no locations, or if any demand is negative.
    pub fn new(
        vehicle: Vehicle,
        demands: Vec<i64>,
        distances: DistanceMatrix,
    ) -> Result<Self, RoutingError> {
        if distances.size() != demands.len() {
            return Err(ShapeError::MatrixDemandMismatch {
                matrix: distances.size(),
                demands: demands.len(),
            }
            .into());
        }
        check_demands(&demands)?;
        let problem = Self {
            vehicle,
            depot: 0,
            demands,
            distances,
            time_windows: None,
            starts: None,
            ends: None,
        };
        problem.check_index(0)?;
        Ok(problem)
    }

    /// Moves the depot to another location.
    pub fn with_depot(mut self, depot: usize) -> Result<Self, RoutingError> {
        self.check_index(depot)?;
        self.depot = depot;
        Ok(self)
    }

    /// Attaches one `(earliest, latest)` window per location.
    pub fn with_time_windows(mut self, windows: Vec<(i64, i64)>) -> Result<Self, RoutingError> {
        if windows.len() != self.num_locations() {
            return Err(ShapeError::TimeWindowCount {
                expected: self.num_locations(),
                actual: windows.len(),
            }
            .into());
        }
        let windows = windows
            .into_iter()
            .enumerate()
            .map(|(location, (earliest, latest))| {
                TimeWindow::new(earliest, latest).ok_or(ShapeError::InvertedTimeWindow {
                    location,
                    earliest,
                    latest,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.time_windows = Some(windows);
        Ok(self)
    }

    /// Attaches explicit start and end locations, one pair per vehicle slot.
    pub fn with_vehicle_endpoints(
        mut self,
        starts: Vec<usize>,
        ends: Vec<usize>,
    ) -> Result<Self, RoutingError> {
        let expected = self.num_vehicles();
        if starts.len() != expected || ends.len() != expected {
            return Err(ShapeError::VehicleEndpointCount {
                expected,
                starts: starts.len(),
                ends: ends.len(),
            }
            .into());
        }
        for &index in starts.iter().chain(ends.iter()) {
            self.check_index(index)?;
        }
        self.starts = Some(starts);
        self.ends = Some(ends);
        Ok(self)
    }

    /// Returns a new snapshot sharing everything but the demand vector.
    pub fn with_demands(&self, demands: Vec<i64>) -> Result<Self, RoutingError> {
        if demands.len() != self.num_locations() {
            return Err(ShapeError::MatrixDemandMismatch {
                matrix: self.num_locations(),
                demands: demands.len(),
            }
            .into());
        }
        check_demands(&demands)?;
        Ok(Self {
            demands,
            ..self.clone()
        })
    }

    /// The shared vehicle definition.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Shortcut for `vehicle().capacity()`.
    pub fn capacity(&self) -> i64 {
        self.vehicle.capacity()
    }

    /// Depot location index.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Demand per location.
    pub fn demands(&self) -> &[i64] {
        &self.demands
    }

    /// Demand at one location.
    pub fn demand(&self, location: usize) -> i64 {
        self.demands[location]
    }

    /// The travel-time/distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Travel distance from `from` to `to`.
    pub fn distance(&self, from: usize, to: usize) -> i64 {
        self.distances.get(from, to)
    }

    /// Time windows, if any were attached.
    pub fn time_windows(&self) -> Option<&[TimeWindow]> {
        self.time_windows.as_deref()
    }

    /// Number of locations, depot included.
    pub fn num_locations(&self) -> usize {
        self.demands.len()
    }

    /// Number of vehicle slots (`num_locations - 1`).
    pub fn num_vehicles(&self) -> usize {
        self.num_locations().saturating_sub(1)
    }

    /// Returns `true` if explicit start/end locations were attached.
    pub fn has_vehicle_endpoints(&self) -> bool {
        self.starts.is_some()
    }

    /// Start location of a vehicle slot (the depot by default).
    pub fn vehicle_start(&self, vehicle: usize) -> usize {
        self.starts.as_ref().map_or(self.depot, |s| s[vehicle])
    }

    /// End location of a vehicle slot (the depot by default).
    pub fn vehicle_end(&self, vehicle: usize) -> usize {
        self.ends.as_ref().map_or(self.depot, |e| e[vehicle])
    }

    fn check_index(&self, index: usize) -> Result<(), ShapeError> {
        if index >= self.num_locations() {
            return Err(ShapeError::LocationOutOfRange {
                index,
                num_locations: self.num_locations(),
            });
        }
        Ok(())
    }
}

fn check_demands(demands: &[i64]) -> Result<(), ConfigurationError> {
    match demands.iter().position(|&d| d < 0) {
        Some(location) => Err(ConfigurationError::NegativeDemand {
            location,
            demand: demands[location],
        }),
        None => Ok(()),
    }
}

/// Plain input shape handed over by an external data loader.
///
/// Deserializes from any serde format; converting it into [`ProblemData`]
/// runs every shape and configuration check.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{ProblemData, ProblemInput};
///
/// let input = ProblemInput {
///     capacity: 30,
///     demands: vec![0, 4, 4, 6],
///     distances: vec![
///         vec![0, 3, 3, 3],
///         vec![3, 0, 3, 3],
///         vec![3, 3, 0, 3],
///         vec![3, 3, 3, 0],
///     ],
///     depot: None,
///     time_windows: None,
///     starts: None,
///     ends: None,
/// };
/// let problem = ProblemData::try_from(input).unwrap();
/// assert_eq!(problem.capacity(), 30);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemInput {
    pub capacity: i64,
    pub demands: Vec<i64>,
    pub distances: Vec<Vec<i64>>,
    #[serde(default)]
    pub depot: Option<usize>,
    #[serde(default)]
    pub time_windows: Option<Vec<(i64, i64)>>,
    #[serde(default)]
    pub starts: Option<Vec<usize>>,
    #[serde(default)]
    pub ends: Option<Vec<usize>>,
}

impl TryFrom<ProblemInput> for ProblemData {
    type Error = RoutingError;

    fn try_from(input: ProblemInput) -> Result<Self, Self::Error> {
        let vehicle = Vehicle::new(input.capacity)?;
        let distances = DistanceMatrix::from_rows(input.distances)?;
        let mut problem = ProblemData::new(vehicle, input.demands, distances)?;
        if let Some(depot) = input.depot {
            problem = problem.with_depot(depot)?;
        }
        if let Some(windows) = input.time_windows {
            problem = problem.with_time_windows(windows)?;
        }
        match (input.starts, input.ends) {
            (None, None) => {}
            (starts, ends) => {
                let depot = problem.depot();
                let slots = problem.num_vehicles();
                problem = problem.with_vehicle_endpoints(
                    starts.unwrap_or_else(|| vec![depot; slots]),
                    ends.unwrap_or_else(|| vec![depot; slots]),
                )?;
            }
        }
        Ok(problem)
    }
}

//! Error taxonomy for problem construction and route building.

use thiserror::Error;

use crate::models::Solution;

/// Invalid solver or problem parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("vehicle capacity must be positive, got {capacity}")]
    NonPositiveCapacity { capacity: i64 },

    #[error(
        "location {location} cannot be served: round trip from the depot costs {overhead}, \
         vehicle capacity is {capacity}"
    )]
    UnservableLocation {
        location: usize,
        overhead: i64,
        capacity: i64,
    },

    #[error("demand at location {location} is negative ({demand})")]
    NegativeDemand { location: usize, demand: i64 },

    #[error("distance from {from} to {to} is negative ({distance})")]
    NegativeDistance { from: usize, to: usize, distance: i64 },

    #[error("dimension {name:?} is already registered")]
    DuplicateDimension { name: String },

    #[error("dimension {name:?} is not registered")]
    UnknownDimension { name: String },

    #[error("dimension {name:?} has negative slack or capacity")]
    NegativeDimensionBound { name: String },

    #[error("constraint profile requires time windows but the problem has none")]
    MissingTimeWindows,

    #[error("constraint profile requires per-vehicle start/end locations but the problem has none")]
    MissingVehicleEndpoints,
}

/// Inconsistent input dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("distance matrix row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("distance matrix covers {matrix} locations but {demands} demands were given")]
    MatrixDemandMismatch { matrix: usize, demands: usize },

    #[error("expected {expected} time windows, got {actual}")]
    TimeWindowCount { expected: usize, actual: usize },

    #[error("time window at location {location} opens at {earliest} after it closes at {latest}")]
    InvertedTimeWindow {
        location: usize,
        earliest: i64,
        latest: i64,
    },

    #[error("location index {index} is out of range for {num_locations} locations")]
    LocationOutOfRange { index: usize, num_locations: usize },

    #[error("expected {expected} vehicle start/end locations, got {starts} starts and {ends} ends")]
    VehicleEndpointCount {
        expected: usize,
        starts: usize,
        ends: usize,
    },
}

/// Route construction finished with locations or vehicles left over.
///
/// Carries the routes that were built so callers can inspect the partial plan.
#[derive(Debug, Clone, Error)]
#[error(
    "no feasible solution: unreachable locations {:?}{}",
    .unreachable,
    stranded_note(.stranded_vehicles)
)]
pub struct InfeasibleRoutes {
    /// Locations no vehicle slot could reach.
    pub unreachable: Vec<usize>,
    /// Vehicle slots whose start or empty route already violates a dimension.
    pub stranded_vehicles: Vec<usize>,
    /// Vehicles consumed by demand splitting before route construction.
    pub pre_split_vehicles: usize,
    /// Routes built before the slots ran out.
    pub partial: Solution,
}

fn stranded_note(vehicles: &[usize]) -> String {
    if vehicles.is_empty() {
        String::new()
    } else {
        format!(", stranded vehicles {vehicles:?}")
    }
}

/// Top-level error returned by the routing pipeline.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Infeasible(Box<InfeasibleRoutes>),
}

impl From<InfeasibleRoutes> for RoutingError {
    fn from(value: InfeasibleRoutes) -> Self {
        RoutingError::Infeasible(Box::new(value))
    }
}

impl RoutingError {
    /// Returns the infeasibility report, if this is one.
    pub fn as_infeasible(&self) -> Option<&InfeasibleRoutes> {
        match self {
            RoutingError::Infeasible(report) => Some(report),
            _ => None,
        }
    }
}

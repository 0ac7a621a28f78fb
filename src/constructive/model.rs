//! Routing model: vehicle endpoints, arc cost, and dimension constraints.

use crate::dimension::DimensionSet;
use crate::error::{RoutingError, ShapeError};
use crate::evaluation::EvaluatorKind;
use crate::models::ProblemData;

/// Everything the route builder needs besides the evaluators.
///
/// # Examples
///
/// ```
/// use u_dispatch::constructive::RoutingModel;
/// use u_dispatch::dimension::{DimensionSet, SlackPreset};
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::evaluation::EvaluatorKind;
/// use u_dispatch::models::{ProblemData, Vehicle};
///
/// let dm = DistanceMatrix::from_rows(vec![vec![0, 3], vec![3, 0]]).unwrap();
/// let problem = ProblemData::new(Vehicle::new(30).unwrap(), vec![0, 4], dm).unwrap();
///
/// let mut dims = DimensionSet::new();
/// dims.register_preset("Capacity", EvaluatorKind::Time, SlackPreset::Strict, 30, true).unwrap();
/// let model = RoutingModel::new(&problem, EvaluatorKind::Time, dims).unwrap();
///
/// assert_eq!(model.num_vehicles(), 1);
/// assert_eq!(model.start(0), 0);
/// ```
#[derive(Debug, Clone)]
pub struct RoutingModel {
    num_locations: usize,
    depot: usize,
    starts: Vec<usize>,
    ends: Vec<usize>,
    arc_cost: EvaluatorKind,
    dimensions: DimensionSet,
}

impl RoutingModel {
    /// Creates a model where every vehicle slot starts and ends at the depot.
    ///
    /// Fails if a dimension's ranges do not cover every location.
    pub fn new(
        problem: &ProblemData,
        arc_cost: EvaluatorKind,
        dimensions: DimensionSet,
    ) -> Result<Self, RoutingError> {
        let num_locations = problem.num_locations();
        for dimension in dimensions.iter() {
            if let Some(ranges) = dimension.ranges() {
                if ranges.len() != num_locations {
                    return Err(ShapeError::TimeWindowCount {
                        expected: num_locations,
                        actual: ranges.len(),
                    }
                    .into());
                }
            }
        }
        let depot = problem.depot();
        Ok(Self {
            num_locations,
            depot,
            starts: vec![depot; problem.num_vehicles()],
            ends: vec![depot; problem.num_vehicles()],
            arc_cost,
            dimensions,
        })
    }

    /// Takes the per-vehicle start and end locations from the problem.
    pub fn with_problem_endpoints(mut self, problem: &ProblemData) -> Self {
        let slots = 0..problem.num_vehicles();
        self.starts = slots.clone().map(|v| problem.vehicle_start(v)).collect();
        self.ends = slots.map(|v| problem.vehicle_end(v)).collect();
        self
    }

    /// Number of locations, depot included.
    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    /// Depot location index.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Number of vehicle slots.
    pub fn num_vehicles(&self) -> usize {
        self.starts.len()
    }

    /// Start location of a vehicle slot.
    pub fn start(&self, vehicle: usize) -> usize {
        self.starts[vehicle]
    }

    /// End location of a vehicle slot.
    pub fn end(&self, vehicle: usize) -> usize {
        self.ends[vehicle]
    }

    /// Returns `true` if some vehicle starts or ends at `location`.
    pub fn is_endpoint(&self, location: usize) -> bool {
        self.starts.contains(&location) || self.ends.contains(&location)
    }

    /// Evaluator used as the arc cost.
    pub fn arc_cost(&self) -> EvaluatorKind {
        self.arc_cost
    }

    /// The registered dimensions.
    pub fn dimensions(&self) -> &DimensionSet {
        &self.dimensions
    }
}

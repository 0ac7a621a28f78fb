//! End-to-end planning: split demands, build the model, construct routes.

use serde::Serialize;
use tracing::info;

use crate::config::SolverConfig;
use crate::constructive::CheapestArcBuilder;
use crate::error::RoutingError;
use crate::evaluation::EvaluatorSet;
use crate::formulator::{split_demands, Dispatch};
use crate::models::{ProblemData, Solution};

/// Outcome of a planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Dedicated trips produced by demand splitting.
    pub dispatches: Vec<Dispatch>,
    /// Number of vehicles consumed by those trips.
    pub required_vehicles: usize,
    /// Demands the route builder worked on.
    pub residual_demands: Vec<i64>,
    /// Routes built over the residual demands, one per vehicle slot.
    pub solution: Solution,
}

impl Plan {
    /// Split-off vehicles plus every route that ends with a positive cumul.
    pub fn total_vehicles(&self) -> usize {
        self.required_vehicles + self.solution.num_used()
    }
}

/// Runs the full pipeline on `problem`.
///
/// Over-capacity demands are split off first; the route builder then works
/// on a fresh snapshot carrying the residual demands, so the caller's
/// problem is never modified.
///
/// # Errors
///
/// Configuration and shape errors are returned before any route is built.
/// [`RoutingError::Infeasible`] carries the partial solution together with
/// the number of split-off vehicles.
///
/// # Examples
///
/// ```
/// use u_dispatch::config::SolverConfig;
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::models::{ProblemData, Vehicle};
/// use u_dispatch::planner::plan;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0, 3, 3, 3],
///     vec![3, 0, 3, 3],
///     vec![3, 3, 0, 3],
///     vec![3, 3, 3, 0],
/// ]).unwrap();
/// let problem = ProblemData::new(Vehicle::new(30).unwrap(), vec![0, 4, 4, 6], dm).unwrap();
///
/// let plan = plan(&problem, &SolverConfig::capacity_only()).unwrap();
/// assert_eq!(plan.total_vehicles(), 1);
/// assert_eq!(plan.solution.routes()[0].locations(), vec![0, 1, 2, 3, 0]);
/// ```
pub fn plan(problem: &ProblemData, config: &SolverConfig) -> Result<Plan, RoutingError> {
    let outcome = split_demands(problem)?;
    let residual = problem.with_demands(outcome.residual_demands.clone())?;

    let evaluators = EvaluatorSet::new(&residual);
    let model = config.build_model(&residual)?;
    let solution = CheapestArcBuilder::new(&evaluators, &model)
        .build()
        .map_err(|err| match err {
            RoutingError::Infeasible(mut report) => {
                report.pre_split_vehicles = outcome.required_vehicles;
                RoutingError::Infeasible(report)
            }
            other => other,
        })?;

    let plan = Plan {
        dispatches: outcome.dispatches,
        required_vehicles: outcome.required_vehicles,
        residual_demands: outcome.residual_demands,
        solution,
    };
    info!(
        profile = ?config.profile(),
        required = plan.required_vehicles,
        total = plan.total_vehicles(),
        "plan complete"
    );
    Ok(plan)
}

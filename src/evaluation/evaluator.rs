//! Arc evaluators over a problem snapshot.
//!
//! Each evaluator maps a `(from, to)` pair of location indices to an integer
//! value. Dimensions accumulate these values along a route, and the route
//! builder uses one of them as its arc cost.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::models::ProblemData;

/// A transit function between two locations.
pub trait Evaluator: Send + Sync {
    /// Value of travelling from `from` to `to`.
    fn evaluate(&self, from: usize, to: usize) -> i64;
}

/// Selects one evaluator of an [`EvaluatorSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    /// Raw matrix lookup.
    Distance,
    /// Demand at the origin.
    Demand,
    /// Service time at the origin plus travel time.
    Time,
}

/// Plain matrix lookup.
#[derive(Debug, Clone)]
pub struct DistanceEvaluator {
    distances: DistanceMatrix,
}

impl DistanceEvaluator {
    /// Creates the evaluator from the snapshot's matrix.
    pub fn new(problem: &ProblemData) -> Self {
        Self {
            distances: problem.distances().clone(),
        }
    }
}

impl Evaluator for DistanceEvaluator {
    fn evaluate(&self, from: usize, to: usize) -> i64 {
        self.distances.get(from, to)
    }
}

/// Demand at the origin; the destination is ignored.
#[derive(Debug, Clone)]
pub struct DemandEvaluator {
    demands: Vec<i64>,
}

impl DemandEvaluator {
    /// Creates the evaluator from the snapshot's demands.
    pub fn new(problem: &ProblemData) -> Self {
        Self {
            demands: problem.demands().to_vec(),
        }
    }
}

impl Evaluator for DemandEvaluator {
    fn evaluate(&self, from: usize, _to: usize) -> i64 {
        self.demands[from]
    }
}

/// Combined time: the origin's demand acts as its service time, plus the
/// travel time of the arc. Staying in place costs nothing.
///
/// The full table is computed once so that lookups are O(1).
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::evaluation::{Evaluator, TimeEvaluator};
/// use u_dispatch::models::{ProblemData, Vehicle};
///
/// let dm = DistanceMatrix::from_rows(vec![vec![0, 3], vec![3, 0]]).unwrap();
/// let problem = ProblemData::new(Vehicle::new(30).unwrap(), vec![0, 4], dm).unwrap();
/// let time = TimeEvaluator::new(&problem);
///
/// assert_eq!(time.evaluate(0, 1), 3);
/// assert_eq!(time.evaluate(1, 0), 7);
/// assert_eq!(time.evaluate(1, 1), 0);
/// ```
#[derive(Debug, Clone)]
pub struct TimeEvaluator {
    total_time: DistanceMatrix,
}

impl TimeEvaluator {
    /// Precomputes the service-plus-travel table.
    pub fn new(problem: &ProblemData) -> Self {
        let n = problem.num_locations();
        let mut total_time = DistanceMatrix::new(n);
        for from in 0..n {
            for to in 0..n {
                if from != to {
                    let time = problem.demand(from).saturating_add(problem.distance(from, to));
                    total_time.set(from, to, time);
                }
            }
        }
        Self { total_time }
    }
}

impl Evaluator for TimeEvaluator {
    fn evaluate(&self, from: usize, to: usize) -> i64 {
        self.total_time.get(from, to)
    }
}

/// The three evaluators built once per problem snapshot.
#[derive(Debug, Clone)]
pub struct EvaluatorSet {
    distance: DistanceEvaluator,
    demand: DemandEvaluator,
    time: TimeEvaluator,
}

impl EvaluatorSet {
    /// Builds every evaluator for the given snapshot.
    pub fn new(problem: &ProblemData) -> Self {
        Self {
            distance: DistanceEvaluator::new(problem),
            demand: DemandEvaluator::new(problem),
            time: TimeEvaluator::new(problem),
        }
    }

    /// Returns the evaluator of the given kind.
    pub fn get(&self, kind: EvaluatorKind) -> &dyn Evaluator {
        match kind {
            EvaluatorKind::Distance => &self.distance,
            EvaluatorKind::Demand => &self.demand,
            EvaluatorKind::Time => &self.time,
        }
    }

    /// Shortcut for `get(kind).evaluate(from, to)`.
    pub fn evaluate(&self, kind: EvaluatorKind, from: usize, to: usize) -> i64 {
        self.get(kind).evaluate(from, to)
    }
}

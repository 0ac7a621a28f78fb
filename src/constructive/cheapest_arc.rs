//! Path-cheapest-arc constructive heuristic with dimension constraints.
//!
//! # Algorithm
//!
//! Vehicle slots are filled one after another. Starting from its start
//! location, a vehicle repeatedly moves to the unvisited location with the
//! cheapest arc among those that keep every dimension feasible, both at the
//! candidate itself and on the way back to the vehicle's end location. Ties
//! go to the lowest location index. When no candidate is feasible the route
//! closes at the end location and the remaining locations are left to the
//! next slot.
//!
//! Each dimension carries the interval of cumuls still feasible at every
//! step. Once a route is closed, concrete cumuls are fixed backwards from the
//! smallest feasible value at the end.
//!
//! # Complexity
//!
//! O(v · n² · d) for v vehicle slots, n locations and d dimensions.

use tracing::{debug, info, warn};

use super::RoutingModel;
use crate::dimension::CumulRange;
use crate::error::{InfeasibleRoutes, RoutingError};
use crate::evaluation::EvaluatorSet;
use crate::models::{Route, RouteStep, Solution};

/// Construction state of one vehicle slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleState {
    /// Start location not placed yet.
    NotStarted,
    /// Extending the route by cheapest feasible arcs.
    Building,
    /// No further extension; the route is closed at its end location.
    Complete,
}

/// Locations placed so far and the feasible cumul interval of each
/// dimension at every one of them.
#[derive(Debug, Default)]
struct Trail {
    locations: Vec<usize>,
    ranges: Vec<Vec<CumulRange>>,
}

impl Trail {
    fn push(&mut self, location: usize, ranges: Vec<CumulRange>) {
        self.locations.push(location);
        self.ranges.push(ranges);
    }

    fn last(&self) -> (usize, &[CumulRange]) {
        let i = self.locations.len() - 1;
        (self.locations[i], &self.ranges[i])
    }
}

/// Builds one route per vehicle slot with the cheapest-arc policy.
///
/// # Examples
///
/// ```
/// use u_dispatch::constructive::{CheapestArcBuilder, RoutingModel};
/// use u_dispatch::dimension::{DimensionSet, SlackPreset};
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::evaluation::{EvaluatorKind, EvaluatorSet};
/// use u_dispatch::models::{ProblemData, Vehicle};
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0, 3, 3, 3],
///     vec![3, 0, 3, 3],
///     vec![3, 3, 0, 3],
///     vec![3, 3, 3, 0],
/// ]).unwrap();
/// let problem = ProblemData::new(Vehicle::new(30).unwrap(), vec![0, 4, 4, 6], dm).unwrap();
/// let evaluators = EvaluatorSet::new(&problem);
///
/// let mut dims = DimensionSet::new();
/// dims.register_preset("Capacity", EvaluatorKind::Time, SlackPreset::Strict, 30, true).unwrap();
/// let model = RoutingModel::new(&problem, EvaluatorKind::Time, dims).unwrap();
///
/// let solution = CheapestArcBuilder::new(&evaluators, &model).build().unwrap();
/// assert_eq!(solution.routes()[0].locations(), vec![0, 1, 2, 3, 0]);
/// assert_eq!(solution.num_used(), 1);
/// ```
pub struct CheapestArcBuilder<'a> {
    evaluators: &'a EvaluatorSet,
    model: &'a RoutingModel,
}

impl<'a> CheapestArcBuilder<'a> {
    /// Creates a builder over prepared evaluators and model.
    pub fn new(evaluators: &'a EvaluatorSet, model: &'a RoutingModel) -> Self {
        Self { evaluators, model }
    }

    /// Builds routes for every vehicle slot in index order.
    ///
    /// Returns [`RoutingError::Infeasible`] with the partial solution when a
    /// location stays unvisited after the last slot, or when a slot cannot
    /// even start.
    pub fn build(&self) -> Result<Solution, RoutingError> {
        let n = self.model.num_locations();
        let mut visited = vec![false; n];
        if n > 0 {
            visited[self.model.depot()] = true;
        }
        for (location, seen) in visited.iter_mut().enumerate() {
            if self.model.is_endpoint(location) {
                *seen = true;
            }
        }

        let mut solution = Solution::new(self.model.dimensions().names());
        let mut stranded_vehicles = Vec::new();
        for vehicle in 0..self.model.num_vehicles() {
            match self.build_route(vehicle, &mut visited) {
                Some(route) => {
                    debug!(
                        vehicle,
                        stops = route.stops().len(),
                        cumul = route.final_cumul(),
                        "route closed"
                    );
                    solution.add_route(route);
                }
                None => {
                    debug!(vehicle, "vehicle cannot start");
                    stranded_vehicles.push(vehicle);
                }
            }
        }

        // Endpoints of stranded vehicles were reserved but never reached.
        let mut covered = vec![false; n];
        if n > 0 {
            covered[self.model.depot()] = true;
        }
        for step in solution.routes().iter().flat_map(Route::steps) {
            covered[step.location] = true;
        }
        let unreachable: Vec<usize> = (0..n).filter(|&l| !covered[l]).collect();
        for &location in &unreachable {
            solution.add_unassigned(location);
        }

        if !unreachable.is_empty() || !stranded_vehicles.is_empty() {
            warn!(?unreachable, ?stranded_vehicles, "no feasible solution");
            return Err(InfeasibleRoutes {
                unreachable,
                stranded_vehicles,
                pre_split_vehicles: 0,
                partial: solution,
            }
            .into());
        }

        info!(
            routes = solution.num_used(),
            cost = solution.total_cost(),
            "routes built"
        );
        Ok(solution)
    }

    fn build_route(&self, vehicle: usize, visited: &mut [bool]) -> Option<Route> {
        let start = self.model.start(vehicle);
        let end = self.model.end(vehicle);
        let mut trail = Trail::default();
        let mut state = VehicleState::NotStarted;

        loop {
            state = match state {
                VehicleState::NotStarted => {
                    trail.push(start, self.start_ranges(start)?);
                    VehicleState::Building
                }
                VehicleState::Building => {
                    let (current, ranges) = trail.last();
                    match self.cheapest_candidate(current, ranges, end, visited) {
                        Some((next, next_ranges)) => {
                            visited[next] = true;
                            trail.push(next, next_ranges);
                            VehicleState::Building
                        }
                        None => VehicleState::Complete,
                    }
                }
                VehicleState::Complete => break,
            };
        }

        let (current, ranges) = trail.last();
        let end_ranges = self.extend_all(current, ranges, end)?;
        trail.push(end, end_ranges);
        Some(self.settle(vehicle, &trail))
    }

    fn cheapest_candidate(
        &self,
        current: usize,
        ranges: &[CumulRange],
        end: usize,
        visited: &[bool],
    ) -> Option<(usize, Vec<CumulRange>)> {
        let mut best: Option<(usize, i64, Vec<CumulRange>)> = None;

        for candidate in 0..self.model.num_locations() {
            if visited[candidate] {
                continue;
            }
            let Some(next_ranges) = self.extend_all(current, ranges, candidate) else {
                continue;
            };
            // The vehicle must still be able to get back to its end.
            if self.extend_all(candidate, &next_ranges, end).is_none() {
                continue;
            }
            let cost = self
                .evaluators
                .evaluate(self.model.arc_cost(), current, candidate);
            if best.as_ref().is_none_or(|&(_, best_cost, _)| cost < best_cost) {
                best = Some((candidate, cost, next_ranges));
            }
        }

        best.map(|(candidate, _, next_ranges)| (candidate, next_ranges))
    }

    fn start_ranges(&self, start: usize) -> Option<Vec<CumulRange>> {
        self.model
            .dimensions()
            .iter()
            .map(|dimension| dimension.start_range(start))
            .collect()
    }

    fn extend_all(&self, from: usize, ranges: &[CumulRange], to: usize) -> Option<Vec<CumulRange>> {
        self.model
            .dimensions()
            .iter()
            .zip(ranges)
            .map(|(dimension, &range)| {
                let transit = self.evaluators.evaluate(dimension.evaluator(), from, to);
                dimension.extend(range, transit, to)
            })
            .collect()
    }

    fn settle(&self, vehicle: usize, trail: &Trail) -> Route {
        let len = trail.locations.len();
        let mut cumuls = vec![Vec::with_capacity(self.model.dimensions().len()); len];

        for (d, dimension) in self.model.dimensions().iter().enumerate() {
            let mut value = trail.ranges[len - 1][d].min();
            cumuls[len - 1].push(value);
            for i in (0..len - 1).rev() {
                let transit = self.evaluators.evaluate(
                    dimension.evaluator(),
                    trail.locations[i],
                    trail.locations[i + 1],
                );
                value = dimension.settle_back(trail.ranges[i][d], transit, value);
                cumuls[i].push(value);
            }
        }

        let cost = trail
            .locations
            .windows(2)
            .map(|arc| self.evaluators.evaluate(self.model.arc_cost(), arc[0], arc[1]))
            .fold(0i64, i64::saturating_add);

        let mut route = Route::new(vehicle);
        for (&location, cumuls) in trail.locations.iter().zip(cumuls) {
            route.push_step(RouteStep { location, cumuls });
        }
        route.set_cost(cost);
        route
    }
}

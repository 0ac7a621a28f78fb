//! Independent verification of a built solution against a routing model.

use crate::constructive::RoutingModel;
use crate::models::{Route, Solution, Violation, ViolationType};

use super::EvaluatorSet;

/// Re-checks every route of a solution: endpoints, cumul bounds, windows,
/// start-at-zero, slack consistency along arcs, and that each location is
/// served exactly once or reported unassigned. Route endpoints and the depot
/// are exempt from coverage; the endpoint of a vehicle without a route is
/// not.
///
/// # Examples
///
/// ```
/// use u_dispatch::constructive::{CheapestArcBuilder, RoutingModel};
/// use u_dispatch::dimension::{DimensionSet, SlackPreset};
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::evaluation::{EvaluatorKind, EvaluatorSet, SolutionChecker};
/// use u_dispatch::models::{ProblemData, Vehicle};
///
/// let dm = DistanceMatrix::from_rows(vec![vec![0, 3, 3], vec![3, 0, 3], vec![3, 3, 0]]).unwrap();
/// let problem = ProblemData::new(Vehicle::new(20).unwrap(), vec![0, 4, 4], dm).unwrap();
/// let evaluators = EvaluatorSet::new(&problem);
/// let mut dims = DimensionSet::new();
/// dims.register_preset("Capacity", EvaluatorKind::Time, SlackPreset::Strict, 20, true).unwrap();
/// let model = RoutingModel::new(&problem, EvaluatorKind::Time, dims).unwrap();
///
/// let solution = CheapestArcBuilder::new(&evaluators, &model).build().unwrap();
/// assert!(SolutionChecker::new(&evaluators, &model).check(&solution).is_empty());
/// ```
pub struct SolutionChecker<'a> {
    evaluators: &'a EvaluatorSet,
    model: &'a RoutingModel,
}

impl<'a> SolutionChecker<'a> {
    /// Creates a checker for solutions built over `model`.
    pub fn new(evaluators: &'a EvaluatorSet, model: &'a RoutingModel) -> Self {
        Self { evaluators, model }
    }

    /// Returns every violation found; empty for a valid solution.
    pub fn check(&self, solution: &Solution) -> Vec<Violation> {
        let mut violations = Vec::new();
        for route in solution.routes() {
            self.check_endpoints(route, &mut violations);
            self.check_cumuls(route, &mut violations);
        }
        self.check_coverage(solution, &mut violations);
        violations
    }

    fn check_endpoints(&self, route: &Route, violations: &mut Vec<Violation>) {
        let vehicle_id = route.vehicle_id();
        let start = route.steps().first().map(|s| s.location);
        let end = route.steps().last().map(|s| s.location);
        let expected = vehicle_id < self.model.num_vehicles()
            && start == Some(self.model.start(vehicle_id))
            && end == Some(self.model.end(vehicle_id))
            && route.len() >= 2;
        if !expected {
            violations.push(Violation::new(ViolationType::EndpointMismatch {
                vehicle_id,
                start,
                end,
            }));
        }
    }

    fn check_cumuls(&self, route: &Route, violations: &mut Vec<Violation>) {
        let vehicle_id = route.vehicle_id();
        let steps = route.steps();

        for (d, dimension) in self.model.dimensions().iter().enumerate() {
            let dimension_name = || dimension.name().to_string();
            let cumul_at = |i: usize| steps[i].cumuls.get(d).copied().unwrap_or(0);

            if dimension.start_at_zero() && !steps.is_empty() && cumul_at(0) != 0 {
                violations.push(Violation::new(ViolationType::NonZeroStart {
                    vehicle_id,
                    dimension: dimension_name(),
                    cumul: cumul_at(0),
                }));
            }

            for (i, step) in steps.iter().enumerate() {
                let cumul = cumul_at(i);
                if cumul < 0 || cumul > dimension.capacity() {
                    violations.push(Violation::new(ViolationType::CumulOutOfBounds {
                        vehicle_id,
                        location: step.location,
                        dimension: dimension_name(),
                        cumul,
                        capacity: dimension.capacity(),
                    }));
                }
                if let Some(window) = dimension.ranges().and_then(|r| r.get(step.location)) {
                    if !window.contains(cumul) {
                        violations.push(Violation::new(ViolationType::TimeWindowViolated {
                            vehicle_id,
                            location: step.location,
                            dimension: dimension_name(),
                            cumul,
                            earliest: window.earliest(),
                            latest: window.latest(),
                        }));
                    }
                }
            }

            for i in 1..steps.len() {
                let (from, to) = (steps[i - 1].location, steps[i].location);
                let transit = self.evaluators.evaluate(dimension.evaluator(), from, to);
                let increase = cumul_at(i).saturating_sub(cumul_at(i - 1));
                if increase < transit || increase > transit.saturating_add(dimension.slack()) {
                    violations.push(Violation::new(ViolationType::TransitMismatch {
                        vehicle_id,
                        from,
                        to,
                        dimension: dimension_name(),
                        increase,
                        transit,
                    }));
                }
            }
        }
    }

    fn check_coverage(&self, solution: &Solution, violations: &mut Vec<Violation>) {
        let n = self.model.num_locations();
        let mut seen = vec![0usize; n];
        let served = solution
            .routes()
            .iter()
            .flat_map(|r| r.stops().iter().map(|s| s.location));
        for location in served.chain(solution.unassigned().iter().copied()) {
            if location < n {
                seen[location] += 1;
            }
        }

        // Only the depot and the endpoints of routes that exist are exempt.
        let mut anchored = vec![false; n];
        if n > 0 {
            anchored[self.model.depot()] = true;
        }
        for route in solution.routes() {
            let ends = route.steps().first().into_iter().chain(route.steps().last());
            for step in ends {
                if step.location < n {
                    anchored[step.location] = true;
                }
            }
        }

        for (location, &count) in seen.iter().enumerate() {
            let expected = usize::from(!anchored[location]);
            if count > expected {
                violations.push(Violation::new(ViolationType::DuplicateVisit { location }));
            } else if count < expected {
                violations.push(Violation::new(ViolationType::MissingVisit { location }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::CheapestArcBuilder;
    use crate::dimension::{DimensionSet, SlackPreset};
    use crate::distance::DistanceMatrix;
    use crate::evaluation::EvaluatorKind;
    use crate::models::{ProblemData, RouteStep, Vehicle};

    fn setup(windows: Option<Vec<(i64, i64)>>) -> (EvaluatorSet, RoutingModel) {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0, 3, 3, 3],
            vec![3, 0, 3, 3],
            vec![3, 3, 0, 3],
            vec![3, 3, 3, 0],
        ])
        .expect("valid");
        let mut p = ProblemData::new(Vehicle::new(30).expect("valid"), vec![0, 4, 4, 6], dm)
            .expect("valid");
        if let Some(windows) = windows {
            p = p.with_time_windows(windows).expect("valid");
        }
        let mut dims = DimensionSet::new();
        dims.register_preset("Capacity", EvaluatorKind::Time, SlackPreset::Strict, 30, true)
            .expect("valid");
        if let Some(windows) = p.time_windows() {
            dims.set_ranges("Capacity", windows).expect("registered");
        }
        let model = RoutingModel::new(&p, EvaluatorKind::Time, dims).expect("valid");
        (EvaluatorSet::new(&p), model)
    }

    fn route(vehicle_id: usize, steps: &[(usize, i64)]) -> Route {
        let mut r = Route::new(vehicle_id);
        for &(location, cumul) in steps {
            r.push_step(RouteStep {
                location,
                cumuls: vec![cumul],
            });
        }
        r
    }

    fn solution(routes: Vec<Route>) -> Solution {
        let mut sol = Solution::new(vec!["Capacity".to_string()]);
        for r in routes {
            sol.add_route(r);
        }
        sol
    }

    #[test]
    fn test_built_solution_is_clean() {
        let (evaluators, model) = setup(None);
        let sol = CheapestArcBuilder::new(&evaluators, &model)
            .build()
            .expect("feasible");
        assert!(SolutionChecker::new(&evaluators, &model).check(&sol).is_empty());
    }

    #[test]
    fn test_manual_valid_solution() {
        let (evaluators, model) = setup(None);
        let sol = solution(vec![
            route(0, &[(0, 0), (3, 3), (0, 12)]),
            route(1, &[(0, 0), (2, 3), (1, 10), (0, 17)]),
            route(2, &[(0, 0), (0, 0)]),
        ]);
        assert!(SolutionChecker::new(&evaluators, &model).check(&sol).is_empty());
    }

    #[test]
    fn test_capacity_exceeded() {
        let (evaluators, model) = setup(None);
        let sol = solution(vec![
            route(0, &[(0, 0), (1, 3), (2, 10), (3, 17), (0, 26)]),
            route(1, &[(0, 0), (0, 40)]),
            route(2, &[(0, 0), (0, 0)]),
        ]);
        let violations = SolutionChecker::new(&evaluators, &model).check(&sol);
        assert!(violations.iter().any(|v| matches!(
            v.kind,
            ViolationType::CumulOutOfBounds {
                vehicle_id: 1,
                cumul: 40,
                capacity: 30,
                ..
            }
        )));
        // Strict slack: 0 -> 0 must not increase the cumul.
        assert!(violations.iter().any(|v| matches!(
            v.kind,
            ViolationType::TransitMismatch { vehicle_id: 1, .. }
        )));
    }

    #[test]
    fn test_time_window_violated() {
        let (evaluators, model) = setup(Some(vec![(0, 30), (0, 30), (0, 5), (0, 30)]));
        let sol = solution(vec![
            route(0, &[(0, 0), (1, 3), (2, 10), (3, 17), (0, 26)]),
            route(1, &[(0, 0), (0, 0)]),
            route(2, &[(0, 0), (0, 0)]),
        ]);
        let violations = SolutionChecker::new(&evaluators, &model).check(&sol);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::TimeWindowViolated {
                location: 2,
                cumul: 10,
                earliest: 0,
                latest: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_non_zero_start_and_endpoints() {
        let (evaluators, model) = setup(None);
        let sol = solution(vec![
            route(0, &[(0, 1), (1, 4), (2, 11), (3, 18), (0, 27)]),
            route(1, &[(1, 0)]),
            route(2, &[(0, 0), (0, 0)]),
        ]);
        let violations = SolutionChecker::new(&evaluators, &model).check(&sol);
        assert!(violations.iter().any(|v| matches!(
            v.kind,
            ViolationType::NonZeroStart { vehicle_id: 0, cumul: 1, .. }
        )));
        assert!(violations.iter().any(|v| matches!(
            v.kind,
            ViolationType::EndpointMismatch {
                vehicle_id: 1,
                start: Some(1),
                end: Some(1)
            }
        )));
    }

    #[test]
    fn test_duplicate_and_missing() {
        let (evaluators, model) = setup(None);
        let mut sol = solution(vec![
            route(0, &[(0, 0), (1, 3), (0, 10)]),
            route(1, &[(0, 0), (1, 3), (0, 10)]),
            route(2, &[(0, 0), (0, 0)]),
        ]);
        sol.add_unassigned(3);
        let violations = SolutionChecker::new(&evaluators, &model).check(&sol);
        assert_eq!(
            violations.iter().map(|v| v.kind.clone()).collect::<Vec<_>>(),
            vec![
                ViolationType::DuplicateVisit { location: 1 },
                ViolationType::MissingVisit { location: 2 },
            ]
        );
    }

    #[test]
    fn test_stranded_start_must_be_unassigned() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0, 3, 3, 3],
            vec![3, 0, 3, 3],
            vec![3, 3, 0, 3],
            vec![3, 3, 3, 0],
        ])
        .expect("valid");
        let p = ProblemData::new(Vehicle::new(30).expect("valid"), vec![0, 4, 4, 6], dm)
            .expect("valid")
            .with_vehicle_endpoints(vec![2, 0, 0], vec![0, 0, 0])
            .expect("valid")
            .with_time_windows(vec![(0, 30), (0, 30), (5, 10), (0, 30)])
            .expect("valid");
        let mut dims = DimensionSet::new();
        dims.register_preset("Capacity", EvaluatorKind::Time, SlackPreset::Strict, 30, true)
            .expect("valid");
        dims.set_ranges("Capacity", p.time_windows().expect("has windows"))
            .expect("registered");
        let model = RoutingModel::new(&p, EvaluatorKind::Time, dims)
            .expect("valid")
            .with_problem_endpoints(&p);
        let evaluators = EvaluatorSet::new(&p);

        let err = CheapestArcBuilder::new(&evaluators, &model)
            .build()
            .unwrap_err();
        let partial = &err.as_infeasible().expect("infeasible").partial;
        let checker = SolutionChecker::new(&evaluators, &model);
        assert!(checker.check(partial).is_empty());

        // Same routes without the unassigned start location.
        let mut dropped = Solution::new(partial.dimension_names().to_vec());
        for r in partial.routes() {
            dropped.add_route(r.clone());
        }
        assert_eq!(
            checker
                .check(&dropped)
                .into_iter()
                .map(|v| v.kind)
                .collect::<Vec<_>>(),
            vec![ViolationType::MissingVisit { location: 2 }]
        );
    }
}

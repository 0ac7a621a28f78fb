//! Solution and violation types.

use serde::Serialize;

use super::Route;

/// A type of constraint violation in a route or solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// Cumulative value outside `[0, capacity]`.
    CumulOutOfBounds {
        /// Vehicle slot of the route.
        vehicle_id: usize,
        /// Location where the bound is broken.
        location: usize,
        /// Dimension name.
        dimension: String,
        /// Offending cumulative value.
        cumul: i64,
        /// Dimension capacity.
        capacity: i64,
    },
    /// Cumulative value outside the location's time window.
    TimeWindowViolated {
        /// Vehicle slot of the route.
        vehicle_id: usize,
        /// Location with the window.
        location: usize,
        /// Dimension name.
        dimension: String,
        /// Offending cumulative value.
        cumul: i64,
        /// Window start.
        earliest: i64,
        /// Window end.
        latest: i64,
    },
    /// A start-at-zero dimension starts elsewhere.
    NonZeroStart {
        /// Vehicle slot of the route.
        vehicle_id: usize,
        /// Dimension name.
        dimension: String,
        /// Cumulative value at the start.
        cumul: i64,
    },
    /// The cumul increase along an arc is not `transit + slack` for any
    /// admissible slack.
    TransitMismatch {
        /// Vehicle slot of the route.
        vehicle_id: usize,
        /// Arc origin.
        from: usize,
        /// Arc destination.
        to: usize,
        /// Dimension name.
        dimension: String,
        /// Observed cumul increase.
        increase: i64,
        /// Evaluator transit on the arc.
        transit: i64,
    },
    /// Route does not start or end where its vehicle slot must.
    EndpointMismatch {
        /// Vehicle slot of the route.
        vehicle_id: usize,
        /// First location of the route.
        start: Option<usize>,
        /// Last location of the route.
        end: Option<usize>,
    },
    /// Location served more than once (or served and reported unassigned).
    DuplicateVisit {
        /// Location index.
        location: usize,
    },
    /// Location neither served nor reported unassigned.
    MissingVisit {
        /// Location index.
        location: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Routes built for every vehicle slot plus any location left over.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Solution, Route};
///
/// let mut sol = Solution::new(vec!["Capacity".to_string()]);
/// sol.add_route(Route::new(0));
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.num_used(), 0);
/// assert_eq!(sol.dimension_index("Capacity"), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    dimension_names: Vec<String>,
    routes: Vec<Route>,
    unassigned: Vec<usize>,
    total_cost: i64,
}

impl Solution {
    /// Creates an empty solution tracking the given dimensions.
    pub fn new(dimension_names: Vec<String>) -> Self {
        Self {
            dimension_names,
            routes: Vec::new(),
            unassigned: Vec::new(),
            total_cost: 0,
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.total_cost = self.total_cost.saturating_add(route.cost());
        self.routes.push(route);
    }

    /// Marks a location as unassigned.
    pub fn add_unassigned(&mut self, location: usize) {
        self.unassigned.push(location);
    }

    /// Names of the dimensions whose cumuls each step records.
    pub fn dimension_names(&self) -> &[String] {
        &self.dimension_names
    }

    /// Position of a dimension inside every step's `cumuls`.
    pub fn dimension_index(&self, name: &str) -> Option<usize> {
        self.dimension_names.iter().position(|n| n == name)
    }

    /// Returns all routes, unused slots included.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns routes whose final primary cumul is positive.
    pub fn used_routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(|r| r.is_used())
    }

    /// Number of routes (vehicle slots that could start).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of routes that count as a vehicle.
    pub fn num_used(&self) -> usize {
        self.used_routes().count()
    }

    /// Locations no route could serve.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Returns the number of unassigned locations.
    pub fn num_unassigned(&self) -> usize {
        self.unassigned.len()
    }

    /// Total number of intermediate stops across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.stops().len()).sum()
    }

    /// Sum of route arc costs.
    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RouteStep;

    fn route(vehicle_id: usize, steps: &[(usize, i64)], cost: i64) -> Route {
        let mut r = Route::new(vehicle_id);
        for &(location, cumul) in steps {
            r.push_step(RouteStep {
                location,
                cumuls: vec![cumul],
            });
        }
        r.set_cost(cost);
        r
    }

    #[test]
    fn test_solution_empty() {
        let sol = Solution::new(vec![]);
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.num_unassigned(), 0);
        assert_eq!(sol.total_cost(), 0);
        assert_eq!(sol.num_served(), 0);
        assert_eq!(sol.dimension_index("Capacity"), None);
    }

    #[test]
    fn test_solution_with_routes() {
        let mut sol = Solution::new(vec!["Capacity".to_string()]);
        sol.add_route(route(0, &[(0, 0), (1, 3), (2, 10), (0, 17)], 17));
        sol.add_route(route(1, &[(0, 0), (3, 3), (0, 12)], 12));
        sol.add_route(route(2, &[(0, 0), (0, 0)], 0));
        sol.add_unassigned(4);

        assert_eq!(sol.num_routes(), 3);
        assert_eq!(sol.num_used(), 2);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.unassigned(), &[4]);
        assert_eq!(sol.total_cost(), 29);
    }

    #[test]
    fn test_violation_types() {
        let v = Violation::new(ViolationType::DuplicateVisit { location: 3 });
        assert_eq!(v.kind, ViolationType::DuplicateVisit { location: 3 });
    }
}

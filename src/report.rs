//! Plain-text rendering of a plan.

use std::fmt;

use crate::planner::Plan;

/// Console report of a [`Plan`].
///
/// Dedicated trips come first, numbered from 1. Built routes follow, but
/// only those ending with a positive primary cumul, numbered on from the
/// dedicated trips. The last line gives the total vehicle count.
///
/// # Examples
///
/// ```
/// use u_dispatch::config::SolverConfig;
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::models::{ProblemData, Vehicle};
/// use u_dispatch::planner::plan;
/// use u_dispatch::report::PlanReport;
///
/// let dm = DistanceMatrix::from_rows(vec![vec![0, 3], vec![3, 0]]).unwrap();
/// let problem = ProblemData::new(Vehicle::new(20).unwrap(), vec![0, 4], dm).unwrap();
/// let plan = plan(&problem, &SolverConfig::capacity_only()).unwrap();
///
/// let text = PlanReport::new(&plan).to_string();
/// assert!(text.contains("Route for vehicle 1:\n 0 Load(0) -> 1 Load(3) -> 0 Load(10)"));
/// assert!(text.ends_with("No Of Required Vehicles are 1\n"));
/// ```
pub struct PlanReport<'a> {
    plan: &'a Plan,
}

impl<'a> PlanReport<'a> {
    /// Wraps a plan for display.
    pub fn new(plan: &'a Plan) -> Self {
        Self { plan }
    }
}

impl fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dispatch in &self.plan.dispatches {
            writeln!(f, "Route for vehicle {}:", dispatch.vehicle_number)?;
            writeln!(f, "{dispatch}")?;
            writeln!(f)?;
        }

        let first = self.plan.required_vehicles + 1;
        for (number, route) in (first..).zip(self.plan.solution.used_routes()) {
            writeln!(f, "Route for vehicle {number}:")?;
            let steps = route.steps();
            if let Some((last, head)) = steps.split_last() {
                for step in head {
                    write!(f, " {} Load({}) ->", step.location, step.cumul())?;
                }
                writeln!(f, " {} Load({})", last.location, last.cumul())?;
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "No Of Required Vehicles are {}",
            self.plan.total_vehicles()
        )
    }
}

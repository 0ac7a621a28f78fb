//! Solver configuration: which constraints apply and how they are set up.

use serde::{Deserialize, Serialize};

use crate::constructive::RoutingModel;
use crate::dimension::{DimensionSet, SlackPreset};
use crate::error::{ConfigurationError, RoutingError};
use crate::evaluation::EvaluatorKind;
use crate::models::ProblemData;

/// Name of the primary dimension registered by [`SolverConfig::build_model`].
pub const CAPACITY_DIMENSION: &str = "Capacity";

/// Which constraints the route builder enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintProfile {
    /// Capacity only; every vehicle starts and ends at the depot.
    CapacityOnly,
    /// Capacity plus per-location windows on the same dimension.
    CapacityWithTimeWindows,
    /// Capacity with per-vehicle start and end locations.
    CustomStartEnd,
}

/// Configuration for a planning run.
///
/// # Examples
///
/// ```
/// use u_dispatch::config::{ConstraintProfile, SolverConfig};
/// use u_dispatch::dimension::SlackPreset;
///
/// let config = SolverConfig::with_time_windows();
/// assert_eq!(config.profile(), ConstraintProfile::CapacityWithTimeWindows);
/// assert_eq!(config.slack(), SlackPreset::FullCapacity);
///
/// let strict = config.with_slack(SlackPreset::Strict);
/// assert_eq!(strict.slack(), SlackPreset::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    profile: ConstraintProfile,
    slack: SlackPreset,
    capacity_evaluator: EvaluatorKind,
    arc_cost: EvaluatorKind,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::capacity_only()
    }
}

impl SolverConfig {
    fn from_profile(profile: ConstraintProfile, slack: SlackPreset) -> Self {
        Self {
            profile,
            slack,
            capacity_evaluator: EvaluatorKind::Time,
            arc_cost: EvaluatorKind::Time,
        }
    }

    /// Capacity only, no slack.
    pub fn capacity_only() -> Self {
        Self::from_profile(ConstraintProfile::CapacityOnly, SlackPreset::Strict)
    }

    /// Capacity with time windows; slack equals the capacity so vehicles
    /// may wait for a window to open.
    pub fn with_time_windows() -> Self {
        Self::from_profile(
            ConstraintProfile::CapacityWithTimeWindows,
            SlackPreset::FullCapacity,
        )
    }

    /// Capacity with per-vehicle start and end locations, no slack.
    pub fn custom_start_end() -> Self {
        Self::from_profile(ConstraintProfile::CustomStartEnd, SlackPreset::Strict)
    }

    /// Overrides the slack preset.
    pub fn with_slack(mut self, slack: SlackPreset) -> Self {
        self.slack = slack;
        self
    }

    /// Sets the evaluator accumulated by the capacity dimension.
    pub fn with_capacity_evaluator(mut self, kind: EvaluatorKind) -> Self {
        self.capacity_evaluator = kind;
        self
    }

    /// Sets the evaluator used as arc cost.
    pub fn with_arc_cost(mut self, kind: EvaluatorKind) -> Self {
        self.arc_cost = kind;
        self
    }

    /// Constraint profile.
    pub fn profile(&self) -> ConstraintProfile {
        self.profile
    }

    /// Slack preset of the capacity dimension.
    pub fn slack(&self) -> SlackPreset {
        self.slack
    }

    /// Evaluator accumulated by the capacity dimension.
    pub fn capacity_evaluator(&self) -> EvaluatorKind {
        self.capacity_evaluator
    }

    /// Evaluator used as arc cost.
    pub fn arc_cost(&self) -> EvaluatorKind {
        self.arc_cost
    }

    /// Builds the routing model for `problem` under this configuration.
    ///
    /// The capacity dimension starts at zero and is bounded by the vehicle
    /// capacity. Time windows and vehicle endpoints carried by `problem` are
    /// always applied; the profile only decides which of them must be
    /// present.
    pub fn build_model(&self, problem: &ProblemData) -> Result<RoutingModel, RoutingError> {
        match self.profile {
            ConstraintProfile::CapacityOnly => {}
            ConstraintProfile::CapacityWithTimeWindows => {
                if problem.time_windows().is_none() {
                    return Err(ConfigurationError::MissingTimeWindows.into());
                }
            }
            ConstraintProfile::CustomStartEnd => {
                if !problem.has_vehicle_endpoints() {
                    return Err(ConfigurationError::MissingVehicleEndpoints.into());
                }
            }
        }

        let mut dimensions = DimensionSet::new();
        dimensions.register_preset(
            CAPACITY_DIMENSION,
            self.capacity_evaluator,
            self.slack,
            problem.capacity(),
            true,
        )?;
        if let Some(windows) = problem.time_windows() {
            dimensions.set_ranges(CAPACITY_DIMENSION, windows)?;
        }

        let model = RoutingModel::new(problem, self.arc_cost, dimensions)?;
        if problem.has_vehicle_endpoints() {
            Ok(model.with_problem_endpoints(problem))
        } else {
            Ok(model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::Vehicle;

    fn sample() -> ProblemData {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0, 3, 3, 3],
            vec![3, 0, 3, 3],
            vec![3, 3, 0, 3],
            vec![3, 3, 3, 0],
        ])
        .expect("valid");
        ProblemData::new(Vehicle::new(30).expect("valid"), vec![0, 4, 4, 6], dm).expect("valid")
    }

    #[test]
    fn test_default_is_capacity_only() {
        let config = SolverConfig::default();
        assert_eq!(config.profile(), ConstraintProfile::CapacityOnly);
        assert_eq!(config.slack(), SlackPreset::Strict);
        assert_eq!(config.capacity_evaluator(), EvaluatorKind::Time);
        assert_eq!(config.arc_cost(), EvaluatorKind::Time);
    }

    #[test]
    fn test_named_profiles_fix_slack() {
        assert_eq!(
            SolverConfig::with_time_windows().slack(),
            SlackPreset::FullCapacity
        );
        assert_eq!(SolverConfig::custom_start_end().slack(), SlackPreset::Strict);
    }

    #[test]
    fn test_build_model_capacity_only() {
        let model = SolverConfig::capacity_only()
            .build_model(&sample())
            .expect("valid");
        let capacity = model.dimensions().get(CAPACITY_DIMENSION).expect("registered");
        assert_eq!(capacity.capacity(), 30);
        assert_eq!(capacity.slack(), 0);
        assert!(capacity.start_at_zero());
        assert!(capacity.ranges().is_none());
        assert_eq!(model.num_vehicles(), 3);
    }

    #[test]
    fn test_build_model_with_windows() {
        let p = sample()
            .with_time_windows(vec![(0, 30), (0, 10), (5, 20), (0, 30)])
            .expect("valid");
        let model = SolverConfig::with_time_windows()
            .build_model(&p)
            .expect("valid");
        let capacity = model.dimensions().get(CAPACITY_DIMENSION).expect("registered");
        assert_eq!(capacity.slack(), 30);
        assert_eq!(capacity.ranges().map(<[_]>::len), Some(4));
    }

    #[test]
    fn test_build_model_missing_windows() {
        let err = SolverConfig::with_time_windows()
            .build_model(&sample())
            .unwrap_err();
        assert!(matches!(
            err,
            RoutingError::Configuration(ConfigurationError::MissingTimeWindows)
        ));
    }

    #[test]
    fn test_build_model_custom_endpoints() {
        let p = sample()
            .with_vehicle_endpoints(vec![2, 0, 0], vec![0, 0, 0])
            .expect("valid");
        let model = SolverConfig::custom_start_end()
            .build_model(&p)
            .expect("valid");
        assert_eq!(model.start(0), 2);
        assert_eq!(model.end(0), 0);

        let err = SolverConfig::custom_start_end()
            .build_model(&sample())
            .unwrap_err();
        assert!(matches!(
            err,
            RoutingError::Configuration(ConfigurationError::MissingVehicleEndpoints)
        ));
    }

    #[test]
    fn test_build_model_layers_problem_constraints() {
        let p = sample()
            .with_time_windows(vec![(0, 30), (0, 5), (0, 30), (0, 30)])
            .expect("valid")
            .with_vehicle_endpoints(vec![2, 0, 0], vec![0, 0, 0])
            .expect("valid");
        for config in [
            SolverConfig::capacity_only(),
            SolverConfig::with_time_windows(),
            SolverConfig::custom_start_end(),
        ] {
            let model = config.build_model(&p).expect("valid");
            let capacity = model.dimensions().get(CAPACITY_DIMENSION).expect("registered");
            assert_eq!(capacity.ranges().map(<[_]>::len), Some(4));
            assert_eq!(model.start(0), 2);
            assert_eq!(model.end(0), 0);
        }
    }

    #[test]
    fn test_config_from_json() {
        let config: SolverConfig = serde_json::from_str(
            r#"{"profile":"capacity_with_time_windows","slack":"strict",
                "capacity_evaluator":"time","arc_cost":"distance"}"#,
        )
        .expect("valid json");
        assert_eq!(config.profile(), ConstraintProfile::CapacityWithTimeWindows);
        assert_eq!(config.slack(), SlackPreset::Strict);
        assert_eq!(config.arc_cost(), EvaluatorKind::Distance);
    }
}

//! Registry of the dimensions constraining every route.

use super::{Dimension, SlackPreset};
use crate::error::{ConfigurationError, RoutingError};
use crate::evaluation::EvaluatorKind;
use crate::models::TimeWindow;

/// Ordered set of dimensions.
///
/// The first registered dimension is the primary one: its final cumul decides
/// whether a route counts as a used vehicle.
///
/// # Examples
///
/// ```
/// use u_dispatch::dimension::{DimensionSet, SlackPreset};
/// use u_dispatch::evaluation::EvaluatorKind;
///
/// let mut dims = DimensionSet::new();
/// dims.register_preset("Capacity", EvaluatorKind::Time, SlackPreset::Strict, 30, true)
///     .unwrap();
/// assert_eq!(dims.get("Capacity").unwrap().slack(), 0);
/// assert!(dims
///     .register_dimension("Capacity", EvaluatorKind::Time, 0, 30, true)
///     .is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionSet {
    dimensions: Vec<Dimension>,
}

impl DimensionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cumulative dimension.
    ///
    /// Fails if `name` is taken or `slack`/`capacity` is negative.
    pub fn register_dimension(
        &mut self,
        name: impl Into<String>,
        evaluator: EvaluatorKind,
        slack: i64,
        capacity: i64,
        start_at_zero: bool,
    ) -> Result<(), RoutingError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(ConfigurationError::DuplicateDimension { name }.into());
        }
        if slack < 0 || capacity < 0 {
            return Err(ConfigurationError::NegativeDimensionBound { name }.into());
        }
        self.dimensions.push(Dimension::new(
            name,
            evaluator,
            slack,
            capacity,
            start_at_zero,
        ));
        Ok(())
    }

    /// Registers a dimension whose slack follows a named preset.
    pub fn register_preset(
        &mut self,
        name: impl Into<String>,
        evaluator: EvaluatorKind,
        preset: SlackPreset,
        capacity: i64,
        start_at_zero: bool,
    ) -> Result<(), RoutingError> {
        self.register_dimension(
            name,
            evaluator,
            preset.slack(capacity),
            capacity,
            start_at_zero,
        )
    }

    /// Restricts a dimension's cumul at every location to its window.
    ///
    /// `windows` holds one entry per location; the count is checked when the
    /// set is bound to a problem.
    pub fn set_ranges(&mut self, name: &str, windows: &[TimeWindow]) -> Result<(), RoutingError> {
        let dimension = self
            .dimensions
            .iter_mut()
            .find(|d| d.name() == name)
            .ok_or_else(|| ConfigurationError::UnknownDimension {
                name: name.to_string(),
            })?;
        dimension.set_ranges(windows.to_vec());
        Ok(())
    }

    /// Looks a dimension up by name.
    pub fn get(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name() == name)
    }

    /// Dimensions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions.iter()
    }

    /// Number of registered dimensions.
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Dimension names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.dimensions.iter().map(|d| d.name().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_strict_and_full_capacity() {
        let mut dims = DimensionSet::new();
        dims.register_preset("Capacity", EvaluatorKind::Time, SlackPreset::Strict, 30, true)
            .expect("valid");
        dims.register_preset("Time", EvaluatorKind::Time, SlackPreset::FullCapacity, 30, true)
            .expect("valid");
        assert_eq!(dims.len(), 2);
        assert_eq!(dims.get("Capacity").expect("registered").slack(), 0);
        assert_eq!(dims.get("Time").expect("registered").slack(), 30);
        assert_eq!(dims.names(), vec!["Capacity", "Time"]);
    }

    #[test]
    fn test_register_duplicate() {
        let mut dims = DimensionSet::new();
        dims.register_dimension("Capacity", EvaluatorKind::Time, 0, 30, true)
            .expect("valid");
        let err = dims
            .register_dimension("Capacity", EvaluatorKind::Demand, 0, 30, true)
            .unwrap_err();
        assert!(matches!(
            err,
            RoutingError::Configuration(ConfigurationError::DuplicateDimension { .. })
        ));
    }

    #[test]
    fn test_register_negative() {
        let mut dims = DimensionSet::new();
        assert!(dims
            .register_dimension("Capacity", EvaluatorKind::Time, -1, 30, true)
            .is_err());
        assert!(dims.is_empty());
    }

    #[test]
    fn test_set_ranges() {
        let mut dims = DimensionSet::new();
        dims.register_dimension("Capacity", EvaluatorKind::Time, 30, 30, true)
            .expect("valid");
        let windows = vec![TimeWindow::new(0, 30).expect("valid"); 3];
        dims.set_ranges("Capacity", &windows).expect("registered");
        assert_eq!(
            dims.get("Capacity").and_then(|d| d.ranges()).map(|r| r.len()),
            Some(3)
        );
    }

    #[test]
    fn test_set_ranges_unknown() {
        let mut dims = DimensionSet::new();
        let err = dims.set_ranges("Time", &[]).unwrap_err();
        assert!(matches!(
            err,
            RoutingError::Configuration(ConfigurationError::UnknownDimension { .. })
        ));
    }
}

//! A single cumulative dimension and its feasible-value intervals.

use serde::{Deserialize, Serialize};

use crate::evaluation::EvaluatorKind;
use crate::models::TimeWindow;

/// How much slack a dimension grants on every arc.
///
/// Both settings appear in practice: strict accounting when only capacity
/// matters, and a full-capacity allowance when the same dimension also
/// carries time windows (slack then acts as waiting time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlackPreset {
    /// `slack = 0`: the cumul grows by exactly the evaluator's transit.
    Strict,
    /// `slack = capacity`: the cumul may absorb up to a full capacity extra.
    FullCapacity,
}

impl SlackPreset {
    /// Slack value for a dimension bounded by `capacity`.
    pub fn slack(self, capacity: i64) -> i64 {
        match self {
            SlackPreset::Strict => 0,
            SlackPreset::FullCapacity => capacity,
        }
    }
}

/// Inclusive interval of cumulative values that are still feasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumulRange {
    min: i64,
    max: i64,
}

impl CumulRange {
    /// Returns `None` for an empty interval.
    pub fn new(min: i64, max: i64) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    /// Smallest feasible value.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Largest feasible value.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Returns `true` if `value` lies inside the interval.
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A named cumulative quantity tracked along every route.
///
/// Along an arc `i → j` the cumul follows
/// `cumul[j] = cumul[i] + transit(i, j) + s` with `0 <= s <= slack`. Every
/// cumul lies in `[0, capacity]` and, when ranges are set, inside the
/// location's window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    name: String,
    evaluator: EvaluatorKind,
    slack: i64,
    capacity: i64,
    start_at_zero: bool,
    ranges: Option<Vec<TimeWindow>>,
}

impl Dimension {
    pub(crate) fn new(
        name: String,
        evaluator: EvaluatorKind,
        slack: i64,
        capacity: i64,
        start_at_zero: bool,
    ) -> Self {
        Self {
            name,
            evaluator,
            slack,
            capacity,
            start_at_zero,
            ranges: None,
        }
    }

    pub(crate) fn set_ranges(&mut self, ranges: Vec<TimeWindow>) {
        self.ranges = Some(ranges);
    }

    /// Dimension name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluator producing the transit of each arc.
    pub fn evaluator(&self) -> EvaluatorKind {
        self.evaluator
    }

    /// Maximum extra value absorbed per arc.
    pub fn slack(&self) -> i64 {
        self.slack
    }

    /// Upper bound of every cumul.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Whether the cumul must be zero at the route's start.
    pub fn start_at_zero(&self) -> bool {
        self.start_at_zero
    }

    /// Per-location windows, if set.
    pub fn ranges(&self) -> Option<&[TimeWindow]> {
        self.ranges.as_deref()
    }

    /// Values allowed at `location` regardless of the route.
    pub fn bounds_at(&self, location: usize) -> Option<CumulRange> {
        match self.ranges.as_ref().map(|r| r[location]) {
            Some(window) => {
                CumulRange::new(window.earliest().max(0), window.latest().min(self.capacity))
            }
            None => CumulRange::new(0, self.capacity),
        }
    }

    /// Feasible cumuls when a route starts at `location`.
    pub fn start_range(&self, location: usize) -> Option<CumulRange> {
        let bounds = self.bounds_at(location)?;
        if self.start_at_zero {
            bounds.contains(0).then_some(CumulRange { min: 0, max: 0 })
        } else {
            Some(bounds)
        }
    }

    /// Feasible cumuls at `to` when the previous step allowed `from` and the
    /// arc contributes `transit`.
    pub fn extend(&self, from: CumulRange, transit: i64, to: usize) -> Option<CumulRange> {
        let bounds = self.bounds_at(to)?;
        let earliest = from.min.checked_add(transit)?;
        CumulRange::new(
            earliest.max(bounds.min),
            from
                .max
                .saturating_add(transit)
                .saturating_add(self.slack)
                .min(bounds.max),
        )
    }

    /// Smallest cumul at the previous step consistent with `next` after an
    /// arc contributing `transit`.
    pub fn settle_back(&self, previous: CumulRange, transit: i64, next: i64) -> i64 {
        previous
            .min
            .max(next.saturating_sub(transit).saturating_sub(self.slack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(slack: i64) -> Dimension {
        Dimension::new("Capacity".to_string(), EvaluatorKind::Time, slack, 100, true)
    }

    fn windowed(slack: i64) -> Dimension {
        let mut d = capacity(slack);
        d.set_ranges(vec![
            TimeWindow::new(0, 100).expect("valid"),
            TimeWindow::new(40, 60).expect("valid"),
            TimeWindow::new(0, 20).expect("valid"),
        ]);
        d
    }

    #[test]
    fn test_slack_presets() {
        assert_eq!(SlackPreset::Strict.slack(12000), 0);
        assert_eq!(SlackPreset::FullCapacity.slack(12000), 12000);
    }

    #[test]
    fn test_cumul_range() {
        assert!(CumulRange::new(5, 4).is_none());
        let r = CumulRange::new(3, 3).expect("point");
        assert!(r.contains(3));
        assert!(!r.contains(4));
    }

    #[test]
    fn test_start_range_at_zero() {
        let d = capacity(0);
        assert_eq!(d.start_range(0), CumulRange::new(0, 0));
    }

    #[test]
    fn test_start_range_window_excludes_zero() {
        let d = windowed(0);
        assert!(d.start_range(1).is_none());
    }

    #[test]
    fn test_start_range_free() {
        let d = Dimension::new("Load".to_string(), EvaluatorKind::Demand, 0, 100, false);
        assert_eq!(d.start_range(0), CumulRange::new(0, 100));
    }

    #[test]
    fn test_extend_strict() {
        let d = capacity(0);
        let start = CumulRange::new(0, 0).expect("point");
        assert_eq!(d.extend(start, 30, 1), CumulRange::new(30, 30));
        let full = CumulRange::new(90, 90).expect("point");
        assert!(d.extend(full, 11, 1).is_none());
        assert_eq!(d.extend(full, 10, 1), CumulRange::new(100, 100));
    }

    #[test]
    fn test_extend_strict_cannot_wait_for_window() {
        let d = windowed(0);
        let start = CumulRange::new(0, 0).expect("point");
        assert!(d.extend(start, 30, 1).is_none());
        assert_eq!(d.extend(start, 45, 1), CumulRange::new(45, 45));
    }

    #[test]
    fn test_extend_with_slack_waits_for_window() {
        let d = windowed(100);
        let start = CumulRange::new(0, 0).expect("point");
        assert_eq!(d.extend(start, 30, 1), CumulRange::new(40, 60));
    }

    #[test]
    fn test_extend_rejects_late_arrival() {
        let d = windowed(100);
        let at = CumulRange::new(15, 15).expect("point");
        assert!(d.extend(at, 6, 2).is_none());
        assert_eq!(d.extend(at, 5, 2), CumulRange::new(20, 20));
    }

    #[test]
    fn test_extend_near_i64_max() {
        let d = Dimension::new(
            "Capacity".to_string(),
            EvaluatorKind::Time,
            i64::MAX,
            i64::MAX,
            true,
        );
        let at = CumulRange::new(i64::MAX - 1, i64::MAX - 1).expect("point");
        assert_eq!(d.extend(at, 1, 0), CumulRange::new(i64::MAX, i64::MAX));
        assert!(d.extend(at, 2, 0).is_none());
        let start = CumulRange::new(0, 0).expect("point");
        assert_eq!(d.extend(start, 1, 0), CumulRange::new(1, i64::MAX));
        assert_eq!(d.settle_back(start, i64::MAX, 0), 0);
    }

    #[test]
    fn test_settle_back() {
        let d = windowed(100);
        let previous = CumulRange::new(0, 0).expect("point");
        assert_eq!(d.settle_back(previous, 30, 40), 0);
        let strict = capacity(0);
        let previous = CumulRange::new(10, 50).expect("range");
        assert_eq!(strict.settle_back(previous, 5, 30), 25);
    }
}

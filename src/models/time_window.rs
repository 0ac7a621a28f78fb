//! Time window type.

use serde::Serialize;

/// An inclusive `[earliest, latest]` bound on the cumulative time value at a
/// location.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::TimeWindow;
///
/// let tw = TimeWindow::new(0, 6000).unwrap();
/// assert!(tw.contains(6000));
/// assert!(!tw.contains(6001));
/// assert!(TimeWindow::new(10, 5).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    earliest: i64,
    latest: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest`.
    pub fn new(earliest: i64, latest: i64) -> Option<Self> {
        if earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// Earliest allowable cumulative value.
    pub fn earliest(&self) -> i64 {
        self.earliest
    }

    /// Latest allowable cumulative value.
    pub fn latest(&self) -> i64 {
        self.latest
    }

    /// Returns `true` if `value` falls within this window (inclusive).
    pub fn contains(&self, value: i64) -> bool {
        value >= self.earliest && value <= self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_valid() {
        let tw = TimeWindow::new(4000, 12000).expect("valid");
        assert_eq!(tw.earliest(), 4000);
        assert_eq!(tw.latest(), 12000);
    }

    #[test]
    fn test_time_window_point() {
        let tw = TimeWindow::new(7, 7).expect("valid");
        assert!(tw.contains(7));
        assert!(!tw.contains(6));
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20, 10).is_none());
    }

    #[test]
    fn test_time_window_contains() {
        let tw = TimeWindow::new(10, 20).expect("valid");
        assert!(tw.contains(10));
        assert!(tw.contains(15));
        assert!(tw.contains(20));
        assert!(!tw.contains(9));
        assert!(!tw.contains(21));
    }
}

//! Route and step types.

use serde::Serialize;

/// One location on a route with its cumulative dimension values.
///
/// `cumuls` holds one value per registered dimension, in registration order.
/// The first entry is the primary (capacity) dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStep {
    /// Location index visited at this step.
    pub location: usize,
    /// Cumulative value of every dimension on arrival.
    pub cumuls: Vec<i64>,
}

impl RouteStep {
    /// Cumulative value of the primary dimension.
    pub fn cumul(&self) -> i64 {
        self.cumuls.first().copied().unwrap_or(0)
    }
}

/// An ordered sequence of steps assigned to a single vehicle slot.
///
/// Unlike a bare visit list, a route stores its start and end location as
/// its first and last step, because vehicles may start or end away from the
/// depot.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Route, RouteStep};
///
/// let mut route = Route::new(0);
/// route.push_step(RouteStep { location: 0, cumuls: vec![0] });
/// route.push_step(RouteStep { location: 2, cumuls: vec![3] });
/// route.push_step(RouteStep { location: 0, cumuls: vec![10] });
/// assert_eq!(route.stops().len(), 1);
/// assert_eq!(route.final_cumul(), 10);
/// assert!(route.is_used());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    vehicle_id: usize,
    steps: Vec<RouteStep>,
    cost: i64,
}

impl Route {
    /// Creates an empty route for the given vehicle slot.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            steps: Vec::new(),
            cost: 0,
        }
    }

    /// Appends a step to the end of this route.
    pub fn push_step(&mut self, step: RouteStep) {
        self.steps.push(step);
    }

    /// Returns the vehicle slot of this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// All steps, start and end included.
    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    /// Steps strictly between the start and the end.
    pub fn stops(&self) -> &[RouteStep] {
        match self.steps.len() {
            0..=2 => &[],
            n => &self.steps[1..n - 1],
        }
    }

    /// Number of steps, start and end included.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no step was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Location indices in route order.
    pub fn locations(&self) -> Vec<usize> {
        self.steps.iter().map(|s| s.location).collect()
    }

    /// Primary cumulative value at the last step.
    pub fn final_cumul(&self) -> i64 {
        self.steps.last().map_or(0, RouteStep::cumul)
    }

    /// Returns `true` if the route ends with a positive primary cumul.
    ///
    /// This is the threshold used when counting vehicles: a slot that goes
    /// straight from its start to an identical end stays at zero.
    pub fn is_used(&self) -> bool {
        self.final_cumul() > 0
    }

    /// Sum of arc costs along the route.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Sets the arc cost (used by the route builder).
    pub fn set_cost(&mut self, cost: i64) {
        self.cost = cost;
    }
}

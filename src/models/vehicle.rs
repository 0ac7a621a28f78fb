//! Vehicle type with a fixed capacity.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A vehicle of the homogeneous fleet.
///
/// Every vehicle shares one capacity: the largest cumulative value any
/// dimension may reach along a single route.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Vehicle;
///
/// let v = Vehicle::new(30).unwrap();
/// assert_eq!(v.capacity(), 30);
/// assert!(Vehicle::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Vehicle {
    capacity: i64,
}

impl Vehicle {
    /// Creates a vehicle with the given capacity.
    ///
    /// Fails if `capacity` is not positive.
    pub fn new(capacity: i64) -> Result<Self, ConfigurationError> {
        if capacity <= 0 {
            return Err(ConfigurationError::NonPositiveCapacity { capacity });
        }
        Ok(Self { capacity })
    }

    /// Maximum cumulative value per route.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }
}

impl TryFrom<i64> for Vehicle {
    type Error = ConfigurationError;

    fn try_from(capacity: i64) -> Result<Self, Self::Error> {
        Self::new(capacity)
    }
}

impl From<Vehicle> for i64 {
    fn from(vehicle: Vehicle) -> Self {
        vehicle.capacity
    }
}

//! Dense distance matrix.

use serde::Serialize;

use crate::error::{ConfigurationError, RoutingError, ShapeError};

/// A dense n×n travel-time/distance matrix stored in row-major order.
///
/// Entries are non-negative integers. Symmetry is not required.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0, 3, 5],
///     vec![3, 0, 4],
///     vec![5, 4, 0],
/// ]).unwrap();
/// assert_eq!(dm.get(0, 2), 5);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceMatrix {
    data: Vec<i64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Creates a distance matrix from explicit rows.
    ///
    /// Every row must have as many entries as there are rows, and no entry
    /// may be negative.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, RoutingError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(ShapeError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                }
                .into());
            }
            if let Some(to) = values.iter().position(|&d| d < 0) {
                return Err(ConfigurationError::NegativeDistance {
                    from: row,
                    to,
                    distance: values[to],
                }
                .into());
            }
            data.extend(values);
        }
        Ok(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: i64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}

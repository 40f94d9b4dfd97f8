//! Cities and the precomputed Euclidean distance matrix.
//!
//! ```text
//! d(i, j) = √((xᵢ - xⱼ)² + (yᵢ - yⱼ)²)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GaError, GaResult};

/// A 2D point representing a city.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    /// Create a new city at coordinates (x, y).
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another city.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Symmetric N×N distance table, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Value stored on the diagonal.
    ///
    /// Tour edges always join distinct cities, so this is never summed.
    /// It is negative so it can never be mistaken for a real distance.
    pub const SELF_DISTANCE: f64 = f64::NEG_INFINITY;

    /// Build the matrix from city coordinates.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientCities` for fewer than 2 cities and
    /// `NonFiniteCoordinate` if any coordinate is NaN or infinite.
    pub fn build(cities: &[City]) -> GaResult<Self> {
        let n = cities.len();
        if n < 2 {
            return Err(GaError::InsufficientCities { found: n });
        }
        if let Some(index) = cities.iter().position(|c| !c.is_finite()) {
            return Err(GaError::NonFiniteCoordinate { index });
        }

        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = Self::SELF_DISTANCE;
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        Ok(Self { n, data })
    }

    /// Number of cities.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.n
    }

    /// Always false: a matrix holds at least two cities.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between cities `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }
}

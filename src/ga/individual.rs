//! Candidate tours and their fitness.
//!
//! # Governing Equation
//!
//! ```text
//! L(g) = d(0, g₀) + Σᵢ d(gᵢ, gᵢ₊₁) + d(g_last, 0)
//! ```
//!
//! City 0 is the implicit anchor and never appears in `genes`.

use serde::{Deserialize, Serialize};

use super::distance::DistanceMatrix;

/// Ordered collection of individuals, sorted ascending by length between steps.
pub type Population = Vec<Individual>;

/// One candidate tour with its cached length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Visit order of cities `1..N`; the tour starts and ends at city 0.
    pub genes: Vec<usize>,
    /// Cached tour length.
    pub length: f64,
}

impl Individual {
    /// Create an individual and evaluate its length.
    #[must_use]
    pub fn new(genes: Vec<usize>, matrix: &DistanceMatrix) -> Self {
        let length = evaluate(&genes, matrix);
        Self { genes, length }
    }

    /// The identity ordering `1, 2, ..., N-1`.
    #[must_use]
    pub fn identity(matrix: &DistanceMatrix) -> Self {
        Self::new((1..matrix.len()).collect(), matrix)
    }

    /// Recompute the cached length after the genes changed.
    pub fn reevaluate(&mut self, matrix: &DistanceMatrix) {
        self.length = evaluate(&self.genes, matrix);
    }

    /// The closed tour including the anchor at both ends.
    #[must_use]
    pub fn closed_tour(&self) -> Vec<usize> {
        let mut tour = Vec::with_capacity(self.genes.len() + 2);
        tour.push(0);
        tour.extend_from_slice(&self.genes);
        tour.push(0);
        tour
    }
}

/// Tour length of `genes` anchored at city 0.
///
/// A single gene yields the round trip `2·d(0, g₀)`; no genes yields 0.
#[must_use]
pub fn evaluate(genes: &[usize], matrix: &DistanceMatrix) -> f64 {
    let (Some(&first), Some(&last)) = (genes.first(), genes.last()) else {
        return 0.0;
    };

    let inner: f64 = genes.windows(2).map(|w| matrix.get(w[0], w[1])).sum();
    matrix.get(0, first) + inner + matrix.get(last, 0)
}

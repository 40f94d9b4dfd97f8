//! Permutation guard - stop-on-defect checking for tours.
//!
//! Every tour in the engine must be a permutation of `{1, ..., N-1}`.
//! The guard checks the inputs and outputs of every crossover, every
//! mutated tour, and every tour of a restored checkpoint, so a defect stops the step
//! with a full diagnostic instead of letting a corrupt individual into
//! the population.
//!
//! # Anomaly Types
//!
//! 1. **Wrong length**: tour does not hold exactly `N-1` genes
//! 2. **Out of range**: a gene is 0 (the anchor) or `>= N`
//! 3. **Duplicate**: a gene appears more than once
//! 4. **Missing**: a gene never appears

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GaError;

/// A detected permutation defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermutationViolation {
    /// Tour length differs from the number of non-anchor cities.
    WrongLength {
        /// Expected gene count.
        expected: usize,
        /// Actual gene count.
        found: usize,
    },
    /// Gene outside `1..city_count`.
    OutOfRange {
        /// Offending gene.
        gene: usize,
        /// Position in the tour.
        position: usize,
    },
    /// Gene appears twice.
    Duplicate {
        /// Offending gene.
        gene: usize,
        /// First position.
        first: usize,
        /// Second position.
        second: usize,
    },
    /// Gene never appears.
    Missing {
        /// The absent gene.
        gene: usize,
    },
}

impl fmt::Display for PermutationViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { expected, found } => {
                write!(f, "expected {expected} genes, found {found}")
            }
            Self::OutOfRange { gene, position } => {
                write!(f, "gene {gene} at position {position} is out of range")
            }
            Self::Duplicate {
                gene,
                first,
                second,
            } => write!(f, "gene {gene} duplicated at positions {first} and {second}"),
            Self::Missing { gene } => write!(f, "gene {gene} is missing"),
        }
    }
}

impl PermutationViolation {
    /// Convert into an engine error with the surrounding context attached.
    #[must_use]
    pub fn into_error(self, context: &str, diagnostic: &str) -> GaError {
        GaError::invariant(context, format!("{self}; {diagnostic}"))
    }
}

/// Checks that tours are permutations of the non-anchor cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutationGuard {
    /// Total number of cities including the anchor.
    city_count: usize,
}

impl PermutationGuard {
    /// Create a guard for a problem with `city_count` cities.
    #[must_use]
    pub const fn new(city_count: usize) -> Self {
        Self { city_count }
    }

    /// Number of genes a valid tour holds.
    #[must_use]
    pub const fn gene_count(&self) -> usize {
        self.city_count.saturating_sub(1)
    }

    /// Check a tour.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn check(&self, genes: &[usize]) -> Result<(), PermutationViolation> {
        let expected = self.gene_count();
        if genes.len() != expected {
            return Err(PermutationViolation::WrongLength {
                expected,
                found: genes.len(),
            });
        }

        let mut seen_at: Vec<Option<usize>> = vec![None; self.city_count];
        for (position, &gene) in genes.iter().enumerate() {
            if gene == 0 || gene >= self.city_count {
                return Err(PermutationViolation::OutOfRange { gene, position });
            }
            if let Some(first) = seen_at[gene] {
                return Err(PermutationViolation::Duplicate {
                    gene,
                    first,
                    second: position,
                });
            }
            seen_at[gene] = Some(position);
        }

        // Length matches and no duplicates, so this only fires on a logic error above.
        if let Some(gene) = (1..self.city_count).find(|&g| seen_at[g].is_none()) {
            return Err(PermutationViolation::Missing { gene });
        }

        Ok(())
    }

    /// Returns `true` if the tour is a valid permutation.
    #[must_use]
    pub fn is_valid(&self, genes: &[usize]) -> bool {
        self.check(genes).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_valid() {
        let guard = PermutationGuard::new(6);
        assert!(guard.check(&[1, 2, 3, 4, 5]).is_ok());
    }

    #[test]
    fn test_shuffled_is_valid() {
        let guard = PermutationGuard::new(6);
        assert!(guard.is_valid(&[5, 3, 1, 4, 2]));
    }

    #[test]
    fn test_single_gene() {
        let guard = PermutationGuard::new(2);
        assert_eq!(guard.gene_count(), 1);
        assert!(guard.is_valid(&[1]));
        assert!(!guard.is_valid(&[0]));
    }

    #[test]
    fn test_wrong_length() {
        let guard = PermutationGuard::new(5);
        assert_eq!(
            guard.check(&[1, 2, 3]),
            Err(PermutationViolation::WrongLength {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_anchor_in_tour() {
        let guard = PermutationGuard::new(4);
        assert_eq!(
            guard.check(&[1, 0, 3]),
            Err(PermutationViolation::OutOfRange {
                gene: 0,
                position: 1
            })
        );
    }

    #[test]
    fn test_gene_too_large() {
        let guard = PermutationGuard::new(4);
        assert!(matches!(
            guard.check(&[1, 2, 4]),
            Err(PermutationViolation::OutOfRange { gene: 4, .. })
        ));
    }

    #[test]
    fn test_duplicate() {
        let guard = PermutationGuard::new(5);
        assert_eq!(
            guard.check(&[2, 1, 2, 4]),
            Err(PermutationViolation::Duplicate {
                gene: 2,
                first: 0,
                second: 2
            })
        );
    }

    #[test]
    fn test_into_error_is_fatal() {
        let err = PermutationViolation::Missing { gene: 3 }.into_error("crossover", "cut=2");
        assert!(err.is_fatal());
        let msg = err.to_string();
        assert!(msg.contains("gene 3 is missing"));
        assert!(msg.contains("cut=2"));
    }

    #[test]
    fn test_violation_display() {
        let v = PermutationViolation::Duplicate {
            gene: 7,
            first: 1,
            second: 5,
        };
        assert_eq!(v.to_string(), "gene 7 duplicated at positions 1 and 5");
    }
}

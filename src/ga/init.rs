//! Initial population construction.
//!
//! The first individual is the identity ordering. Every further
//! individual takes the previous working copy and applies `swaps` random
//! transpositions to it, so the shuffle accumulates down the population.

use super::distance::DistanceMatrix;
use super::individual::{Individual, Population};
use crate::engine::rng::TourRng;

/// Build the starting generation of `pop_size` individuals.
///
/// Returns an empty population when `pop_size` is 0.
#[must_use]
pub fn initialize(
    matrix: &DistanceMatrix,
    pop_size: usize,
    swaps: usize,
    rng: &mut TourRng,
) -> Population {
    let mut population = Vec::with_capacity(pop_size);
    if pop_size == 0 {
        return population;
    }

    let identity = Individual::identity(matrix);
    let mut working = identity.genes.clone();
    population.push(identity);

    let len = working.len();
    for _ in 1..pop_size {
        for _ in 0..swaps {
            let a = rng.gen_index(len);
            let b = rng.gen_index(len);
            working.swap(a, b);
        }
        population.push(Individual::new(working.clone(), matrix));
    }

    population
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::guard::PermutationGuard;
    use crate::ga::distance::City;

    fn cities(n: usize) -> Vec<City> {
        (0..n)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / n as f64;
                City::new(angle.cos() * 100.0, angle.sin() * 100.0)
            })
            .collect()
    }

    #[test]
    fn test_size_and_identity_first() {
        let m = DistanceMatrix::build(&cities(6)).expect("build");
        let mut rng = TourRng::new(42);
        let pop = initialize(&m, 36, 36, &mut rng);

        assert_eq!(pop.len(), 36);
        assert_eq!(pop[0].genes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_all_valid_permutations() {
        let m = DistanceMatrix::build(&cities(12)).expect("build");
        let guard = PermutationGuard::new(12);
        let mut rng = TourRng::new(7);
        for ind in initialize(&m, 50, 50, &mut rng) {
            assert!(guard.is_valid(&ind.genes), "invalid tour {:?}", ind.genes);
        }
    }

    #[test]
    fn test_lengths_evaluated() {
        let m = DistanceMatrix::build(&cities(8)).expect("build");
        let mut rng = TourRng::new(3);
        for ind in initialize(&m, 20, 20, &mut rng) {
            let expected = crate::ga::individual::evaluate(&ind.genes, &m);
            assert!((ind.length - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_swaps_clones_identity() {
        let m = DistanceMatrix::build(&cities(5)).expect("build");
        let mut rng = TourRng::new(1);
        let pop = initialize(&m, 4, 0, &mut rng);
        assert!(pop.iter().all(|ind| ind.genes == vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_empty_population() {
        let m = DistanceMatrix::build(&cities(5)).expect("build");
        let mut rng = TourRng::new(1);
        assert!(initialize(&m, 0, 10, &mut rng).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let m = DistanceMatrix::build(&cities(9)).expect("build");
        let a = initialize(&m, 30, 30, &mut TourRng::new(11));
        let b = initialize(&m, 30, 30, &mut TourRng::new(11));
        assert_eq!(a, b);
    }
}

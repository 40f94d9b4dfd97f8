//! Parent selection and survivor truncation.
//!
//! Parent selection is uniform; the selective pressure comes entirely
//! from elitist truncation of parents plus offspring, which also makes
//! the best length non-increasing across generations.

use super::individual::{Individual, Population};
use crate::engine::rng::TourRng;

/// Pick a parent uniformly at random. `None` only for an empty population.
pub fn select_parent<'a>(population: &'a [Individual], rng: &mut TourRng) -> Option<&'a Individual> {
    population.get(rng.gen_index(population.len()))
}

/// Sort `combined` ascending by length and keep the best `pop_size`.
///
/// The sort is stable, so among equal lengths earlier individuals
/// (the incumbent generation) win.
#[must_use]
pub fn select_survivors(mut combined: Population, pop_size: usize) -> Population {
    combined.sort_by(|a, b| a.length.total_cmp(&b.length));
    combined.truncate(pop_size);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ind(genes: Vec<usize>, length: f64) -> Individual {
        Individual { genes, length }
    }

    #[test]
    fn test_select_parent_empty() {
        let mut rng = TourRng::new(1);
        assert!(select_parent(&[], &mut rng).is_none());
    }

    #[test]
    fn test_select_parent_covers_population() {
        let pop: Vec<Individual> = (0..5).map(|i| ind(vec![1], i as f64)).collect();
        let mut rng = TourRng::new(42);
        let mut hit = [false; 5];
        for _ in 0..500 {
            let p = select_parent(&pop, &mut rng).expect("non-empty");
            hit[p.length as usize] = true;
        }
        assert!(hit.iter().all(|&h| h), "uniform selection should reach every member");
    }

    #[test]
    fn test_survivors_sorted_and_truncated() {
        let combined = vec![
            ind(vec![1, 2], 5.0),
            ind(vec![2, 1], 3.0),
            ind(vec![1, 2], 9.0),
            ind(vec![2, 1], 1.0),
        ];
        let survivors = select_survivors(combined, 2);
        assert_eq!(survivors.len(), 2);
        assert_eq!(survivors[0].length, 1.0);
        assert_eq!(survivors[1].length, 3.0);
    }

    #[test]
    fn test_survivors_keep_elite() {
        let combined = vec![ind(vec![1], 2.0), ind(vec![1], 10.0), ind(vec![1], 11.0)];
        let survivors = select_survivors(combined, 1);
        assert_eq!(survivors[0].length, 2.0);
    }

    #[test]
    fn test_survivors_stable_on_ties() {
        let combined = vec![ind(vec![1, 2, 3], 4.0), ind(vec![3, 2, 1], 4.0)];
        let survivors = select_survivors(combined, 1);
        assert_eq!(survivors[0].genes, vec![1, 2, 3]);
    }

    #[test]
    fn test_survivors_smaller_than_target() {
        let survivors = select_survivors(vec![ind(vec![1], 1.0)], 10);
        assert_eq!(survivors.len(), 1);
    }
}

//! Order-preserving one-point crossover.
//!
//! For a cut point `c` each child keeps its own parent's prefix
//! `[0, c)`, then takes the other parent's genes from `c` onward in order,
//! skipping genes it already holds. A second pass appends the genes of
//! its own parent's suffix that are still missing. Membership is tracked
//! in a presence table, so building a child is O(N).
//!
//! ```text
//! parent1 = 1 2 3 | 4 5 6        child1 = 1 2 3 | 5 4 6
//! parent2 = 6 2 1 | 3 5 4   →    child2 = 6 2 1 | 4 5 3
//! ```

use super::individual::Individual;
use crate::engine::guard::PermutationGuard;
use crate::engine::rng::TourRng;
use crate::error::{GaError, GaResult};

/// Cross two parent gene sequences at `cut_point`.
///
/// # Errors
///
/// - `InvalidCutPoint` if `cut_point >= len`.
/// - `InvariantViolation` if the parents are not permutations of the same
///   size, or if a child fails the permutation check. The error detail
///   carries both parents, the cut point and both children.
pub fn cross(
    parent1: &[usize],
    parent2: &[usize],
    cut_point: usize,
) -> GaResult<(Vec<usize>, Vec<usize>)> {
    let len = parent1.len();
    if parent2.len() != len {
        return Err(GaError::invariant(
            "crossover",
            format!("parent lengths differ: {len} vs {}", parent2.len()),
        ));
    }
    if cut_point >= len {
        return Err(GaError::InvalidCutPoint { cut_point, len });
    }

    let guard = PermutationGuard::new(len + 1);
    for (name, parent) in [("parent1", parent1), ("parent2", parent2)] {
        guard
            .check(parent)
            .map_err(|v| v.into_error("crossover input", &format!("{name}={parent:?}")))?;
    }

    let child1 = build_child(parent1, parent2, cut_point);
    let child2 = build_child(parent2, parent1, cut_point);

    for child in [&child1, &child2] {
        guard.check(child).map_err(|v| {
            v.into_error(
                "crossover",
                &format!(
                    "parent1={parent1:?} parent2={parent2:?} cut_point={cut_point} \
                     child1={child1:?} child2={child2:?}"
                ),
            )
        })?;
    }

    Ok((child1, child2))
}

/// Cross two individuals at a uniformly drawn cut point.
///
/// Returned children carry a stale length of 0; the caller evaluates
/// them after mutation.
///
/// # Errors
///
/// See [`cross`].
pub fn cross_individuals(
    parent1: &Individual,
    parent2: &Individual,
    rng: &mut TourRng,
) -> GaResult<(Vec<usize>, Vec<usize>)> {
    let cut_point = rng.gen_index(parent1.genes.len());
    cross(&parent1.genes, &parent2.genes, cut_point)
}

/// Build one child: `origin` prefix, then `other` suffix, then leftovers of `origin`.
fn build_child(origin: &[usize], other: &[usize], cut_point: usize) -> Vec<usize> {
    let len = origin.len();
    let mut present = vec![false; len + 1];
    let mut child = Vec::with_capacity(len);

    for &gene in &origin[..cut_point] {
        present[gene] = true;
        child.push(gene);
    }
    for &gene in other[cut_point..].iter().chain(&origin[cut_point..]) {
        if !present[gene] {
            present[gene] = true;
            child.push(gene);
        }
    }

    child
}

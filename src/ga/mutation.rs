//! In-place tour mutation.
//!
//! Both operators only move existing genes, so they preserve the
//! permutation invariant by construction.

use serde::{Deserialize, Serialize};

use crate::engine::rng::TourRng;

/// Mutation operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationMode {
    /// Exchange the genes at two positions.
    Swap,
    /// Reverse the inclusive segment between two positions.
    #[default]
    Reverse,
}

impl std::fmt::Display for MutationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Swap => write!(f, "swap"),
            Self::Reverse => write!(f, "reverse"),
        }
    }
}

impl std::str::FromStr for MutationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "swap" => Ok(Self::Swap),
            "reverse" => Ok(Self::Reverse),
            other => Err(format!("unknown mutation mode '{other}' (expected swap or reverse)")),
        }
    }
}

/// Apply `mode` at the given positions. Out-of-range positions leave the tour untouched.
pub fn mutate_at(genes: &mut [usize], pos1: usize, pos2: usize, mode: MutationMode) {
    if pos1 >= genes.len() || pos2 >= genes.len() {
        return;
    }
    match mode {
        MutationMode::Swap => genes.swap(pos1, pos2),
        MutationMode::Reverse => {
            let (lo, hi) = (pos1.min(pos2), pos1.max(pos2));
            genes[lo..=hi].reverse();
        }
    }
}

/// Apply `mode` at two uniformly drawn positions.
pub fn mutate(genes: &mut [usize], mode: MutationMode, rng: &mut TourRng) {
    let pos1 = rng.gen_index(genes.len());
    let pos2 = rng.gen_index(genes.len());
    mutate_at(genes, pos1, pos2, mode);
}

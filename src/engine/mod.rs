//! Engine support shared by the genetic operators.
//!
//! - Deterministic RNG (PCG, serializable for checkpoints)
//! - Permutation guard for stop-on-defect checking

pub mod guard;
pub mod rng;

pub use guard::{PermutationGuard, PermutationViolation};
pub use rng::TourRng;

//! Genetic operators for tour search.
//!
//! # Pipeline
//!
//! ```text
//! select_parent ×2 → cross → mutate (p = mutation_rate) → evaluate
//!        ↑                                                   ↓
//!   population ←────── select_survivors(parents ∪ offspring)
//! ```
//!
//! Every operator is a free function over plain data plus an injected
//! [`TourRng`](crate::engine::rng::TourRng); the search controller owns
//! all state.

pub mod crossover;
pub mod distance;
pub mod individual;
pub mod init;
pub mod mutation;
pub mod selection;
pub mod termination;

pub use crossover::{cross, cross_individuals};
pub use distance::{City, DistanceMatrix};
pub use individual::{evaluate, Individual, Population};
pub use init::initialize;
pub use mutation::{mutate, mutate_at, MutationMode};
pub use selection::{select_parent, select_survivors};
pub use termination::{CancelToken, StopReason, TerminationController};

//! # tourga
//!
//! Anytime genetic search for the Euclidean Traveling Salesman Problem.
//!
//! A host places a handful of 2D cities, starts a search, and calls
//! [`SearchController::step`] repeatedly; each call runs one generation and
//! reports when a strictly shorter tour appears. The search can be
//! cancelled between any two steps and restarted with a new city set.
//!
//! - Deterministic: one seeded PCG stream drives every random choice
//! - Checked: every crossover child is verified to be a permutation
//! - Elitist: the best tour length never increases
//!
//! ## Example
//!
//! ```rust
//! use tourga::prelude::*;
//!
//! let mut search = SearchController::new(SearchConfig::builder().seed(42).build());
//! search.begin_building()?;
//! for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
//!     search.add_city(City::new(x, y))?;
//! }
//! search.start()?;
//! search.run_until_done(1_000)?;
//!
//! assert!((search.best_length() - 40.0).abs() < 1e-9);
//! # Ok::<(), tourga::GaError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Sometimes range loops are clearer
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod ga;
pub mod instance;
pub mod search;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ResolvedConfig, SearchConfig, SearchConfigBuilder};
    pub use crate::engine::guard::{PermutationGuard, PermutationViolation};
    pub use crate::engine::rng::TourRng;
    pub use crate::error::{GaError, GaResult};
    pub use crate::ga::{
        City, CancelToken, DistanceMatrix, Individual, MutationMode, StopReason,
    };
    pub use crate::instance::TourInstance;
    pub use crate::search::{
        Improvement, Phase, SearchController, SearchSnapshot, SearchState, StepOutcome,
    };
}

/// Re-export for public API
pub use error::{GaError, GaResult};
pub use search::SearchController;

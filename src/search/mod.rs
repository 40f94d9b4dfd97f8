//! Anytime search lifecycle.
//!
//! # Architecture
//!
//! ```text
//!            begin_building          start (N ≥ 2)
//!   Idle ────────────────→ Building ─────────────→ Searching ──step──┐
//!    ↑                                              │   │  ↑         │
//!    └──────────── cancel / cancel token ───────────┘   │  └─────────┘
//!                                                       ↓ stop condition
//!   Building ←──────────── begin_building ──────── Finished
//! ```
//!
//! The host drives the search one generation at a time through
//! [`SearchController::step`] and may interleave rendering, input, or a
//! cancellation request between steps.

mod controller;

pub use controller::SearchController;

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::engine::rng::TourRng;
use crate::ga::distance::City;
use crate::ga::individual::Population;
use crate::ga::termination::StopReason;

/// Lifecycle phase of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing placed, nothing running.
    #[default]
    Idle,
    /// Accepting cities.
    Building,
    /// Running generations.
    Searching,
    /// Stopped by a stop condition; results remain readable.
    Finished,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Idle => "idle",
            Self::Building => "building",
            Self::Searching => "searching",
            Self::Finished => "finished",
        };
        f.write_str(text)
    }
}

/// Counters of a running search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// Completed generations.
    pub generation: u64,
    /// Consecutive generations without a strictly better best tour.
    pub no_improve_count: u64,
    /// Best tour length so far; `+∞` before the first generation.
    pub best_length: f64,
    /// Current phase.
    pub phase: Phase,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            generation: 0,
            no_improve_count: 0,
            best_length: f64::INFINITY,
            phase: Phase::Idle,
        }
    }
}

/// A strictly better best tour found by one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    /// Best length before the step (`+∞` on the first one).
    pub previous: f64,
    /// New best length.
    pub current: f64,
    /// Closed tour, starting and ending at city 0.
    pub best_tour: Vec<usize>,
    /// Generation that produced it.
    pub generation: u64,
}

/// Result of a single [`SearchController::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Generation count after the step.
    pub generation: u64,
    /// Present only when the best length strictly decreased.
    pub improvement: Option<Improvement>,
    /// Phase after the step.
    pub phase: Phase,
    /// Why the search stopped, if it did.
    pub stop_reason: Option<StopReason>,
}

impl StepOutcome {
    /// Whether another step may follow.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Searching)
    }
}

/// Serializable checkpoint of a controller.
///
/// Restoring a snapshot and stepping continues the interrupted run exactly,
/// since the RNG stream position is part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    /// Configuration the search was started with.
    pub config: SearchConfig,
    /// Placed cities.
    pub cities: Vec<City>,
    /// Current generation.
    pub population: Population,
    /// Counters and phase.
    pub state: SearchState,
    /// Best length after each generation.
    pub history: Vec<f64>,
    /// RNG including its stream position.
    pub rng: TourRng,
    /// Stop reason once finished.
    pub stop_reason: Option<StopReason>,
}

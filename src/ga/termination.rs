//! Stop conditions for the search.
//!
//! The search stops when any of these holds:
//!
//! ```text
//! generation       > max_generations
//! no_improve_count > max_no_improve
//! cancel token set
//! ```

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::search::SearchState;

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Generation cap exceeded.
    GenerationLimit,
    /// Too many generations without a strictly better best tour.
    Stagnation,
    /// External cancellation.
    Cancelled,
    /// Only one possible tour exists.
    Exhausted,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::GenerationLimit => "generation limit reached",
            Self::Stagnation => "no improvement within patience",
            Self::Cancelled => "cancelled",
            Self::Exhausted => "search space exhausted",
        };
        f.write_str(text)
    }
}

/// Shared cancellation flag.
///
/// Clones share the flag, so a host may keep one handle and set it from
/// another thread; the search observes it at the start of its next step.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create an unset token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the flag.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Decides when the search ends.
#[derive(Debug, Clone)]
pub struct TerminationController {
    max_generations: u64,
    max_no_improve: u64,
    cancel: CancelToken,
}

impl TerminationController {
    /// Create a controller observing `cancel`.
    #[must_use]
    pub const fn new(max_generations: u64, max_no_improve: u64, cancel: CancelToken) -> Self {
        Self {
            max_generations,
            max_no_improve,
            cancel,
        }
    }

    /// Default stagnation patience: `min(N², 300)`.
    #[must_use]
    pub fn default_max_no_improve(city_count: usize) -> usize {
        city_count.saturating_mul(city_count).min(300)
    }

    /// Generation cap.
    #[must_use]
    pub const fn max_generations(&self) -> u64 {
        self.max_generations
    }

    /// Stagnation cap.
    #[must_use]
    pub const fn max_no_improve(&self) -> u64 {
        self.max_no_improve
    }

    /// The observed cancel token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Returns the reason to stop, if any. Cancellation takes precedence.
    #[must_use]
    pub fn should_stop(&self, state: &SearchState) -> Option<StopReason> {
        if self.cancel.is_cancelled() {
            Some(StopReason::Cancelled)
        } else if state.generation > self.max_generations {
            Some(StopReason::GenerationLimit)
        } else if state.no_improve_count > self.max_no_improve {
            Some(StopReason::Stagnation)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(generation: u64, no_improve_count: u64) -> SearchState {
        SearchState {
            generation,
            no_improve_count,
            ..SearchState::default()
        }
    }

    #[test]
    fn test_default_patience() {
        assert_eq!(TerminationController::default_max_no_improve(2), 4);
        assert_eq!(TerminationController::default_max_no_improve(10), 100);
        assert_eq!(TerminationController::default_max_no_improve(17), 289);
        assert_eq!(TerminationController::default_max_no_improve(18), 300);
        assert_eq!(TerminationController::default_max_no_improve(50), 300);
    }

    #[test]
    fn test_continue_within_limits() {
        let t = TerminationController::new(10, 5, CancelToken::new());
        assert_eq!(t.should_stop(&state(10, 5)), None);
        assert_eq!(t.should_stop(&state(0, 0)), None);
    }

    #[test]
    fn test_generation_limit() {
        let t = TerminationController::new(10, 5, CancelToken::new());
        assert_eq!(t.should_stop(&state(11, 0)), Some(StopReason::GenerationLimit));
    }

    #[test]
    fn test_stagnation() {
        let t = TerminationController::new(10, 5, CancelToken::new());
        assert_eq!(t.should_stop(&state(3, 6)), Some(StopReason::Stagnation));
    }

    #[test]
    fn test_cancel_precedence() {
        let token = CancelToken::new();
        let t = TerminationController::new(10, 5, token.clone());
        token.cancel();
        assert_eq!(t.should_stop(&state(100, 100)), Some(StopReason::Cancelled));
        token.reset();
        assert_eq!(t.should_stop(&state(100, 0)), Some(StopReason::GenerationLimit));
    }

    #[test]
    fn test_cancel_token_across_threads() {
        let token = CancelToken::new();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel())
            .join()
            .expect("thread");
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_stop_reason_display() {
        assert_eq!(StopReason::Cancelled.to_string(), "cancelled");
        assert!(StopReason::Stagnation.to_string().contains("improvement"));
    }
}

//! Error types for tourga.
//!
//! Every fallible operation returns `Result<T, GaError>` instead of
//! panicking. Only [`GaError::TooFewCities`] and the city-entry errors are
//! meant to reach a user; invariant violations indicate an engine defect.

use thiserror::Error;

/// Result type alias for tourga operations.
pub type GaResult<T> = Result<T, GaError>;

/// Unified error type for all tourga operations.
#[derive(Debug, Error)]
pub enum GaError {
    // ===== Lifecycle =====
    /// Attempted to start a search with fewer than the required cities.
    #[error("Need at least {required} cities to search, have {found}")]
    TooFewCities {
        /// Cities currently placed.
        found: usize,
        /// Minimum required.
        required: usize,
    },

    /// The requested action is not allowed in the current phase.
    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        /// Phase the controller was in.
        from: crate::search::Phase,
        /// Action that was attempted.
        action: &'static str,
    },

    // ===== City Input =====
    /// Distance matrix requested for fewer than two cities.
    #[error("Distance matrix needs at least 2 cities, got {found}")]
    InsufficientCities {
        /// Number of cities supplied.
        found: usize,
    },

    /// A city already exists at these coordinates.
    #[error("City at ({x}, {y}) already exists")]
    DuplicateCity {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
    },

    /// The configured maximum number of cities is already placed.
    #[error("City limit of {limit} reached")]
    CityLimitReached {
        /// Configured limit.
        limit: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("City {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending city.
        index: usize,
    },

    // ===== Operator Errors =====
    /// A crossover cut point outside `[0, len)`.
    #[error("Cut point {cut_point} out of range for tour of {len} genes")]
    InvalidCutPoint {
        /// Requested cut point.
        cut_point: usize,
        /// Tour length in genes.
        len: usize,
    },

    /// An operator produced a tour that is not a permutation.
    #[error("Invariant violation in {context}: {detail}")]
    InvariantViolation {
        /// Operator or stage that produced the tour.
        context: String,
        /// Full diagnostic (inputs and outputs).
        detail: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GaError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invariant violation error.
    #[must_use]
    pub fn invariant(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            context: context.into(),
            detail: detail.into(),
        }
    }

    /// Check if this error is an engine defect rather than a caller mistake.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}

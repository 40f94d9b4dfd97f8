//! Search configuration with YAML loading and validation.
//!
//! Mistakes are caught in three layers:
//! - serde rejects unknown keys and wrong types
//! - `validator` enforces field ranges
//! - `validate_semantic` checks cross-field constraints
//!
//! Size-dependent parameters stay optional until the city count is known;
//! [`SearchConfig::resolve`] turns them into a [`ResolvedConfig`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{GaError, GaResult};
use crate::ga::mutation::MutationMode;
use crate::ga::termination::TerminationController;

/// Tunable parameters of a genetic search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Individuals per generation. `None` means N².
    #[validate(range(min = 1))]
    #[serde(default)]
    pub pop_size: Option<usize>,

    /// Per-child mutation probability.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,

    /// Generation cap.
    #[validate(range(min = 1))]
    #[serde(default = "default_max_generations")]
    pub max_generations: u64,

    /// Generations without improvement before stopping. `None` means `min(N², 300)`.
    #[serde(default)]
    pub max_no_improve: Option<usize>,

    /// Mutation operator.
    #[serde(default)]
    pub mutation_mode: MutationMode,

    /// Random swaps per initial individual. `None` means `pop_size`.
    #[serde(default)]
    pub swaps: Option<usize>,

    /// Maximum number of cities accepted while building.
    #[validate(range(min = 2))]
    #[serde(default = "default_max_cities")]
    pub max_cities: usize,

    /// Seed for the search RNG.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_mutation_rate() -> f64 {
    0.7
}

const fn default_max_generations() -> u64 {
    100_000
}

const fn default_max_cities() -> usize {
    50
}

const fn default_seed() -> u64 {
    42
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pop_size: None,
            mutation_rate: default_mutation_rate(),
            max_generations: default_max_generations(),
            max_no_improve: None,
            mutation_mode: MutationMode::default(),
            swaps: None,
            max_cities: default_max_cities(),
            seed: default_seed(),
        }
    }
}

impl SearchConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> GaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> GaResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Run field and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for range failures and `Config` for semantic ones.
    pub fn check(&self) -> GaResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }

    /// Validate constraints that span fields or that `validator` cannot express.
    fn validate_semantic(&self) -> GaResult<()> {
        if !self.mutation_rate.is_finite() {
            return Err(GaError::config("mutation_rate must be finite"));
        }
        if self.pop_size == Some(1) {
            // A single individual cannot form distinct parent pairs.
            return Err(GaError::config("pop_size must be at least 2"));
        }
        Ok(())
    }

    /// Fix the size-dependent defaults for `city_count` cities.
    #[must_use]
    pub fn resolve(&self, city_count: usize) -> ResolvedConfig {
        let pop_size = self
            .pop_size
            .unwrap_or_else(|| city_count.saturating_mul(city_count))
            .max(2);
        let max_no_improve = self
            .max_no_improve
            .unwrap_or_else(|| TerminationController::default_max_no_improve(city_count));

        ResolvedConfig {
            pop_size,
            mutation_rate: self.mutation_rate,
            max_generations: self.max_generations,
            max_no_improve: max_no_improve as u64,
            mutation_mode: self.mutation_mode,
            swaps: self.swaps.unwrap_or(pop_size),
            seed: self.seed,
        }
    }
}

/// Configuration with every size-dependent parameter fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// Individuals per generation.
    pub pop_size: usize,
    /// Per-child mutation probability.
    pub mutation_rate: f64,
    /// Generation cap.
    pub max_generations: u64,
    /// Stagnation cap.
    pub max_no_improve: u64,
    /// Mutation operator.
    pub mutation_mode: MutationMode,
    /// Random swaps per initial individual.
    pub swaps: usize,
    /// RNG seed.
    pub seed: u64,
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the population size.
    #[must_use]
    pub const fn pop_size(mut self, pop_size: usize) -> Self {
        self.config.pop_size = Some(pop_size);
        self
    }

    /// Set the mutation probability.
    #[must_use]
    pub const fn mutation_rate(mut self, rate: f64) -> Self {
        self.config.mutation_rate = rate;
        self
    }

    /// Set the generation cap.
    #[must_use]
    pub const fn max_generations(mut self, max: u64) -> Self {
        self.config.max_generations = max;
        self
    }

    /// Set the stagnation cap.
    #[must_use]
    pub const fn max_no_improve(mut self, max: usize) -> Self {
        self.config.max_no_improve = Some(max);
        self
    }

    /// Set the mutation operator.
    #[must_use]
    pub const fn mutation_mode(mut self, mode: MutationMode) -> Self {
        self.config.mutation_mode = mode;
        self
    }

    /// Set the initial swap count.
    #[must_use]
    pub const fn swaps(mut self, swaps: usize) -> Self {
        self.config.swaps = Some(swaps);
        self
    }

    /// Set the city limit.
    #[must_use]
    pub const fn max_cities(mut self, max: usize) -> Self {
        self.config.max_cities = max;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> SearchConfig {
        self.config
    }
}

//! `SearchController`: one generation per `step()`.

use tracing::{debug, error, info, trace, warn};

use super::{Improvement, Phase, SearchSnapshot, SearchState, StepOutcome};
use crate::config::{ResolvedConfig, SearchConfig};
use crate::engine::guard::PermutationGuard;
use crate::engine::rng::TourRng;
use crate::error::{GaError, GaResult};
use crate::ga::crossover::cross_individuals;
use crate::ga::distance::{City, DistanceMatrix};
use crate::ga::individual::{Individual, Population};
use crate::ga::init::initialize;
use crate::ga::mutation::mutate;
use crate::ga::selection::{select_parent, select_survivors};
use crate::ga::termination::{CancelToken, StopReason, TerminationController};

/// Cities needed before a search can start.
const MIN_CITIES: usize = 2;

/// Owns every piece of search state; no globals.
#[derive(Debug, Clone)]
pub struct SearchController {
    config: SearchConfig,
    cities: Vec<City>,
    // Present while Searching or Finished.
    run: Option<Run>,
    population: Population,
    state: SearchState,
    history: Vec<f64>,
    rng: TourRng,
    cancel: CancelToken,
    stop_reason: Option<StopReason>,
}

/// Data fixed for the lifetime of one search.
#[derive(Debug, Clone)]
struct Run {
    matrix: DistanceMatrix,
    resolved: ResolvedConfig,
    termination: TerminationController,
}

impl SearchController {
    /// Create an idle controller.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        let rng = TourRng::new(config.seed);
        Self {
            config,
            cities: Vec::new(),
            run: None,
            population: Vec::new(),
            state: SearchState::default(),
            history: Vec::new(),
            rng,
            cancel: CancelToken::new(),
            stop_reason: None,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Enter `Building` with an empty city list.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` while a search is running.
    pub fn begin_building(&mut self) -> GaResult<()> {
        if self.state.phase == Phase::Searching {
            return Err(self.invalid("begin building"));
        }
        self.discard();
        self.cities.clear();
        self.state.phase = Phase::Building;
        info!("building: accepting cities");
        Ok(())
    }

    /// Place a city. Returns its index.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside `Building`, `NonFiniteCoordinate`,
    /// `CityLimitReached`, or `DuplicateCity`.
    pub fn add_city(&mut self, city: City) -> GaResult<usize> {
        if self.state.phase != Phase::Building {
            return Err(self.invalid("add a city"));
        }
        let index = self.cities.len();
        if !city.is_finite() {
            return Err(GaError::NonFiniteCoordinate { index });
        }
        if index >= self.config.max_cities {
            return Err(GaError::CityLimitReached {
                limit: self.config.max_cities,
            });
        }
        if self.cities.contains(&city) {
            return Err(GaError::DuplicateCity {
                x: city.x,
                y: city.y,
            });
        }
        self.cities.push(city);
        debug!(index, x = city.x, y = city.y, "city added");
        Ok(index)
    }

    /// Leave `Building` and create the initial population.
    ///
    /// # Errors
    ///
    /// `TooFewCities` with fewer than two cities (the phase stays
    /// `Building`), `InvalidTransition` outside `Building`, or a
    /// configuration error.
    pub fn start(&mut self) -> GaResult<()> {
        if self.state.phase != Phase::Building {
            return Err(self.invalid("start searching"));
        }
        if self.cities.len() < MIN_CITIES {
            warn!(found = self.cities.len(), "not enough cities to search");
            return Err(GaError::TooFewCities {
                found: self.cities.len(),
                required: MIN_CITIES,
            });
        }
        self.config.check()?;

        let matrix = DistanceMatrix::build(&self.cities)?;
        let resolved = self.config.resolve(self.cities.len());
        let termination = TerminationController::new(
            resolved.max_generations,
            resolved.max_no_improve,
            self.cancel.clone(),
        );

        self.cancel.reset();
        self.rng = TourRng::new(resolved.seed);
        self.population = initialize(&matrix, resolved.pop_size, resolved.swaps, &mut self.rng);
        self.state = SearchState {
            phase: Phase::Searching,
            ..SearchState::default()
        };
        self.history.clear();
        self.stop_reason = None;
        self.run = Some(Run {
            matrix,
            resolved,
            termination,
        });

        info!(
            cities = self.cities.len(),
            pop_size = resolved.pop_size,
            max_no_improve = resolved.max_no_improve,
            mode = %resolved.mutation_mode,
            seed = resolved.seed,
            "search started"
        );
        Ok(())
    }

    /// Run exactly one generation.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside `Searching`. `InvariantViolation` if an
    /// operator produced an invalid tour; the population is left as it was
    /// before the step.
    pub fn step(&mut self) -> GaResult<StepOutcome> {
        if self.state.phase != Phase::Searching {
            return Err(self.invalid("step"));
        }
        let Some(run) = self.run.as_ref() else {
            return Err(GaError::invariant("step", "searching without a distance matrix"));
        };

        if run.termination.cancel_token().is_cancelled() {
            return Ok(self.cancelled());
        }

        if run.matrix.len() <= MIN_CITIES {
            return Ok(self.exhaust());
        }

        let resolved = run.resolved;
        let offspring = match breed(&self.population, &run.matrix, &resolved, &mut self.rng) {
            Ok(offspring) => offspring,
            Err(err) => {
                error!(generation = self.state.generation, error = %err, "generation aborted");
                return Err(err);
            }
        };

        let mut combined = std::mem::take(&mut self.population);
        combined.extend(offspring);
        self.population = select_survivors(combined, resolved.pop_size);
        self.state.generation += 1;

        let improvement = self.record_best();
        trace!(
            generation = self.state.generation,
            best = self.state.best_length,
            no_improve = self.state.no_improve_count,
            "generation complete"
        );

        let stop = self
            .run
            .as_ref()
            .and_then(|run| run.termination.should_stop(&self.state));
        match stop {
            Some(StopReason::Cancelled) => Ok(self.cancelled()),
            Some(reason) => {
                self.finish(reason);
                Ok(self.outcome(improvement))
            }
            None => Ok(self.outcome(improvement)),
        }
    }

    /// Abort a running search and return to `Idle`.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` if no search is running.
    pub fn cancel(&mut self) -> GaResult<()> {
        if self.state.phase != Phase::Searching {
            return Err(self.invalid("cancel"));
        }
        self.discard();
        self.cities.clear();
        self.cancel.reset();
        info!("search cancelled");
        Ok(())
    }

    /// Step until the search leaves `Searching` or `max_steps` steps ran.
    ///
    /// Returns every improvement in order.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::step`].
    pub fn run_until_done(&mut self, max_steps: u64) -> GaResult<Vec<Improvement>> {
        let mut improvements = Vec::new();
        for _ in 0..max_steps {
            let outcome = self.step()?;
            let running = outcome.is_running();
            improvements.extend(outcome.improvement);
            if !running {
                break;
            }
        }
        Ok(improvements)
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Current counters.
    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Best tour length found, `+∞` before the first generation.
    #[must_use]
    pub const fn best_length(&self) -> f64 {
        self.state.best_length
    }

    /// Closed best tour starting and ending at city 0.
    #[must_use]
    pub fn best_tour(&self) -> Option<Vec<usize>> {
        self.best_individual().map(Individual::closed_tour)
    }

    /// Current generation.
    #[must_use]
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Placed cities.
    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Best length after each generation.
    #[must_use]
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Why the last search stopped.
    #[must_use]
    pub const fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Parameters of the current search.
    #[must_use]
    pub fn resolved_config(&self) -> Option<ResolvedConfig> {
        self.run.as_ref().map(|run| run.resolved)
    }

    /// Handle for cancelling from another thread.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    // =========================================================================
    // Checkpointing
    // =========================================================================

    /// Capture the complete search state.
    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            config: self.config.clone(),
            cities: self.cities.clone(),
            population: self.population.clone(),
            state: self.state.clone(),
            history: self.history.clone(),
            rng: self.rng.clone(),
            stop_reason: self.stop_reason,
        }
    }

    /// Replace the current state with `snapshot`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid, the cities cannot form a
    /// distance matrix, a running search has no population, or a stored
    /// tour is not a permutation. Stored lengths are recomputed and the
    /// population re-sorted. The controller is unchanged on error.
    pub fn restore(&mut self, mut snapshot: SearchSnapshot) -> GaResult<()> {
        snapshot.config.check()?;

        let run = match snapshot.state.phase {
            Phase::Searching | Phase::Finished => {
                let matrix = DistanceMatrix::build(&snapshot.cities)?;
                if snapshot.population.is_empty() {
                    return Err(GaError::invariant("restore", "empty population"));
                }
                let guard = PermutationGuard::new(matrix.len());
                for (i, individual) in snapshot.population.iter_mut().enumerate() {
                    guard
                        .check(&individual.genes)
                        .map_err(|v| v.into_error("restore", &format!("individual {i}")))?;
                    // Cached lengths are not trusted across a checkpoint.
                    individual.reevaluate(&matrix);
                }
                let pop_size = snapshot.population.len();
                snapshot.population = select_survivors(snapshot.population, pop_size);
                if snapshot.state.best_length.is_finite() {
                    snapshot.state.best_length = snapshot.population[0].length;
                }
                let resolved = snapshot.config.resolve(matrix.len());
                let termination = TerminationController::new(
                    resolved.max_generations,
                    resolved.max_no_improve,
                    self.cancel.clone(),
                );
                Some(Run {
                    matrix,
                    resolved,
                    termination,
                })
            }
            Phase::Idle | Phase::Building => None,
        };

        self.config = snapshot.config;
        self.cities = snapshot.cities;
        self.run = run;
        self.population = snapshot.population;
        self.state = snapshot.state;
        self.history = snapshot.history;
        self.rng = snapshot.rng;
        self.stop_reason = snapshot.stop_reason;
        info!(phase = %self.state.phase, generation = self.state.generation, "search restored");
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn invalid(&self, action: &'static str) -> GaError {
        GaError::InvalidTransition {
            from: self.state.phase,
            action,
        }
    }

    fn best_individual(&self) -> Option<&Individual> {
        self.population
            .iter()
            .min_by(|a, b| a.length.total_cmp(&b.length))
    }

    /// Update `best_length` and the stagnation counter from the sorted population.
    fn record_best(&mut self) -> Option<Improvement> {
        let best = self.population.first()?;
        let current = best.length;
        self.history.push(current);

        if current < self.state.best_length {
            let improvement = Improvement {
                previous: self.state.best_length,
                current,
                best_tour: best.closed_tour(),
                generation: self.state.generation,
            };
            self.state.best_length = current;
            self.state.no_improve_count = 0;
            debug!(
                generation = self.state.generation,
                previous = improvement.previous,
                current,
                "improved"
            );
            Some(improvement)
        } else {
            self.state.no_improve_count += 1;
            None
        }
    }

    /// Single-gene tours have exactly one candidate; report it and stop.
    fn exhaust(&mut self) -> StepOutcome {
        self.state.generation += 1;
        let improvement = self.record_best();
        self.finish(StopReason::Exhausted);
        self.outcome(improvement)
    }

    fn finish(&mut self, reason: StopReason) {
        self.state.phase = Phase::Finished;
        self.stop_reason = Some(reason);
        info!(
            generation = self.state.generation,
            best = self.state.best_length,
            %reason,
            "search finished"
        );
    }

    fn cancelled(&mut self) -> StepOutcome {
        let generation = self.state.generation;
        self.discard();
        self.cities.clear();
        self.cancel.reset();
        info!(generation, "search cancelled by token");
        StepOutcome {
            generation,
            improvement: None,
            phase: Phase::Idle,
            stop_reason: Some(StopReason::Cancelled),
        }
    }

    /// Drop all per-search data and go to `Idle`.
    fn discard(&mut self) {
        self.run = None;
        self.population.clear();
        self.history.clear();
        self.state = SearchState::default();
        self.stop_reason = None;
    }

    fn outcome(&self, improvement: Option<Improvement>) -> StepOutcome {
        StepOutcome {
            generation: self.state.generation,
            improvement,
            phase: self.state.phase,
            stop_reason: self.stop_reason,
        }
    }
}

/// Produce one generation of offspring, two children per parent pair.
///
/// An odd `pop_size` yields `pop_size + 1` children. Every mutated child
/// is re-checked; crossover checks its own output.
fn breed(
    population: &[Individual],
    matrix: &DistanceMatrix,
    resolved: &ResolvedConfig,
    rng: &mut TourRng,
) -> GaResult<Population> {
    let guard = PermutationGuard::new(matrix.len());
    let mut offspring = Vec::with_capacity(resolved.pop_size + 1);
    let mut count = 0;
    while count < resolved.pop_size {
        let (Some(parent1), Some(parent2)) =
            (select_parent(population, rng), select_parent(population, rng))
        else {
            return Err(GaError::invariant("selection", "empty population"));
        };

        let (child1, child2) = cross_individuals(parent1, parent2, rng)?;
        for mut genes in [child1, child2] {
            if rng.gen_bool(resolved.mutation_rate) {
                let before = genes.clone();
                mutate(&mut genes, resolved.mutation_mode, rng);
                guard.check(&genes).map_err(|v| {
                    v.into_error(
                        "mutation",
                        &format!(
                            "mode={} before={before:?} after={genes:?}",
                            resolved.mutation_mode
                        ),
                    )
                })?;
            }
            offspring.push(Individual::new(genes, matrix));
        }
        count += 2;
    }
    Ok(offspring)
}

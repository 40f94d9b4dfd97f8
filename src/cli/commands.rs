//! CLI command handlers.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::process::ExitCode;

use tracing::{info, warn};

use crate::error::GaResult;
use crate::instance::TourInstance;
use crate::search::SearchController;

use super::output::{
    print_help, print_improvement, print_instance_header, print_search_result,
    print_verify_summary, print_version,
};
use super::{Args, Command};

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            instance_path,
            seed_override,
            max_steps,
            verbose: _,
        } => run_search(&instance_path, seed_override, max_steps),
        Command::Verify {
            instance_path,
            runs,
        } => verify_reproducibility(&instance_path, runs),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Search an instance and print every improvement as it happens.
#[must_use]
pub fn run_search(path: &Path, seed_override: Option<u64>, max_steps: Option<u64>) -> ExitCode {
    let instance = match TourInstance::from_yaml_file(path) {
        Ok(instance) => instance,
        Err(e) => {
            eprintln!("Error loading {}: {e}", path.display());
            return ExitCode::from(1);
        }
    };

    let mut config = instance.search.clone();
    if let Some(seed) = seed_override {
        config.seed = seed;
    }

    let mut controller = match instance.start_search_with(config) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };
    if let Some(resolved) = controller.resolved_config() {
        print_instance_header(&instance, &resolved);
    }

    let max_steps = max_steps.unwrap_or(u64::MAX);
    let mut steps = 0;
    while steps < max_steps {
        match controller.step() {
            Ok(outcome) => {
                if let Some(improvement) = &outcome.improvement {
                    print_improvement(improvement, instance.optimality_gap(improvement.current));
                }
                if !outcome.is_running() {
                    break;
                }
            }
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(1);
            }
        }
        steps += 1;
    }

    print_search_result(&controller, &instance);
    ExitCode::SUCCESS
}

/// Outcome of repeated runs of the same instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifySummary {
    /// Hash of the first run.
    pub reference_hash: u64,
    /// Hash of every run, in order.
    pub run_hashes: Vec<u64>,
    /// Whether every run matched the first.
    pub identical: bool,
}

/// Hash of a finished search: generation count, best-length history, best tour.
#[must_use]
pub fn trajectory_hash(controller: &SearchController) -> u64 {
    let mut hasher = DefaultHasher::new();
    controller.state().generation.hash(&mut hasher);
    for length in controller.history() {
        length.to_bits().hash(&mut hasher);
    }
    controller.best_tour().hash(&mut hasher);
    hasher.finish()
}

/// Fewest runs that make a comparison meaningful.
pub const MIN_VERIFY_RUNS: usize = 2;

/// Run `instance` to completion `runs` times and compare trajectory hashes.
///
/// `runs` is raised to [`MIN_VERIFY_RUNS`].
///
/// # Errors
///
/// Returns the first search error.
pub fn verify_instance(instance: &TourInstance, runs: usize) -> GaResult<VerifySummary> {
    let runs = runs.max(MIN_VERIFY_RUNS);
    let mut run_hashes = Vec::with_capacity(runs);
    for run in 0..runs {
        let mut controller = instance.start_search()?;
        controller.run_until_done(u64::MAX)?;
        let hash = trajectory_hash(&controller);
        info!(run, hash, generations = controller.state().generation, "verification run");
        run_hashes.push(hash);
    }

    let reference_hash = run_hashes.first().copied().unwrap_or_default();
    let identical = run_hashes.iter().all(|&h| h == reference_hash);
    if !identical {
        warn!(?run_hashes, "trajectories diverged");
    }
    Ok(VerifySummary {
        reference_hash,
        run_hashes,
        identical,
    })
}

/// Verify that an instance reproduces exactly across runs.
#[must_use]
pub fn verify_reproducibility(path: &Path, runs: usize) -> ExitCode {
    let runs = runs.max(MIN_VERIFY_RUNS);
    println!("Verifying reproducibility: {}", path.display());
    println!("Runs: {runs}\n");

    let result = TourInstance::from_yaml_file(path).and_then(|i| verify_instance(&i, runs));
    match result {
        Ok(summary) => {
            print_verify_summary(&summary);
            if summary.identical {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

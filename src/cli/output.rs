//! CLI output formatting.

use crate::config::ResolvedConfig;
use crate::ga::termination::StopReason;
use crate::instance::TourInstance;
use crate::search::{Improvement, SearchController};

use super::commands::VerifySummary;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Version line, with the git hash when the build captured one.
#[must_use]
pub fn version_string() -> String {
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => {
            let short = hash.get(..7).unwrap_or(hash);
            format!("tourga {} ({short})", env!("CARGO_PKG_VERSION"))
        }
        _ => format!("tourga {}", env!("CARGO_PKG_VERSION")),
    }
}

/// Print version information.
pub fn print_version() {
    println!("{}", version_string());
}

/// Print help message.
pub fn print_help() {
    println!(
        r"tourga - anytime genetic search for Euclidean tours

USAGE:
    tourga <COMMAND> [OPTIONS]

COMMANDS:
    run <instance.yaml>         Search an instance, printing each improvement
        --seed <N>              Override the instance seed
        --max-steps <N>         Stop after N generations at most
        -v, --verbose           Enable debug logging

    verify <instance.yaml>      Check that repeated runs give identical trajectories
        --runs <N>              Number of runs (default: 3)

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    tourga run instances/square.yaml
    tourga run instances/circle12.yaml --seed 7 --max-steps 500
    tourga verify instances/circle12.yaml --runs 5

Logging honours RUST_LOG (default: warn).
"
    );
}

/// Format a tour as `0 → 3 → 1 → … → 0`.
#[must_use]
pub fn format_tour(tour: &[usize]) -> String {
    tour.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" → ")
}

/// One line per improvement.
#[must_use]
pub fn format_improvement(improvement: &Improvement, gap: Option<f64>) -> String {
    let gap = gap.map_or_else(String::new, |g| format!("  gap {:>6.2}%", g * 100.0));
    format!(
        "gen {:>7}  length {:>12.4}{gap}  {}",
        improvement.generation,
        improvement.current,
        format_tour(&improvement.best_tour)
    )
}

/// Print the instance banner.
pub fn print_instance_header(instance: &TourInstance, resolved: &ResolvedConfig) {
    println!("{RULE}");
    println!("Instance: {}", instance.meta.id);
    if !instance.meta.description.is_empty() {
        println!("          {}", instance.meta.description);
    }
    println!("Cities:   {}", instance.city_count());
    println!(
        "Search:   pop {}  mutation {} @ {:.2}  patience {}  seed {}",
        resolved.pop_size,
        resolved.mutation_mode,
        resolved.mutation_rate,
        resolved.max_no_improve,
        resolved.seed
    );
    println!("{RULE}\n");
}

/// Print one improvement.
pub fn print_improvement(improvement: &Improvement, gap: Option<f64>) {
    println!("{}", format_improvement(improvement, gap));
}

/// Print the final result of a run.
pub fn print_search_result(controller: &SearchController, instance: &TourInstance) {
    let reason = controller
        .stop_reason()
        .map_or_else(|| "step limit reached".to_string(), |r: StopReason| r.to_string());

    println!("\n{RULE}");
    println!("Generations: {}", controller.state().generation);
    println!("Stopped:     {reason}");
    println!(
        "Best length: {:.4} {}",
        controller.best_length(),
        instance.meta.units
    );
    if let Some(gap) = instance.optimality_gap(controller.best_length()) {
        println!("Gap:         {:.2}%", gap * 100.0);
    }
    if let Some(tour) = controller.best_tour() {
        println!("Tour:        {}", format_tour(&tour));
    }
    println!("{RULE}");
}

/// Print a reproducibility summary.
pub fn print_verify_summary(summary: &VerifySummary) {
    let status = if summary.identical { "PASSED" } else { "FAILED" };
    let sym = if summary.identical { "✓" } else { "✗" };

    println!("{RULE}");
    println!("Reproducibility Check");
    println!("{RULE}\n");
    println!("  Runs:           {}", summary.run_hashes.len());
    println!("  Identical:      {}", summary.identical);
    println!("  Reference Hash: {:016x}", summary.reference_hash);

    if summary.run_hashes.len() > 1 {
        println!("\n  Run Hashes:");
        for (i, hash) in summary.run_hashes.iter().enumerate() {
            let match_sym = if *hash == summary.reference_hash { "=" } else { "!" };
            println!("    Run {}: {hash:016x} {match_sym}", i + 1);
        }
    }

    println!("\n{RULE}");
    println!("{sym} Result: {status}");
    println!("{RULE}\n");
}

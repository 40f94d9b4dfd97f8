//! Command-line host for the search engine.
//!
//! All logic lives here rather than in `main.rs` so it can be tested;
//! `main` only parses arguments, installs logging, and calls [`run_cli`].

mod args;
mod commands;
mod logging;
mod output;

pub use args::{Args, Command};
pub use commands::{
    run_cli, run_search, trajectory_hash, verify_instance, verify_reproducibility, VerifySummary,
    MIN_VERIFY_RUNS,
};
pub use logging::init_logging;
pub use output::{format_improvement, format_tour, print_help, print_version, version_string};

//! tourga CLI - anytime genetic tour search
//!
//! Command-line host for running and verifying searches.

use std::process::ExitCode;

use tourga::cli::{init_logging, run_cli, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose());
    run_cli(args)
}

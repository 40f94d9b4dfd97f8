//! CLI argument parsing.
//!
//! Hand-rolled so that parsing is a pure function of a string list and can
//! be tested without touching the process environment.

use std::path::PathBuf;

/// Default number of runs for `verify`.
const DEFAULT_VERIFY_RUNS: usize = 3;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search an instance, printing every improvement.
    Run {
        /// Path to the instance YAML file.
        instance_path: PathBuf,
        /// Optional seed override.
        seed_override: Option<u64>,
        /// Optional cap on the number of steps.
        max_steps: Option<u64>,
        /// Enable debug logging.
        verbose: bool,
    },
    /// Run an instance repeatedly and compare trajectories.
    Verify {
        /// Path to the instance YAML file.
        instance_path: PathBuf,
        /// Number of runs.
        runs: usize,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Whether debug logging was requested.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        matches!(self.command, Command::Run { verbose: true, .. })
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "verify" => Self::parse_verify_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires an instance path");
            return Command::Help;
        }

        let mut seed_override = None;
        let mut max_steps = None;
        let mut verbose = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    seed_override = args.get(i + 1).and_then(|s| s.parse().ok());
                    i += 2;
                }
                "--max-steps" => {
                    max_steps = args.get(i + 1).and_then(|s| s.parse().ok());
                    i += 2;
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                other => {
                    eprintln!("Ignoring unknown option: {other}");
                    i += 1;
                }
            }
        }

        Command::Run {
            instance_path: PathBuf::from(&args[2]),
            seed_override,
            max_steps,
            verbose,
        }
    }

    fn parse_verify_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'verify' command requires an instance path");
            return Command::Help;
        }

        let mut runs = DEFAULT_VERIFY_RUNS;
        if args.get(3).map(String::as_str) == Some("--runs") {
            if let Some(n) = args.get(4).and_then(|s| s.parse().ok()) {
                runs = n;
            }
        }

        Command::Verify {
            instance_path: PathBuf::from(&args[2]),
            runs,
        }
    }
}

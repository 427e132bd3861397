//! # charter CLI entry point
//!
//! Parses command-line arguments, loads the optional configuration file,
//! installs the tracing subscriber and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use charter_cli::check::{run_check, CheckArgs};
use charter_cli::config::{CliConfig, OutputFormat};
use charter_cli::replay::{run_replay, ReplayArgs};
use charter_cli::vote::{run_majority, run_quorum, MajorityArgs, QuorumArgs};

/// Constitutional rulebook toolchain.
///
/// Evaluates votes and quorums, checks standalone constitutional rules on
/// YAML/JSON records, and replays legislative procedures with an auditable
/// history digest.
#[derive(Parser, Debug)]
#[command(name = "charter", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format, overriding the configuration file.
    #[arg(long, value_enum, global = true)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a vote against a majority requirement.
    Majority(MajorityArgs),

    /// Check attendance against the statutory number of members.
    Quorum(QuorumArgs),

    /// Run one standalone constitutional rule on an input record.
    Check(CheckArgs),

    /// Drive a procedure through a scenario file.
    Replay(ReplayArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("charter CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    if let Some(output) = cli.output {
        config.output = output;
    }

    let result = match cli.command {
        Commands::Majority(args) => run_majority(&args, &config),
        Commands::Quorum(args) => run_quorum(&args, &config),
        Commands::Check(args) => run_check(&args, &config),
        Commands::Replay(args) => run_replay(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

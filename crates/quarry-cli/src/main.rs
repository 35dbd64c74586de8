//! Quarry CLI - runs hunter/prey simulations with one process per agent.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "quarry")]
#[command(author, version, about = "Quarry - hunters and preys on a grid, one process per agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: quarry.toml in the current or a parent directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation to completion
    Run {
        /// Scenario file, or "-" for stdin (default: stdin)
        scenario: Option<String>,

        /// Do not print grid frames
        #[arg(long)]
        no_render: bool,

        /// Summary printed to stderr when the run ends
        #[arg(short, long, value_enum, default_value_t = SummaryFormat::Text)]
        summary: SummaryFormat,
    },

    /// Parse and validate a scenario without spawning agents
    Check {
        /// Scenario file, or "-" for stdin (default: stdin)
        scenario: Option<String>,
    },

    /// Write a default quarry.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Init { .. } => Config::default(),
        _ => Config::load(cli.config.as_deref())?,
    };
    init_tracing(&config, cli.verbose);

    match cli.command {
        Commands::Run {
            scenario,
            no_render,
            summary,
        } => commands::run::run(&config, scenario.as_deref(), no_render, summary),
        Commands::Check { scenario } => commands::check::run(scenario.as_deref()),
        Commands::Init { path } => commands::init::run(path),
    }
}

/// Logs go to stderr; stdout carries nothing but rendered frames.
fn init_tracing(config: &Config, verbose: bool) {
    let fallback = if verbose { "debug" } else { config.log.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

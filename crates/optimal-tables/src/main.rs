//! CLI entry point for the table generator.
//!
//! Usage:
//!   optimal-tables operator [options]
//!   optimal-tables switch [options]
//!
//! Options:
//!   --out <dir>                Output directory (default: optimal / switch)
//!   --min <n>, --max <n>       Operator component range (default: -99..=99)
//!   --rows <n>, --cols <n>     Switch grid size (default: 4x4)
//!   --progress-interval <n>    States between progress lines (default: 10000)
//!   --verify                   Re-read the written table and compare
//!
//! The JSON run summary goes to stdout; logs go to stderr (`RUST_LOG`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use optimal_tables::{run, GridShape, Puzzle, RunConfig, RunSummary, TripleBounds};

#[derive(Parser)]
#[command(name = "optimal-tables")]
#[command(about = "Precompute minimum move counts for every puzzle state")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tabulate the operator puzzle, one file per first number
    Operator {
        /// Output directory
        #[arg(long, value_name = "DIR", default_value = "optimal")]
        out: PathBuf,

        /// Smallest allowed component value
        #[arg(long, default_value = "-99", allow_negative_numbers = true)]
        min: i32,

        /// Largest allowed component value
        #[arg(long, default_value = "99", allow_negative_numbers = true)]
        max: i32,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Tabulate the switch puzzle into a single file
    Switch {
        /// Output directory
        #[arg(long, value_name = "DIR", default_value = "switch")]
        out: PathBuf,

        /// Grid rows
        #[arg(long, default_value = "4")]
        rows: usize,

        /// Grid columns
        #[arg(long, default_value = "4")]
        cols: usize,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// States between progress log lines (0 disables)
    #[arg(long, default_value = "10000")]
    progress_interval: usize,

    /// Re-read the written table and compare it with the computed one
    #[arg(long)]
    verify: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match try_main(cli) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("cannot encode run summary: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            eprintln!("Output is incomplete; discard it and re-run.");
            std::process::exit(1);
        }
    }
}

fn try_main(cli: Cli) -> Result<RunSummary> {
    let config = build_config(cli.command)?;
    run(&config).with_context(|| format!("table run into {}", config.output_dir.display()))
}

fn build_config(command: Commands) -> Result<RunConfig> {
    let (puzzle, out, common) = match command {
        Commands::Operator {
            out,
            min,
            max,
            common,
        } => {
            let bounds = TripleBounds::new(min, max).context("operator bounds")?;
            (Puzzle::Operator(bounds), out, common)
        }
        Commands::Switch {
            out,
            rows,
            cols,
            common,
        } => {
            let shape = GridShape::new(rows, cols).context("switch grid")?;
            (Puzzle::Switch(shape), out, common)
        }
    };

    Ok(RunConfig {
        puzzle,
        output_dir: out,
        progress_interval: common.progress_interval,
        verify: common.verify,
    })
}

//! CLI frontend for the Tickwork simulation kernel.

mod commands;
mod scenario;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::run::RunOptions;

#[derive(Parser)]
#[command(
    name = "tw",
    about = "Tickwork: a cooperative tick-driven motion and collision simulator",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and report final entity state
    Run {
        /// Scenario JSON file (default: built-in demo)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Number of ticks to run
        #[arg(short, long, default_value = "100")]
        ticks: u64,

        /// Milliseconds between ticks (overrides the scenario's setting)
        #[arg(short, long)]
        interval_ms: Option<f64>,

        /// Pace ticks with the wall clock instead of a fixed simulated step
        #[arg(long)]
        realtime: bool,

        /// Show the full event log
        #[arg(short, long)]
        verbose: bool,

        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in demo scenario as JSON
    Scenario {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            scenario,
            ticks,
            interval_ms,
            realtime,
            verbose,
            json,
        } => commands::run::run(&RunOptions {
            scenario: scenario.as_deref(),
            ticks,
            interval_ms,
            realtime,
            verbose,
            json,
        }),
        Commands::Scenario { output } => commands::scenario::run(output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

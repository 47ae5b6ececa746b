//! Bank survival CLI
//!
//! Runs the balance-sheet liquidation simulator over a withdrawal scenario
//! and prints the roll-forward table, per-period narrative and survival
//! indicator (or the whole run as JSON).

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::info;
use std::path::PathBuf;

mod config;
mod output;

use bank_survival_core_rs::{run_simulation, validate_result, BreachPolicy, SimulationConfig};
use config::Overrides;

/// Absolute tolerance used by `--verify`
const VERIFY_TOLERANCE: f64 = 1e-6;

#[derive(Parser, Debug)]
#[command(name = "bank-survival")]
#[command(about = "Bank balance-sheet liquidation and survival simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose logging (debug level unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a simulation
    Run {
        /// JSON config file (missing fields take defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Withdrawal list, separated by commas, semicolons or newlines
        #[arg(short, long, conflicts_with = "csv")]
        withdrawals: Option<String>,

        /// CSV file with a withdrawal column
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Column holding withdrawals in the CSV file
        #[arg(long, default_value = "withdrawal")]
        column: String,

        /// Minimum cash floor restored after each withdrawal
        #[arg(long)]
        min_cash: Option<f64>,

        /// Breach policy (ratio, funding)
        #[arg(short, long)]
        policy: Option<BreachPolicy>,

        /// Halt on a withdrawal the listed assets cannot fund
        #[arg(long)]
        strict: bool,

        /// Print the run as JSON
        #[arg(long)]
        json: bool,

        /// Audit the result (conservation, balance check, priority exclusion)
        #[arg(long)]
        verify: bool,
    },

    /// Print the default configuration as JSON
    Defaults,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Run {
            config,
            withdrawals,
            csv,
            column,
            min_cash,
            policy,
            strict,
            json,
            verify,
        } => {
            let overrides = Overrides {
                withdrawals,
                csv,
                column,
                min_cash,
                policy,
                strict,
            };
            let config = config::resolve(config.as_deref(), &overrides)?;
            info!("Running {} withdrawal periods", config.withdrawals.len());

            let result = run_simulation(&config)?;

            if verify {
                validate_result(&result, &config, VERIFY_TOLERANCE)?;
            }

            if json {
                output::print_json(&config, &result)?;
            } else {
                output::print_human(&config, &result);
                if verify {
                    println!("{}", "Result audit passed".green());
                }
            }
        }
        Commands::Defaults => {
            println!("{}", serde_json::to_string_pretty(&SimulationConfig::default())?);
        }
    }

    Ok(())
}

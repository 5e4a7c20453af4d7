mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use clap::Parser;
use helpar::engine::progress::ProgressReporter;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("🚀 helpar CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let progress_handler = if cli.quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let command_result = match cli.command {
        Commands::Bimodality(args) => {
            info!("Dispatching to 'bimodality' command.");
            commands::bimodality::run(args, &reporter)
        }
        Commands::Correlation(args) => {
            info!("Dispatching to 'correlation' command.");
            commands::correlation::run(args, &reporter)
        }
        Commands::Stiffness(args) => {
            info!("Dispatching to 'stiffness' command.");
            commands::stiffness::run(args, &reporter)
        }
        Commands::Averages(args) => {
            info!("Dispatching to 'averages' command.");
            commands::averages::run(args, &reporter)
        }
        Commands::Histogram(args) => {
            info!("Dispatching to 'histogram' command.");
            commands::histogram::run(args, &reporter)
        }
    };

    match &command_result {
        Ok(_) => {
            info!("✅ Command completed successfully.");
            if !cli.quiet {
                println!("✅ Command completed successfully.");
            }
        }
        Err(e) => {
            error!("❌ Command failed: {}", e);
        }
    }

    command_result
}

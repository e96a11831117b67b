//! The Stardrift binary: load configuration, set up logging, and run the
//! flythrough. Exits 0 on a clean shutdown and 1 on any error.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use stardrift_app::AppError;
use stardrift_config::{CliArgs, Config, default_config_dir};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = match Config::load_or_create(&config_dir).map_err(AppError::Config) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not up yet, so this goes straight to stderr.
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    stardrift_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    info!("Stardrift starting up");

    match stardrift_app::run(config) {
        Ok(()) => {
            info!("Stardrift shut down cleanly");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Stardrift exited with error: {e}");
            ExitCode::FAILURE
        }
    }
}

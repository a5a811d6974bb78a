//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `endpoint_checker` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Exit codes
//!
//! All core functionality is implemented in the library crate.

use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use endpoint_checker::initialization::{init_crypto_provider, init_logger_with};
use endpoint_checker::{load_settings, run_check, ConfigError, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from the working directory, then from next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    let settings = match load_settings(&opt.config) {
        Ok(settings) => settings,
        Err(e) => {
            println!("Error: {e}");
            process::exit(1);
        }
    };

    let mut stdout = io::stdout();
    match run_check(&settings, opt.mode(), &mut stdout).await {
        Ok(report) => {
            let code = opt.fail_on.exit_code(report.failed());
            if code != 0 {
                let _ = stdout.flush();
                process::exit(code);
            }
            Ok(())
        }
        Err(e) => {
            if let Some(config_error) = e.downcast_ref::<ConfigError>() {
                println!("Error: {config_error}");
            } else {
                eprintln!("endpoint_checker error: {:#}", e);
            }
            let _ = stdout.flush();
            process::exit(1);
        }
    }
}

//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and for selecting how a run delivers its report.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::DEFAULT_CONFIG_FILE;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Exit code policy for completed runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 once the run completes
    Never,
    /// Exit 2 when at least one probe failed
    AnyFailure,
}

impl FailOn {
    /// Exit code for a completed run with `failed` failing probes.
    pub fn exit_code(self, failed: usize) -> i32 {
        match self {
            FailOn::Never => 0,
            FailOn::AnyFailure if failed > 0 => 2,
            FailOn::AnyFailure => 0,
        }
    }
}

/// Where the rendered report goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Print the report to standard output, never send email
    Verbose,
    /// Send the report by email, falling back to standard output
    Normal,
}

impl RunMode {
    /// Maps the `--verbose` flag onto a mode.
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            RunMode::Verbose
        } else {
            RunMode::Normal
        }
    }
}

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "endpoint_checker",
    version,
    about = "Probes the configured URLs once and reports every endpoint that did not answer 2xx."
)]
pub struct Opt {
    /// Print the report to stdout instead of sending it by email
    #[arg(short, long)]
    pub verbose: bool,

    /// JSON settings file (Urls, TimeoutSeconds, Email)
    #[arg(long, value_parser, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Exit code policy: never|any-failure
    #[arg(long, value_enum, default_value_t = FailOn::Never)]
    pub fail_on: FailOn,
}

impl Opt {
    /// Run mode selected by the flags.
    pub fn mode(&self) -> RunMode {
        RunMode::from_verbose(self.verbose)
    }
}

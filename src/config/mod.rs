//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, report column widths, sentinels)
//! - CLI option types and parsing
//! - The JSON settings file model and its validation

mod constants;
mod settings;
mod types;

// Re-export all constants
pub use constants::*;
pub use settings::{load_settings, resolve_config_path, EmailConfig, UrlConfig};
pub use types::{FailOn, LogFormat, LogLevel, Opt, RunMode};

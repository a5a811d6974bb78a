//! Error handling and outcome statistics.
//!
//! This module provides:
//! - Error type definitions (configuration, initialization, delivery)
//! - Categorization of request errors into probe error kinds
//! - Per-run outcome counters
//!
//! Only configuration and initialization errors abort a run. Probe errors
//! become report rows; delivery errors fall back to stdout.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, root_cause_message};
pub use stats::ProbeStats;
pub use types::{ConfigError, DeliveryError, InitializationError, ProbeErrorKind};

//! Configuration constants.
//!
//! This module defines the defaults of the settings file, the fixed geometry of
//! the failure report and the sentinel values used in the status column.

// Settings file defaults
/// Default settings file name, resolved against the working directory first
/// and the executable's directory second.
pub const DEFAULT_CONFIG_FILE: &str = "appsettings.json";
/// Per-request timeout in seconds when `TimeoutSeconds` is absent
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// SMTP port when `Email.SmtpPort` is absent
pub const DEFAULT_SMTP_PORT: u16 = 25;
/// Email subject when `Email.Subject` is absent
pub const DEFAULT_EMAIL_SUBJECT: &str = "URL Check Results";

/// Environment variable that overrides `Email.Password`.
pub const SMTP_PASSWORD_ENV: &str = "ENDPOINT_CHECKER_SMTP_PASSWORD";

/// User-Agent sent with every probe.
pub const DEFAULT_USER_AGENT: &str = concat!("endpoint_checker/", env!("CARGO_PKG_VERSION"));

// Well-known SMTP ports
/// Plain SMTP relay port (STARTTLS when offered)
pub const SMTP_PORT_RELAY: u16 = 25;
/// Submission port (STARTTLS required)
pub const SMTP_PORT_SUBMISSION: u16 = 587;
/// Submission over implicit TLS
pub const SMTP_PORT_SUBMISSIONS: u16 = 465;

// Report geometry, measured in chars
/// Width of the URL column
pub const URL_COLUMN_WIDTH: usize = 61;
/// Width of the Status column
pub const STATUS_COLUMN_WIDTH: usize = 10;
/// Width of the Description column; also the length every ERROR description
/// is cut to when the failure is recorded
pub const DESCRIPTION_COLUMN_WIDTH: usize = 32;
/// Suffix appended to truncated cells
pub const ELLIPSIS: &str = "...";

/// Report text when no probe failed.
pub const SUCCESS_BANNER: &str = "✓ All URLs returned successful responses (200 OK)";

// Status column sentinels
/// The probe exceeded the configured timeout
pub const STATUS_TIMEOUT: &str = "TIMEOUT";
/// The request failed before a response arrived
pub const STATUS_ERROR: &str = "ERROR";
/// No status could be determined
pub const STATUS_NOT_AVAILABLE: &str = "N/A";

//! Settings file model.
//!
//! The settings file is JSON with PascalCase keys:
//!
//! ```json
//! {
//!   "Urls": ["https://example.com/health"],
//!   "TimeoutSeconds": 10,
//!   "Email": { "SmtpServer": "mail.example.com", "SmtpPort": 587, ... }
//! }
//! ```
//!
//! Settings are loaded once per run and never mutated afterwards.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use serde::Deserialize;

use crate::config::constants::{
    DEFAULT_EMAIL_SUBJECT, DEFAULT_SMTP_PORT, DEFAULT_TIMEOUT_SECS, SMTP_PASSWORD_ENV,
};
use crate::config::types::RunMode;
use crate::error_handling::ConfigError;

/// URLs to probe and the per-request timeout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UrlConfig {
    /// Endpoints, probed in this order
    #[serde(default)]
    pub urls: Vec<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Email delivery settings
    #[serde(default)]
    pub email: EmailConfig,
}

/// SMTP delivery settings. An empty `smtp_server` disables email.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailConfig {
    #[serde(default)]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub from_address: String,
    #[serde(default)]
    pub to_address: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Negotiate TLS on ports other than 25, 465 and 587
    #[serde(default)]
    pub use_ssl: bool,
    /// Skip server certificate validation
    #[serde(default = "default_accept_all_certificates")]
    pub accept_all_certificates: bool,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

fn default_subject() -> String {
    DEFAULT_EMAIL_SUBJECT.to_string()
}

fn default_accept_all_certificates() -> bool {
    true
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: String::new(),
            smtp_port: DEFAULT_SMTP_PORT,
            from_address: String::new(),
            to_address: String::new(),
            subject: default_subject(),
            username: None,
            password: None,
            use_ssl: false,
            accept_all_certificates: true,
        }
    }
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("from_address", &self.from_address)
            .field("to_address", &self.to_address)
            .field("subject", &self.subject)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("use_ssl", &self.use_ssl)
            .field("accept_all_certificates", &self.accept_all_certificates)
            .finish()
    }
}

impl EmailConfig {
    /// Whether an SMTP host is configured.
    pub fn is_enabled(&self) -> bool {
        !self.smtp_server.trim().is_empty()
    }

    /// Username and password, only when both are non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

impl UrlConfig {
    /// Per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Parses settings from a JSON string.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Applies environment overrides, looking variables up through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(password) = lookup(SMTP_PASSWORD_ENV).filter(|p| !p.is_empty()) {
            debug!("Using SMTP password from {SMTP_PASSWORD_ENV}");
            self.email.password = Some(password);
        }
    }

    /// Checks that a run with these settings can produce and deliver a report.
    ///
    /// # Errors
    ///
    /// - `ConfigError::NoUrls` if the URL list is empty
    /// - `ConfigError::InvalidTimeout` if `TimeoutSeconds` is 0
    /// - `ConfigError::NoDestination` in normal mode without an SMTP host
    pub fn validate(&self, mode: RunMode) -> Result<(), ConfigError> {
        if self.urls.is_empty() {
            return Err(ConfigError::NoUrls);
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout(self.timeout_seconds));
        }
        // Addresses are checked at send time so a bad one falls back to stdout
        if mode == RunMode::Normal && !self.email.is_enabled() {
            return Err(ConfigError::NoDestination);
        }
        Ok(())
    }
}

/// Resolves the settings file location.
///
/// Absolute paths and paths that exist relative to the working directory are
/// used as given. Otherwise the file is looked up next to the executable.
pub fn resolve_config_path(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let candidate = exe_dir.join(path);
            if candidate.exists() {
                debug!("Using settings file next to executable: {}", candidate.display());
                return candidate;
            }
        }
    }
    path.to_path_buf()
}

/// Reads and parses the settings file, then applies environment overrides.
///
/// # Errors
///
/// Returns `ConfigError::Read` if the file cannot be read and
/// `ConfigError::Parse` if it is not valid settings JSON.
pub fn load_settings(path: &Path) -> Result<UrlConfig, ConfigError> {
    let resolved = resolve_config_path(path);
    let contents = std::fs::read_to_string(&resolved).map_err(|source| ConfigError::Read {
        path: resolved.clone(),
        source,
    })?;
    let mut settings = UrlConfig::from_json(&contents)?;
    settings.apply_env_overrides(|key| std::env::var(key).ok());
    debug!(
        "Loaded {} URL(s) from {} (timeout {}s)",
        settings.urls.len(),
        resolved.display(),
        settings.timeout_seconds
    );
    Ok(settings)
}

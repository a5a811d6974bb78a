//! Error type definitions.
//!
//! This module defines the fatal error types (configuration, initialization),
//! the recoverable delivery error, and the kinds a failed probe is sorted into.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Settings problems. Every variant aborts the run before any probe is sent.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("Could not read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON or has wrongly typed values.
    #[error("Invalid configuration file: {0}")]
    Parse(#[from] serde_json::Error),

    /// `Urls` is missing or empty.
    #[error("No URLs found in configuration file.")]
    NoUrls,

    /// `TimeoutSeconds` is below 1.
    #[error("TimeoutSeconds must be at least 1 (got {0})")]
    InvalidTimeout(u64),

    /// Normal mode without an SMTP host leaves the report nowhere to go.
    #[error("No SMTP server configured (Email.SmtpServer); run with --verbose to print the report instead")]
    NoDestination,
}

/// Email delivery failures. Never fatal: the report falls back to stdout.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// A sender or recipient address is empty or malformed.
    #[error("Email.{field} is not a valid address: {value:?}")]
    Address { field: &'static str, value: String },

    /// Connecting, upgrading to TLS or authenticating failed.
    #[error("could not connect to {server}:{port}: {source}")]
    Connect {
        server: String,
        port: u16,
        #[source]
        source: mail_send::Error,
    },

    /// The server rejected the message.
    #[error("message was rejected: {0}")]
    Send(#[source] mail_send::Error),
}

/// Why a probe produced no HTTP response.
///
/// Only `Timeout` is reported as `TIMEOUT`; every other kind is reported as
/// `ERROR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ProbeErrorKind {
    /// The request exceeded the configured timeout
    Timeout,
    /// DNS resolution, TCP connect or TLS handshake failed
    Connect,
    /// The URL could not be turned into a request
    Builder,
    /// Redirect loop or too many redirects
    Redirect,
    /// The request failed while being sent
    Request,
    /// Reading the response body failed
    Body,
    /// Decoding the response failed
    Decode,
    /// Anything else
    Other,
}

impl std::fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProbeErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeErrorKind::Timeout => "timeout",
            ProbeErrorKind::Connect => "connect error",
            ProbeErrorKind::Builder => "invalid request",
            ProbeErrorKind::Redirect => "redirect error",
            ProbeErrorKind::Request => "request error",
            ProbeErrorKind::Body => "body error",
            ProbeErrorKind::Decode => "decode error",
            ProbeErrorKind::Other => "other error",
        }
    }
}

//! Failure records.

use std::fmt;

use crate::config::{STATUS_ERROR, STATUS_NOT_AVAILABLE, STATUS_TIMEOUT};

/// Value of the Status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// Non-2xx HTTP status code
    Http(u16),
    /// The request exceeded the timeout
    Timeout,
    /// The request failed without a response
    Error,
    /// No request was made
    NotAvailable,
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Http(code) => write!(f, "{code}"),
            ProbeStatus::Timeout => f.write_str(STATUS_TIMEOUT),
            ProbeStatus::Error => f.write_str(STATUS_ERROR),
            ProbeStatus::NotAvailable => f.write_str(STATUS_NOT_AVAILABLE),
        }
    }
}

/// Why one URL did not count as successful in this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub url: String,
    pub status: ProbeStatus,
    pub description: String,
}

impl FailureRecord {
    pub fn new(url: impl Into<String>, status: ProbeStatus, description: impl Into<String>) -> Self {
        FailureRecord {
            url: url.into(),
            status,
            description: description.into(),
        }
    }

    /// Status column text: the numeric code or a sentinel.
    pub fn status_code(&self) -> String {
        self.status.to_string()
    }
}

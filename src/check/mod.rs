//! Endpoint probing.
//!
//! Issues one GET per configured URL, strictly in order, and keeps a
//! `FailureRecord` for every probe that did not come back 2xx within the
//! timeout. Successful probes leave no trace in the result.

mod record;

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Response};

use crate::config::DESCRIPTION_COLUMN_WIDTH;
use crate::error_handling::{
    categorize_reqwest_error, root_cause_message, ProbeErrorKind, ProbeStats,
};
use crate::utils::text::truncate_with_ellipsis;

pub use record::{FailureRecord, ProbeStatus};

/// Result of a single probe, before it is turned into a report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A 2xx response arrived in time
    Success { status: u16 },
    /// A response arrived with any other status
    HttpFailure { status: u16, reason: String },
    /// No response: timeout, transport or request error
    Error {
        kind: ProbeErrorKind,
        message: String,
    },
    /// The configured entry was blank, so no request was sent
    Blank,
}

impl ProbeOutcome {
    /// Converts the outcome into a report row; `None` for successes.
    ///
    /// `timeout` only feeds the description of a timed-out probe.
    pub fn into_failure(self, url: &str, timeout: Duration) -> Option<FailureRecord> {
        match self {
            ProbeOutcome::Success { .. } => None,
            ProbeOutcome::HttpFailure { status, reason } => Some(FailureRecord::new(
                url,
                ProbeStatus::Http(status),
                reason,
            )),
            ProbeOutcome::Error {
                kind: ProbeErrorKind::Timeout,
                ..
            } => Some(FailureRecord::new(
                url,
                ProbeStatus::Timeout,
                format!("Request timed out (>{}s)", timeout.as_secs()),
            )),
            ProbeOutcome::Error { message, .. } => Some(FailureRecord::new(
                url,
                ProbeStatus::Error,
                truncate_with_ellipsis(&message, DESCRIPTION_COLUMN_WIDTH),
            )),
            ProbeOutcome::Blank => Some(FailureRecord::new(
                url,
                ProbeStatus::NotAvailable,
                "Empty URL entry",
            )),
        }
    }

    fn record_into(&self, stats: &mut ProbeStats) {
        match self {
            ProbeOutcome::Success { .. } => stats.record_success(),
            ProbeOutcome::HttpFailure { .. } => stats.record_http_failure(),
            ProbeOutcome::Error { kind, .. } => stats.record_error(*kind),
            ProbeOutcome::Blank => stats.record_error(ProbeErrorKind::Builder),
        }
    }
}

/// Sends a single GET to `url` and classifies the outcome.
///
/// `timeout` bounds this request only. Errors never escape: every failure mode
/// is part of the returned outcome.
pub async fn probe_url(client: &Client, url: &str, timeout: Duration) -> ProbeOutcome {
    if url.trim().is_empty() {
        return ProbeOutcome::Blank;
    }

    match client.get(url).timeout(timeout).send().await {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                ProbeOutcome::Success {
                    status: status.as_u16(),
                }
            } else {
                ProbeOutcome::HttpFailure {
                    status: status.as_u16(),
                    reason: reason_phrase(&response),
                }
            }
        }
        Err(e) => ProbeOutcome::Error {
            kind: categorize_reqwest_error(&e),
            message: root_cause_message(&e),
        },
    }
}

/// The reason phrase the server sent, else the canonical one for the status.
fn reason_phrase(response: &Response) -> String {
    // hyper only keeps the phrase when it differs from the canonical one
    let sent = response
        .extensions()
        .get::<ReasonPhrase>()
        .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty());
    sent.or_else(|| response.status().canonical_reason())
        .unwrap_or("Unknown Status")
        .to_string()
}

/// Probes every URL in order and returns the failures in the same order.
///
/// One probe's failure never stops the sweep. The worst-case duration is
/// `urls.len() * timeout`.
pub async fn check_urls<S>(client: &Client, urls: &[S], timeout: Duration) -> Vec<FailureRecord>
where
    S: AsRef<str>,
{
    let mut stats = ProbeStats::new();
    let mut failures = Vec::new();

    for url in urls {
        let url = url.as_ref();
        let started = Instant::now();
        let outcome = probe_url(client, url, timeout).await;
        let elapsed = started.elapsed();

        match &outcome {
            ProbeOutcome::Success { status } => {
                debug!("{url} -> {status} in {}ms", elapsed.as_millis());
            }
            ProbeOutcome::HttpFailure { status, reason } => {
                info!("{url} -> {status} {reason} in {}ms", elapsed.as_millis());
            }
            ProbeOutcome::Error { kind, message } => {
                info!("{url} -> {kind} after {}ms: {message}", elapsed.as_millis());
            }
            ProbeOutcome::Blank => warn!("Skipping blank URL entry"),
        }

        outcome.record_into(&mut stats);
        if let Some(record) = outcome.into_failure(url, timeout) {
            failures.push(record);
        }
    }

    info!(
        "Probed {} URL(s): {} succeeded, {} failed",
        stats.total(),
        stats.succeeded(),
        stats.total_failed()
    );
    for (kind, count) in stats.error_breakdown() {
        debug!("  {kind}: {count}");
    }

    failures
}

//! Per-run outcome counters.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use super::types::ProbeErrorKind;

/// Outcome tallies for one sweep.
///
/// Probes run sequentially, so plain counters are enough.
#[derive(Debug, Clone)]
pub struct ProbeStats {
    succeeded: usize,
    http_failures: usize,
    errors: HashMap<ProbeErrorKind, usize>,
}

impl Default for ProbeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeStats {
    pub fn new() -> Self {
        let errors = ProbeErrorKind::iter().map(|kind| (kind, 0)).collect();
        ProbeStats {
            succeeded: 0,
            http_failures: 0,
            errors,
        }
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    /// A response arrived with a non-2xx status.
    pub fn record_http_failure(&mut self) {
        self.http_failures += 1;
    }

    pub fn record_error(&mut self, kind: ProbeErrorKind) {
        *self.errors.entry(kind).or_insert(0) += 1;
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn http_failures(&self) -> usize {
        self.http_failures
    }

    pub fn error_count(&self, kind: ProbeErrorKind) -> usize {
        self.errors.get(&kind).copied().unwrap_or(0)
    }

    /// Probes that produced a failure record.
    pub fn total_failed(&self) -> usize {
        self.http_failures + self.errors.values().sum::<usize>()
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.total_failed()
    }

    /// Non-zero error kinds in declaration order, for summary logging.
    pub fn error_breakdown(&self) -> Vec<(ProbeErrorKind, usize)> {
        ProbeErrorKind::iter()
            .map(|kind| (kind, self.error_count(kind)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

//! Report delivery.
//!
//! Verbose runs print the report. Normal runs email it and print it only when
//! the email cannot be delivered; delivery problems never fail the run.

pub mod email;

use std::io::{self, Write};

use log::{error, info, warn};

use crate::config::{EmailConfig, RunMode};

pub use email::{build_html_body, send_report, SmtpSecurity};

/// Where the report ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Printed in verbose mode
    Stdout,
    /// Accepted by the SMTP server
    Email,
    /// Email failed, printed instead
    FallbackStdout,
    /// Normal mode without an SMTP host; nothing was delivered
    Skipped,
}

/// Delivers `report` according to `mode`, writing any console output to `out`.
///
/// # Errors
///
/// Only fails if writing to `out` fails.
pub async fn deliver_report<W: Write>(
    report: &str,
    mode: RunMode,
    email: &EmailConfig,
    out: &mut W,
) -> io::Result<Delivery> {
    if mode == RunMode::Verbose {
        writeln!(out, "{report}")?;
        return Ok(Delivery::Stdout);
    }

    if !email.is_enabled() {
        warn!("No SMTP server configured and not in verbose mode; the report was not delivered");
        return Ok(Delivery::Skipped);
    }

    match send_report(email, report).await {
        Ok(()) => {
            info!("Report emailed to {}", email.to_address);
            writeln!(out, "Report sent to {}", email.to_address)?;
            Ok(Delivery::Email)
        }
        Err(e) => {
            error!("Failed to email report: {e}");
            writeln!(out, "Error sending email: {e}")?;
            writeln!(out, "{report}")?;
            Ok(Delivery::FallbackStdout)
        }
    }
}

//! endpoint_checker library: one sweep over a list of HTTP endpoints.
//!
//! Every configured URL gets a single GET with a bounded timeout, in order.
//! Failures (non-2xx, timeout, transport error) are rendered as a fixed-width
//! table and either printed or emailed.
//!
//! # Example
//!
//! ```no_run
//! use endpoint_checker::{run_check, RunMode, UrlConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = UrlConfig::from_json(r#"{"Urls": ["https://example.com"], "TimeoutSeconds": 5}"#)?;
//!
//! let report = run_check(&settings, RunMode::Verbose, &mut std::io::stdout()).await?;
//! println!("{} of {} URLs failed", report.failed(), report.total_urls);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod check;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod notify;
pub mod report;
mod utils;

// Re-export public API
pub use check::{check_urls, probe_url, FailureRecord, ProbeOutcome, ProbeStatus};
pub use config::{load_settings, EmailConfig, FailOn, LogFormat, LogLevel, Opt, RunMode, UrlConfig};
pub use error_handling::{ConfigError, DeliveryError};
pub use notify::{deliver_report, Delivery};
pub use report::render_report;
pub use run::{run_check, CheckReport};

// Internal run module (contains the orchestration of one sweep)
mod run {
    use std::io::Write;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use chrono::Local;
    use log::info;

    use crate::check::{check_urls, FailureRecord};
    use crate::config::{RunMode, UrlConfig};
    use crate::initialization::init_client;
    use crate::notify::{deliver_report, Delivery};
    use crate::report::render_report;

    /// Results of one sweep.
    #[derive(Debug, Clone)]
    pub struct CheckReport {
        /// Number of configured URLs
        pub total_urls: usize,
        /// Failure records, in probe order
        pub failures: Vec<FailureRecord>,
        /// Rendered report text
        pub report: String,
        /// Where the report went
        pub delivery: Delivery,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl CheckReport {
        /// Number of URLs that did not answer 2xx in time.
        pub fn failed(&self) -> usize {
            self.failures.len()
        }

        /// Number of URLs that answered 2xx in time.
        pub fn succeeded(&self) -> usize {
            self.total_urls - self.failures.len()
        }
    }

    /// Runs one sweep: probe every URL, render the report, deliver it.
    ///
    /// Status lines and any printed report go to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings fail validation (a `ConfigError` is
    /// available through `downcast_ref`), if the HTTP client cannot be built,
    /// or if writing to `out` fails. Probe and email failures are not errors.
    pub async fn run_check<W: Write>(
        settings: &UrlConfig,
        mode: RunMode,
        out: &mut W,
    ) -> Result<CheckReport> {
        settings.validate(mode)?;

        writeln!(
            out,
            "Testing URLs at {}...\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )
        .context("Failed to write status line")?;

        let client =
            init_client(settings.timeout()).context("Failed to initialize HTTP client")?;

        let start_time = Instant::now();
        let failures = check_urls(&client, &settings.urls, settings.timeout()).await;
        let report = render_report(&failures);

        let delivery = deliver_report(&report, mode, &settings.email, out)
            .await
            .context("Failed to write report")?;
        out.flush().context("Failed to flush output")?;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        info!(
            "Checked {} URL(s), {} failed, report delivered via {:?} in {:.1}s",
            settings.urls.len(),
            failures.len(),
            delivery,
            elapsed_seconds
        );

        Ok(CheckReport {
            total_urls: settings.urls.len(),
            failures,
            report,
            delivery,
            elapsed_seconds,
        })
    }
}

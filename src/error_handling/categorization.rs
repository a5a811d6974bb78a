//! Error categorization.
//!
//! Sorts `reqwest::Error`s into `ProbeErrorKind`s and extracts the message that
//! ends up in the report.

use std::error::Error as StdError;

use super::types::ProbeErrorKind;
use crate::utils::text::sanitize_error_message;

/// Categorizes a `reqwest::Error` into a `ProbeErrorKind`.
///
/// Timeouts are checked first: reqwest flags connect timeouts as both
/// `is_connect()` and `is_timeout()`, and a timeout must never be reported as a
/// plain error.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ProbeErrorKind {
    if error.is_timeout() {
        ProbeErrorKind::Timeout
    } else if error.is_builder() {
        ProbeErrorKind::Builder
    } else if error.is_connect() {
        ProbeErrorKind::Connect
    } else if error.is_redirect() {
        ProbeErrorKind::Redirect
    } else if error.is_request() {
        ProbeErrorKind::Request
    } else if error.is_body() {
        ProbeErrorKind::Body
    } else if error.is_decode() {
        ProbeErrorKind::Decode
    } else {
        ProbeErrorKind::Other
    }
}

/// Returns the most specific message in the error's source chain.
///
/// reqwest's own message is generic ("error sending request for url (...)");
/// the innermost source carries the actual cause, such as
/// "Connection refused (os error 111)" or "relative URL without a base".
pub fn root_cause_message(error: &(dyn StdError + 'static)) -> String {
    let mut current = error;
    while let Some(source) = current.source() {
        current = source;
    }
    let message = sanitize_error_message(&current.to_string());
    if message.trim().is_empty() {
        sanitize_error_message(&error.to_string())
    } else {
        message
    }
}

//! Report rendering.
//!
//! Turns the failure list into plain text: the success banner when nothing
//! failed, otherwise a three-column box-drawn table. The text is the same for
//! the terminal and the email body; HTML escaping happens on the email path.

use crate::check::FailureRecord;
use crate::config::{
    DESCRIPTION_COLUMN_WIDTH, STATUS_COLUMN_WIDTH, SUCCESS_BANNER, URL_COLUMN_WIDTH,
};
use crate::utils::text::{fit_cell, pad_right};

const COLUMN_WIDTHS: [usize; 3] = [URL_COLUMN_WIDTH, STATUS_COLUMN_WIDTH, DESCRIPTION_COLUMN_WIDTH];
const HEADERS: [&str; 3] = ["URL", "Status", "Description"];

/// Renders the report for `failures`, keeping their order.
pub fn render_report(failures: &[FailureRecord]) -> String {
    if failures.is_empty() {
        return SUCCESS_BANNER.to_string();
    }

    let mut lines = Vec::with_capacity(failures.len() + 4);
    lines.push(border('┌', '┬', '┐'));
    lines.push(row(HEADERS.map(str::to_string)));
    lines.push(border('├', '┼', '┤'));
    for record in failures {
        lines.push(row([
            record.url.clone(),
            record.status_code(),
            record.description.clone(),
        ]));
    }
    lines.push(border('└', '┴', '┘'));
    lines.join("\n")
}

fn border(left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = COLUMN_WIDTHS
        .iter()
        .map(|width| "─".repeat(width + 2))
        .collect();
    format!("{left}{}{right}", segments.join(&middle.to_string()))
}

// URL and Description are truncated to fit; Status is only padded.
fn row(cells: [String; 3]) -> String {
    let [url, status, description] = cells;
    format!(
        "│ {} │ {} │ {} │",
        fit_cell(&url, URL_COLUMN_WIDTH),
        pad_right(&status, STATUS_COLUMN_WIDTH),
        fit_cell(&description, DESCRIPTION_COLUMN_WIDTH)
    )
}

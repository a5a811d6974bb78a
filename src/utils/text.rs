//! Text utilities for report cells and error messages.
//!
//! All widths are counted in `char`s so multi-byte URLs and messages are never
//! split inside a code point.

use crate::config::ELLIPSIS;

/// Sanitizes an error message for a single-line table cell.
///
/// Newlines, tabs and carriage returns become spaces, other control
/// characters (0x00-0x1F, 0x7F) are removed, and runs of whitespace collapse
/// to one space.
pub fn sanitize_error_message(message: &str) -> String {
    let flattened: String = message
        .chars()
        .filter_map(|c| match c {
            '\n' | '\t' | '\r' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();
    flattened.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates `value` to at most `width` chars.
///
/// Values longer than `width` keep their first `width - 3` chars followed by
/// `...`, so the result is exactly `width` chars long. Shorter values are
/// returned unchanged.
pub fn truncate_with_ellipsis(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = value.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Right-pads `value` with spaces to `width` chars. Longer values are kept.
pub fn pad_right(value: &str, width: usize) -> String {
    let len = value.chars().count();
    let mut padded = String::with_capacity(value.len() + width.saturating_sub(len));
    padded.push_str(value);
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    padded
}

/// Fits `value` into a cell of exactly `width` chars: truncated with an
/// ellipsis when longer, right-padded when shorter.
pub fn fit_cell(value: &str, width: usize) -> String {
    pad_right(&truncate_with_ellipsis(value, width), width)
}

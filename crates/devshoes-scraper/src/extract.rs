//! Locating the embedded product payload inside the certification page.
//!
//! The page assigns the product list to a JS variable as a single-quoted
//! string holding one JSON object:
//!
//! ```text
//! var litProductsDataRaw = '{"header_excel":[...],"rows":[...]}';
//! ```
//!
//! [`locate_marker`] finds where the string body starts and
//! [`extract_payload`] finds where the JSON object inside it ends.

use crate::unescape::{next_unit, Unit};

/// Statement terminator that follows the closing quote of the payload.
const TERMINATOR: &str = "';";

/// Returns the byte offset just past the first occurrence of `marker`.
#[must_use]
pub fn locate_marker(html: &str, marker: &str) -> Option<usize> {
    html.find(marker).map(|idx| idx + marker.len())
}

/// Returns the payload that starts at byte offset `start`: everything up to
/// and including the `}` that brings brace depth back to zero and is followed
/// by `';`.
///
/// Escapes are read as the decoder reads them and braces inside JSON string
/// values do not count, so a product named `"Pro {2}"` cannot end the scan
/// early. Returns `None` when the JS string closes (an unescaped `'`) or the
/// input ends before that boundary, or when `start` is not a valid offset.
#[must_use]
pub fn extract_payload(html: &str, start: usize) -> Option<&str> {
    let body = html.get(start..)?;

    let mut depth: i64 = 0;
    let mut in_string = false;
    let mut escape = false;
    let mut pos = 0;

    while let Some((unit, next)) = next_unit(body, pos) {
        let ch = match unit {
            Unit::Char(c) => Some(c),
            Unit::Verbatim(_) => None,
        };

        // A raw quote ends the JS string literal; escaped quotes arrive as
        // `Unit::Char('\'')` with a two-byte width.
        if ch == Some('\'') && next - pos == 1 {
            return None;
        }

        if in_string {
            if escape {
                escape = false;
            } else {
                match ch {
                    Some('\\') => escape = true,
                    Some('"') => in_string = false,
                    _ => {}
                }
            }
        } else {
            match ch {
                Some('"') => in_string = true,
                Some('{') => depth += 1,
                Some('}') => depth -= 1,
                _ => {}
            }
            if depth == 0 && body[next..].starts_with(TERMINATOR) {
                return Some(&body[..next]);
            }
        }

        pos = next;
    }

    None
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;

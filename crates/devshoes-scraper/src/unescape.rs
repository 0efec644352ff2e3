//! Decoding of JavaScript single-quoted string bodies.
//!
//! The certification page embeds its data as `'...'` with the usual JS
//! escapes. Decoding is a single left-to-right pass, so an escaped backslash
//! (`\\`) can never combine with the character after it into a second escape.

const REPLACEMENT: char = '\u{FFFD}';

/// One decoded element of a JS string body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unit<'a> {
    /// A literal character or a recognized escape.
    Char(char),
    /// An escape we do not decode, passed through untouched (e.g. `\/`).
    Verbatim(&'a str),
}

fn hex4(s: &str, at: usize) -> Option<u16> {
    let digits = s.get(at..at + 4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Decodes a `\u` escape whose four hex digits start at `digits_at`.
///
/// Returns the decoded character and the byte offset just past it. A high
/// surrogate immediately followed by a `\u` low surrogate is combined into one
/// scalar; any other surrogate becomes U+FFFD.
fn decode_unicode_escape(s: &str, digits_at: usize) -> Option<(char, usize)> {
    let unit = hex4(s, digits_at)?;
    let end = digits_at + 4;

    if is_high_surrogate(unit) && s[end..].starts_with("\\u") {
        if let Some(low) = hex4(s, end + 2).filter(|low| is_low_surrogate(*low)) {
            let scalar = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return Some((char::from_u32(scalar).unwrap_or(REPLACEMENT), end + 6));
        }
    }

    Some((char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT), end))
}

/// Reads the unit starting at byte offset `pos` and returns it with the
/// offset of the next unit. Returns `None` at the end of `s`.
pub(crate) fn next_unit(s: &str, pos: usize) -> Option<(Unit<'_>, usize)> {
    let c = s.get(pos..)?.chars().next()?;
    if c != '\\' {
        return Some((Unit::Char(c), pos + c.len_utf8()));
    }

    let escape_at = pos + 1;
    let Some(escaped) = s[escape_at..].chars().next() else {
        // Trailing lone backslash.
        return Some((Unit::Verbatim(&s[pos..]), s.len()));
    };
    let after = escape_at + escaped.len_utf8();

    let decoded = match escaped {
        'u' => {
            return Some(match decode_unicode_escape(s, after) {
                Some((ch, end)) => (Unit::Char(ch), end),
                None => (Unit::Verbatim(&s[pos..after]), after),
            });
        }
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '\'' => '\'',
        '"' => '"',
        '\\' => '\\',
        _ => return Some((Unit::Verbatim(&s[pos..after]), after)),
    };

    Some((Unit::Char(decoded), after))
}

/// Decodes the body of a JS single-quoted string literal.
///
/// Handles `\uXXXX`, `\n`, `\r`, `\t`, `\'`, `\"` and `\\`. Any other escape
/// is kept as written so the JSON parser can judge it. The result is not
/// validated as JSON.
#[must_use]
pub fn unescape_js(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pos = 0;
    while let Some((unit, next)) = next_unit(raw, pos) {
        match unit {
            Unit::Char(c) => out.push(c),
            Unit::Verbatim(text) => out.push_str(text),
        }
        pos = next;
    }
    out
}

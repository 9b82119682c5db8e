//! Title cleanup.
//!
//! CrossRef titles sometimes carry trailing footnote or issue annotations such as
//! `"Wheelchair use 1\u{a0}Department of ..."` or `"Pressure injuries 12 No. 3"`.
//! Two truncation rules strip them, in this order:
//!
//! 1. [`truncate_at_nbsp_marker`]: cut at the first digit directly followed by U+00A0
//! 2. [`truncate_at_number_marker`]: cut at the first digit followed by optional
//!    whitespace and the case-sensitive token `No`

const NBSP: char = '\u{a0}';

/// Cut the title at the first ASCII digit immediately followed by a non-breaking space.
pub fn truncate_at_nbsp_marker(title: &str) -> &str {
    let mut chars = title.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c.is_ascii_digit() && matches!(chars.peek(), Some((_, NBSP))) {
            return &title[..idx];
        }
    }
    title
}

/// Cut the title at the first ASCII digit followed by optional whitespace and `No`.
pub fn truncate_at_number_marker(title: &str) -> &str {
    for (idx, c) in title.char_indices() {
        if c.is_ascii_digit() && title[idx + c.len_utf8()..].trim_start().starts_with("No") {
            return &title[..idx];
        }
    }
    title
}

/// Apply both truncation rules and trim the result.
pub fn clean_title(title: &str) -> String {
    truncate_at_number_marker(truncate_at_nbsp_marker(title))
        .trim()
        .to_string()
}

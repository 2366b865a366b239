//! HTML escaping for plain text and inline `**bold**` conversion.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex is valid"));

/// Replace `&`, `<`, `>`, `"` and `'` with HTML entities.
///
/// Not idempotent: already-escaped input is escaped again. Call it once on raw
/// text, before any markup is built around it.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert `**x**` spans to `<strong>x</strong>`. Expects already-escaped text.
pub fn apply_bold(escaped: &str) -> String {
    BOLD.replace_all(escaped, "<strong>$1</strong>").into_owned()
}

/// Escape raw text, then apply bold. The order matters: see [`escape`].
pub fn inline_html(raw: &str) -> String {
    apply_bold(&escape(raw))
}

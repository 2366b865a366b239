//! Prose formatting: turn answer text with ad-hoc markdown (headers, bullets,
//! bold, pipe tables) into an HTML fragment.
//!
//! Tables are detected first at every line; everything else is classified one
//! line at a time by [`lines::classify`].

mod escaper;
mod lines;
mod table;

pub use escaper::escape;
use lines::classify;
pub use table::MarkdownTable;
use table::detect_table;

/// One formatted unit, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedLine<'a> {
    Table(MarkdownTable),
    Line(&'a str),
}

impl FormattedLine<'_> {
    fn is_table(&self) -> bool {
        matches!(self, FormattedLine::Table(_))
    }

    pub fn to_html(&self) -> String {
        match self {
            FormattedLine::Table(table) => table.to_html(),
            FormattedLine::Line(raw) => classify(raw).to_html(),
        }
    }
}

/// Split text into table and line parts, preserving line order.
pub fn format_parts(text: &str) -> Vec<FormattedLine<'_>> {
    let lines: Vec<&str> = text.lines().collect();
    let mut parts = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        match detect_table(&lines, i) {
            Some(m) => {
                log::debug!(
                    "table at line {}: {} columns, {} rows",
                    i,
                    m.table.headers.len(),
                    m.table.rows.len()
                );
                parts.push(FormattedLine::Table(m.table));
                i += m.consumed;
            }
            None => {
                parts.push(FormattedLine::Line(lines[i]));
                i += 1;
            }
        }
    }
    parts
}

/// Format full message text into display HTML.
///
/// A `<br>` separates a table from neighbouring non-table content; adjacent
/// tables get no extra spacing.
pub fn format_message(text: &str) -> String {
    render_parts(&format_parts(text))
}

/// Join formatted parts into one HTML string.
pub fn render_parts(parts: &[FormattedLine<'_>]) -> String {
    let mut html = String::new();
    for (i, part) in parts.iter().enumerate() {
        if part.is_table() {
            let after_line = i > 0 && !parts[i - 1].is_table();
            if after_line {
                html.push_str("<br>");
            }
            html.push_str(&part.to_html());
            let before_line = parts.get(i + 1).is_some_and(|next| !next.is_table());
            if before_line {
                html.push_str("<br>");
            }
        } else {
            html.push_str(&part.to_html());
        }
    }
    html
}

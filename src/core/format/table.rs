//! Markdown table detection: find a pipe-table-shaped run of lines and turn it
//! into an HTML `<table>`.
//!
//! There is no declared grammar upstream, so detection is heuristic:
//! - a run starts at a line containing `|`;
//! - before a separator row (`|---|:--:|`) the run takes pipe lines and blank
//!   lines within its first two lines;
//! - after the separator it takes pipe lines and tolerates a single blank line
//!   when more pipe content follows.
//!
//! Runs without a separator are accepted as tables only when every row has
//! roughly the same number of pipes as the first one. That path can misread
//! prose with stray `|` characters; it is kept narrow on purpose.

use super::escaper::inline_html;

/// A parsed table. Cells hold the raw (unescaped) trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A detected table and how many source lines it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMatch {
    pub table: MarkdownTable,
    pub consumed: usize,
}

pub(crate) fn is_pipe_line(line: &str) -> bool {
    line.contains('|')
}

/// A separator row: only whitespace, `|`, `:` and `-`, with at least one dash.
pub(crate) fn is_separator_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| c == '|' || c == ':' || c == '-' || c.is_whitespace())
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn pipe_count(line: &str) -> usize {
    line.matches('|').count()
}

/// Split a row on `|`, trim the cells, and drop the empty edge cells produced
/// by a leading or trailing pipe.
pub(crate) fn parse_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let mut cells: Vec<String> = trimmed.split('|').map(|c| c.trim().to_string()).collect();
    if trimmed.starts_with('|') && !cells.is_empty() {
        cells.remove(0);
    }
    if trimmed.ends_with('|') && !cells.is_empty() {
        cells.pop();
    }
    cells
}

/// Collect the candidate run starting at `start`. Returns the number of lines
/// taken (trailing blank lines excluded) and whether a separator was seen.
fn collect_run(lines: &[&str], start: usize) -> (usize, bool) {
    let mut seen_separator = false;
    let mut i = start;
    while i < lines.len() {
        let line = lines[i];
        if !seen_separator {
            let early_blank = is_blank(line) && i - start < 2;
            if !is_pipe_line(line) && !early_blank {
                break;
            }
            if is_separator_line(line) {
                seen_separator = true;
            }
        } else if is_blank(line) {
            let more_pipes = lines.get(i + 1).is_some_and(|next| is_pipe_line(next));
            if !more_pipes {
                break;
            }
        } else if !is_pipe_line(line) {
            break;
        }
        i += 1;
    }
    while i > start && is_blank(lines[i - 1]) {
        i -= 1;
    }
    (i - start, seen_separator)
}

/// Try to read a table starting at `lines[start]`.
///
/// Returns `None` whenever the block is ambiguous; the caller then formats the
/// current line on its own.
pub fn detect_table(lines: &[&str], start: usize) -> Option<TableMatch> {
    let first = *lines.get(start)?;
    if !is_pipe_line(first) || is_separator_line(first) {
        return None;
    }
    let (consumed, seen_separator) = collect_run(lines, start);
    let run: Vec<&str> = lines[start..start + consumed]
        .iter()
        .copied()
        .filter(|l| !is_blank(l))
        .collect();

    let (header_line, data_lines): (&str, Vec<&str>) = if seen_separator {
        if run.len() < 3 {
            return None;
        }
        let data = run[1..]
            .iter()
            .copied()
            .filter(|l| !is_separator_line(l))
            .collect();
        (run[0], data)
    } else {
        if run.len() < 2 {
            return None;
        }
        let expected = pipe_count(run[0]);
        if !run.iter().all(|l| pipe_count(l).abs_diff(expected) <= 1) {
            return None;
        }
        (run[0], run[1..].to_vec())
    };

    let headers = parse_row(header_line);
    if headers.is_empty() {
        return None;
    }
    let rows = data_lines
        .into_iter()
        .map(parse_row)
        .filter(|cells| cells.iter().any(|c| !c.is_empty()))
        .collect();

    Some(TableMatch {
        table: MarkdownTable { headers, rows },
        consumed,
    })
}

impl MarkdownTable {
    /// Render inside a horizontally scrollable container. Cells are escaped,
    /// then `**bold**` is applied.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"table-container\"><table class=\"markdown-table\">");
        html.push_str("<thead><tr>");
        for header in &self.headers {
            html.push_str("<th>");
            html.push_str(&inline_html(header));
            html.push_str("</th>");
        }
        html.push_str("</tr></thead><tbody>");
        if self.rows.is_empty() {
            html.push_str(&format!(
                "<tr><td colspan=\"{}\" class=\"no-data\">No data</td></tr>",
                self.headers.len()
            ));
        }
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str("<td>");
                html.push_str(&inline_html(cell));
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table></div>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(s: &str) -> Vec<&str> {
        s.split('\n').collect()
    }

    #[test]
    fn well_formed_table() {
        let src = lines("| A | B |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |");
        let m = detect_table(&src, 0).expect("table");
        assert_eq!(m.consumed, 4);
        assert_eq!(m.table.headers, ["A", "B"]);
        assert_eq!(m.table.rows, [["1", "2"], ["3", "4"]]);
    }

    #[test]
    fn aligned_separator_is_recognised() {
        assert!(is_separator_line("| :--- | :---: | ---: |"));
        assert!(is_separator_line("---|---"));
        assert!(!is_separator_line("| a | b |"));
        assert!(!is_separator_line("|||"));
        assert!(!is_separator_line("   "));
    }

    #[test]
    fn table_stops_at_plain_line() {
        let src = lines("| A | B |\n|---|---|\n| 1 | 2 |\nAfter the table");
        let m = detect_table(&src, 0).expect("table");
        assert_eq!(m.consumed, 3);
    }

    #[test]
    fn one_blank_line_inside_table_is_tolerated() {
        let src = lines("| A | B |\n|---|---|\n| 1 | 2 |\n\n| 3 | 4 |");
        let m = detect_table(&src, 0).expect("table");
        assert_eq!(m.consumed, 5);
        assert_eq!(m.table.rows.len(), 2);
    }

    #[test]
    fn two_blank_lines_end_the_table() {
        let src = lines("| A | B |\n|---|---|\n| 1 | 2 |\n\n\n| 3 | 4 |");
        let m = detect_table(&src, 0).expect("table");
        assert_eq!(m.consumed, 3);
        assert_eq!(m.table.rows.len(), 1);
    }

    #[test]
    fn trailing_blank_is_not_consumed() {
        let src = lines("| A | B |\n|---|---|\n| 1 | 2 |\n\nText");
        let m = detect_table(&src, 0).expect("table");
        assert_eq!(m.consumed, 3);
    }

    #[test]
    fn header_and_separator_only_is_rejected() {
        let src = lines("| A | B |\n|---|---|");
        assert!(detect_table(&src, 0).is_none());
    }

    #[test]
    fn blank_data_rows_render_no_data_placeholder() {
        let src = lines("| A | B |\n|---|---|\n|   |   |");
        let m = detect_table(&src, 0).expect("table");
        assert!(m.table.rows.is_empty());
        assert!(m.table.to_html().contains("No data"));
    }

    #[test]
    fn headerless_table_with_similar_pipe_counts() {
        let src = lines("a | b | c\nd | e | f\ng | h");
        let m = detect_table(&src, 0).expect("best-effort table");
        assert_eq!(m.table.headers, ["a", "b", "c"]);
        assert_eq!(m.table.rows.len(), 2);
    }

    #[test]
    fn dissimilar_pipe_counts_are_not_a_table() {
        let src = lines("a | b\nc | d | e | f");
        assert!(detect_table(&src, 0).is_none());
    }

    #[test]
    fn single_pipe_line_is_not_a_table() {
        let src = lines("use a | b to pipe\nnothing else here");
        assert!(detect_table(&src, 0).is_none());
    }

    #[test]
    fn no_pipes_never_yield_a_table() {
        let src = lines("just\nsome\n---\nprose");
        for i in 0..src.len() {
            assert!(detect_table(&src, i).is_none());
        }
    }

    #[test]
    fn empty_header_rejects_block() {
        let src = lines("|\n|---|\n| 1 |");
        assert!(detect_table(&src, 0).is_none());
    }

    #[test]
    fn parse_row_drops_edge_cells_only() {
        assert_eq!(parse_row("| a |  | c |"), ["a", "", "c"]);
        assert_eq!(parse_row("a | b"), ["a", "b"]);
    }

    #[test]
    fn cells_are_escaped_then_bolded() {
        let table = MarkdownTable {
            headers: vec!["**Name**".into()],
            rows: vec![vec!["<b>x</b>".into()]],
        };
        let html = table.to_html();
        assert!(html.contains("<th><strong>Name</strong></th>"));
        assert!(html.contains("<td>&lt;b&gt;x&lt;/b&gt;</td>"));
        assert!(html.starts_with("<div class=\"table-container\">"));
    }
}

//! Line classification for non-table content.
//!
//! Classifiers run in priority order; the first one that matches wins.

use super::escaper::inline_html;

/// What a single non-table line renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `#` heading with non-empty content.
    Header(String),
    /// `#` heading whose content is empty: renders nothing.
    EmptyHeader,
    /// `•` or single-`*` bullet.
    Bullet(String),
    /// `◦` item or a line indented by three or more spaces.
    Indented(String),
    Plain(String),
    Blank,
}

type Classifier = fn(&str) -> Option<LineKind>;

const CLASSIFIERS: &[Classifier] = &[
    classify_header,
    classify_bullet,
    classify_star_bullet,
    classify_indented,
    classify_plain,
];

fn classify_header(line: &str) -> Option<LineKind> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('#') {
        return None;
    }
    let content = trimmed.trim_start_matches('#').trim();
    Some(if content.is_empty() {
        LineKind::EmptyHeader
    } else {
        LineKind::Header(content.to_string())
    })
}

fn classify_bullet(line: &str) -> Option<LineKind> {
    let rest = line.trim_start().strip_prefix('•')?;
    Some(LineKind::Bullet(rest.trim().to_string()))
}

fn classify_star_bullet(line: &str) -> Option<LineKind> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("**") {
        return None;
    }
    let rest = trimmed.strip_prefix('*')?;
    Some(LineKind::Bullet(rest.trim().to_string()))
}

fn classify_indented(line: &str) -> Option<LineKind> {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix('◦') {
        return Some(LineKind::Indented(rest.trim().to_string()));
    }
    if line.starts_with("   ") && !trimmed.is_empty() {
        return Some(LineKind::Indented(trimmed.trim_end().to_string()));
    }
    None
}

fn classify_plain(line: &str) -> Option<LineKind> {
    let trimmed = line.trim();
    (!trimmed.is_empty()).then(|| LineKind::Plain(trimmed.to_string()))
}

/// Classify one line. Anything no classifier claims is blank.
pub fn classify(line: &str) -> LineKind {
    CLASSIFIERS
        .iter()
        .find_map(|classifier| classifier(line))
        .unwrap_or(LineKind::Blank)
}

impl LineKind {
    pub fn to_html(&self) -> String {
        match self {
            LineKind::Header(text) => format!(
                "<div class=\"md-header\"><strong>{}</strong></div>",
                inline_html(text)
            ),
            LineKind::EmptyHeader => String::new(),
            LineKind::Bullet(text) => {
                format!("<div class=\"md-bullet\">• {}</div>", inline_html(text))
            }
            LineKind::Indented(text) => {
                format!("<div class=\"md-indented\">◦ {}</div>", inline_html(text))
            }
            LineKind::Plain(text) => format!("<p class=\"md-paragraph\">{}</p>", inline_html(text)),
            LineKind::Blank => "<br>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers() {
        assert_eq!(classify("## Results"), LineKind::Header("Results".into()));
        assert_eq!(classify("#Tight"), LineKind::Header("Tight".into()));
        assert_eq!(classify("###   "), LineKind::EmptyHeader);
        assert_eq!(LineKind::EmptyHeader.to_html(), "");
    }

    #[test]
    fn bullets() {
        assert_eq!(classify("• first"), LineKind::Bullet("first".into()));
        assert_eq!(classify("* second"), LineKind::Bullet("second".into()));
        assert_eq!(classify("  • nested dot"), LineKind::Bullet("nested dot".into()));
    }

    #[test]
    fn double_star_line_is_not_a_bullet() {
        assert_eq!(
            classify("**Total:** 42"),
            LineKind::Plain("**Total:** 42".into())
        );
        assert_eq!(
            classify("**Total:** 42").to_html(),
            "<p class=\"md-paragraph\"><strong>Total:</strong> 42</p>"
        );
    }

    #[test]
    fn indented_items() {
        assert_eq!(classify("◦ sub item"), LineKind::Indented("sub item".into()));
        assert_eq!(classify("    deep"), LineKind::Indented("deep".into()));
        assert_eq!(classify("  two spaces"), LineKind::Plain("two spaces".into()));
    }

    #[test]
    fn blank_lines() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("     "), LineKind::Blank);
        assert_eq!(LineKind::Blank.to_html(), "<br>");
    }

    #[test]
    fn content_is_escaped() {
        let html = classify("• <script>alert(1)</script>").to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}

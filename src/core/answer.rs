//! Split a raw answer into prose and an embedded visualization document.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Global the chart script must reference for the narrow div+script pattern.
pub const CHART_LIBRARY_NAME: &str = "Plotly";

static DOCTYPE_DOCUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!DOCTYPE\s+html[^>]*>.*?</html\s*>").expect("doctype regex is valid")
});

static HTML_DOCUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<html(?:\s[^>]*)?>.*?</html\s*>").expect("html regex is valid")
});

static DIV_WITH_CHART_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?is)<div\b[^>]*\bid\s*=\s*["'][^"']+["'][^>]*>.*?</div>\s*<script\b[^>]*>(?:[^<]|<[^/]|</[^s])*?\b{}\b.*?</script\s*>"#,
        CHART_LIBRARY_NAME
    ))
    .expect("div+script regex is valid")
});

/// Result of splitting an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAnswer {
    /// Prose with the visualization span removed.
    pub text: String,
    /// The extracted visualization markup, if any.
    pub html: Option<String>,
    pub has_visualization: bool,
}

/// Detect an embedded visualization. First match wins: a `<!DOCTYPE html>`
/// document, then a bare `<html>` document, then a `div[id]` followed by a
/// script that references the charting library.
pub fn parse_message(text: &str) -> ParsedAnswer {
    let found = [&*DOCTYPE_DOCUMENT, &*HTML_DOCUMENT, &*DIV_WITH_CHART_SCRIPT]
        .into_iter()
        .find_map(|re| re.find(text));

    let Some(m) = found else {
        return ParsedAnswer {
            text: text.to_string(),
            html: None,
            has_visualization: false,
        };
    };

    let prose = [text[..m.start()].trim(), text[m.end()..].trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    log::debug!(
        "visualization markup at {}..{} ({} bytes of prose kept)",
        m.start(),
        m.end(),
        prose.len()
    );

    ParsedAnswer {
        text: prose,
        html: Some(m.as_str().to_string()),
        has_visualization: true,
    }
}

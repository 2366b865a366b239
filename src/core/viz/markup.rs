//! Reading visualization markup: chart element, sizing and inline script.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("body selector is valid"));

static ID_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[id]").expect("id selector is valid"));

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("script selector is valid"));

static BODY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*)</body\s*>").expect("body regex is valid"));

/// What the mounter needs from the markup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChartSource {
    /// Id of the first element carrying a non-blank one, if any.
    pub element_id: Option<String>,
    pub height: Option<String>,
    pub width: Option<String>,
    /// First inline (non-`src`) script with content.
    pub script: Option<String>,
}

/// Element id used on screen for a chart: unique per `(original_id, message_index)`.
///
/// The index is the last `-` segment and is all digits, so distinct inputs
/// never produce the same id.
pub fn render_id(original_id: &str, message_index: usize) -> String {
    format!("{}-{}", original_id, message_index)
}

/// Replace every quoted occurrence of `original` (single, double or backtick
/// quotes) with `replacement`, keeping the quote style. An empty `original`
/// leaves the script untouched.
pub fn rewrite_element_id(script: &str, original: &str, replacement: &str) -> String {
    if original.is_empty() {
        return script.to_string();
    }
    ['"', '\'', '`'].iter().fold(script.to_string(), |acc, q| {
        acc.replace(
            &format!("{q}{original}{q}"),
            &format!("{q}{replacement}{q}"),
        )
    })
}

/// Parse the markup as a document and pull out the chart element and script.
pub fn inspect(markup: &str) -> ChartSource {
    let document = Html::parse_document(markup);
    let body_html = body_html(&document, markup);
    let body = Html::parse_fragment(&body_html);

    let mut source = ChartSource::default();
    let chart_element = body
        .select(&ID_SELECTOR)
        .find(|el| el.value().attr("id").is_some_and(|id| !id.trim().is_empty()));
    if let Some(el) = chart_element {
        source.element_id = el.value().attr("id").map(str::to_string);
        let (height, width) = sizing(el);
        source.height = height;
        source.width = width;
    }
    source.script = document
        .select(&SCRIPT_SELECTOR)
        .filter(|s| s.value().attr("src").is_none())
        .map(|s| s.text().collect::<String>())
        .find(|text| !text.trim().is_empty());
    source
}

/// Body contents via the parsed tree, falling back to a regex over the raw markup.
fn body_html(document: &Html, markup: &str) -> String {
    let structured = document
        .select(&BODY_SELECTOR)
        .next()
        .map(|b| b.inner_html())
        .filter(|html| !html.trim().is_empty());
    if let Some(html) = structured {
        return html;
    }
    log::debug!("structured body extraction failed, using regex");
    BODY_REGEX
        .captures(markup)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| markup.to_string())
}

/// Explicit height/width from the `style` attribute, then from the plain attributes.
fn sizing(el: ElementRef<'_>) -> (Option<String>, Option<String>) {
    let mut height = None;
    let mut width = None;
    if let Some(style) = el.value().attr("style") {
        for decl in style.split(';') {
            let Some((prop, value)) = decl.split_once(':') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match prop.trim().to_ascii_lowercase().as_str() {
                "height" => height = Some(value.to_string()),
                "width" => width = Some(value.to_string()),
                _ => {}
            }
        }
    }
    let attr_size = |name: &str| {
        el.value().attr(name).map(str::trim).filter(|v| !v.is_empty()).map(|v| {
            if v.chars().all(|c| c.is_ascii_digit()) {
                format!("{}px", v)
            } else {
                v.to_string()
            }
        })
    };
    (height.or_else(|| attr_size("height")), width.or_else(|| attr_size("width")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_ids_differ_per_message() {
        assert_eq!(render_id("chart", 0), "chart-0");
        assert_ne!(render_id("chart", 0), render_id("chart", 1));
        assert_ne!(render_id("chart-1", 1), render_id("chart", 11));
    }

    #[test]
    fn rewrite_covers_all_quote_styles() {
        let script = "Plotly.newPlot('chart', d); document.getElementById(\"chart\"); q(`chart`); chart2 = 'chart2';";
        let out = rewrite_element_id(script, "chart", "chart-3");
        assert_eq!(
            out,
            "Plotly.newPlot('chart-3', d); document.getElementById(\"chart-3\"); q(`chart-3`); chart2 = 'chart2';"
        );
    }

    #[test]
    fn empty_original_id_is_never_rewritten() {
        let script = "var layout = {title: ''}; trace.name = \"\";";
        assert_eq!(rewrite_element_id(script, "", "-0"), script);
    }

    #[test]
    fn blank_ids_are_skipped_when_picking_the_chart_element() {
        let source = inspect("<div><span id=\"\"></span><p id=\"  \"></p><div id=\"c\" height=\"200\"></div></div>");
        assert_eq!(source.element_id.as_deref(), Some("c"));
        assert_eq!(source.height.as_deref(), Some("200px"));
    }

    #[test]
    fn only_blank_ids_means_no_chart_element() {
        let source = inspect("<span id=\"\"></span><script>Plotly.newPlot(el, []);</script>");
        assert_eq!(source.element_id, None);
        assert!(source.script.is_some());
    }

    #[test]
    fn inspect_full_document() {
        let markup = r#"<!DOCTYPE html><html><head>
<script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script></head>
<body><h1>Sales</h1><div id="myChart" style="height: 320px; width: 80%;"></div>
<script>var data = [1]; Plotly.newPlot('myChart', data);</script></body></html>"#;
        let source = inspect(markup);
        assert_eq!(source.element_id.as_deref(), Some("myChart"));
        assert_eq!(source.height.as_deref(), Some("320px"));
        assert_eq!(source.width.as_deref(), Some("80%"));
        assert_eq!(
            source.script.as_deref(),
            Some("var data = [1]; Plotly.newPlot('myChart', data);")
        );
    }

    #[test]
    fn inspect_fragment_without_sizing() {
        let source = inspect("<div id=\"c\"></div><script>Plotly.newPlot('c', [], {});</script>");
        assert_eq!(source.element_id.as_deref(), Some("c"));
        assert_eq!(source.height, None);
        assert_eq!(source.width, None);
        assert!(source.script.is_some());
    }

    #[test]
    fn size_attributes_are_used_when_style_is_missing() {
        let source = inspect("<div id=\"c\" height=\"250\" width=\"90%\"></div>");
        assert_eq!(source.height.as_deref(), Some("250px"));
        assert_eq!(source.width.as_deref(), Some("90%"));
    }

    #[test]
    fn markup_without_ids_or_scripts() {
        let source = inspect("<p>nothing to draw</p>");
        assert_eq!(source, ChartSource::default());
    }
}

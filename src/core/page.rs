//! Standalone HTML page for a transcript, with charts re-hydrated per message.

use std::sync::Arc;

use crate::core::config::Config;
use crate::core::format::escape;
use crate::core::message::{Message, Role};
use crate::core::transcript::Transcript;
use crate::core::viz::{MountOutcome, MountSlot, Mounter, StaticPageRuntime, VisualizationMounts};

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; color: #1f2328; }
.message { border-radius: 8px; padding: 0.75rem 1rem; margin: 1rem 0; }
.message.user { background: #eef4ff; }
.message.assistant { background: #f6f8fa; }
.message.error { background: #ffebe9; }
.md-header { margin: 0.6rem 0 0.3rem; font-size: 1.1rem; }
.md-bullet { margin-left: 0.5rem; }
.md-indented { margin-left: 2rem; }
.md-paragraph { margin: 0.3rem 0; }
.table-container { overflow-x: auto; }
.markdown-table { border-collapse: collapse; }
.markdown-table th, .markdown-table td { border: 1px solid #d0d7de; padding: 4px 8px; }
.no-data { text-align: center; color: #656d76; }
.chart-error { color: #cf222e; }
.contexts { font-size: 0.85rem; color: #656d76; }
";

/// Render every message and mount every visualization, then assemble the page.
pub async fn render_page(transcript: &Transcript, config: &Config, title: &str) -> String {
    let runtime = Arc::new(StaticPageRuntime::new());
    let mounter = Mounter::new(
        runtime.clone(),
        config.literal_policy.evaluator(),
        config.mount.clone(),
    );

    let slots: Vec<MountSlot> = transcript
        .messages()
        .iter()
        .map(|_| MountSlot::attached())
        .collect();
    let mut mounts = VisualizationMounts::new(mounter);
    for (index, markup) in transcript.visualizations() {
        mounts.mount(index, markup.to_string(), Arc::new(slots[index].clone()));
    }
    let outcomes = mounts.settle_all().await;
    for (index, outcome) in &outcomes {
        if let MountOutcome::Failed(msg) = outcome {
            log::warn!("chart for message {} failed: {}", index, msg);
        }
    }
    log::info!("mounted {} visualization(s)", outcomes.len());

    let mut body = String::new();
    if transcript.is_empty() {
        body.push_str("<p class=\"empty\">No messages.</p>\n");
    }
    for (message, slot) in transcript.messages().iter().zip(&slots) {
        body.push_str(&message_html(message, slot));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <meta name=\"generator\" content=\"{generator}\">\n<meta name=\"created\" content=\"{created}\">\n\
         <style>\n{STYLE}</style>\n<script src=\"{lib}\"></script>\n</head>\n<body>\n<h1>{title}</h1>\n\
         {body}<script>\n{calls}</script>\n</body>\n</html>\n",
        title = escape(title),
        generator = escape(&format!("{} {}", crate::core::app::NAME, crate::core::app::VERSION)),
        created = chrono::Utc::now().to_rfc3339(),
        lib = escape(&config.chart_lib_url),
        calls = runtime.script(),
    )
}

fn message_html(message: &Message, slot: &MountSlot) -> String {
    let role = match message.role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    let class = if message.is_error {
        format!("{} error", role)
    } else {
        role.to_string()
    };
    let mut html = format!("<section class=\"message {}\">\n", class);
    html.push_str(&message.display_html());
    if message.has_visualization {
        html.push_str("\n<div class=\"chart\">");
        html.push_str(&slot.to_html());
        html.push_str("</div>");
    }
    if let Some(contexts) = message.contexts.as_ref().filter(|c| !c.is_empty()) {
        html.push_str("\n<details class=\"contexts\"><summary>Sources</summary><ul>");
        for ctx in contexts {
            html.push_str(&format!("<li>{}</li>", escape(ctx)));
        }
        html.push_str("</ul></details>");
    }
    html.push_str("\n</section>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config;

    const CHART: &str = "Sales by region:\n<!DOCTYPE html><html><body><div id=\"chart\"></div><script>var data = [{x: ['N', 'S'], y: [3, 5], type: 'bar'}]; var layout = {title: 'Regions'}; Plotly.newPlot('chart', data, layout);</script></body></html>\nNorth lags.";

    fn test_config() -> Config {
        config::from_lookup(|key| match key {
            "ANSWER_RENDER_MOUNT_DELAY_MS" => Some("0".to_string()),
            _ => None,
        })
        .expect("config")
    }

    #[tokio::test(start_paused = true)]
    async fn page_contains_prose_and_unique_chart_calls() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("Show sales"));
        transcript.push(Message::assistant(CHART, Some(vec!["report.pdf".into()])));
        transcript.push(Message::user("Again"));
        transcript.push(Message::assistant(CHART, None));

        let page = render_page(&transcript, &test_config(), "Sales <Q3>").await;

        assert!(page.contains("<title>Sales &lt;Q3&gt;</title>"));
        assert!(page.contains("<p class=\"md-paragraph\">Sales by region:</p>"));
        assert!(page.contains("<div id=\"chart-1\""));
        assert!(page.contains("<div id=\"chart-3\""));
        assert!(page.contains(r#"Plotly.newPlot("chart-1", [{"type":"bar","x":["N","S"],"y":[3,5]}], {"title":"Regions"});"#));
        assert!(page.contains("Plotly.newPlot(\"chart-3\""));
        assert!(page.contains("<li>report.pdf</li>"));
        assert!(page.contains("https://cdn.plot.ly/"));
    }

    #[tokio::test]
    async fn empty_transcript_still_renders_a_page() {
        let page = render_page(&Transcript::new(), &test_config(), "Nothing").await;
        assert!(page.contains("No messages."));
        assert!(page.ends_with("</html>\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn broken_chart_shows_error_but_page_renders() {
        let mut transcript = Transcript::new();
        transcript.push(Message::assistant(
            "<html><body><div id=\"c\"></div><script>var data = [oops(];</script></body></html>",
            None,
        ));
        transcript.push(Message::error("Upstream timed out"));

        let page = render_page(&transcript, &test_config(), "t").await;
        assert!(page.contains("class=\"chart-error\""));
        assert!(page.contains("class=\"message assistant error\""));
        assert!(page.contains("Upstream timed out"));
    }
}

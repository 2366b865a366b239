//! CLI-only commands: format, extract and page.
//!
//! These read answer files (or stdin) and write HTML or JSON to stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::answer;
use crate::core::config::Config;
use crate::core::format;
use crate::core::message::Message;
use crate::core::page;
use crate::core::response::{self, QueryResponse};
use crate::core::transcript::Transcript;

/// Read input from a file, or stdin when the path is `-` or absent.
fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p).map_err(|e| {
            io::Error::new(e.kind(), format!("Failed to read {}: {}", p.display(), e))
        }),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn read_answer(path: Option<&Path>) -> io::Result<QueryResponse> {
    read_input(path).map(|s| response::read_answer(&s))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FormatOutput {
    #[serde(flatten)]
    parsed: answer::ParsedAnswer,
    prose: String,
    contexts: Option<Vec<String>>,
}

/// Run the `format` command: print the prose as display HTML (or JSON).
pub fn run_format(path: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let resp = read_answer(path)?;
    let parsed = answer::parse_message(&resp.answer);
    let prose = format::format_message(&parsed.text);
    if parsed.has_visualization {
        log::info!("answer carries a visualization; use `extract` or `page` to see it");
    }
    if json {
        let out = FormatOutput {
            parsed,
            prose,
            contexts: resp.contexts,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", prose);
    }
    Ok(())
}

/// Run the `extract` command. Returns whether a visualization was found.
pub fn run_extract(path: Option<&Path>) -> io::Result<bool> {
    let resp = read_answer(path)?;
    match answer::parse_message(&resp.answer).html {
        Some(html) => {
            println!("{}", html);
            Ok(true)
        }
        None => {
            eprintln!("No visualization found.");
            Ok(false)
        }
    }
}

/// Run the `page` command: one assistant message per input, charts mounted.
pub async fn run_page(
    config: &Config,
    inputs: &[PathBuf],
    output: Option<&Path>,
    title: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut transcript = Transcript::new();
    for input in inputs {
        let message = match read_answer(Some(input.as_path())) {
            Ok(resp) => Message::assistant(&resp.answer, resp.contexts),
            Err(e) => {
                log::warn!("{}", e);
                Message::error(format!("Could not load answer: {}", e))
            }
        };
        transcript.push(message);
    }

    let html = page::render_page(&transcript, config, title).await;
    match output {
        Some(path) => {
            fs::write(path, html)?;
            eprintln!("Wrote {} message(s) to {}", transcript.len(), path.display());
        }
        None => io::stdout().write_all(html.as_bytes())?,
    }
    Ok(())
}

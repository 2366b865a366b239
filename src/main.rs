//! # answer-render
//!
//! Formats answers from an AI chat service for display and re-hydrates the
//! chart documents they embed.
//!
//! ## Features
//! - Markdown-ish prose (headers, bullets, bold, pipe tables) to HTML
//! - Extraction of embedded chart documents from answers
//! - Transcript pages with per-message, collision-free chart mounts

mod cli;
mod core;
mod run;

use clap::Parser;
use dotenv::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args = cli::Args::parse();
    run::init_logger(&args);

    match run::run(args).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  answer-render format answer.txt          Print display HTML for an answer
  answer-render format --json -            Read stdin, print the parsed answer as JSON
  answer-render extract response.json      Print the embedded chart document
  answer-render page a.txt b.json -o t.html  Build a transcript page with live charts
  answer-render completions bash           Generate bash completions

Input files may hold raw answer text or an upstream response body
({\"answer\": ..., \"contexts\": [...]}).
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Format AI chat answers and re-hydrate their embedded charts",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the prose of an answer as display HTML
    Format {
        /// Answer file ('-' or omitted reads stdin)
        input: Option<PathBuf>,
        /// Print the parsed answer and formatted prose as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the visualization markup embedded in an answer (exit code 2 if none)
    Extract {
        /// Answer file ('-' or omitted reads stdin)
        input: Option<PathBuf>,
    },
    /// Build a standalone transcript page, one assistant message per input
    Page {
        /// Answer files, in transcript order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Page title
        #[arg(long, default_value = "Chat transcript")]
        title: String,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}

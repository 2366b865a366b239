//! Application run modes: logger init and subcommand dispatch.

use std::io;

use clap::CommandFactory;

use crate::cli::{self, Args, Commands};
use crate::core;

/// Initialize env_logger on stderr so stdout stays clean for HTML/JSON output.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .target(env_logger::Target::Stderr)
        .try_init();
}

/// Run the selected subcommand. Returns the process exit code.
pub async fn run(args: Args) -> Result<i32, Box<dyn std::error::Error>> {
    match args.command {
        Commands::Format { input, json } => {
            core::cli::run_format(input.as_deref(), json)?;
            Ok(0)
        }
        Commands::Extract { input } => {
            let found = core::cli::run_extract(input.as_deref())?;
            Ok(if found { 0 } else { 2 })
        }
        Commands::Page {
            inputs,
            output,
            title,
        } => {
            let config = core::config::load()?;
            core::cli::run_page(&config, &inputs, output.as_deref(), &title).await?;
            Ok(0)
        }
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            let name = cmd.get_name().to_string();
            cli::generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(0)
        }
    }
}

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

use cli::{Cli, Commands};
use config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration loaded");

    let output = match &cli.command {
        Commands::Next(args) => commands::next(args, &config),
        Commands::Schedule(args) => commands::schedule(args, &config),
        Commands::Complete(args) => commands::complete_task(args, &config),
        Commands::Check(args) => commands::check(args),
    }
    .inspect_err(|err| tracing::debug!(error = %err, "command failed"))?;

    if cli.json {
        println!("{}", serde_json::to_string(&output.json)?);
    } else {
        println!("{}", output.text);
    }
    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

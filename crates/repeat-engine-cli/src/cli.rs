use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Compute the next date of a repeating task
#[derive(Parser, Debug)]
#[command(name = "nextdate", author, version, about, long_about = None)]
pub struct Cli {
    /// Print results as a JSON object
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to nextdate.toml in the working directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the next date of a repeat rule
    Next(NextArgs),
    /// Normalise the date a task is saved with
    Schedule(ScheduleArgs),
    /// Mark a task as done: prints its new date, or `remove` for a one-off task
    Complete(CompleteArgs),
    /// Validate a repeat rule and print its canonical form
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct NextArgs {
    /// Previous date of the task (YYYYMMDD)
    #[arg(long)]
    pub date: String,
    /// Repeat rule, e.g. "d 7", "w 1,4", "m -1"
    #[arg(long, allow_hyphen_values = true)]
    pub repeat: String,
    /// Reference date (YYYYMMDD), defaults to today in the configured timezone
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Requested date (YYYYMMDD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
    /// Repeat rule
    #[arg(long, allow_hyphen_values = true)]
    pub repeat: Option<String>,
    /// Reference date (YYYYMMDD), defaults to today in the configured timezone
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// Current date of the task (YYYYMMDD)
    #[arg(long)]
    pub date: String,
    /// Repeat rule; without one the task is removed
    #[arg(long, allow_hyphen_values = true)]
    pub repeat: Option<String>,
    /// Reference date (YYYYMMDD), defaults to today in the configured timezone
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Repeat rule to validate
    #[arg(allow_hyphen_values = true)]
    pub rule: String,
}

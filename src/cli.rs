use clap::Parser;

use crate::cmd::Commands;

/// In-memory kanban board and project tracker.
/// All state is seeded at startup and discarded on exit.
#[derive(Parser)]
#[command(name = "taskflow", version, about = "Kanban board and project tracker")]
pub struct Cli {
    /// Start with an empty board and no projects.
    #[arg(long, global = true)]
    pub empty: bool,

    /// Report missing tasks and projects as errors instead of ignoring them.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Do not ask for confirmation before deleting.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Log filter, e.g. "debug" or "taskflow=trace". Overrides TASKFLOW_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

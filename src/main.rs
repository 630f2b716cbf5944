//! # TaskFlow - Kanban Board Engine
//!
//! An in-memory project board with a line-oriented console.
//!
//! ## Key Features
//!
//! - **Column Board**: Four workflow columns (To Do → In Progress → Review → Done) holding
//!   task cards that move between columns
//! - **Project Store**: Projects with their own subtask lists, plus loading, error and
//!   selection flags
//! - **Typed Updates**: Partial edits go through patch structs that name exactly which
//!   fields may change
//! - **Dashboard**: Active projects, completed work, team size and this week's deadlines
//!
//! Nothing is persisted: each run starts from the demo data (or empty with `--empty`)
//! and everything is discarded on exit.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive session
//! taskflow shell
//!
//! # Inside the shell
//! taskflow> add "Write release notes" --assignee "Lisa Park" --due friday
//! taskflow> move 6 todo in-progress
//! taskflow> subtask update 1 2 --done
//! taskflow> stats
//!
//! # One-shot views of the demo data
//! taskflow board
//! taskflow export
//! ```
//!
//! Board tasks and project subtasks are separate records; changing one never touches
//! the other.

use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod board;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod ids;
pub mod project;
pub mod seed;
pub mod shell;
pub mod stats;
pub mod store;
pub mod task;
pub mod util;
pub mod workspace;

use cli::Cli;
use cmd::*;
use config::{Config, DEFAULT_LOG_FILTER, LOG_ENV};
use workspace::Workspace;

fn init_tracing(cli_filter: Option<&str>) {
    let filter = match cli_filter {
        Some(directives) => EnvFilter::try_new(directives).ok(),
        None => EnvFilter::try_from_env(LOG_ENV).ok(),
    }
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_cli(&cli);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Shell => {
            let stdin = io::stdin();
            cmd_shell(config, stdin.lock(), out)?;
        }
        Commands::Board => cmd_board(&Workspace::load(&config), &mut out)?,
        Commands::Projects => cmd_projects(&Workspace::load(&config), &mut out)?,
        Commands::Stats => cmd_stats(&Workspace::load(&config), &mut out)?,
        Commands::Export => cmd_export(&Workspace::load(&config), &mut out)?,
        Commands::Completions { shell } => cmd_completions(shell, &mut out),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    if let Err(e) = run(cli) {
        // A closed pipe on stdout is not worth reporting.
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::BrokenPipe {
                return;
            }
        }
        let _ = writeln!(io::stderr(), "Error: {e:#}");
        std::process::exit(1);
    }
}

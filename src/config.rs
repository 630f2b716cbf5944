//! Runtime configuration derived from command-line flags.

use crate::cli::Cli;

/// Environment variable consulted for the log filter when `--log-level` is absent.
pub const LOG_ENV: &str = "TASKFLOW_LOG";

/// Default log filter.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Session-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Start from the demo data rather than empty stores.
    pub seed: bool,
    /// Print "not found" results instead of silently ignoring them.
    pub strict: bool,
    /// Skip confirmation prompts for destructive commands.
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: true,
            strict: false,
            assume_yes: false,
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Config {
            seed: !cli.empty,
            strict: cli.strict,
            assume_yes: cli.yes,
        }
    }
}

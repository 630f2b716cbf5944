//! Enumerations and field types for board tasks and projects.
//!
//! This module defines the closed value sets used across the board and the
//! project store: task priorities, the four workflow columns, and project
//! lifecycle statuses.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority classification shared by board tasks and projects.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Workflow stage a board task sits in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnId {
    Todo,
    #[serde(alias = "inprogress")]
    #[value(alias = "inprogress")]
    InProgress,
    Review,
    Done,
}

impl ColumnId {
    /// All columns in board order.
    pub const ALL: [ColumnId; 4] = [ColumnId::Todo, ColumnId::InProgress, ColumnId::Review, ColumnId::Done];

    /// Position of this column on the board.
    pub fn index(self) -> usize {
        match self {
            ColumnId::Todo => 0,
            ColumnId::InProgress => 1,
            ColumnId::Review => 2,
            ColumnId::Done => 3,
        }
    }

    /// Stable identifier, as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "in-progress",
            ColumnId::Review => "review",
            ColumnId::Done => "done",
        }
    }

    /// Human-readable column heading.
    pub fn title(self) -> &'static str {
        match self {
            ColumnId::Todo => "To Do",
            ColumnId::InProgress => "In Progress",
            ColumnId::Review => "Review",
            ColumnId::Done => "Done",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(ColumnId::Todo),
            "in-progress" | "inprogress" => Ok(ColumnId::InProgress),
            "review" => Ok(ColumnId::Review),
            "done" => Ok(ColumnId::Done),
            other => Err(format!("unknown column '{other}' (expected todo, in-progress, review or done)")),
        }
    }
}

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    InProgress,
    Review,
    Completed,
}

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

/// Format a project status for display.
pub fn format_project_status(s: ProjectStatus) -> &'static str {
    match s {
        ProjectStatus::Planning => "Planning",
        ProjectStatus::Active => "Active",
        ProjectStatus::InProgress => "In Progress",
        ProjectStatus::Review => "Review",
        ProjectStatus::Completed => "Completed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_parsing_accepts_legacy_alias() {
        assert_eq!("todo".parse::<ColumnId>(), Ok(ColumnId::Todo));
        assert_eq!("In-Progress".parse::<ColumnId>(), Ok(ColumnId::InProgress));
        assert_eq!("inprogress".parse::<ColumnId>(), Ok(ColumnId::InProgress));
        assert!("backlog".parse::<ColumnId>().is_err());
    }

    #[test]
    fn test_column_order_matches_index() {
        for (i, column) in ColumnId::ALL.iter().enumerate() {
            assert_eq!(column.index(), i);
        }
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        assert_eq!(serde_json::to_string(&ColumnId::InProgress).unwrap(), "\"in-progress\"");
        assert_eq!(serde_json::to_string(&ProjectStatus::InProgress).unwrap(), "\"in-progress\"");
        let parsed: ColumnId = serde_json::from_str("\"inprogress\"").unwrap();
        assert_eq!(parsed, ColumnId::InProgress);
    }
}

//! The two stores a session works on.
//!
//! The board and the project store are deliberately independent: board tasks
//! and project subtasks are separate records and nothing keeps them in sync.

use serde::Serialize;

use crate::board::Board;
use crate::config::Config;
use crate::fields::ColumnId;
use crate::project::Project;
use crate::seed;
use crate::store::ProjectStore;
use crate::task::Task;

#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub board: Board,
    pub projects: ProjectStore,
}

impl Workspace {
    /// Seeded or empty stores, depending on configuration.
    pub fn load(config: &Config) -> Self {
        if config.seed {
            Workspace::seeded()
        } else {
            Workspace {
                board: Board::new(),
                projects: ProjectStore::new(),
            }
        }
    }

    pub fn seeded() -> Self {
        Workspace {
            board: seed::board(),
            projects: ProjectStore::with_projects(seed::projects()),
        }
    }

    /// Serializable view of everything in memory.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            columns: self
                .board
                .columns()
                .map(|(id, tasks)| ColumnSnapshot { id, title: id.title(), tasks })
                .collect(),
            projects: self.projects.projects(),
            selected_project: self.projects.selected_id(),
            loading: self.projects.is_loading(),
            error: self.projects.error(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub columns: Vec<ColumnSnapshot<'a>>,
    pub projects: &'a [Project],
    pub selected_project: Option<u64>,
    pub loading: bool,
    pub error: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct ColumnSnapshot<'a> {
    pub id: ColumnId,
    pub title: &'static str,
    pub tasks: &'a [Task],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_gives_empty_stores() {
        let ws = Workspace::load(&Config { seed: false, ..Config::default() });
        assert!(ws.board.is_empty());
        assert!(ws.projects.projects().is_empty());
    }

    #[test]
    fn test_snapshot_serializes_columns_in_order() {
        let ws = Workspace::seeded();
        let json = serde_json::to_value(ws.snapshot()).unwrap();
        let ids: Vec<&str> = json["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["todo", "in-progress", "review", "done"]);
        assert_eq!(json["columns"][0]["tasks"][0]["dueDate"], "2024-01-15");
        assert_eq!(json["projects"][0]["teamMembers"][0], "John Doe");
        assert_eq!(json["selectedProject"], serde_json::Value::Null);
    }
}

//! Project and subtask records.
//!
//! A `Project` owns its ordered list of `Subtask`s. Partial updates go through
//! the typed `ProjectPatch` and `SubtaskPatch` structs, which enumerate exactly
//! the fields a caller may change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::fields::{Priority, ProjectStatus};

/// A top-level unit of work with its own subtask list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress: u8,
    pub team_members: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<Subtask>,
}

impl Project {
    /// Share of subtasks marked complete, as a whole percentage.
    pub fn completion_percent(&self) -> u8 {
        if self.tasks.is_empty() {
            return 0;
        }
        let done = self.tasks.iter().filter(|t| t.completed).count();
        ((done * 100) / self.tasks.len()) as u8
    }

    pub fn subtask(&self, id: u64) -> Option<&Subtask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub(crate) fn subtask_mut(&mut self, id: u64) -> Option<&mut Subtask> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

/// A unit of work owned by exactly one project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub assignee: String,
}

/// Project fields supplied on creation. Id and progress are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub team_members: Vec<String>,
    pub tasks: Vec<NewSubtask>,
}

/// Subtask fields supplied on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSubtask {
    pub title: String,
    pub completed: bool,
    pub assignee: String,
}

impl NewSubtask {
    pub fn into_subtask(self, id: u64) -> Subtask {
        Subtask {
            id,
            title: self.title,
            completed: self.completed,
            assignee: self.assignee,
        }
    }
}

/// Field-level update for a project. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress: Option<u8>,
    pub team_members: Option<Vec<String>>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        *self == ProjectPatch::default()
    }

    /// Reject values the record cannot hold.
    pub fn validate(&self) -> Result<(), StoreError> {
        match self.progress {
            Some(value) if value > 100 => Err(StoreError::InvalidProgress { value }),
            _ => Ok(()),
        }
    }

    /// Merge the set fields into `project`.
    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(priority) = self.priority {
            project.priority = priority;
        }
        if let Some(start) = self.start_date {
            project.start_date = Some(start);
        }
        if let Some(end) = self.end_date {
            project.end_date = Some(end);
        }
        if let Some(progress) = self.progress {
            project.progress = progress;
        }
        if let Some(members) = self.team_members {
            project.team_members = members;
        }
    }
}

/// Field-level update for a subtask.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub assignee: Option<String>,
}

impl SubtaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == SubtaskPatch::default()
    }

    pub fn apply(self, subtask: &mut Subtask) {
        if let Some(title) = self.title {
            subtask.title = title;
        }
        if let Some(completed) = self.completed {
            subtask.completed = completed;
        }
        if let Some(assignee) = self.assignee {
            subtask.assignee = assignee;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_patch_changes_only_set_fields() {
        let mut project = seed::projects().remove(0);
        let before = project.clone();
        ProjectPatch { status: Some(ProjectStatus::Review), ..ProjectPatch::default() }.apply(&mut project);

        assert_eq!(project.status, ProjectStatus::Review);
        assert_eq!(Project { status: before.status, ..project.clone() }, before);
    }

    #[test]
    fn test_progress_above_hundred_is_invalid() {
        let patch = ProjectPatch { progress: Some(101), ..ProjectPatch::default() };
        assert_eq!(patch.validate(), Err(StoreError::InvalidProgress { value: 101 }));
        let patch = ProjectPatch { progress: Some(100), ..ProjectPatch::default() };
        assert_eq!(patch.validate(), Ok(()));
    }

    #[test]
    fn test_completion_percent() {
        let projects = seed::projects();
        assert_eq!(projects[0].completion_percent(), 33);
        assert_eq!(projects[1].completion_percent(), 50);

        let mut empty = projects[0].clone();
        empty.tasks.clear();
        assert_eq!(empty.completion_percent(), 0);
    }

    #[test]
    fn test_subtask_patch() {
        let mut subtask = Subtask { id: 1, title: "Draft".into(), completed: false, assignee: "Tom Brown".into() };
        SubtaskPatch { completed: Some(true), ..SubtaskPatch::default() }.apply(&mut subtask);
        assert!(subtask.completed);
        assert_eq!(subtask.title, "Draft");
        assert!(SubtaskPatch::default().is_empty());
    }
}

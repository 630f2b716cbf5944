//! Board task data structures.
//!
//! This module defines the `Task` card that lives in a board column and the
//! `NewTask` candidate produced by the create form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::fields::Priority;

/// A card on the column board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Candidate task as entered in the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// Check the two required fields.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.title.trim().is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        if self.assignee.trim().is_empty() {
            return Err(BoardError::MissingAssignee);
        }
        Ok(())
    }

    /// Turn a validated candidate into a card. Tags always start empty.
    pub fn into_task(self, id: u64) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            assignee: self.assignee,
            due_date: self.due_date,
            tags: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_rejected_before_assignee() {
        let candidate = NewTask { title: "   ".into(), ..NewTask::default() };
        assert_eq!(candidate.validate(), Err(BoardError::EmptyTitle));
    }

    #[test]
    fn test_missing_assignee_rejected() {
        let candidate = NewTask { title: "Write docs".into(), ..NewTask::default() };
        assert_eq!(candidate.validate(), Err(BoardError::MissingAssignee));

        let blank = NewTask { title: "Write docs".into(), assignee: "  ".into(), ..NewTask::default() };
        assert_eq!(blank.validate(), Err(BoardError::MissingAssignee));
    }

    #[test]
    fn test_into_task_clears_tags() {
        let candidate = NewTask {
            title: "Write docs".into(),
            assignee: "Lisa Park".into(),
            ..NewTask::default()
        };
        let task = candidate.into_task(12);
        assert_eq!(task.id, 12);
        assert!(task.tags.is_empty());
        assert_eq!(task.priority, Priority::Medium);
    }
}

//! Error types for the board and the project store.

use thiserror::Error;

use crate::fields::ColumnId;

/// Failures raised by column board operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Task title is required")]
    EmptyTitle,

    #[error("Please assign the task to a team member")]
    MissingAssignee,

    #[error("Task {id} not found in column '{column}'")]
    TaskNotFound { id: u64, column: ColumnId },

    #[error("Task {id} appears more than once on the board")]
    DuplicateTask { id: u64 },
}

impl BoardError {
    /// True when the error only reports a missing task.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BoardError::TaskNotFound { .. })
    }
}

/// Failures raised by project store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Project {id} not found")]
    ProjectNotFound { id: u64 },

    #[error("Subtask {subtask_id} not found in project {project_id}")]
    SubtaskNotFound { project_id: u64, subtask_id: u64 },

    #[error("Invalid progress {value}: must be between 0 and 100")]
    InvalidProgress { value: u8 },
}

impl StoreError {
    /// True when the error only reports a missing project or subtask.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::ProjectNotFound { .. } | StoreError::SubtaskNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(BoardError::TaskNotFound { id: 1, column: ColumnId::Todo }.is_not_found());
        assert!(!BoardError::EmptyTitle.is_not_found());
        assert!(StoreError::SubtaskNotFound { project_id: 1, subtask_id: 2 }.is_not_found());
        assert!(!StoreError::InvalidProgress { value: 120 }.is_not_found());
    }

    #[test]
    fn test_messages_name_the_column() {
        let err = BoardError::TaskNotFound { id: 7, column: ColumnId::InProgress };
        assert_eq!(err.to_string(), "Task 7 not found in column 'in-progress'");
    }
}

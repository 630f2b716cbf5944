//! Column board state and its transitions.
//!
//! The board holds one ordered list of tasks per workflow column. Every task id
//! lives in exactly one column; create, move and delete are the only ways the
//! lists change.

use std::collections::HashSet;

use tracing::debug;

use crate::error::BoardError;
use crate::fields::ColumnId;
use crate::ids::IdSequence;
use crate::task::{NewTask, Task};

/// In-memory kanban board.
#[derive(Debug, Clone, Default)]
pub struct Board {
    columns: [Vec<Task>; 4],
    ids: IdSequence,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Board::default()
    }

    /// Build a board from pre-existing column contents.
    pub fn from_columns<I>(columns: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (ColumnId, Vec<Task>)>,
    {
        let mut board = Board::new();
        let mut seen = HashSet::new();
        for (column, tasks) in columns {
            for task in tasks {
                if !seen.insert(task.id) {
                    return Err(BoardError::DuplicateTask { id: task.id });
                }
                board.ids.observe(task.id);
                board.columns[column.index()].push(task);
            }
        }
        Ok(board)
    }

    /// Tasks in a column, in insertion order.
    pub fn column(&self, column: ColumnId) -> &[Task] {
        &self.columns[column.index()]
    }

    /// All columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = (ColumnId, &[Task])> {
        ColumnId::ALL.into_iter().map(move |c| (c, self.column(c)))
    }

    /// Total number of tasks across all columns.
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locate a task and the column holding it.
    pub fn find(&self, id: u64) -> Option<(ColumnId, &Task)> {
        self.columns()
            .find_map(|(column, tasks)| tasks.iter().find(|t| t.id == id).map(|t| (column, t)))
    }

    /// Validate a candidate and append it to the To Do column.
    pub fn create_task(&mut self, candidate: NewTask) -> Result<u64, BoardError> {
        candidate.validate()?;
        let id = self.ids.next_id();
        let task = candidate.into_task(id);
        debug!(task_id = id, title = %task.title, "created task");
        self.columns[ColumnId::Todo.index()].push(task);
        Ok(id)
    }

    /// Move a task to the end of another column.
    ///
    /// Moving within the same column is a no-op and succeeds whether or not the
    /// task is present.
    pub fn move_task(&mut self, id: u64, source: ColumnId, target: ColumnId) -> Result<(), BoardError> {
        if source == target {
            return Ok(());
        }
        let task = self.take(id, source)?;
        debug!(task_id = id, from = %source, to = %target, "moved task");
        self.columns[target.index()].push(task);
        Ok(())
    }

    /// Remove a task from a column, returning it.
    pub fn delete_task(&mut self, id: u64, column: ColumnId) -> Result<Task, BoardError> {
        let task = self.take(id, column)?;
        debug!(task_id = id, column = %column, "deleted task");
        Ok(task)
    }

    fn take(&mut self, id: u64, column: ColumnId) -> Result<Task, BoardError> {
        let list = &mut self.columns[column.index()];
        let idx = list
            .iter()
            .position(|t| t.id == id)
            .ok_or(BoardError::TaskNotFound { id, column })?;
        Ok(list.remove(idx))
    }
}

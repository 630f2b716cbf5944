//! Dashboard summary across the board and the project store.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::board::Board;
use crate::fields::{ColumnId, ProjectStatus};
use crate::store::ProjectStore;
use crate::util::start_end_of_week;

/// Headline counts shown above the board.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub active_projects: usize,
    pub tasks_completed: usize,
    pub team_members: usize,
    pub deadlines_this_week: usize,
}

impl Stats {
    pub fn collect(board: &Board, store: &ProjectStore, today: NaiveDate) -> Self {
        let (week_start, week_end) = start_end_of_week(today);
        let this_week = |d: Option<NaiveDate>| d.is_some_and(|d| d >= week_start && d <= week_end);

        let open_projects = store.projects().iter().filter(|p| p.status != ProjectStatus::Completed);

        let completed_subtasks = store
            .projects()
            .iter()
            .flat_map(|p| p.tasks.iter())
            .filter(|t| t.completed)
            .count();

        let mut members: BTreeSet<&str> = BTreeSet::new();
        for (_, tasks) in board.columns() {
            members.extend(tasks.iter().map(|t| t.assignee.as_str()));
        }
        for project in store.projects() {
            members.extend(project.team_members.iter().map(String::as_str));
            members.extend(project.tasks.iter().map(|t| t.assignee.as_str()));
        }
        members.retain(|m| !m.trim().is_empty());

        let board_deadlines = board
            .columns()
            .filter(|(column, _)| *column != ColumnId::Done)
            .flat_map(|(_, tasks)| tasks.iter())
            .filter(|t| this_week(t.due_date))
            .count();
        let project_deadlines = open_projects.clone().filter(|p| this_week(p.end_date)).count();

        Stats {
            active_projects: open_projects.count(),
            tasks_completed: board.column(ColumnId::Done).len() + completed_subtasks,
            team_members: members.len(),
            deadlines_this_week: board_deadlines + project_deadlines,
        }
    }
}

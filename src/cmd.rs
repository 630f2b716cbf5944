//! Command implementations for the CLI interface.
//!
//! This module holds the top-level subcommands plus the printers that render
//! board, project and dashboard state as plain-text tables. The interactive
//! shell reuses the same printers.

use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::config::Config;
use crate::fields::{format_priority, format_project_status, ColumnId};
use crate::project::Project;
use crate::seed::TEAM_MEMBERS;
use crate::shell::Session;
use crate::stats::Stats;
use crate::store::ProjectStore;
use crate::task::Task;
use crate::util::{format_due_relative, truncate};
use crate::workspace::Workspace;

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session reading commands from stdin.
    Shell,

    /// Print the board, column by column.
    Board,

    /// List projects.
    Projects,

    /// Print dashboard statistics.
    Stats,

    /// Print a JSON snapshot of all in-memory state.
    Export,

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Run the interactive shell on the given streams.
pub fn cmd_shell<R: BufRead, W: Write>(config: Config, input: R, out: W) -> anyhow::Result<()> {
    let workspace = Workspace::load(&config);
    let mut session = Session::new(workspace, config, input, out);
    session.run()
}

pub fn cmd_board(ws: &Workspace, out: &mut impl Write) -> io::Result<()> {
    print_board(ws, Local::now().date_naive(), out)
}

pub fn cmd_projects(ws: &Workspace, out: &mut impl Write) -> io::Result<()> {
    print_projects(&ws.projects, out)
}

pub fn cmd_stats(ws: &Workspace, out: &mut impl Write) -> io::Result<()> {
    let stats = Stats::collect(&ws.board, &ws.projects, Local::now().date_naive());
    print_stats(&stats, out)
}

pub fn cmd_export(ws: &Workspace, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &ws.snapshot())?;
    writeln!(out)
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell, out: &mut impl Write) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, out);
}

/// Print every column with its task count.
pub fn print_board(ws: &Workspace, today: NaiveDate, out: &mut impl Write) -> io::Result<()> {
    for (column, tasks) in ws.board.columns() {
        writeln!(out, "== {} ({}) ==", column.title(), tasks.len())?;
        if tasks.is_empty() {
            writeln!(out, "  (empty)")?;
            continue;
        }
        print_task_table(tasks, today, out)?;
    }
    Ok(())
}

/// Print tasks in a formatted table.
pub fn print_task_table(tasks: &[Task], today: NaiveDate, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{:<14} {:<7} {:<10} {:<14} {}", "ID", "Pri", "Due", "Assignee", "Title [tags]")?;
    for t in tasks {
        let tags = if t.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", t.tags.join(","))
        };
        writeln!(
            out,
            "{:<14} {:<7} {:<10} {:<14} {}{}",
            t.id,
            format_priority(t.priority),
            format_due_relative(t.due_date, today),
            truncate(&t.assignee, 14),
            t.title,
            tags
        )?;
    }
    Ok(())
}

/// Print the full record of one board task.
pub fn print_task_detail(task: &Task, column: ColumnId, today: NaiveDate, out: &mut impl Write) -> io::Result<()> {
    let due = match task.due_date {
        Some(d) => format!("{} ({})", d, format_due_relative(Some(d), today)),
        None => "-".into(),
    };
    writeln!(out, "Task #{}: {}", task.id, task.title)?;
    writeln!(out, "Column:      {}", column.title())?;
    writeln!(out, "Priority:    {}", format_priority(task.priority))?;
    writeln!(out, "Assignee:    {}", task.assignee)?;
    writeln!(out, "Due:         {}", due)?;
    writeln!(
        out,
        "Tags:        {}",
        if task.tags.is_empty() { "-".to_string() } else { task.tags.join(", ") }
    )?;
    writeln!(out, "Description:")?;
    writeln!(out, "{}", if task.description.is_empty() { "-" } else { task.description.as_str() })
}

/// Print the project list with selection marker and progress.
pub fn print_projects(store: &ProjectStore, out: &mut impl Write) -> io::Result<()> {
    if store.projects().is_empty() {
        return writeln!(out, "No projects.");
    }
    writeln!(
        out,
        "  {:<14} {:<24} {:<12} {:<7} {:<9} {}",
        "ID", "Name", "Status", "Pri", "Progress", "Subtasks"
    )?;
    for p in store.projects() {
        let marker = if store.selected_id() == Some(p.id) { "*" } else { " " };
        let done = p.tasks.iter().filter(|t| t.completed).count();
        writeln!(
            out,
            "{} {:<14} {:<24} {:<12} {:<7} {:<9} {}/{}",
            marker,
            p.id,
            truncate(&p.name, 24),
            format_project_status(p.status),
            format_priority(p.priority),
            format!("{}%", p.progress),
            done,
            p.tasks.len()
        )?;
    }
    Ok(())
}

/// Print one project with its subtasks.
pub fn print_project_detail(project: &Project, out: &mut impl Write) -> io::Result<()> {
    let date = |d: Option<NaiveDate>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
    writeln!(out, "Project #{}: {}", project.id, project.name)?;
    writeln!(out, "Status:      {}", format_project_status(project.status))?;
    writeln!(out, "Priority:    {}", format_priority(project.priority))?;
    writeln!(out, "Dates:       {} -> {}", date(project.start_date), date(project.end_date))?;
    writeln!(
        out,
        "Progress:    {}% (subtasks {}% complete)",
        project.progress,
        project.completion_percent()
    )?;
    writeln!(
        out,
        "Team:        {}",
        if project.team_members.is_empty() { "-".to_string() } else { project.team_members.join(", ") }
    )?;
    if !project.description.is_empty() {
        writeln!(out, "Description: {}", project.description)?;
    }
    writeln!(out, "Subtasks:")?;
    if project.tasks.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for t in &project.tasks {
        let check = if t.completed { "x" } else { " " };
        let assignee = if t.assignee.is_empty() { "-" } else { t.assignee.as_str() };
        writeln!(out, "  [{}] {:<14} {} ({})", check, t.id, t.title, assignee)?;
    }
    Ok(())
}

/// Print the loading, error and selection flags.
pub fn print_status(store: &ProjectStore, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Loading:     {}", if store.is_loading() { "yes" } else { "no" })?;
    writeln!(out, "Error:       {}", store.error().unwrap_or("-"))?;
    let selected = match store.selected() {
        Some(p) => format!("{} ({})", p.id, p.name),
        None => "-".to_string(),
    };
    writeln!(out, "Selected:    {}", selected)
}

pub fn print_stats(stats: &Stats, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Active projects:      {}", stats.active_projects)?;
    writeln!(out, "Tasks completed:      {}", stats.tasks_completed)?;
    writeln!(out, "Team members:         {}", stats.team_members)?;
    writeln!(out, "Deadlines this week:  {}", stats.deadlines_this_week)
}

pub fn print_team(out: &mut impl Write) -> io::Result<()> {
    for member in TEAM_MEMBERS {
        writeln!(out, "{member}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_board_lists_columns_with_counts() {
        let ws = Workspace::seeded();
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let text = render(|out| print_board(&ws, today, out));
        assert!(text.contains("== To Do (2) =="));
        assert!(text.contains("== In Progress (1) =="));
        assert!(text.contains("== Done (1) =="));
        assert!(text.contains("Design Homepage Layout [design,ui/ux]"));
        assert!(text.contains("in 5d"));
    }

    #[test]
    fn test_empty_board_marks_columns() {
        let ws = Workspace::default();
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let text = render(|out| print_board(&ws, today, out));
        assert_eq!(text.matches("(empty)").count(), 4);
    }

    #[test]
    fn test_projects_mark_selection() {
        let mut ws = Workspace::seeded();
        ws.projects.set_selected_project(Some(1)).unwrap();
        let text = render(|out| print_projects(&ws.projects, out));
        assert!(text.lines().any(|l| l.starts_with('*') && l.contains("Website Redesign")));
        assert!(text.contains("1/3"));
    }

    #[test]
    fn test_project_detail_shows_subtasks() {
        let ws = Workspace::seeded();
        let project = ws.projects.project(2).unwrap();
        let text = render(|out| print_project_detail(project, out));
        assert!(text.contains("[x] 4"));
        assert!(text.contains("UI/UX design (Tom Brown)"));
        assert!(text.contains("2024-02-01 -> 2024-06-01"));
    }

    #[test]
    fn test_export_is_valid_json() {
        let ws = Workspace::seeded();
        let text = render(|out| cmd_export(&ws, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["projects"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_completions_mention_binary() {
        let mut buf = Vec::new();
        cmd_completions(Shell::Bash, &mut buf);
        assert!(String::from_utf8(buf).unwrap().contains("taskflow"));
    }
}

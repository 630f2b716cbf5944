//! Interactive console session.
//!
//! Each input line is split with shell quoting rules and parsed by clap into an
//! [`Action`], which is applied to the session's [`Workspace`]. Parse errors,
//! validation failures and declined confirmations are reported and the session
//! keeps going; only I/O failures on the streams end it early.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info, warn};

use crate::cmd::{
    print_board, print_project_detail, print_projects, print_stats, print_status, print_task_detail, print_team,
};
use crate::config::Config;
use crate::fields::{ColumnId, Priority, ProjectStatus};
use crate::project::{NewProject, NewSubtask, ProjectPatch, SubtaskPatch};
use crate::stats::Stats;
use crate::store::{Applied, ProjectAction};
use crate::task::NewTask;
use crate::util::{parse_due_input, split_list};
use crate::workspace::Workspace;

const PROMPT: &str = "taskflow> ";

/// One line of shell input.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true, name = "taskflow")]
pub struct ShellLine {
    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Show every column of the board.
    Board,

    /// Show one board task in full.
    Show { id: u64 },

    /// List team members available for assignment.
    Team,

    /// Create a task in the To Do column.
    Add {
        title: String,
        /// Team member responsible for the task.
        #[arg(long, default_value = "")]
        assignee: String,
        #[arg(long, default_value = "")]
        desc: String,
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "friday", "in 3d".
        #[arg(long)]
        due: Option<String>,
    },

    /// Move a task between columns.
    Move {
        id: u64,
        #[arg(value_enum)]
        from: ColumnId,
        #[arg(value_enum)]
        to: ColumnId,
    },

    /// Delete a task from a column.
    Delete {
        id: u64,
        #[arg(value_enum)]
        column: ColumnId,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List projects.
    Projects,

    /// Inspect and edit projects.
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Edit subtasks within a project.
    Subtask {
        #[command(subcommand)]
        command: SubtaskCommand,
    },

    /// Set the loading flag.
    Loading {
        #[arg(action = ArgAction::Set)]
        value: bool,
    },

    /// Set the error message; with no message, clear it.
    Error { message: Vec<String> },

    /// Show loading, error and selection flags.
    Status,

    /// Print dashboard statistics.
    Stats,

    /// Print a JSON snapshot of all state.
    Export,

    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Show a project with its subtasks.
    Show { id: u64 },

    /// Create a project.
    Add {
        name: String,
        #[arg(long, default_value = "")]
        desc: String,
        #[arg(long, value_enum, default_value_t = ProjectStatus::Planning)]
        status: ProjectStatus,
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Team member. May be repeated or comma-separated.
        #[arg(long = "member")]
        members: Vec<String>,
    },

    /// Change fields on a project.
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long, value_enum)]
        status: Option<ProjectStatus>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        progress: Option<u8>,
        /// Replace the team. May be repeated or comma-separated.
        #[arg(long = "member")]
        members: Vec<String>,
    },

    /// Delete a project and its subtasks.
    Delete {
        id: u64,
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Select a project, or clear the selection when no id is given.
    Select { id: Option<u64> },
}

#[derive(Subcommand, Debug)]
pub enum SubtaskCommand {
    /// Add a subtask to a project.
    Add {
        project_id: u64,
        title: String,
        #[arg(long, default_value = "")]
        assignee: String,
        /// Create it already completed.
        #[arg(long)]
        done: bool,
    },

    /// Change fields on a subtask.
    Update {
        project_id: u64,
        task_id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        /// Mark complete.
        #[arg(long, conflicts_with = "open")]
        done: bool,
        /// Mark incomplete.
        #[arg(long)]
        open: bool,
    },

    /// Remove a subtask from a project.
    Delete {
        project_id: u64,
        task_id: u64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A running console bound to an input and an output stream.
pub struct Session<R, W> {
    workspace: Workspace,
    config: Config,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(workspace: Workspace, config: Config, input: R, out: W) -> Self {
        Session { workspace, config, input, out }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (Workspace, W) {
        (self.workspace, self.out)
    }

    /// Read and execute lines until `quit` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        info!(tasks = self.workspace.board.len(), projects = self.workspace.projects.projects().len(), "session started");
        writeln!(self.out, "TaskFlow shell. Type 'help' for commands, 'quit' to leave.")?;
        if self.workspace.board.is_empty() {
            writeln!(self.out, "The board is empty. Use 'add' to create a task.")?;
        }
        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                break;
            }
            if self.execute_line(&line)? == Flow::Quit {
                break;
            }
        }
        info!("session ended");
        Ok(())
    }

    /// Parse and apply one line of input.
    pub fn execute_line(&mut self, line: &str) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        let Some(tokens) = shlex::split(line) else {
            writeln!(self.out, "Error: unbalanced quotes")?;
            return Ok(Flow::Continue);
        };
        match ShellLine::try_parse_from(tokens) {
            Ok(parsed) => self.execute(parsed.action),
            Err(e) => {
                write!(self.out, "{}", e.render())?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Apply a parsed action.
    pub fn execute(&mut self, action: Action) -> io::Result<Flow> {
        let today = Local::now().date_naive();
        match action {
            Action::Board => print_board(&self.workspace, today, &mut self.out)?,
            Action::Show { id } => match self.workspace.board.find(id) {
                Some((column, task)) => print_task_detail(task, column, today, &mut self.out)?,
                None => self.not_found(format!("Task {id} not found"))?,
            },
            Action::Team => print_team(&mut self.out)?,
            Action::Add { title, assignee, desc, priority, due } => {
                let Some(due_date) = self.parse_date("due", due)? else {
                    return Ok(Flow::Continue);
                };
                let candidate = NewTask { title, description: desc, priority, assignee, due_date };
                match self.workspace.board.create_task(candidate) {
                    Ok(id) => writeln!(self.out, "Task created successfully! (#{id})")?,
                    Err(e) => self.rejected(e)?,
                }
            }
            Action::Move { id, from, to } => match self.workspace.board.move_task(id, from, to) {
                Ok(()) if from == to => {}
                Ok(()) => {
                    let title = self.workspace.board.find(id).map(|(_, t)| t.title.clone()).unwrap_or_default();
                    writeln!(self.out, "Task \"{}\" moved to {}", title, to.title())?;
                }
                Err(e) if e.is_not_found() => self.not_found(e)?,
                Err(e) => self.rejected(e)?,
            },
            Action::Delete { id, column, yes } => {
                let Some(title) = self.workspace.board.column(column).iter().find(|t| t.id == id).map(|t| t.title.clone())
                else {
                    self.not_found(format!("Task {id} not found in column '{column}'"))?;
                    return Ok(Flow::Continue);
                };
                if !self.confirm(yes, &format!("Delete task #{id} \"{title}\"?"))? {
                    return Ok(Flow::Continue);
                }
                match self.workspace.board.delete_task(id, column) {
                    Ok(_) => writeln!(self.out, "Task deleted successfully!")?,
                    Err(e) => self.not_found(e)?,
                }
            }
            Action::Projects => print_projects(&self.workspace.projects, &mut self.out)?,
            Action::Project { command } => self.execute_project(command)?,
            Action::Subtask { command } => self.execute_subtask(command)?,
            Action::Loading { value } => self.dispatch(ProjectAction::SetLoading(value))?,
            Action::Error { message } => {
                let message = Some(message.join(" ")).filter(|m| !m.trim().is_empty());
                self.dispatch(ProjectAction::SetError(message))?;
            }
            Action::Status => print_status(&self.workspace.projects, &mut self.out)?,
            Action::Stats => {
                let stats = Stats::collect(&self.workspace.board, &self.workspace.projects, today);
                print_stats(&stats, &mut self.out)?;
            }
            Action::Export => crate::cmd::cmd_export(&self.workspace, &mut self.out)?,
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn execute_project(&mut self, command: ProjectCommand) -> io::Result<()> {
        match command {
            ProjectCommand::Show { id } => match self.workspace.projects.project(id) {
                Some(project) => print_project_detail(project, &mut self.out),
                None => self.not_found(format!("Project {id} not found")),
            },
            ProjectCommand::Add { name, desc, status, priority, start, end, members } => {
                let Some(start_date) = self.parse_date("start", start)? else {
                    return Ok(());
                };
                let Some(end_date) = self.parse_date("end", end)? else {
                    return Ok(());
                };
                let project = NewProject {
                    name,
                    description: desc,
                    status,
                    priority,
                    start_date,
                    end_date,
                    team_members: split_list(&members),
                    tasks: Vec::new(),
                };
                self.dispatch(ProjectAction::AddProject(project))
            }
            ProjectCommand::Update { id, name, desc, status, priority, start, end, progress, members } => {
                let Some(start_date) = self.parse_date("start", start)? else {
                    return Ok(());
                };
                let Some(end_date) = self.parse_date("end", end)? else {
                    return Ok(());
                };
                let team_members = Some(split_list(&members)).filter(|m| !m.is_empty());
                let patch = ProjectPatch {
                    name,
                    description: desc,
                    status,
                    priority,
                    start_date,
                    end_date,
                    progress,
                    team_members,
                };
                if patch.is_empty() {
                    return writeln!(self.out, "Nothing to update.");
                }
                self.dispatch(ProjectAction::UpdateProject { id, patch })
            }
            ProjectCommand::Delete { id, yes } => {
                let Some(name) = self.workspace.projects.project(id).map(|p| p.name.clone()) else {
                    return self.not_found(format!("Project {id} not found"));
                };
                if !self.confirm(yes, &format!("Delete project #{id} \"{name}\" and its subtasks?"))? {
                    return Ok(());
                }
                self.dispatch(ProjectAction::DeleteProject(id))
            }
            ProjectCommand::Select { id } => self.dispatch(ProjectAction::SetSelectedProject(id)),
        }
    }

    fn execute_subtask(&mut self, command: SubtaskCommand) -> io::Result<()> {
        match command {
            SubtaskCommand::Add { project_id, title, assignee, done } => {
                let task = NewSubtask { title, completed: done, assignee };
                self.dispatch(ProjectAction::AddTask { project_id, task })
            }
            SubtaskCommand::Update { project_id, task_id, title, assignee, done, open } => {
                let completed = match (done, open) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                };
                let patch = SubtaskPatch { title, completed, assignee };
                if patch.is_empty() {
                    return writeln!(self.out, "Nothing to update.");
                }
                self.dispatch(ProjectAction::UpdateTask { project_id, task_id, patch })
            }
            SubtaskCommand::Delete { project_id, task_id, yes } => {
                let exists = self
                    .workspace
                    .projects
                    .project(project_id)
                    .is_some_and(|p| p.subtask(task_id).is_some());
                if exists && !self.confirm(yes, &format!("Delete subtask #{task_id} from project #{project_id}?"))? {
                    return Ok(());
                }
                self.dispatch(ProjectAction::DeleteTask { project_id, task_id })
            }
        }
    }

    /// Send an action to the project store and report the result.
    fn dispatch(&mut self, action: ProjectAction) -> io::Result<()> {
        let description = match &action {
            ProjectAction::AddProject(_) => "Project created",
            ProjectAction::UpdateProject { .. } => "Project updated",
            ProjectAction::DeleteProject(_) => "Project deleted",
            ProjectAction::SetSelectedProject(Some(_)) => "Project selected",
            ProjectAction::SetSelectedProject(None) => "Selection cleared",
            ProjectAction::AddTask { .. } => "Subtask added",
            ProjectAction::UpdateTask { .. } => "Subtask updated",
            ProjectAction::DeleteTask { .. } => "Subtask deleted",
            ProjectAction::SetLoading(_) | ProjectAction::SetError(_) => "",
        };
        match self.workspace.projects.dispatch(action) {
            Ok(Applied::Created(id)) => writeln!(self.out, "{description} (#{id})"),
            Ok(_) if description.is_empty() => Ok(()),
            Ok(_) => writeln!(self.out, "{description}"),
            Err(e) if e.is_not_found() => self.not_found(e),
            Err(e) => self.rejected(e),
        }
    }

    /// Report a missing entity according to the not-found policy.
    fn not_found(&mut self, err: impl Display) -> io::Result<()> {
        if self.config.strict {
            writeln!(self.out, "Error: {err}")
        } else {
            debug!(%err, "ignoring missing entity");
            Ok(())
        }
    }

    /// Report an operation that failed validation.
    fn rejected(&mut self, err: impl Display) -> io::Result<()> {
        warn!(%err, "operation rejected");
        writeln!(self.out, "Error: {err}")
    }

    /// Parse an optional date argument. The outer `None` means the input was
    /// unreadable and has already been reported.
    fn parse_date(&mut self, field: &str, raw: Option<String>) -> io::Result<Option<Option<NaiveDate>>> {
        let Some(raw) = raw else {
            return Ok(Some(None));
        };
        match parse_due_input(&raw) {
            Some(date) => Ok(Some(Some(date))),
            None => {
                writeln!(self.out, "Error: could not understand {field} date '{raw}'")?;
                Ok(None)
            }
        }
    }

    /// Ask before a destructive action unless confirmation was waived.
    fn confirm(&mut self, waived: bool, question: &str) -> io::Result<bool> {
        if waived || self.config.assume_yes {
            return Ok(true);
        }
        write!(self.out, "{question} [y/N] ")?;
        self.out.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
        if !confirmed {
            writeln!(self.out, "Cancelled.")?;
        }
        Ok(confirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn run_script(config: Config, script: &str) -> (Workspace, String) {
        let mut session = Session::new(Workspace::seeded(), config, Cursor::new(script.to_string()), Vec::new());
        session.run().unwrap();
        let (ws, out) = session.into_parts();
        (ws, String::from_utf8(out).unwrap())
    }

    fn column_ids(ws: &Workspace, column: ColumnId) -> Vec<u64> {
        ws.board.column(column).iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_add_and_move_task() {
        let (ws, out) = run_script(
            Config::default(),
            "add \"Write changelog\" --assignee \"Lisa Park\" --priority high --due 2024-02-01\n\
             move 6 todo in-progress\n",
        );
        assert!(out.contains("Task created successfully! (#6)"));
        assert!(out.contains("Task \"Write changelog\" moved to In Progress"));
        assert_eq!(column_ids(&ws, ColumnId::InProgress), vec![3, 6]);
        assert_eq!(ws.board.find(6).unwrap().1.priority, Priority::High);
    }

    #[test]
    fn test_validation_errors_are_always_shown() {
        let (ws, out) = run_script(Config::default(), "add \"Orphan\"\nadd \"\" --assignee Ann\n");
        assert!(out.contains("Error: Please assign the task to a team member"));
        assert!(out.contains("Error: Task title is required"));
        assert_eq!(ws.board.len(), 5);
    }

    #[test]
    fn test_missing_task_is_silent_unless_strict() {
        let (_, lenient) = run_script(Config::default(), "move 3 todo done\n");
        assert!(!lenient.contains("Error"));

        let strict = Config { strict: true, ..Config::default() };
        let (ws, out) = run_script(strict, "move 3 todo done\n");
        assert!(out.contains("Error: Task 3 not found in column 'todo'"));
        assert_eq!(column_ids(&ws, ColumnId::InProgress), vec![3]);
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        let (ws, out) = run_script(Config::default(), "delete 1 todo\nn\ndelete 2 todo\ny\n");
        assert!(out.contains("Delete task #1 \"Design Homepage Layout\"? [y/N]"));
        assert!(out.contains("Cancelled."));
        assert!(out.contains("Task deleted successfully!"));
        assert_eq!(column_ids(&ws, ColumnId::Todo), vec![1]);
    }

    #[test]
    fn test_delete_with_global_yes() {
        let config = Config { assume_yes: true, ..Config::default() };
        let (ws, out) = run_script(config, "delete 5 done\n");
        assert!(!out.contains("[y/N]"));
        assert!(ws.board.column(ColumnId::Done).is_empty());
    }

    #[test]
    fn test_project_lifecycle() {
        let script = "project add \"Data Platform\" --member \"Ann, Bo\" --start 2024-03-01\n\
                      project update 3 --status review --progress 40\n\
                      subtask add 3 \"Pick warehouse\" --assignee Ann\n\
                      subtask update 3 6 --done\n\
                      project select 3\n\
                      status\n";
        let (ws, out) = run_script(Config::default(), script);
        assert!(out.contains("Project created (#3)"));
        assert!(out.contains("Subtask added (#6)"));
        assert!(out.contains("Selected:    3 (Data Platform)"));

        let project = ws.projects.project(3).unwrap();
        assert_eq!(project.status, ProjectStatus::Review);
        assert_eq!(project.progress, 40);
        assert_eq!(project.team_members, vec!["Ann", "Bo"]);
        assert_eq!(project.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(project.subtask(6).unwrap().completed);
    }

    #[test]
    fn test_subtask_completion_on_seed_project() {
        let (ws, _) = run_script(Config::default(), "subtask update 1 2 --done\n");
        let project = ws.projects.project(1).unwrap();
        let flags: Vec<bool> = project.tasks.iter().map(|t| t.completed).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_invalid_progress_is_reported() {
        let (ws, out) = run_script(Config::default(), "project update 1 --progress 120\n");
        assert!(out.contains("Error: Invalid progress 120"));
        assert_eq!(ws.projects.project(1).unwrap().progress, 65);
    }

    #[test]
    fn test_loading_and_error_flags() {
        let (ws, out) = run_script(Config::default(), "loading true\nstatus\nerror network is down\nstatus\n");
        assert!(out.contains("Loading:     yes"));
        assert!(out.contains("Error:       network is down"));
        assert!(!ws.projects.is_loading());
    }

    #[test]
    fn test_parse_errors_do_not_end_session() {
        let (_, out) = run_script(Config::default(), "frobnicate\nmove 1 todo nowhere\nadd \"unterminated\nstats\n");
        assert!(out.contains("unrecognized subcommand"));
        assert!(out.contains("Error: unbalanced quotes"));
        assert!(out.contains("Active projects:      2"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let (ws, out) = run_script(Config::default(), "quit\nadd \"Never\" --assignee Ann\n");
        assert!(!out.contains("Task created"));
        assert_eq!(ws.board.len(), 5);
    }

    #[test]
    fn test_bad_due_date_is_reported() {
        let (ws, out) = run_script(Config::default(), "add \"Plan\" --assignee Ann --due someday\n");
        assert!(out.contains("Error: could not understand due date 'someday'"));
        assert_eq!(ws.board.len(), 5);
    }

    #[test]
    fn test_out_of_range_dates_keep_session_alive() {
        let script = "add \"Plan\" --assignee Ann --due \"in 100000000d\"\n\
                      project add \"Far\" --end \"in 999999999999999w\"\n\
                      add \"After\" --assignee Ann\n";
        let (ws, out) = run_script(Config::default(), script);
        assert!(out.contains("Error: could not understand due date 'in 100000000d'"));
        assert!(out.contains("Error: could not understand end date 'in 999999999999999w'"));
        assert!(out.contains("Task created successfully! (#6)"));
        assert_eq!(ws.board.len(), 6);
        assert_eq!(ws.projects.projects().len(), 2);
    }

    #[test]
    fn test_show_task_detail() {
        let (_, out) = run_script(Config::default(), "show 3\n");
        assert!(out.contains("Task #3: Implement User Authentication"));
        assert!(out.contains("Column:      In Progress"));
    }
}

//! Project store.
//!
//! `ProjectStore` owns the project list along with the loading, error and
//! selection flags the console reflects. It is an ordinary value: create one,
//! pass it by reference, and drop it when the session ends. Every mutation is
//! also expressible as a `ProjectAction` so callers can route changes through
//! a single `dispatch` entry point.

use tracing::debug;

use crate::error::StoreError;
use crate::ids::IdSequence;
use crate::project::{NewProject, NewSubtask, Project, ProjectPatch, Subtask, SubtaskPatch};

/// A single state transition on the project store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectAction {
    SetLoading(bool),
    SetError(Option<String>),
    AddProject(NewProject),
    UpdateProject { id: u64, patch: ProjectPatch },
    DeleteProject(u64),
    SetSelectedProject(Option<u64>),
    AddTask { project_id: u64, task: NewSubtask },
    UpdateTask { project_id: u64, task_id: u64, patch: SubtaskPatch },
    DeleteTask { project_id: u64, task_id: u64 },
}

/// What a successful dispatch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Unit,
    Created(u64),
    RemovedProject(Project),
    RemovedTask(Subtask),
}

#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    loading: bool,
    error: Option<String>,
    selected_project: Option<u64>,
    project_ids: IdSequence,
    subtask_ids: IdSequence,
}

impl ProjectStore {
    pub fn new() -> Self {
        ProjectStore::default()
    }

    /// Build a store around existing projects, continuing their id sequences.
    pub fn with_projects(projects: Vec<Project>) -> Self {
        let project_ids = IdSequence::after(projects.iter().map(|p| p.id));
        let subtask_ids = IdSequence::after(projects.iter().flat_map(|p| p.tasks.iter().map(|t| t.id)));
        ProjectStore {
            projects,
            project_ids,
            subtask_ids,
            ..ProjectStore::default()
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// The currently selected project, if it still exists.
    pub fn selected(&self) -> Option<&Project> {
        self.selected_project.and_then(|id| self.project(id))
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected_project
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: ProjectAction) -> Result<Applied, StoreError> {
        match action {
            ProjectAction::SetLoading(loading) => {
                self.set_loading(loading);
                Ok(Applied::Unit)
            }
            ProjectAction::SetError(message) => {
                self.set_error(message);
                Ok(Applied::Unit)
            }
            ProjectAction::AddProject(project) => Ok(Applied::Created(self.add_project(project))),
            ProjectAction::UpdateProject { id, patch } => self.update_project(id, patch).map(|_| Applied::Unit),
            ProjectAction::DeleteProject(id) => self.delete_project(id).map(Applied::RemovedProject),
            ProjectAction::SetSelectedProject(id) => self.set_selected_project(id).map(|_| Applied::Unit),
            ProjectAction::AddTask { project_id, task } => self.add_task(project_id, task).map(Applied::Created),
            ProjectAction::UpdateTask { project_id, task_id, patch } => {
                self.update_task(project_id, task_id, patch).map(|_| Applied::Unit)
            }
            ProjectAction::DeleteTask { project_id, task_id } => {
                self.delete_task(project_id, task_id).map(Applied::RemovedTask)
            }
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Record an error message (or clear it). Loading always ends.
    pub fn set_error(&mut self, message: Option<String>) {
        self.error = message;
        self.loading = false;
    }

    /// Append a new project with a fresh id and zero progress.
    pub fn add_project(&mut self, new: NewProject) -> u64 {
        let id = self.project_ids.next_id();
        let tasks = new
            .tasks
            .into_iter()
            .map(|t| t.into_subtask(self.subtask_ids.next_id()))
            .collect();
        self.projects.push(Project {
            id,
            name: new.name,
            description: new.description,
            status: new.status,
            priority: new.priority,
            start_date: new.start_date,
            end_date: new.end_date,
            progress: 0,
            team_members: new.team_members,
            tasks,
        });
        debug!(project_id = id, "added project");
        id
    }

    pub fn update_project(&mut self, id: u64, patch: ProjectPatch) -> Result<(), StoreError> {
        patch.validate()?;
        let project = self.project_mut(id)?;
        patch.apply(project);
        debug!(project_id = id, "updated project");
        Ok(())
    }

    /// Remove a project. Clears the selection if it pointed at this project.
    pub fn delete_project(&mut self, id: u64) -> Result<Project, StoreError> {
        let idx = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound { id })?;
        let removed = self.projects.remove(idx);
        if self.selected_project == Some(id) {
            self.selected_project = None;
        }
        debug!(project_id = id, "deleted project");
        Ok(removed)
    }

    pub fn set_selected_project(&mut self, id: Option<u64>) -> Result<(), StoreError> {
        if let Some(id) = id {
            self.project_mut(id)?;
        }
        self.selected_project = id;
        Ok(())
    }

    pub fn add_task(&mut self, project_id: u64, task: NewSubtask) -> Result<u64, StoreError> {
        let idx = self.project_index(project_id)?;
        let id = self.subtask_ids.next_id();
        self.projects[idx].tasks.push(task.into_subtask(id));
        debug!(project_id, task_id = id, "added subtask");
        Ok(id)
    }

    pub fn update_task(&mut self, project_id: u64, task_id: u64, patch: SubtaskPatch) -> Result<(), StoreError> {
        let subtask = self
            .project_mut(project_id)?
            .subtask_mut(task_id)
            .ok_or(StoreError::SubtaskNotFound { project_id, subtask_id: task_id })?;
        patch.apply(subtask);
        debug!(project_id, task_id, "updated subtask");
        Ok(())
    }

    pub fn delete_task(&mut self, project_id: u64, task_id: u64) -> Result<Subtask, StoreError> {
        let project = self.project_mut(project_id)?;
        let idx = project
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or(StoreError::SubtaskNotFound { project_id, subtask_id: task_id })?;
        let removed = project.tasks.remove(idx);
        debug!(project_id, task_id, "deleted subtask");
        Ok(removed)
    }

    fn project_index(&self, id: u64) -> Result<usize, StoreError> {
        self.projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound { id })
    }

    fn project_mut(&mut self, id: u64) -> Result<&mut Project, StoreError> {
        let idx = self.project_index(id)?;
        Ok(&mut self.projects[idx])
    }
}

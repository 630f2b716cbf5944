//! Demo data loaded at startup.

use chrono::NaiveDate;

use crate::board::Board;
use crate::fields::{ColumnId, Priority, ProjectStatus};
use crate::project::{Project, Subtask};
use crate::task::Task;

/// Names offered by the create form's assignee picker.
pub const TEAM_MEMBERS: [&str; 5] = ["Sarah Chen", "Alex Kumar", "Mike Johnson", "Lisa Park", "David Wilson"];

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|t| t.to_string()).collect()
}

fn subtask(id: u64, title: &str, completed: bool, assignee: &str) -> Subtask {
    Subtask {
        id,
        title: title.to_string(),
        completed,
        assignee: assignee.to_string(),
    }
}

fn board_columns() -> Vec<(ColumnId, Vec<Task>)> {
    vec![
        (
            ColumnId::Todo,
            vec![
                Task {
                    id: 1,
                    title: "Design Homepage Layout".into(),
                    description: "Create wireframes and mockups for the new homepage design".into(),
                    priority: Priority::High,
                    assignee: "Sarah Chen".into(),
                    due_date: date(2024, 1, 15),
                    tags: tags(&["design", "ui/ux"]),
                },
                Task {
                    id: 2,
                    title: "Setup Database Schema".into(),
                    description: "Design and implement the initial database structure".into(),
                    priority: Priority::Medium,
                    assignee: "Alex Kumar".into(),
                    due_date: date(2024, 1, 18),
                    tags: tags(&["backend", "database"]),
                },
            ],
        ),
        (
            ColumnId::InProgress,
            vec![Task {
                id: 3,
                title: "Implement User Authentication".into(),
                description: "Build login and registration functionality with JWT tokens".into(),
                priority: Priority::High,
                assignee: "Mike Johnson".into(),
                due_date: date(2024, 1, 12),
                tags: tags(&["backend", "security"]),
            }],
        ),
        (
            ColumnId::Review,
            vec![Task {
                id: 4,
                title: "Mobile Responsive Testing".into(),
                description: "Test the application across different mobile devices".into(),
                priority: Priority::Medium,
                assignee: "Lisa Park".into(),
                due_date: date(2024, 1, 10),
                tags: tags(&["testing", "mobile"]),
            }],
        ),
        (
            ColumnId::Done,
            vec![Task {
                id: 5,
                title: "Project Setup".into(),
                description: "Initialize repository and development environment".into(),
                priority: Priority::Low,
                assignee: "David Wilson".into(),
                due_date: date(2024, 1, 5),
                tags: tags(&["setup", "devops"]),
            }],
        ),
    ]
}

/// The demo board: two tasks to do and one in each later column.
pub fn board() -> Board {
    // Seed ids are distinct, so construction cannot fail.
    Board::from_columns(board_columns()).unwrap_or_default()
}

/// The demo projects.
pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Website Redesign".into(),
            description: "Complete redesign of the company website".into(),
            status: ProjectStatus::InProgress,
            priority: Priority::High,
            start_date: date(2024, 1, 15),
            end_date: date(2024, 3, 15),
            progress: 65,
            team_members: vec!["John Doe".into(), "Jane Smith".into(), "Mike Johnson".into()],
            tasks: vec![
                subtask(1, "Design mockups", true, "Jane Smith"),
                subtask(2, "Frontend development", false, "John Doe"),
                subtask(3, "Backend integration", false, "Mike Johnson"),
            ],
        },
        Project {
            id: 2,
            name: "Mobile App Development".into(),
            description: "Native mobile app for iOS and Android".into(),
            status: ProjectStatus::Planning,
            priority: Priority::Medium,
            start_date: date(2024, 2, 1),
            end_date: date(2024, 6, 1),
            progress: 15,
            team_members: vec!["Sarah Wilson".into(), "Tom Brown".into()],
            tasks: vec![
                subtask(4, "Requirements gathering", true, "Sarah Wilson"),
                subtask(5, "UI/UX design", false, "Tom Brown"),
            ],
        },
    ]
}

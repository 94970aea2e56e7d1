//! Response types shared by the HTTP API and the CLI

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use task_ranking::{NormalizedTask, RankedTask};

use crate::notion::DatabaseSummary;

/// Format an instant as ISO-8601 with millisecond precision and a `Z` suffix
pub fn format_instant(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The selected task as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextTask {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub scheduled: Option<String>,
    pub overdue: bool,
}

impl From<NormalizedTask> for NextTask {
    fn from(task: NormalizedTask) -> Self {
        Self {
            id: task.id,
            title: task.title,
            url: task.url,
            status: task.status,
            priority: task.priority,
            scheduled: task.scheduled.map(format_instant),
            overdue: task.is_overdue,
        }
    }
}

/// Body of `GET /api/next-task`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextTaskResponse {
    /// `null` when there are no open tasks
    pub next_task: Option<NextTask>,
    /// The instant the ranking was evaluated against
    pub generated_at: String,
}

/// One line of the full ranking, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub position: usize,
    pub bucket: String,
    #[serde(flatten)]
    pub task: NextTask,
}

impl RankedEntry {
    pub fn from_ranked(position: usize, ranked: RankedTask) -> Self {
        Self {
            position,
            bucket: ranked.key.bucket.to_string(),
            task: ranked.task.into(),
        }
    }
}

/// Body of `GET /api/debug-list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseListResponse {
    pub count: usize,
    pub databases: Vec<DatabaseSummary>,
}

impl From<Vec<DatabaseSummary>> for DatabaseListResponse {
    fn from(databases: Vec<DatabaseSummary>) -> Self {
        Self {
            count: databases.len(),
            databases,
        }
    }
}

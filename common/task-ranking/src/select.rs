//! Ordering and selection of the next task

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::RankingConfig;
use crate::normalize::{normalize_all, NormalizedTask};
use crate::rank::{RankKey, Ranker};
use crate::raw::RawTask;

/// A normalized task paired with its rank key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTask {
    pub task: NormalizedTask,
    pub key: RankKey,
}

/// Sort tasks by rank key, highest priority first
///
/// The sort is stable: tasks with equal keys keep their input order.
pub fn rank_tasks(tasks: Vec<NormalizedTask>, config: &RankingConfig) -> Vec<RankedTask> {
    let ranker = Ranker::new(config);
    let mut ranked: Vec<RankedTask> = tasks
        .into_iter()
        .map(|task| RankedTask {
            key: ranker.rank(&task),
            task,
        })
        .collect();
    ranked.sort_by_key(|r| r.key);
    ranked
}

/// The highest-priority task, or `None` for an empty set
pub fn select_next(tasks: Vec<NormalizedTask>, config: &RankingConfig) -> Option<NormalizedTask> {
    rank_tasks(tasks, config).into_iter().next().map(|r| r.task)
}

/// Normalize and rank a batch of raw pages against one `now`
pub fn rank_raw(raw: &[RawTask], config: &RankingConfig, now: DateTime<Utc>) -> Vec<RankedTask> {
    let ranked = rank_tasks(normalize_all(raw, config, now), config);
    tracing::debug!(
        total = ranked.len(),
        top = ranked.first().map(|r| r.task.id.as_str()),
        "Ranked tasks"
    );
    ranked
}

/// Normalize a batch of raw pages and pick the next task
pub fn next_task(
    raw: &[RawTask],
    config: &RankingConfig,
    now: DateTime<Utc>,
) -> Option<NormalizedTask> {
    rank_raw(raw, config, now).into_iter().next().map(|r| r.task)
}

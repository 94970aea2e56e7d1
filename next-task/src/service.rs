//! Request handling shared by the HTTP API and the CLI
//!
//! Fetches open tasks from a [`TaskSource`] and runs them through the ranking
//! pipeline against a single `now`.

use chrono::{DateTime, Utc};
use task_ranking::{rank_raw, RankedTask};

use crate::config::Config;
use crate::notion::{NotionError, NotionResult, TaskSource};
use crate::types::{format_instant, DatabaseListResponse, NextTaskResponse};

/// Fetch open tasks and return them in priority order
pub async fn fetch_ranked(
    source: &dyn TaskSource,
    config: &Config,
    now: DateTime<Utc>,
) -> NotionResult<Vec<RankedTask>> {
    let database_id = config
        .notion
        .database()
        .ok_or(NotionError::MissingDatabaseId)?;
    let raw = source
        .query_open_tasks(database_id, &config.ranking.properties)
        .await?;
    tracing::debug!("Fetched {} open tasks from {}", raw.len(), source.name());

    Ok(rank_raw(&raw, &config.ranking, now))
}

/// Fetch open tasks and build the next-task response
pub async fn fetch_next_task(
    source: &dyn TaskSource,
    config: &Config,
    now: DateTime<Utc>,
) -> NotionResult<NextTaskResponse> {
    let next = fetch_ranked(source, config, now)
        .await?
        .into_iter()
        .next()
        .map(|ranked| {
            tracing::info!(
                task = %ranked.task.id,
                bucket = %ranked.key.bucket,
                "Selected next task"
            );
            ranked.task.into()
        });

    if next.is_none() {
        tracing::info!("No open tasks");
    }

    Ok(NextTaskResponse {
        next_task: next,
        generated_at: format_instant(now),
    })
}

/// List databases visible to the integration
pub async fn list_databases(
    source: &dyn TaskSource,
    query: &str,
) -> NotionResult<DatabaseListResponse> {
    let databases = source.search_databases(query).await?;
    Ok(databases.into())
}

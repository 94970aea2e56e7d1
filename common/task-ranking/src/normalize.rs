//! Normalization of raw pages into [`NormalizedTask`]
//!
//! Every lookup degrades to `None` (or the placeholder title) instead of
//! failing: one malformed page must not stop the rest from being ranked.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::config::{RankingConfig, TitleFallback, UNTITLED};
use crate::raw::RawTask;

/// A task in the canonical shape the ranker works on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTask {
    pub id: String,
    /// Display title, never empty
    pub title: String,
    pub url: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub scheduled: Option<DateTime<Utc>>,
    /// `scheduled < now` for the `now` this task was normalized against
    pub is_overdue: bool,
}

/// Normalize one page against a fixed evaluation instant
pub fn normalize(raw: &RawTask, config: &RankingConfig, now: DateTime<Utc>) -> NormalizedTask {
    let props = &config.properties;

    let scheduled = raw
        .property(&props.scheduled)
        .and_then(|p| p.date_start())
        .and_then(|start| {
            let parsed = parse_scheduled(start);
            if parsed.is_none() {
                tracing::debug!(
                    "Unparseable '{}' value on task {}: {:?}",
                    props.scheduled,
                    raw.id,
                    start
                );
            }
            parsed
        });

    NormalizedTask {
        id: raw.id.clone(),
        title: resolve_title(raw, config.title_fallback),
        url: raw.url.clone(),
        status: selected_label(raw, &props.status),
        priority: selected_label(raw, &props.priority),
        is_overdue: scheduled.is_some_and(|at| at < now),
        scheduled,
    }
}

/// Normalize a batch, preserving input order
pub fn normalize_all(
    raw: &[RawTask],
    config: &RankingConfig,
    now: DateTime<Utc>,
) -> Vec<NormalizedTask> {
    raw.iter().map(|r| normalize(r, config, now)).collect()
}

fn resolve_title(raw: &RawTask, fallback: TitleFallback) -> String {
    if let Some(text) = raw.title_property().and_then(|p| p.title_text()) {
        if !text.is_empty() {
            return text;
        }
    }

    match fallback {
        TitleFallback::Url => raw
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(UNTITLED)
            .to_string(),
        TitleFallback::Placeholder => UNTITLED.to_string(),
    }
}

fn selected_label(raw: &RawTask, property: &str) -> Option<String> {
    raw.property(property)
        .and_then(|p| p.selected_name())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Parse a date property's start value
///
/// Accepts RFC 3339 timestamps, offset-less date-times (taken as UTC) and bare
/// `YYYY-MM-DD` dates (UTC midnight).
pub fn parse_scheduled(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

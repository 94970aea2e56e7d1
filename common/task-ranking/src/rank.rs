//! Rank keys
//!
//! A [`RankKey`] orders tasks by bucket, then hot-status position, then
//! scheduled time, then priority. Fields are declared in that order so the
//! derived `Ord` is the lexicographic comparison. Smaller keys rank first.

use serde::Serialize;
use std::fmt;

use crate::config::RankingConfig;
use crate::normalize::NormalizedTask;

/// Status rank for tasks outside the hot bucket
pub const STATUS_RANK_NONE: usize = usize::MAX;

/// Temporal rank for unscheduled tasks
pub const WHEN_RANK_NONE: i64 = i64::MAX;

/// Coarse priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Status is one of the hot statuses
    Hot = 0,
    /// Scheduled in the past
    Overdue = 1,
    /// Scheduled now or later
    Upcoming = 2,
    /// No schedule
    Unscheduled = 3,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Hot => "hot",
            Bucket::Overdue => "overdue",
            Bucket::Upcoming => "upcoming",
            Bucket::Unscheduled => "unscheduled",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparable priority of one task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RankKey {
    pub bucket: Bucket,
    /// Position in the hot-status list, [`STATUS_RANK_NONE`] outside [`Bucket::Hot`]
    pub status_rank: usize,
    /// Scheduled instant in epoch milliseconds, [`WHEN_RANK_NONE`] when unscheduled
    pub when_rank: i64,
    /// Position in the priority order, list length when missing or unknown
    pub priority_rank: usize,
}

/// Computes rank keys against one configuration
#[derive(Debug, Clone, Copy)]
pub struct Ranker<'a> {
    config: &'a RankingConfig,
}

impl<'a> Ranker<'a> {
    pub fn new(config: &'a RankingConfig) -> Self {
        Self { config }
    }

    pub fn rank(&self, task: &NormalizedTask) -> RankKey {
        let hot_index = task.status.as_deref().and_then(|status| {
            self.config
                .hot_statuses
                .iter()
                .position(|hot| hot == status)
        });

        let bucket = match (hot_index, task.scheduled) {
            (Some(_), _) => Bucket::Hot,
            (None, Some(_)) if task.is_overdue => Bucket::Overdue,
            (None, Some(_)) => Bucket::Upcoming,
            (None, None) => Bucket::Unscheduled,
        };

        let priority_rank = task
            .priority
            .as_deref()
            .and_then(|p| self.config.priority_order.iter().position(|known| known == p))
            .unwrap_or(self.config.priority_order.len());

        RankKey {
            bucket,
            status_rank: hot_index.unwrap_or(STATUS_RANK_NONE),
            when_rank: task
                .scheduled
                .map(|at| at.timestamp_millis())
                .unwrap_or(WHEN_RANK_NONE),
            priority_rank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn task(
        status: Option<&str>,
        scheduled: Option<DateTime<Utc>>,
        priority: Option<&str>,
    ) -> NormalizedTask {
        NormalizedTask {
            id: "t".to_string(),
            title: "t".to_string(),
            url: None,
            status: status.map(str::to_string),
            priority: priority.map(str::to_string),
            scheduled,
            is_overdue: scheduled.is_some_and(|at| at < now()),
        }
    }

    #[test]
    fn test_buckets() {
        let config = RankingConfig::default();
        let ranker = Ranker::new(&config);
        let yesterday = Some(now() - Duration::days(1));
        let tomorrow = Some(now() + Duration::days(1));

        assert_eq!(ranker.rank(&task(Some("Now"), yesterday, None)).bucket, Bucket::Hot);
        assert_eq!(ranker.rank(&task(Some("Active"), None, None)).bucket, Bucket::Hot);
        assert_eq!(ranker.rank(&task(Some("Later"), yesterday, None)).bucket, Bucket::Overdue);
        assert_eq!(ranker.rank(&task(None, tomorrow, None)).bucket, Bucket::Upcoming);
        assert_eq!(ranker.rank(&task(None, Some(now()), None)).bucket, Bucket::Upcoming);
        assert_eq!(ranker.rank(&task(Some("Later"), None, None)).bucket, Bucket::Unscheduled);
    }

    #[test]
    fn test_status_rank_follows_hot_order() {
        let config = RankingConfig::default();
        let ranker = Ranker::new(&config);

        assert_eq!(ranker.rank(&task(Some("Now"), None, None)).status_rank, 0);
        assert_eq!(ranker.rank(&task(Some("Active"), None, None)).status_rank, 1);
        assert_eq!(
            ranker.rank(&task(Some("Backlog"), None, None)).status_rank,
            STATUS_RANK_NONE
        );
        assert_eq!(ranker.rank(&task(None, None, None)).status_rank, STATUS_RANK_NONE);
    }

    #[test]
    fn test_duplicate_hot_status_uses_first_position() {
        let config = RankingConfig {
            hot_statuses: vec!["Now".into(), "Active".into(), "Now".into()],
            ..Default::default()
        };
        let ranker = Ranker::new(&config);
        assert_eq!(ranker.rank(&task(Some("Now"), None, None)).status_rank, 0);
    }

    #[test]
    fn test_status_labels_are_case_sensitive() {
        let config = RankingConfig::default();
        let ranker = Ranker::new(&config);
        assert_eq!(ranker.rank(&task(Some("now"), None, None)).bucket, Bucket::Unscheduled);
    }

    #[test]
    fn test_when_rank() {
        let config = RankingConfig::default();
        let ranker = Ranker::new(&config);
        let at = now() - Duration::hours(3);

        assert_eq!(ranker.rank(&task(None, Some(at), None)).when_rank, at.timestamp_millis());
        assert_eq!(ranker.rank(&task(None, None, None)).when_rank, WHEN_RANK_NONE);
    }

    #[test]
    fn test_priority_rank() {
        let config = RankingConfig::default();
        let ranker = Ranker::new(&config);

        assert_eq!(ranker.rank(&task(None, None, Some("High"))).priority_rank, 0);
        assert_eq!(ranker.rank(&task(None, None, Some("Medium"))).priority_rank, 1);
        assert_eq!(ranker.rank(&task(None, None, Some("Low"))).priority_rank, 2);
        assert_eq!(ranker.rank(&task(None, None, Some("Urgent"))).priority_rank, 3);
        assert_eq!(ranker.rank(&task(None, None, None)).priority_rank, 3);
    }

    #[test]
    fn test_bucket_dominates_other_fields() {
        let config = RankingConfig::default();
        let ranker = Ranker::new(&config);

        let hot_low = ranker.rank(&task(Some("Active"), None, Some("Low")));
        let ancient_high = ranker.rank(&task(
            None,
            Some(now() - Duration::days(365 * 5)),
            Some("High"),
        ));
        assert!(hot_low < ancient_high);

        let overdue_low =
            ranker.rank(&task(None, Some(now() - Duration::minutes(1)), Some("Low")));
        let upcoming_high =
            ranker.rank(&task(None, Some(now() + Duration::minutes(1)), Some("High")));
        assert!(overdue_low < upcoming_high);
    }

    #[test]
    fn test_earlier_time_beats_priority_within_bucket() {
        let config = RankingConfig::default();
        let ranker = Ranker::new(&config);

        let early_low = ranker.rank(&task(None, Some(now() + Duration::hours(1)), Some("Low")));
        let late_high = ranker.rank(&task(None, Some(now() + Duration::hours(2)), Some("High")));
        assert!(early_low < late_high);
    }

    #[test]
    fn test_bucket_display() {
        assert_eq!(Bucket::Hot.to_string(), "hot");
        assert_eq!(Bucket::Unscheduled.as_str(), "unscheduled");
        assert!(Bucket::Hot < Bucket::Overdue);
        assert!(Bucket::Upcoming < Bucket::Unscheduled);
    }
}

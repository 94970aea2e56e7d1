//! Task ranking
//!
//! Turns raw task database pages into a priority order and picks the next
//! task to work on.
//!
//! # Pipeline
//!
//! ```text
//! RawTask --normalize--> NormalizedTask --Ranker--> RankKey --rank_tasks--> Vec<RankedTask>
//! ```
//!
//! Rank keys compare lexicographically: bucket (hot, overdue, upcoming,
//! unscheduled), position in the hot-status list, scheduled time, then
//! position in the priority order.
//!
//! # Usage
//!
//! ```rust,ignore
//! use task_ranking::{next_task, RankingConfig};
//!
//! let config = RankingConfig::default();
//! config.validate()?;
//! let next = next_task(&pages, &config, chrono::Utc::now());
//! ```
//!
//! Everything here is synchronous and free of I/O; `now` is always passed in.

pub mod config;
pub mod normalize;
pub mod rank;
pub mod raw;
pub mod select;

pub use config::{ConfigError, PropertyNames, RankingConfig, TitleFallback, UNTITLED};
pub use normalize::{normalize, normalize_all, parse_scheduled, NormalizedTask};
pub use rank::{Bucket, RankKey, Ranker, STATUS_RANK_NONE, WHEN_RANK_NONE};
pub use raw::{DateValue, PropertyValue, RawTask, RichText, SelectOption};
pub use select::{next_task, rank_raw, rank_tasks, select_next, RankedTask};

//! Notion task source
//!
//! The [`TaskSource`] trait is the seam between request handling and the
//! remote workspace. [`NotionClient`] is the real implementation; tests plug
//! in their own.

use async_trait::async_trait;
use serde::Serialize;
use task_ranking::{PropertyNames, RawTask};

pub mod client;
pub mod error;

pub use client::NotionClient;
pub use error::{NotionError, NotionResult};

/// A database visible to the integration token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseSummary {
    pub title: String,
    /// Dashed UUID form
    pub id: String,
    /// Hyphenless form, as it appears in Notion URLs
    pub id_plain: String,
    pub url: Option<String>,
}

impl DatabaseSummary {
    pub fn new(title: impl Into<String>, id: impl Into<String>, url: Option<String>) -> Self {
        let id = id.into();
        Self {
            title: title.into(),
            id_plain: id.replace('-', ""),
            id,
            url,
        }
    }
}

/// Source of open task pages
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Name of this source, for logs
    fn name(&self) -> &str;

    /// Fetch pages whose done checkbox is unchecked, sorted by the scheduled
    /// property ascending and capped at the configured page size
    async fn query_open_tasks(
        &self,
        database_id: &str,
        properties: &PropertyNames,
    ) -> NotionResult<Vec<RawTask>>;

    /// List databases whose title matches `query` (empty matches all)
    async fn search_databases(&self, query: &str) -> NotionResult<Vec<DatabaseSummary>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_summary_plain_id() {
        let db = DatabaseSummary::new(
            "Tasks",
            "668d797c-76fa-4934-9b05-ad288df2d136",
            Some("https://www.notion.so/668d797c76fa49349b05ad288df2d136".to_string()),
        );
        assert_eq!(db.id_plain, "668d797c76fa49349b05ad288df2d136");
        assert_eq!(db.id, "668d797c-76fa-4934-9b05-ad288df2d136");
    }

    #[test]
    fn test_configuration_errors() {
        assert!(NotionError::MissingToken.is_configuration());
        assert!(NotionError::MissingDatabaseId.is_configuration());
        assert!(!NotionError::Api {
            status: 404,
            code: "object_not_found".to_string(),
            message: "gone".to_string(),
        }
        .is_configuration());
    }
}

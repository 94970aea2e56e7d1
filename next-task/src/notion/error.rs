//! Error types for Notion API access

use thiserror::Error;

/// Errors that can occur while talking to the Notion API
#[derive(Error, Debug)]
pub enum NotionError {
    /// No integration token configured
    #[error("NOTION_TOKEN is not configured")]
    MissingToken,

    /// No task database configured
    #[error("NOTION_DATABASE_ID is not configured")]
    MissingDatabaseId,

    /// The configured base URL cannot be joined with an endpoint path
    #[error("invalid Notion API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport failure or an undecodable response body
    #[error("Notion request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Notion answered with a non-success status
    #[error("Notion API error {status} ({code}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Notion error code, e.g. `object_not_found`
        code: String,
        /// Human readable message from Notion
        message: String,
    },
}

impl NotionError {
    /// Whether the error comes from missing local configuration rather
    /// than from the remote service
    pub fn is_configuration(&self) -> bool {
        matches!(self, NotionError::MissingToken | NotionError::MissingDatabaseId)
    }
}

/// Result type alias for Notion operations
pub type NotionResult<T> = Result<T, NotionError>;

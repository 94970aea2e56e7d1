//! Notion REST client
//!
//! See: https://developers.notion.com/reference/post-database-query
//! and https://developers.notion.com/reference/post-search

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use task_ranking::{PropertyNames, RawTask, RichText};
use url::Url;

use super::{DatabaseSummary, NotionError, NotionResult, TaskSource};
use crate::config::NotionConfig;

/// Notion API client
pub struct NotionClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    api_version: String,
    page_size: u32,
    search_page_size: u32,
}

// Notion API response types
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<RawTask>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: String,
    #[serde(default)]
    title: Vec<RichText>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> NotionResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("next-task/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: api_base(&config.api_url)?,
            token: config.token.clone().filter(|t| !t.is_empty()),
            api_version: config.api_version.clone(),
            page_size: config.page_size,
            search_page_size: config.search_page_size,
        })
    }

    fn request(&self, method: Method, path: &str) -> NotionResult<RequestBuilder> {
        let token = self.token.as_deref().ok_or(NotionError::MissingToken)?;
        let url = self.base_url.join(path)?;

        Ok(self
            .client
            .request(method, url)
            .bearer_auth(token)
            .header("Notion-Version", &self.api_version))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> NotionResult<T> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &text));
        }

        Ok(response.json().await?)
    }
}

/// Parse the API base URL so relative endpoint paths append to any path prefix
fn api_base(api_url: &str) -> NotionResult<Url> {
    let mut url = Url::parse(api_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn api_error(status: u16, body: &str) -> NotionError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => NotionError::Api {
            status,
            code: err.code,
            message: err.message,
        },
        Err(_) => NotionError::Api {
            status,
            code: "unknown".to_string(),
            message: body.to_string(),
        },
    }
}

#[async_trait]
impl TaskSource for NotionClient {
    fn name(&self) -> &str {
        "notion"
    }

    async fn query_open_tasks(
        &self,
        database_id: &str,
        properties: &PropertyNames,
    ) -> NotionResult<Vec<RawTask>> {
        let body = json!({
            "filter": {
                "property": properties.done,
                "checkbox": { "equals": false }
            },
            "sorts": [
                { "property": properties.scheduled, "direction": "ascending" }
            ],
            "page_size": self.page_size,
        });

        let request = self
            .request(Method::POST, &format!("v1/databases/{}/query", database_id))?
            .json(&body);
        let response: QueryResponse = self.send(request).await?;

        if response.has_more {
            tracing::debug!(
                "More than {} open tasks, ranking the first page only",
                self.page_size
            );
        }

        Ok(response.results)
    }

    async fn search_databases(&self, query: &str) -> NotionResult<Vec<DatabaseSummary>> {
        let body = json!({
            "query": query,
            "filter": { "value": "database", "property": "object" },
            "page_size": self.search_page_size,
        });

        let request = self.request(Method::POST, "v1/search")?.json(&body);
        let response: SearchResponse = self.send(request).await?;

        Ok(response
            .results
            .into_iter()
            .map(|r| {
                let title: String = r.title.iter().map(|t| t.plain_text.as_str()).collect();
                DatabaseSummary::new(title, r.id, r.url)
            })
            .collect())
    }
}

//! Notion client tests against a local mock server

use mockito::Matcher;
use serde_json::json;

use next_task::config::NotionConfig;
use next_task::notion::{NotionClient, NotionError, TaskSource};
use task_ranking::PropertyNames;

fn config(server: &mockito::Server) -> NotionConfig {
    NotionConfig {
        token: Some("secret_token".to_string()),
        api_url: server.url(),
        ..Default::default()
    }
}

#[tokio::test]
async fn query_sends_filter_sort_and_page_size() {
    let mut server = mockito::Server::new_async().await;
    let pages = json!({
        "object": "list",
        "results": [
            {
                "object": "page",
                "id": "p-1",
                "url": "https://www.notion.so/p1",
                "properties": {
                    "Name": {"type": "title", "title": [{"plain_text": "First"}]},
                    "Done": {"type": "checkbox", "checkbox": false},
                    "Due": {"type": "date", "date": {"start": "2024-06-01"}}
                }
            },
            {
                "object": "page",
                "id": "p-2",
                "url": "https://www.notion.so/p2",
                "properties": {}
            }
        ],
        "next_cursor": null,
        "has_more": false
    });

    let mock = server
        .mock("POST", "/v1/databases/db-1/query")
        .match_header("authorization", "Bearer secret_token")
        .match_header("notion-version", "2022-06-28")
        .match_body(Matcher::Json(json!({
            "filter": {"property": "Finished", "checkbox": {"equals": false}},
            "sorts": [{"property": "Due", "direction": "ascending"}],
            "page_size": 50
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(pages.to_string())
        .create_async()
        .await;

    let properties = PropertyNames {
        done: "Finished".to_string(),
        scheduled: "Due".to_string(),
        ..Default::default()
    };
    let client = NotionClient::new(&config(&server)).unwrap();
    let tasks = client.query_open_tasks("db-1", &properties).await.unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, "p-1");
    assert_eq!(
        tasks[0].property("Due").and_then(|p| p.date_start()),
        Some("2024-06-01")
    );
    assert!(tasks[1].properties.is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn query_error_carries_notion_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/databases/missing/query")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "object": "error",
                "status": 404,
                "code": "object_not_found",
                "message": "Could not find database with ID: missing."
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = NotionClient::new(&config(&server)).unwrap();
    let err = client
        .query_open_tasks("missing", &PropertyNames::default())
        .await
        .unwrap_err();

    match err {
        NotionError::Api { status, code, .. } => {
            assert_eq!(status, 404);
            assert_eq!(code, "object_not_found");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn query_rejects_invalid_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/databases/db-1/query")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let client = NotionClient::new(&config(&server)).unwrap();
    let err = client
        .query_open_tasks("db-1", &PropertyNames::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NotionError::Http(_)));

    mock.assert_async().await;
}

#[tokio::test]
async fn api_url_path_prefix_is_kept() {
    let mut server = mockito::Server::new_async().await;
    let prefixed = server
        .mock("POST", "/notion/v1/databases/db-1/query")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"object": "list", "results": []}).to_string())
        .create_async()
        .await;
    let root = server
        .mock("POST", "/v1/databases/db-1/query")
        .with_status(200)
        .with_body(json!({"object": "list", "results": []}).to_string())
        .expect(0)
        .create_async()
        .await;

    let config = NotionConfig {
        api_url: format!("{}/notion", server.url()),
        ..config(&server)
    };
    let client = NotionClient::new(&config).unwrap();
    let tasks = client
        .query_open_tasks("db-1", &PropertyNames::default())
        .await
        .unwrap();
    assert!(tasks.is_empty());

    prefixed.assert_async().await;
    root.assert_async().await;
}

#[tokio::test]
async fn search_lists_databases() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/search")
        .match_header("authorization", "Bearer secret_token")
        .match_body(Matcher::Json(json!({
            "query": "Tasks",
            "filter": {"value": "database", "property": "object"},
            "page_size": 25
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "object": "list",
                "results": [
                    {
                        "object": "database",
                        "id": "668d797c-76fa-4934-9b05-ad288df2d136",
                        "title": [{"plain_text": "Team "}, {"plain_text": "Tasks"}],
                        "url": "https://www.notion.so/668d797c76fa49349b05ad288df2d136"
                    },
                    {
                        "object": "database",
                        "id": "aaaa-bbbb",
                        "title": []
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = NotionClient::new(&config(&server)).unwrap();
    let databases = client.search_databases("Tasks").await.unwrap();

    assert_eq!(databases.len(), 2);
    assert_eq!(databases[0].title, "Team Tasks");
    assert_eq!(databases[0].id_plain, "668d797c76fa49349b05ad288df2d136");
    assert_eq!(
        databases[0].url.as_deref(),
        Some("https://www.notion.so/668d797c76fa49349b05ad288df2d136")
    );
    assert_eq!(databases[1].title, "");
    assert_eq!(databases[1].url, None);

    mock.assert_async().await;
}

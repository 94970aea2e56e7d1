//! Command handlers

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;

use crate::cli::Commands;
use crate::config::Config;
use crate::notion::NotionClient;
use crate::service;
use crate::types::RankedEntry;
use crate::web::{self, AppState};

/// Dispatch a parsed command
pub async fn run(command: Commands, mut config: Config) -> Result<()> {
    if let Commands::Serve { host, port } = &command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }

    let client = NotionClient::new(&config.notion)?;

    match command {
        Commands::Serve { .. } => {
            let state = AppState::new(config, Arc::new(client));
            web::serve(state).await
        }
        Commands::Next => {
            let response = service::fetch_next_task(&client, &config, Utc::now()).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Commands::Rank { json } => run_rank(&client, &config, json).await,
        Commands::Databases { query } => {
            let response = service::list_databases(&client, &query).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
    }
}

async fn run_rank(client: &NotionClient, config: &Config, json: bool) -> Result<()> {
    let entries: Vec<RankedEntry> = service::fetch_ranked(client, config, Utc::now())
        .await?
        .into_iter()
        .enumerate()
        .map(|(i, ranked)| RankedEntry::from_ranked(i + 1, ranked))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No open tasks");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

/// One table row for `next-task rank`
pub fn format_entry(entry: &RankedEntry) -> String {
    let task = &entry.task;
    format!(
        "{:>3}. [{:<11}] {}  (status: {}, scheduled: {}, priority: {})",
        entry.position,
        entry.bucket,
        task.title,
        task.status.as_deref().unwrap_or("-"),
        task.scheduled.as_deref().unwrap_or("-"),
        task.priority.as_deref().unwrap_or("-"),
    )
}

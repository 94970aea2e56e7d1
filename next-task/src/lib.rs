//! next-task
//!
//! Small HTTP service that ranks the open tasks of a Notion database and
//! returns the one to work on next.
//!
//! # Configuration
//! Set `NOTION_TOKEN`, `NOTION_DATABASE_ID` and `NEXT_TASK_SECRET`, or
//! configure them in `~/.config/next-task/config.toml`. See [`config`].

pub mod cli;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod notion;
pub mod service;
pub mod types;
pub mod web;

pub use config::Config;
pub use notion::{NotionClient, NotionError, TaskSource};
pub use web::{create_router, AppState};

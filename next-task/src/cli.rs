//! CLI argument definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "next-task")]
#[command(about = "Pick the next task to work on from a Notion database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file (default: <config dir>/next-task/config.toml)
    #[arg(short, long, env = "NEXT_TASK_CONFIG_PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v debug, -vv trace). Default is info.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long, env = "NEXT_TASK_HOST")]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },
    /// Print the next task as JSON and exit
    Next,
    /// Print every open task in priority order
    Rank {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List databases visible to the integration token
    Databases {
        /// Only databases whose title matches
        #[arg(short, long, default_value = "")]
        query: String,
    },
}

//! Tracing setup
//!
//! Logs go to stderr so `next-task next` can print JSON on stdout.
//! `RUST_LOG` takes precedence over the verbosity flag; `LOG_FORMAT=json`
//! switches to structured output for log aggregation.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives for a given `-v` count
pub fn default_directives(verbose: u8) -> String {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let http_level = if verbose >= 2 { "debug" } else { "info" };
    format!(
        "next_task={level},task_ranking={level},tower_http={http_level}",
        level = level,
        http_level = http_level
    )
}

/// Initialize tracing for the process
pub fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::try_new(default_directives(verbose))?,
    };

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}

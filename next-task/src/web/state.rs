//! Shared application state

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::Config;
use crate::notion::TaskSource;

/// Source of the evaluation instant, read once per request
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded and validated configuration
    pub config: Arc<Config>,
    /// Where open tasks come from
    pub source: Arc<dyn TaskSource>,
    clock: Clock,
}

impl AppState {
    /// Create new app state using the system clock
    pub fn new(config: Config, source: Arc<dyn TaskSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the clock (tests pin `now` with this)
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Expected shared secret, if one is configured
    pub fn secret(&self) -> Option<&str> {
        self.config
            .server
            .secret
            .as_deref()
            .filter(|s| !s.is_empty())
    }
}

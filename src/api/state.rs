//! Application State
//!
//! Shared state accessible by all HTTP handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::app::ApplicationInstance;
use crate::config::ServerConfig;
use crate::router::Revision;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The mounted application every page navigation goes through
    pub app: Arc<ApplicationInstance>,
    /// Active route table revision
    pub revision: Revision,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(app: ApplicationInstance, revision: Revision, config: ServerConfig) -> Self {
        Self {
            app: Arc::new(app),
            revision,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Directory static assets are served from
    pub fn web_root(&self) -> PathBuf {
        self.config.web_root.clone()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

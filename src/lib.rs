pub mod config;
pub mod rest;
pub mod tasks;

use std::sync::Arc;

use config::ServiceConfig;
use tasks::store::TaskStore;

/// Shared application state passed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServiceConfig>,
    /// Sole owner of the in-memory task collection.
    pub store: Arc<TaskStore>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(config: ServiceConfig, store: TaskStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            started_at: std::time::Instant::now(),
        }
    }
}

//! Application state management

use std::sync::Arc;

use crate::config::Config;

/// Shared application state
///
/// Holds only immutable configuration; every request works on its own data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

//! Application state for the Payroll Export Engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, ExportConfig};

/// Shared application state.
///
/// Holds the export configuration, loaded once at startup and never
/// mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the export configuration.
    pub fn config(&self) -> &ExportConfig {
        self.config.config()
    }
}

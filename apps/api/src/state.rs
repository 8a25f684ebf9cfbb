use std::sync::Arc;

use crate::config::Config;
use crate::gateway::ImageAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable vision backend. Default: `ClaudeImageAnalyzer`.
    pub analyzer: Arc<dyn ImageAnalyzer>,
}

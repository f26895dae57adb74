use crate::analysis::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the text generator as `Arc<dyn TextGenerator>`; cheap to clone per request.
    pub analyzer: Analyzer,
    pub config: Config,
}

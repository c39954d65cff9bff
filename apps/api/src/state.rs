use crate::analysis::Analyzer;
use crate::config::Config;
use crate::session::{Credentials, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Login stage checks against these; taken from `PROFILER_USERNAME` / `PROFILER_PASSWORD`.
    pub credentials: Credentials,
    pub sessions: SessionStore,
    /// Extraction, matching and scoring collaborators, cheap to clone.
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(config: Config, analyzer: Analyzer) -> Self {
        Self {
            credentials: Credentials {
                username: config.username.clone(),
                password: config.password.clone(),
            },
            sessions: SessionStore::new(),
            analyzer,
            config,
        }
    }
}

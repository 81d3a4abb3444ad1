use std::sync::Arc;

use crate::config::Config;
use crate::session::registry::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Every live session. Sized by `MAX_SESSIONS`.
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sessions = Arc::new(SessionRegistry::new(
            config.max_sessions,
            config.session_idle_ttl(),
        ));
        Self { config, sessions }
    }
}

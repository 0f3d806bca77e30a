use chrono::Duration;

use crate::config::Config;
use crate::editor::SessionStore;

/// Idle TTLs are clamped to a year so the cutoff arithmetic cannot overflow.
const MAX_IDLE_SECS: i64 = 365 * 24 * 60 * 60;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Transient editing sessions. Lost on restart.
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sessions = SessionStore::new(
            config.max_sessions,
            Duration::seconds(config.session_idle_secs.clamp(0, MAX_IDLE_SECS)),
        );
        AppState { config, sessions }
    }
}

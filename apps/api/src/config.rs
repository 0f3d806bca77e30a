use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on live editing sessions held in memory.
    pub max_sessions: usize,
    /// Sessions not edited for this many seconds are evicted on the next create.
    pub session_idle_secs: i64,
    /// Request body limit. A CV is small; this guards the JSON extractor.
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_sessions: 256,
            session_idle_secs: 6 * 60 * 60,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        let defaults = Config::default();

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_sessions: parse_env("MAX_SESSIONS", defaults.max_sessions)?,
            session_idle_secs: parse_env("SESSION_IDLE_SECS", defaults.session_idle_secs)?,
            max_body_bytes: parse_env("MAX_BODY_BYTES", defaults.max_body_bytes)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

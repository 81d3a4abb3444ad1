use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on concurrently held sessions.
    pub max_sessions: usize,
    /// Longest a `/watch` long-poll may block, in milliseconds.
    pub long_poll_max_ms: u64,
    /// Sessions untouched for this long are evicted.
    pub session_idle_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_sessions: 10_000,
            long_poll_max_ms: 30_000,
            session_idle_ttl_secs: 3_600,
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
            long_poll_max_ms: parse_env("LONG_POLL_MAX_MS", defaults.long_poll_max_ms)?,
            session_idle_ttl_secs: parse_env(
                "SESSION_IDLE_TTL_SECS",
                defaults.session_idle_ttl_secs,
            )?,
        })
    }

    /// Filter used when `RUST_LOG` is not a valid directive. `tower_http` is
    /// kept at debug so `TraceLayer` request spans are emitted.
    pub fn log_directive(&self) -> String {
        format!(
            "{}={},tower_http=debug",
            env!("CARGO_PKG_NAME"),
            self.rust_log
        )
    }

    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.session_idle_ttl_secs)
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

use anyhow::{bail, Context, Result};
use tokio::time::Duration;

use crate::session::store::DEFAULT_IDLE_TTL;
use crate::suggestions::recency::{DEFAULT_TICK, DEFAULT_TTL};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// How long a changed bullet stays marked as recently changed.
    pub recency_ttl: Duration,
    /// Period of the background sweep.
    pub recency_tick: Duration,
    /// Sessions untouched for this long are dropped.
    pub session_idle_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            recency_ttl: DEFAULT_TTL,
            recency_tick: DEFAULT_TICK,
            session_idle_ttl: DEFAULT_IDLE_TTL,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let recency_tick = millis_env("RECENCY_TICK_MS", defaults.recency_tick)?;
        if recency_tick.is_zero() {
            bail!("RECENCY_TICK_MS must be greater than zero");
        }
        let session_idle_ttl = millis_env("SESSION_IDLE_TTL_MS", defaults.session_idle_ttl)?;
        if session_idle_ttl.is_zero() {
            bail!("SESSION_IDLE_TTL_MS must be greater than zero");
        }

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            recency_ttl: millis_env("RECENCY_TTL_MS", defaults.recency_ttl)?,
            recency_tick,
            session_idle_ttl,
        })
    }
}

fn millis_env(key: &str, default: Duration) -> Result<Duration> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .with_context(|| format!("{key} must be a whole number of milliseconds, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

use std::{env, time::Duration};

use crate::use_cases::poll::DEFAULT_POLL_INTERVAL;
use crate::use_cases::session::{DEFAULT_API_VERSION, DEFAULT_AUTH_TIMEOUT};

pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_APPLICATION: &str = "cura-client";

// Settings used to build a reqwest-backed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub address: String,
    pub application: String,
    pub api_version: u32,
    pub poll_interval: Duration,
    pub auth_timeout: Duration,
    // Per-exchange bound; `None` leaves reqwest's default (no timeout).
    pub http_timeout: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            application: DEFAULT_APPLICATION.to_string(),
            api_version: DEFAULT_API_VERSION,
            poll_interval: DEFAULT_POLL_INTERVAL,
            auth_timeout: DEFAULT_AUTH_TIMEOUT,
            http_timeout: None,
        }
    }
}

impl SessionConfig {
    // Read `CURA_*` variables, loading `.env` first when one is present.
    pub fn from_env() -> Self {
        // Load .env locally; safe to ignore when not present.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Unset or unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            address: non_empty(lookup("CURA_ADDRESS")).unwrap_or(defaults.address),
            application: non_empty(lookup("CURA_APPLICATION")).unwrap_or(defaults.application),
            api_version: lookup("CURA_API_VERSION")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.api_version),
            poll_interval: millis(lookup("CURA_POLL_INTERVAL_MS"))
                .unwrap_or(defaults.poll_interval),
            auth_timeout: millis(lookup("CURA_AUTH_TIMEOUT_MS")).unwrap_or(defaults.auth_timeout),
            http_timeout: millis(lookup("CURA_HTTP_TIMEOUT_MS")),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Zero durations are rejected so the poll loop never spins.
fn millis(value: Option<String>) -> Option<Duration> {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .map(Duration::from_millis)
}

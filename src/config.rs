// src/config.rs
use std::env;
use std::time::Duration;

/// Client configuration loaded from environment variables.
///
/// Every field has a working default; malformed values fall back to the
/// default instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote inventory API
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Staleness window for product lists and details
    pub products_stale: Duration,
    /// Staleness window for the category list
    pub categories_stale: Duration,
    /// Staleness window for activity logs
    pub logs_stale: Duration,
    /// Staleness window for stock snapshots
    pub snapshots_stale: Duration,
    /// Delay applied to search-text changes before fetching
    pub search_debounce: Duration,
}

fn env_secs(key: &str, default: u64) -> Duration {
    let secs = env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}

fn env_millis(key: &str, default: u64) -> Duration {
    let millis = env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_millis(millis)
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url = env::var("FLIPPR_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        Self {
            base_url,
            request_timeout: env_secs("FLIPPR_REQUEST_TIMEOUT_SECS", 30),
            products_stale: env_secs("FLIPPR_PRODUCTS_STALE_SECS", 5 * 60),
            categories_stale: env_secs("FLIPPR_CATEGORIES_STALE_SECS", 10 * 60),
            logs_stale: env_secs("FLIPPR_LOGS_STALE_SECS", 5 * 60),
            snapshots_stale: env_secs("FLIPPR_SNAPSHOTS_STALE_SECS", 5 * 60),
            search_debounce: env_millis("FLIPPR_SEARCH_DEBOUNCE_MS", 400),
        }
    }

    /// Configuration pointing at an arbitrary base URL with default windows.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(30),
            products_stale: Duration::from_secs(5 * 60),
            categories_stale: Duration::from_secs(10 * 60),
            logs_stale: Duration::from_secs(5 * 60),
            snapshots_stale: Duration::from_secs(5 * 60),
            search_debounce: Duration::from_millis(400),
        }
    }
}

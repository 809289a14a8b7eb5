// Service configuration read from the environment.
// All values have defaults; only the GitHub token is genuinely optional.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CACHE_TTL_SECS: u64 = 60;
const DEFAULT_STATIC_DIR: &str = "static";

/// Runtime configuration for the service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional bearer token for GitHub API requests. Absence just means
    /// stricter rate limits, not an error.
    pub github_token: Option<String>,
    /// Port to listen on.
    pub port: u16,
    /// How long aggregated profiles stay fresh in the cache.
    pub cache_ttl: Duration,
    /// Directory holding the static dashboard assets.
    pub static_dir: PathBuf,
}

impl Config {
    /// Build a config from environment variables, falling back to defaults
    /// for anything missing or unparsable.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let ttl_secs = env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR));

        Self {
            github_token: env::var("GITHUB_TOKEN").ok(),
            port,
            cache_ttl: Duration::from_secs(ttl_secs),
            static_dir,
        }
    }
}

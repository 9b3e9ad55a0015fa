use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::app::scoring_config::DEFAULT_ACTIVITY_MONTHS;

#[derive(Clone, Debug)]
pub struct Config {
    /// GitHub REST API base URL
    pub github_api_url: String,
    /// Bearer token for GitHub; unauthenticated calls get a much smaller quota
    pub github_token: Option<String>,
    /// Per-call timeout for outbound GitHub requests
    pub github_timeout_secs: u64,
    /// Retry ceiling for rate-limited and network-failed calls
    pub github_max_retries: u32,
    /// First backoff delay; doubles on each retry
    pub github_initial_backoff_ms: u64,
    /// Number of repositories collected from the search endpoint
    pub search_per_page: u32,
    /// Upper bound on search pages walked per request
    pub search_max_pages: u32,
    /// Page size for a user's repository list
    pub repos_per_page: u32,
    /// Concurrent profile fetches per search
    pub collector_concurrency: usize,
    /// Recency window for the activity filter
    pub min_activity_months: u32,
    /// Whole-pipeline timeout enforced at the HTTP boundary
    pub search_timeout_secs: u64,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            github_api_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            github_token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            github_timeout_secs: parse_var("GITHUB_TIMEOUT_SECS", 15),
            github_max_retries: parse_var("GITHUB_MAX_RETRIES", 3),
            github_initial_backoff_ms: parse_var("GITHUB_INITIAL_BACKOFF_MS", 1000),
            search_per_page: parse_var("SEARCH_PER_PAGE", 30),
            search_max_pages: parse_var("SEARCH_MAX_PAGES", 3),
            repos_per_page: parse_var("REPOS_PER_PAGE", 100),
            collector_concurrency: parse_var("COLLECTOR_CONCURRENCY", 4),
            min_activity_months: parse_var("MIN_ACTIVITY_MONTHS", DEFAULT_ACTIVITY_MONTHS),
            search_timeout_secs: parse_var("SEARCH_TIMEOUT_SECS", 120),
            port: parse_var("PORT", 8080),
        }
    }

    /// Check if a GitHub token is configured
    pub fn github_authenticated(&self) -> bool {
        self.github_token.is_some()
    }

    pub fn github_timeout(&self) -> Duration {
        Duration::from_secs(self.github_timeout_secs)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.github_initial_backoff_ms)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

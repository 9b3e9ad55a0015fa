//! Rate-limited GitHub fetcher
//!
//! Every outbound GitHub call goes through [`GitHubFetcher::request`], which
//! handles three things:
//! - proactive throttling: when the last response said the quota is (almost)
//!   gone, wait for the reset time before calling again
//! - reactive rate limiting: 403/429 rate-limit responses are retried after
//!   `Retry-After` (or exponential backoff) up to the retry ceiling, then
//!   surfaced as `GitHubError::RateLimitExceeded`
//! - transient network failures: retried with exponential backoff
//!
//! Rate-limit state is shared by all concurrent callers and lives behind a
//! single async mutex. A caller that finds the quota exhausted waits while
//! holding the lock, so the callers queued behind it do not each wait out the
//! same reset window.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::clock::Clock;
use super::transport::{HttpResponse, HttpTransport};
use crate::domain::ports::{GitHubClient, RawProfile, RawRepository, RepositorySearch};
use crate::error::GitHubError;

/// Remaining-call count at or below which calls wait for the reset
pub const RATE_LIMIT_THRESHOLD: u64 = 1;

/// Shortest proactive wait, guards against busy-looping on clock skew
pub const MIN_RESET_WAIT: Duration = Duration::from_secs(1);

/// GitHub caps `per_page` at 100 on every list endpoint
pub const MAX_PAGE_SIZE: u32 = 100;

/// Longest error body kept in `GitHubError::Api` messages
const MAX_ERROR_BODY: usize = 512;

/// Retry ceiling and backoff base
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts per call; reaching it ends the retry loop
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
        }
    }
}

/// Progress of one call through the retry loop
#[derive(Debug, Clone, Copy)]
struct RetryState {
    attempt: u32,
    next_delay: Duration,
}

impl RetryState {
    fn new(policy: &RetryPolicy) -> Self {
        Self {
            attempt: 0,
            next_delay: policy.initial_delay,
        }
    }

    /// Count a failed attempt. Returns the backoff to sleep before retrying,
    /// or `None` once the ceiling is reached.
    fn fail(&mut self, policy: &RetryPolicy) -> Option<Duration> {
        self.attempt += 1;
        if self.attempt >= policy.max_retries {
            return None;
        }
        let delay = self.next_delay;
        self.next_delay = self.next_delay.saturating_mul(2);
        Some(delay)
    }
}

/// Last quota seen in `X-RateLimit-*` headers
#[derive(Debug, Default, Clone, Copy)]
struct RateLimitState {
    remaining: Option<u64>,
    /// Unix timestamp (seconds) at which the quota resets
    reset_at: Option<i64>,
}

/// Successful GitHub response
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// GitHub REST client with retry, backoff and rate-limit throttling
pub struct GitHubFetcher {
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    base_url: String,
    policy: RetryPolicy,
    rate_limit: Mutex<RateLimitState>,
}

impl GitHubFetcher {
    pub fn new(
        base_url: String,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            clock,
            base_url: base_url.trim_end_matches('/').to_string(),
            policy,
            rate_limit: Mutex::new(RateLimitState::default()),
        }
    }

    /// Query values are appended verbatim and must already be URL-safe;
    /// the search query arrives percent-encoded from the query builder.
    fn api_url(&self, path: &str, query: &[(&str, String)]) -> String {
        if query.is_empty() {
            return format!("{}{}", self.base_url, path);
        }
        let params: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("{}{}?{}", self.base_url, path, params.join("&"))
    }

    /// Issue one logical GitHub call, retrying as described in the module docs.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<FetchResponse, GitHubError> {
        let url = self.api_url(path, query);
        let mut retry = RetryState::new(&self.policy);

        loop {
            self.wait_for_quota().await;

            tracing::debug!(method = %method, url = %url, attempt = retry.attempt, "GitHub request");

            let response = match self.transport.send(method.clone(), &url).await {
                Ok(response) => response,
                Err(e) => match retry.fail(&self.policy) {
                    Some(delay) => {
                        tracing::warn!(
                            url = %url,
                            attempt = retry.attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "GitHub request failed, retrying"
                        );
                        self.clock.sleep(delay).await;
                        continue;
                    }
                    None => {
                        tracing::error!(url = %url, attempts = retry.attempt, error = %e, "GitHub request failed, giving up");
                        return Err(GitHubError::Network {
                            attempts: retry.attempt,
                            message: e.to_string(),
                        });
                    }
                },
            };

            self.record_rate_limit(&response).await;

            if response.is_success() {
                return match serde_json::from_str(&response.body) {
                    Ok(body) => Ok(FetchResponse {
                        status: response.status,
                        body,
                    }),
                    Err(e) => {
                        tracing::warn!(url = %url, status = response.status, error = %e, "GitHub returned invalid JSON");
                        Err(GitHubError::Deserialization {
                            status: response.status,
                            message: e.to_string(),
                        })
                    }
                };
            }

            if is_rate_limited(&response) {
                let backoff = match retry.fail(&self.policy) {
                    Some(backoff) => backoff,
                    None => {
                        tracing::error!(url = %url, attempts = retry.attempt, "GitHub rate limit exceeded");
                        return Err(GitHubError::RateLimitExceeded {
                            attempts: retry.attempt,
                        });
                    }
                };
                let delay = retry_after(&response).unwrap_or(backoff);
                tracing::warn!(
                    url = %url,
                    attempt = retry.attempt,
                    delay_ms = delay.as_millis() as u64,
                    "GitHub rate limit hit, backing off"
                );
                self.clock.sleep(delay).await;
                self.forget_remaining().await;
                continue;
            }

            tracing::warn!(url = %url, status = response.status, "GitHub API error");
            return Err(GitHubError::Api {
                status: response.status,
                message: truncate(&response.body, MAX_ERROR_BODY),
            });
        }
    }

    /// Block until the quota resets when the last response left it exhausted.
    async fn wait_for_quota(&self) {
        let mut state = self.rate_limit.lock().await;

        let (Some(remaining), Some(reset_at)) = (state.remaining, state.reset_at) else {
            return;
        };
        if remaining > RATE_LIMIT_THRESHOLD {
            return;
        }

        let until_reset = reset_at.saturating_sub(self.clock.now().timestamp()).max(0) as u64;
        let wait = Duration::from_secs(until_reset).max(MIN_RESET_WAIT);
        tracing::info!(
            remaining,
            wait_secs = wait.as_secs(),
            "GitHub quota nearly exhausted, waiting for reset"
        );
        self.clock.sleep(wait).await;

        // New window; the next response reports the real count
        state.remaining = None;
    }

    async fn record_rate_limit(&self, response: &HttpResponse) {
        let remaining = response
            .header("x-ratelimit-remaining")
            .and_then(|v| v.trim().parse::<u64>().ok());
        let reset_at = response
            .header("x-ratelimit-reset")
            .and_then(|v| v.trim().parse::<i64>().ok());

        if remaining.is_none() && reset_at.is_none() {
            return;
        }

        let mut state = self.rate_limit.lock().await;
        if let Some(reset_at) = reset_at {
            let behind = state.reset_at.is_some_and(|current| reset_at < current);
            if behind || reset_at <= self.clock.now().timestamp() {
                tracing::debug!(reset_at, "Ignoring stale rate-limit headers");
                return;
            }
            state.reset_at = Some(reset_at);
        }
        if remaining.is_some() {
            state.remaining = remaining;
        }
    }

    /// A reactive backoff already covered this window; only a fresh
    /// response may arm the proactive wait again.
    async fn forget_remaining(&self) {
        self.rate_limit.lock().await.remaining = None;
    }

    #[cfg(test)]
    async fn remaining_quota(&self) -> Option<u64> {
        self.rate_limit.lock().await.remaining
    }
}

#[async_trait]
impl GitHubClient for GitHubFetcher {
    async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
        max_pages: u32,
    ) -> Result<RepositorySearch, GitHubError> {
        if query.trim().is_empty() {
            return Err(GitHubError::InvalidRequest("empty search query".to_string()));
        }
        let wanted = per_page as usize;
        if wanted == 0 {
            return Ok(RepositorySearch::default());
        }
        let page_size = per_page.min(MAX_PAGE_SIZE);
        let first_page = page.max(1);

        let mut items: Vec<RawRepository> = Vec::new();
        let mut total_count = 0;

        for current in first_page..first_page.saturating_add(max_pages.max(1)) {
            let response = self
                .request(
                    Method::GET,
                    "/search/repositories",
                    &[
                        ("q", query.to_string()),
                        ("page", current.to_string()),
                        ("per_page", page_size.to_string()),
                        ("sort", "stars".to_string()),
                        ("order", "desc".to_string()),
                    ],
                )
                .await;

            let response = match response {
                Ok(response) => response,
                // Keep what earlier pages produced unless the failure is terminal
                Err(e) if current > first_page && !e.is_terminal() => {
                    tracing::warn!(page = current, error = %e, "Search page failed, keeping earlier pages");
                    break;
                }
                Err(e) => return Err(e),
            };

            let status = response.status;
            let page_body: SearchResponse =
                serde_json::from_value(response.body).map_err(|e| GitHubError::Deserialization {
                    status,
                    message: e.to_string(),
                })?;

            total_count = page_body.total_count;
            let returned = page_body.items.len();
            items.extend(parse_repositories(page_body.items));

            tracing::debug!(page = current, returned, collected = items.len(), total_count, "Search page fetched");

            if items.len() >= wanted || returned < page_size as usize {
                break;
            }
        }

        items.truncate(wanted);
        let incomplete_results = (items.len() as u64) < total_count;

        Ok(RepositorySearch {
            total_count,
            incomplete_results,
            items,
        })
    }

    async fn get_user_profile(&self, login: &str) -> Result<RawProfile, GitHubError> {
        let path = user_path(login, "")?;
        let response = self.request(Method::GET, &path, &[]).await?;

        serde_json::from_value(response.body).map_err(|e| GitHubError::Deserialization {
            status: response.status,
            message: e.to_string(),
        })
    }

    async fn get_user_repositories(
        &self,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRepository>, GitHubError> {
        let path = user_path(login, "/repos")?;
        let response = self
            .request(
                Method::GET,
                &path,
                &[
                    ("page", page.max(1).to_string()),
                    ("per_page", per_page.clamp(1, MAX_PAGE_SIZE).to_string()),
                ],
            )
            .await?;

        let items: Vec<serde_json::Value> =
            serde_json::from_value(response.body).map_err(|e| GitHubError::Deserialization {
                status: response.status,
                message: e.to_string(),
            })?;

        Ok(parse_repositories(items))
    }
}

fn user_path(login: &str, suffix: &str) -> Result<String, GitHubError> {
    let login = login.trim();
    if login.is_empty() {
        return Err(GitHubError::InvalidRequest("empty login".to_string()));
    }
    Ok(format!("/users/{}{}", urlencoding::encode(login), suffix))
}

/// Parse repository items one by one, skipping the malformed ones
fn parse_repositories(items: Vec<serde_json::Value>) -> Vec<RawRepository> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(repo) => Some(repo),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed repository item");
                None
            }
        })
        .collect()
}

/// 403 with a rate-limit message, or 429 (secondary rate limit)
fn is_rate_limited(response: &HttpResponse) -> bool {
    match response.status {
        429 => true,
        403 => response.body.to_lowercase().contains("rate limit"),
        _ => false,
    }
}

fn retry_after(response: &HttpResponse) -> Option<Duration> {
    response
        .header("retry-after")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn truncate(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

//! Mock implementations of port traits and adapter seams
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Method;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use crate::adapters::github::{Clock, HttpResponse, HttpTransport, TransportError};
use crate::domain::ports::{GitHubClient, RawProfile, RawRepository, RepositorySearch};
use crate::error::GitHubError;

// ============================================================================
// Mock GitHub Client
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum SearchMode {
    #[default]
    Ok,
    Fail,
    RateLimited,
}

/// In-memory GitHub client keyed by login
#[derive(Default)]
pub struct MockGitHubClient {
    search_results: RwLock<Vec<RawRepository>>,
    search_mode: RwLock<SearchMode>,
    profiles: RwLock<HashMap<String, RawProfile>>,
    repos: RwLock<HashMap<String, Vec<RawRepository>>>,
    failing_repos: RwLock<HashSet<String>>,
    rate_limited_logins: RwLock<HashSet<String>>,
    profile_calls: RwLock<HashMap<String, usize>>,
    repo_calls: RwLock<HashMap<String, usize>>,
    search_queries: RwLock<Vec<String>>,
}

impl MockGitHubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items returned by every repository search
    pub fn with_search_results(self, items: Vec<RawRepository>) -> Self {
        *self.search_results.write().unwrap() = items;
        self
    }

    pub fn with_failing_search(self) -> Self {
        *self.search_mode.write().unwrap() = SearchMode::Fail;
        self
    }

    pub fn with_rate_limited_search(self) -> Self {
        *self.search_mode.write().unwrap() = SearchMode::RateLimited;
        self
    }

    pub fn with_profile(self, profile: RawProfile) -> Self {
        self.profiles
            .write()
            .unwrap()
            .insert(profile.login.clone(), profile);
        self
    }

    pub fn with_repos(self, login: &str, repos: Vec<RawRepository>) -> Self {
        self.repos.write().unwrap().insert(login.to_string(), repos);
        self
    }

    /// Repository listing for `login` fails with a server error
    pub fn with_failing_repos(self, login: &str) -> Self {
        self.failing_repos.write().unwrap().insert(login.to_string());
        self
    }

    /// Every call for `login` fails with `RateLimitExceeded`
    pub fn with_rate_limited_login(self, login: &str) -> Self {
        self.rate_limited_logins
            .write()
            .unwrap()
            .insert(login.to_string());
        self
    }

    pub fn profile_calls(&self, login: &str) -> usize {
        self.profile_calls
            .read()
            .unwrap()
            .get(login)
            .copied()
            .unwrap_or(0)
    }

    pub fn repo_calls(&self, login: &str) -> usize {
        self.repo_calls
            .read()
            .unwrap()
            .get(login)
            .copied()
            .unwrap_or(0)
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.search_queries.read().unwrap().clone()
    }

    fn is_rate_limited(&self, login: &str) -> bool {
        self.rate_limited_logins.read().unwrap().contains(login)
    }
}

#[async_trait]
impl GitHubClient for MockGitHubClient {
    async fn search_repositories(
        &self,
        query: &str,
        _page: u32,
        per_page: u32,
        _max_pages: u32,
    ) -> Result<RepositorySearch, GitHubError> {
        self.search_queries.write().unwrap().push(query.to_string());

        match *self.search_mode.read().unwrap() {
            SearchMode::Fail => {
                return Err(GitHubError::Api {
                    status: 422,
                    message: "Validation Failed".to_string(),
                })
            }
            SearchMode::RateLimited => return Err(GitHubError::RateLimitExceeded { attempts: 3 }),
            SearchMode::Ok => {}
        }

        let all = self.search_results.read().unwrap().clone();
        let total_count = all.len() as u64;
        let items: Vec<RawRepository> = all.into_iter().take(per_page as usize).collect();

        Ok(RepositorySearch {
            total_count,
            incomplete_results: (items.len() as u64) < total_count,
            items,
        })
    }

    async fn get_user_profile(&self, login: &str) -> Result<RawProfile, GitHubError> {
        *self
            .profile_calls
            .write()
            .unwrap()
            .entry(login.to_string())
            .or_insert(0) += 1;

        if self.is_rate_limited(login) {
            return Err(GitHubError::RateLimitExceeded { attempts: 3 });
        }

        self.profiles
            .read()
            .unwrap()
            .get(login)
            .cloned()
            .ok_or_else(|| GitHubError::Api {
                status: 404,
                message: "Not Found".to_string(),
            })
    }

    async fn get_user_repositories(
        &self,
        login: &str,
        _page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRepository>, GitHubError> {
        *self
            .repo_calls
            .write()
            .unwrap()
            .entry(login.to_string())
            .or_insert(0) += 1;

        if self.is_rate_limited(login) {
            return Err(GitHubError::RateLimitExceeded { attempts: 3 });
        }
        if self.failing_repos.read().unwrap().contains(login) {
            return Err(GitHubError::Api {
                status: 500,
                message: "Mock failure".to_string(),
            });
        }

        Ok(self
            .repos
            .read()
            .unwrap()
            .get(login)
            .map(|repos| repos.iter().take(per_page as usize).cloned().collect())
            .unwrap_or_default())
    }
}

// ============================================================================
// Scripted HTTP Transport
// ============================================================================

/// Replays queued responses in order and records every requested URL.
/// An exhausted queue answers with `TransportError::Other`.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(self, response: Result<HttpResponse, TransportError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.push(Ok(HttpResponse::new(status, body)))
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, _method: Method, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response left".to_string())))
    }
}

// ============================================================================
// Routed HTTP Transport
// ============================================================================

/// Answers by URL path (query string ignored); unknown paths get a 404.
#[derive(Default)]
pub struct RoutedTransport {
    routes: HashMap<String, HttpResponse>,
    requests: Mutex<Vec<String>>,
}

impl RoutedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes
            .insert(path.to_string(), HttpResponse::new(status, body));
        self
    }

    pub fn route_json(self, path: &str, body: serde_json::Value) -> Self {
        self.route(path, 200, body.to_string())
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn url_path(url: &str) -> &str {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let path = without_scheme
        .find('/')
        .map(|i| &without_scheme[i..])
        .unwrap_or("/");
    path.split('?').next().unwrap_or(path)
}

#[async_trait]
impl HttpTransport for RoutedTransport {
    async fn send(&self, _method: Method, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(self
            .routes
            .get(url_path(url))
            .cloned()
            .unwrap_or_else(|| HttpResponse::new(404, r#"{"message": "Not Found"}"#)))
    }
}

// ============================================================================
// Manual Clock
// ============================================================================

/// Clock frozen at a fixed instant; `sleep` returns immediately, records the
/// duration and advances `now` by it.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap())
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        let mut now = self.now.lock().unwrap();
        if let Ok(step) = chrono::Duration::from_std(duration) {
            *now += step;
        }
    }
}

/// GitHub's secondary rate-limit answer: a 403 with no quota headers
pub fn rate_limited_response(body: &str) -> HttpResponse {
    HttpResponse::new(403, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_path_strips_host_and_query() {
        assert_eq!(
            url_path("https://api.github.test/users/octo/repos?page=1&per_page=100"),
            "/users/octo/repos"
        );
        assert_eq!(url_path("https://api.github.test"), "/");
    }

    #[tokio::test]
    async fn manual_clock_advances_on_sleep() {
        let clock = ManualClock::new();
        let start = clock.now();

        clock.sleep(Duration::from_secs(90)).await;

        assert_eq!(clock.now() - start, chrono::Duration::seconds(90));
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(90)]);
    }
}

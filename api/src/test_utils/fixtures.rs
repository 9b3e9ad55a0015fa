//! Test fixtures
//!
//! Factory functions for creating test data.

use crate::config::Config;
use crate::domain::entities::SearchRequest;
use crate::domain::ports::{RawOwner, RawProfile, RawRepository};

/// Create a test profile with sensible defaults
pub fn test_profile(login: &str) -> RawProfile {
    RawProfile {
        login: login.to_string(),
        name: Some(format!("Test {}", login)),
        bio: None,
        location: None,
        public_repos: 1,
        followers: 0,
        html_url: format!("https://github.com/{}", login),
    }
}

/// Create a test repository without owner or timestamps
pub fn test_repo(name: &str, stars: u64, forks: u64, language: Option<&str>) -> RawRepository {
    RawRepository {
        name: name.to_string(),
        html_url: format!("https://github.com/test/{}", name),
        language: language.map(str::to_string),
        stargazers_count: stars,
        forks_count: forks,
        topics: Vec::new(),
        description: None,
        updated_at: None,
        owner: None,
    }
}

/// Create a repository owned by `owner`, last updated at `updated_at`
pub fn test_owned_repo(name: &str, owner: &str, stars: u64, updated_at: &str) -> RawRepository {
    RawRepository {
        html_url: format!("https://github.com/{}/{}", owner, name),
        updated_at: Some(updated_at.to_string()),
        owner: Some(RawOwner {
            login: owner.to_string(),
        }),
        ..test_repo(name, stars, 0, None)
    }
}

/// Create a candidate search request
pub fn test_request(title: &str, skills: &[&str]) -> SearchRequest {
    SearchRequest {
        intent: "find_candidates".to_string(),
        title: Some(title.to_string()),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

/// Configuration pointing at a stubbed GitHub, with no token
pub fn test_config() -> Config {
    Config {
        github_api_url: "https://api.github.test".to_string(),
        github_token: None,
        github_timeout_secs: 5,
        github_max_retries: 3,
        github_initial_backoff_ms: 1000,
        search_per_page: 30,
        search_max_pages: 3,
        repos_per_page: 100,
        collector_concurrency: 4,
        min_activity_months: 12,
        search_timeout_secs: 30,
        port: 0,
    }
}

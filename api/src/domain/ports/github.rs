//! GitHub client port trait
//!
//! Defines the interface for reading from the GitHub REST API, along with
//! the raw upstream shapes it returns. GitHub omits or nulls many fields,
//! so every optional field has an explicit default here.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GitHubError;

/// Helper to deserialize null as default (empty vec, zero, etc.)
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Owning account embedded in a repository payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOwner {
    pub login: String,
}

/// Repository as returned by `/search/repositories` and `/users/{login}/repos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRepository {
    pub name: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub forks_count: u64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub topics: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Kept as text; unparsable timestamps are ignored during analysis
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub owner: Option<RawOwner>,
}

impl RawRepository {
    /// Login of the owning account, if present and non-blank
    pub fn owner_login(&self) -> Option<&str> {
        self.owner
            .as_ref()
            .map(|o| o.login.trim())
            .filter(|l| !l.is_empty())
    }
}

/// User profile as returned by `/users/{login}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub public_repos: u64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub followers: u64,
    #[serde(default)]
    pub html_url: String,
}

/// Accumulated result of a paginated repository search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositorySearch {
    /// Total matches GitHub reports for the query
    pub total_count: u64,
    /// True when fewer items were collected than GitHub reports exist
    pub incomplete_results: bool,
    pub items: Vec<RawRepository>,
}

/// GitHub client port
///
/// Errors are typed so callers can tell an ordinary fetch failure apart from
/// `GitHubError::RateLimitExceeded`, which must abort the whole search.
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Walk search pages (stars, descending) starting at `page` until
    /// `per_page` items are collected, a short page is returned, or
    /// `max_pages` pages have been read.
    async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
        max_pages: u32,
    ) -> Result<RepositorySearch, GitHubError>;

    async fn get_user_profile(&self, login: &str) -> Result<RawProfile, GitHubError>;

    async fn get_user_repositories(
        &self,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRepository>, GitHubError>;
}

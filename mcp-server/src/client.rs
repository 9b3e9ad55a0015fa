//! HTTP client for the TalentScout API
//!
//! The API does the GitHub work; this client only forwards structured
//! search requests and returns the response body.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::Serialize;

/// Intent sent with every search issued through MCP
const SEARCH_INTENT: &str = "find_candidates";

/// HTTP client for communicating with the TalentScout API
#[derive(Clone)]
pub struct TalentScoutClient {
    client: reqwest::Client,
    base_url: String,
}

impl TalentScoutClient {
    /// Create a new client from environment variables
    ///
    /// Optional env vars:
    /// - TALENTSCOUT_API_URL: Base URL of the API (default http://localhost:8080)
    ///
    /// The GitHub token lives with the API server, not here.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("TALENTSCOUT_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Self::new(&base_url)
    }

    /// Create a new client with explicit configuration
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a GitHub candidate search
    pub async fn search_candidates(&self, request: &SearchRequest) -> Result<String> {
        self.post_text("/search/github", request).await
    }

    /// Check that the API is up and whether it has a GitHub token
    pub async fn health(&self) -> Result<String> {
        self.get_text("/health").await
    }

    // --- Internal helpers ---

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", path))?;

        handle_text_response(response).await
    }

    async fn post_text<T: Serialize>(&self, path: &str, body: &T) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to POST {}", path))?;

        handle_text_response(response).await
    }
}

async fn handle_text_response(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        anyhow::bail!("API error ({}): {}", status, body);
    }

    Ok(body)
}

// --- Request Types ---

/// Body of `POST /search/github`
#[derive(Debug, Serialize)]
pub struct SearchRequest {
    intent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    experience_level: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    location: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
}

impl SearchRequest {
    pub fn new(
        title: Option<String>,
        skills: Vec<String>,
        experience_level: Option<String>,
        location: Vec<String>,
        limit: Option<usize>,
    ) -> Self {
        Self {
            intent: SEARCH_INTENT.to_string(),
            title,
            skills,
            experience_level,
            location,
            limit,
        }
    }
}

//! Unified error types for the TalentScout API
//!
//! This module defines error types for each layer:
//! - `GitHubError`: GitHub API fetch errors (retry exhaustion, HTTP failures)
//! - `QueryError`: search query construction errors
//! - `AppError`: Application layer errors (wraps fetch errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// GitHub API client errors
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Timeout or connection failure that survived every retry
    #[error("Network error after {attempts} attempts: {message}")]
    Network { attempts: u32, message: String },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The rate-limit retry ceiling was reached. Terminal for the whole search.
    #[error("GitHub rate limit exceeded after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },

    #[error("Deserialization error (status {status}): {message}")]
    Deserialization { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl GitHubError {
    /// Whether this error must abort the whole search instead of being
    /// absorbed for a single candidate.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GitHubError::RateLimitExceeded { .. })
    }

    /// HTTP status of the failed call, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Api { status, .. } | GitHubError::Deserialization { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Search query construction errors
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid term pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Query too long: {length} characters (max {max})")]
    TooLong { length: usize, max: usize },
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Search timed out after {0} seconds")]
    Timeout(u64),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::GitHub(e) => {
                tracing::error!("GitHub error: {}", e);
                match e {
                    GitHubError::RateLimitExceeded { .. } => (
                        StatusCode::TOO_MANY_REQUESTS,
                        "Rate limited",
                        Some(
                            "GitHub rate limit exceeded. Try again later or supply a GITHUB_TOKEN."
                                .to_string(),
                        ),
                    ),
                    GitHubError::InvalidRequest(msg) => {
                        (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
                    }
                    GitHubError::Api { status, message } => {
                        // GitHub answers 422 for search queries it cannot parse
                        let http_status = if *status == 422 {
                            StatusCode::UNPROCESSABLE_ENTITY
                        } else {
                            StatusCode::BAD_GATEWAY
                        };
                        (http_status, "GitHub service error", Some(message.clone()))
                    }
                    _ => (StatusCode::BAD_GATEWAY, "GitHub service error", None),
                }
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Timeout(secs) => (
                StatusCode::GATEWAY_TIMEOUT,
                "Search timed out",
                Some(format!("No result within {} seconds", secs)),
            ),
        };

        let body = Json(ErrorResponse {
            success: false,
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

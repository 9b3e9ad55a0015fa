//! Search handlers
//!
//! `POST /search/github` runs the candidate discovery pipeline for a
//! structured search request and wraps the result in a response envelope.

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::app::SearchMetadata;
use crate::domain::entities::{CandidateRecord, SearchRequest};
use crate::error::AppError;
use crate::AppState;

/// Response envelope for a candidate search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub message: String,
    pub candidates: Vec<CandidateRecord>,
    pub metadata: SearchMetadata,
}

/// Unthrottled search routes; `main` wraps them in the governor layer
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/search/github", post(search_github))
}

/// POST /search/github
///
/// Errors only on rate-limit exhaustion (429), pipeline timeout (504)
/// or an invalid request (400). Any other upstream trouble yields an
/// empty but successful envelope.
pub async fn search_github(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    if request.limit == Some(0) {
        return Err(AppError::BadRequest("limit must be at least 1".to_string()));
    }

    let timeout = state.config.search_timeout();
    let outcome = tokio::time::timeout(timeout, state.search_service.search(&request))
        .await
        .map_err(|_| {
            tracing::error!(timeout_secs = timeout.as_secs(), "Candidate search timed out");
            AppError::Timeout(timeout.as_secs())
        })??;

    let message = match outcome.candidates.len() {
        0 => "No matching candidates found".to_string(),
        1 => "Found 1 candidate".to_string(),
        n => format!("Found {} candidates", n),
    };

    Ok(Json(SearchResponse {
        success: true,
        message,
        candidates: outcome.candidates,
        metadata: outcome.metadata,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::adapters::{GitHubFetcher, RetryPolicy};
    use crate::test_utils::{test_config, ManualClock, RoutedTransport};
    use crate::{build_state, router};

    fn app(transport: RoutedTransport) -> Router {
        let fetcher = GitHubFetcher::new(
            test_config().github_api_url,
            Arc::new(transport),
            Arc::new(ManualClock::new()),
            RetryPolicy::default(),
        );
        router(build_state(test_config(), fetcher), search_routes())
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/search/github")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn empty_search_returns_empty_envelope() {
        let transport = RoutedTransport::new().route(
            "/search/repositories",
            200,
            r#"{"total_count": 0, "incomplete_results": false, "items": []}"#,
        );

        let response = app(transport)
            .oneshot(post_json(r#"{"intent": "find_candidates", "title": "cobol"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "No matching candidates found");
        assert_eq!(body["metadata"]["query"], "cobol");
        assert_eq!(body["metadata"]["candidates_returned"], 0);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let response = app(RoutedTransport::new())
            .oneshot(post_json(r#"{"intent": "find_candidates", "skills": "not-a-list"}"#))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}

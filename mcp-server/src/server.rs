//! TalentScout MCP Server implementation
//!
//! Exposes the GitHub candidate search as MCP tools. The API server must be
//! running and reachable at TALENTSCOUT_API_URL.

use crate::client::{SearchRequest, TalentScoutClient};
use anyhow::Result;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// TalentScout MCP Server
///
/// Provides tools for AI agents to find candidates on GitHub.
#[derive(Clone)]
pub struct TalentScoutServer {
    client: TalentScoutClient,
    tool_router: ToolRouter<Self>,
}

impl TalentScoutServer {
    pub fn from_env() -> Result<Self> {
        let client = TalentScoutClient::from_env()?;
        Ok(Self {
            client,
            tool_router: Self::tool_router(),
        })
    }

    #[cfg(test)]
    #[allow(dead_code)]
    pub fn new(client: TalentScoutClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }
}

// --- Tool Parameter Types ---

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchCandidatesParams {
    /// Job title to search for, e.g. "data engineer"
    #[serde(default)]
    pub title: Option<String>,
    /// Required skills, e.g. ["python", "sql"]
    #[serde(default)]
    pub skills: Vec<String>,
    /// Experience level, e.g. "senior"
    #[serde(default)]
    pub experience_level: Option<String>,
    /// Preferred locations
    #[serde(default)]
    pub location: Vec<String>,
    /// Maximum number of candidates to return
    #[serde(default)]
    pub limit: Option<usize>,
}

impl From<SearchCandidatesParams> for SearchRequest {
    fn from(params: SearchCandidatesParams) -> Self {
        SearchRequest::new(
            params.title,
            params.skills,
            params.experience_level,
            params.location,
            params.limit,
        )
    }
}

#[tool_router]
impl TalentScoutServer {
    #[tool(
        description = "Search GitHub for candidates matching a job title and skills. Returns ranked candidate records with skills, top languages, stars, recent activity and an OSS score."
    )]
    async fn search_candidates(
        &self,
        params: Parameters<SearchCandidatesParams>,
    ) -> Result<CallToolResult, McpError> {
        let request = SearchRequest::from(params.0);
        match self.client.search_candidates(&request).await {
            Ok(response) => Ok(CallToolResult::success(vec![Content::text(response)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }

    #[tool(description = "Check that the TalentScout API is reachable and has a GitHub token.")]
    async fn health(&self) -> Result<CallToolResult, McpError> {
        match self.client.health().await {
            Ok(response) => Ok(CallToolResult::success(vec![Content::text(response)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }
}

#[tool_handler]
impl ServerHandler for TalentScoutServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "talentscout".into(),
                title: Some("TalentScout MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"TalentScout - GitHub candidate discovery

TOOLS:
1. 'health' - Check the API is up (and whether GitHub calls are authenticated)
2. 'search_candidates' - Find candidates by title, skills, experience level and location

NOTES:
- Only candidates with repository activity in the last 12 months are returned
- Results are ranked by OSS score (stars, followers and public repositories)
- A rate-limit error means GitHub's quota is spent; wait or configure GITHUB_TOKEN on the API server"#
                    .into(),
            ),
        }
    }
}

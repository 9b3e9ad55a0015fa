//! TalentScout MCP Server
//!
//! This MCP server lets AI agents search GitHub for candidates through the
//! TalentScout API. It exposes tools for:
//! - Searching candidates by title, skills, experience level and location
//! - Checking API health

mod client;
mod server;

use anyhow::Result;
use rmcp::ServiceExt;
use server::TalentScoutServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting TalentScout MCP server");

    // Create the server with HTTP client
    let server = TalentScoutServer::from_env()?;

    // Serve over stdio - pass as tuple (stdin, stdout)
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;

    // Wait for shutdown
    service.waiting().await?;

    Ok(())
}

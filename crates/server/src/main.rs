//! prospect server entry point.
//!
//! Boots either the JSON API over HTTP or the MCP server on stdio, depending
//! on the configured transport. Logging goes to stderr to avoid interfering
//! with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use prospect_client::SearchService;
use prospect_core::{AppConfig, StateDb, Transport};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod http;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let service = Arc::new(SearchService::new(&config)?);
    let db = StateDb::open(&config.db_path).await?;

    tracing::info!(
        transport = ?config.transport,
        provider = service.provider_name(),
        db = %config.db_path.display(),
        "starting prospect"
    );

    match config.transport {
        Transport::Http => http::serve(http::AppState::new(config, service, db)).await,
        Transport::Stdio => {
            let ctx = tools::ToolContext::new(service, db, Arc::new(config));
            let server = serve_server(handler::ProspectServer::new(ctx), stdio()).await?;
            server.waiting().await?;
            Ok(())
        }
    }
}

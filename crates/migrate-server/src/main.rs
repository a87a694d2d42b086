//! MCP server entry point for GLIDE migration analysis.
//!
//! # Usage
//!
//! Run the server via stdio transport:
//!
//! ```bash
//! glide-migrate-server
//! ```
//!
//! Or register it with an MCP client:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "glide-migrate": {
//!       "command": "glide-migrate-server",
//!       "env": { "GLIDE_MIGRATE_CONFIG": "/path/to/glide-migrate.toml" }
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use glide_migrate_core::MigrationConfig;
use glide_migrate_server::MigrationService;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP protocol
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,glide_migrate_server=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    tracing::info!(
        "Starting glide-migrate-server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = MigrationConfig::load(None)?;
    tracing::info!(output_dir = %config.output_dir.display(), "using output directory");

    let service = MigrationService::new(config)?.serve(stdio()).await?;
    service.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

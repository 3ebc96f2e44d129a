//! Web3 DEX MCP Server
//!
//! A Model Context Protocol server for a Uniswap V2 style exchange.

use rmcp::ServiceExt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use web3_dex::{Config, DexServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!("Starting Web3 DEX MCP Server");

    let poll = config.limit_order_poll;
    let server = DexServer::new(config)?;

    // Limit-order keeper runs for the lifetime of the process
    let keeper = server.context().limit_orders.clone().spawn_watcher(poll);

    // Run with stdio transport
    let transport = rmcp::transport::stdio();
    let running = server.serve(transport).await?;

    // Wait for the server to finish
    running.waiting().await?;
    keeper.abort();

    Ok(())
}

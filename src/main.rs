//! Hyperliquid Trading MCP Server
//!
//! An MCP-style tool server for Hyperliquid trading operations.

use rmcp::ServiceExt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hyperliquid_trading_mcp::{
    config::Transport, exchange, http, Config, HyperliquidTradingServer, ToolDispatcher,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging (stdout is reserved for the stdio transport)
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!(config = ?config, "Starting Hyperliquid Trading MCP Server");

    // Fail fast: never serve without a working exchange client
    let exchange = exchange::connect(&config).await.inspect_err(|e| {
        tracing::error!(error = %e, "Failed to initialize exchange client");
    })?;
    let dispatcher = ToolDispatcher::new(exchange);

    match config.transport {
        Transport::Http => http::serve(config.bind_addr, dispatcher).await?,
        Transport::Stdio => {
            let server = HyperliquidTradingServer::new(dispatcher);
            let running = server.serve(rmcp::transport::stdio()).await?;
            running.waiting().await?;
        }
    }

    Ok(())
}

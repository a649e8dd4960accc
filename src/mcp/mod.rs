//! MCP server module.
//!
//! Serves the tool dispatcher over the Model Context Protocol (stdio).

pub mod server;

pub use server::HyperliquidTradingServer;

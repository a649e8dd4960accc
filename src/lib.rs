//! Hyperliquid Trading MCP Server Library
//!
//! An MCP-style tool server for Hyperliquid trading operations.
//! Provides tools for fetching mid prices and placing limit orders.
//!
//! # Features
//!
//! - **Tool Registry**: typed parameter schemas for every tool
//! - **Tool Dispatcher**: schema-driven argument validation and a uniform
//!   `{ok, result, error}` envelope
//! - **Exchange Adapters**: a signed Hyperliquid client and a deterministic
//!   paper exchange behind one trait
//! - **Transports**: HTTP (`/health`, `/mcp/tools`, `/mcp/call`) and MCP stdio
//!
//! # Example
//!
//! ```rust,ignore
//! use hyperliquid_trading_mcp::{exchange, http, Config, ToolDispatcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let dispatcher = ToolDispatcher::new(exchange::connect(&config).await?);
//!     http::serve(config.bind_addr, dispatcher).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod exchange;
pub mod http;
pub mod mcp;
pub mod tools;
pub mod types;

pub use config::Config;
pub use error::{AppError, Result};
pub use exchange::{ExchangeClient, ExchangeHandle};
pub use mcp::HyperliquidTradingServer;
pub use tools::{ToolDispatcher, ToolResult};

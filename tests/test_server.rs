//! Integration tests for the MCP server.
//!
//! Run with: `cargo test --test test_server`

mod common;

use std::sync::Arc;

use common::{args, recording_dispatcher, RecordingExchange};
use hyperliquid_trading_mcp::{HyperliquidTradingServer, ToolDispatcher};
use rmcp::{
    model::{ErrorCode, ServerInfo},
    ServerHandler,
};
use serde_json::json;

fn server() -> HyperliquidTradingServer {
    let (dispatcher, _) = recording_dispatcher();
    HyperliquidTradingServer::new(dispatcher)
}

/// Test server info.
#[test]
fn test_server_info() {
    let info: ServerInfo = server().get_info();

    assert_eq!(info.server_info.name, "hyperliquid-trading-mcp");
    assert!(!info.server_info.version.is_empty());
    assert!(info.capabilities.tools.is_some());
}

#[test]
fn test_tools_mirror_registry() {
    let tools = server().tools();
    let names: Vec<&str> = tools.iter().map(|tool| tool.name.as_ref()).collect();
    assert_eq!(names, vec!["get_all_mids", "place_limit_order"]);

    let schema = &tools[1].input_schema;
    assert_eq!(schema["required"], json!(["coin", "side", "size", "limit_price"]));
}

#[tokio::test]
async fn test_call_success() {
    let result = server().call("get_all_mids", None).await.unwrap();
    assert_eq!(result.is_error, Some(false));
}

#[tokio::test]
async fn test_call_failure_is_tool_error() {
    let dispatcher =
        ToolDispatcher::new(Arc::new(RecordingExchange::rejecting("Order has invalid price.")));
    let server = HyperliquidTradingServer::new(dispatcher);

    let result = server
        .call(
            "place_limit_order",
            Some(args(json!({"coin": "BTC", "side": "buy", "size": 1, "limit_price": 1}))),
        )
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
}

#[tokio::test]
async fn test_call_unknown_tool_is_protocol_error() {
    let err = server().call("withdraw", None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("withdraw"));
}

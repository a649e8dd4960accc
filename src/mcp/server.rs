//! MCP server implementation.

use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler,
};

use crate::{error::AppError, tools::ToolDispatcher};

/// Hyperliquid Trading MCP Server.
///
/// Exposes the tool registry and dispatcher over the Model Context Protocol.
#[derive(Clone)]
pub struct HyperliquidTradingServer {
    dispatcher: Arc<ToolDispatcher>,
}

impl HyperliquidTradingServer {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self { dispatcher: Arc::new(dispatcher) }
    }

    /// Registered tools in MCP form.
    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher
            .list_tools()
            .into_iter()
            .map(|schema| {
                Tool::new(schema.name, schema.description, Arc::new(schema.input_schema()))
            })
            .collect()
    }

    /// Invoke a tool and convert the envelope into an MCP tool result.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = arguments.unwrap_or_default();
        let result =
            self.dispatcher.invoke(name, &arguments).await.map_err(AppError::from)?;

        if !result.is_ok() {
            let message = result.error().unwrap_or("Tool Execution Error").to_string();
            return Ok(CallToolResult::error(vec![Content::text(message)]));
        }

        let text = serde_json::to_string_pretty(&result.result().cloned().unwrap_or_default())
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

impl ServerHandler for HyperliquidTradingServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "hyperliquid-trading-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Hyperliquid Trading MCP Server. Provides tools for fetching mid prices \
                 and placing limit orders."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = %request.name, "MCP tool call");
        self.call(&request.name, request.arguments).await
    }
}

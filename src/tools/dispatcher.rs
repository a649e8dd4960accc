//! Tool dispatcher.
//!
//! Resolves a tool, coerces its arguments, performs exactly one exchange call
//! and wraps the outcome in a [`ToolResult`]. Only an unknown tool name
//! escapes as an error.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    error::{AppError, Result},
    exchange::ExchangeHandle,
    tools::{
        arguments::{CoercedArgs, PlaceLimitOrderArgs},
        registry::{self, ToolKind, ToolSchema},
    },
    types::LimitOrder,
};

/// The requested tool is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl From<UnknownTool> for AppError {
    fn from(err: UnknownTool) -> Self {
        AppError::UnknownTool(err.0)
    }
}

/// Outcome envelope of a tool invocation.
///
/// `result` is present iff `ok`, `error` is present iff not `ok`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ToolResult {
    pub fn success(result: Value) -> Self {
        Self { ok: true, result: Some(result), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { ok: false, result: None, error: Some(error.into()) }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Dispatches tool invocations against a shared exchange client.
#[derive(Clone)]
pub struct ToolDispatcher {
    exchange: ExchangeHandle,
}

impl ToolDispatcher {
    pub fn new(exchange: ExchangeHandle) -> Self {
        Self { exchange }
    }

    /// Schemas of all tools this dispatcher executes.
    pub fn list_tools(&self) -> Vec<ToolSchema> {
        registry::list_tools()
    }

    /// Invoke a tool by name.
    ///
    /// Validation and exchange failures are returned as a failed
    /// [`ToolResult`]; only an unregistered name is an error.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> std::result::Result<ToolResult, UnknownTool> {
        let tool = ToolKind::from_name(name).ok_or_else(|| UnknownTool(name.to_string()))?;

        tracing::info!(tool = name, "Tool invoked");

        let outcome = match CoercedArgs::coerce(&tool.schema(), arguments) {
            Ok(args) => self.execute(tool, &args).await,
            Err(e) => Err(e),
        };

        Ok(match outcome {
            Ok(result) => ToolResult::success(result),
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "Tool execution failed");
                ToolResult::failure(format!("Tool Execution Error: {}", e))
            }
        })
    }

    async fn execute(&self, tool: ToolKind, args: &CoercedArgs) -> Result<Value> {
        match tool {
            ToolKind::GetAllMids => {
                let mids = self.exchange.all_mids().await?;
                Ok(serde_json::to_value(mids)?)
            }
            ToolKind::PlaceLimitOrder => {
                let order = LimitOrder::from(PlaceLimitOrderArgs::try_from(args)?);
                self.place_limit_order(order).await
            }
        }
    }

    /// Submit an order on its own task.
    ///
    /// If the caller goes away mid-request the submission still completes
    /// and its outcome is logged; it is never re-issued.
    async fn place_limit_order(&self, order: LimitOrder) -> Result<Value> {
        let exchange = Arc::clone(&self.exchange);

        let ack = tokio::spawn(async move {
            let result = exchange.place_limit_order(&order).await;
            match &result {
                Ok(ack) => tracing::info!(
                    coin = %order.coin,
                    status = %ack.status,
                    transaction_id = %ack.transaction_id,
                    "Order placed"
                ),
                Err(e) => tracing::warn!(coin = %order.coin, error = %e, "Order rejected"),
            }
            result
        })
        .await
        .map_err(|e| AppError::Order(format!("Order task failed: {}", e)))??;

        Ok(serde_json::to_value(ack)?)
    }
}

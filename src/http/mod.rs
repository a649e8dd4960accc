//! HTTP boundary.
//!
//! `GET /health`, `POST /mcp/tools` and `POST /mcp/call` on top of the tool
//! dispatcher.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

use crate::tools::{ToolDispatcher, ToolResult, ToolSchema, UnknownTool};

/// Start the HTTP server and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, dispatcher: ToolDispatcher) -> std::io::Result<()> {
    let app = create_router(dispatcher);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app).await
}

/// Create the API router.
pub fn create_router(dispatcher: ToolDispatcher) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/mcp/tools", post(list_tools))
        .route("/mcp/call", post(call_tool))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .with_state(Arc::new(dispatcher))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

#[derive(Debug, Serialize)]
pub struct ListToolsResponse {
    pub tools: Vec<ToolSchema>,
}

async fn list_tools(State(dispatcher): State<Arc<ToolDispatcher>>) -> Json<ListToolsResponse> {
    Json(ListToolsResponse { tools: dispatcher.list_tools() })
}

#[derive(Debug, Deserialize)]
pub struct CallToolRequest {
    #[serde(rename = "toolName")]
    pub tool_name: String,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

async fn call_tool(
    State(dispatcher): State<Arc<ToolDispatcher>>,
    Json(request): Json<CallToolRequest>,
) -> Result<Json<ToolResult>, ApiError> {
    let arguments = request.arguments.unwrap_or_default();
    let result = dispatcher.invoke(&request.tool_name, &arguments).await?;
    Ok(Json(result))
}

/// Errors that escape the envelope.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
}

impl From<UnknownTool> for ApiError {
    fn from(err: UnknownTool) -> Self {
        ApiError::NotFound(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(json!({"detail": detail}))).into_response()
            }
        }
    }
}

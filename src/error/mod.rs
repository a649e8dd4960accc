//! Error types and handling module.
//!
//! Defines all application-specific error types and conversions.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Wallet-related errors.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Exchange client construction failed.
    #[error("Startup error: {0}")]
    Startup(String),

    /// Requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Malformed, missing or out-of-range tool arguments.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Market data request failed.
    #[error("Hyperliquid API error: {0}")]
    Exchange(String),

    /// Order placement failed.
    #[error("Order failed: {0}")]
    Order(String),

    /// Transport errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<alloy::signers::local::LocalSignerError> for AppError {
    fn from(err: alloy::signers::local::LocalSignerError) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<alloy::signers::Error> for AppError {
    fn from(err: alloy::signers::Error) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(err: std::num::ParseFloatError) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<AppError> for McpError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::UnknownTool(_) | AppError::Validation(_) | AppError::Parse(_) => {
                McpError::invalid_params(err.to_string(), None)
            }
            _ => McpError::internal_error(err.to_string(), None),
        }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

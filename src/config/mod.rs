//! Configuration management module.
//!
//! Handles loading configuration from environment variables.

use std::{env, net::SocketAddr, time::Duration};

use crate::{
    error::AppError,
    exchange::constants::{MAINNET_API_URL, TESTNET_API_URL},
};

/// Hyperliquid network selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Default REST base URL for the network.
    pub fn api_url(self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_API_URL,
            Network::Testnet => TESTNET_API_URL,
        }
    }
}

/// Which exchange adapter backs the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeMode {
    /// Signed requests against the real Hyperliquid API.
    #[default]
    Live,
    /// Deterministic in-process fake; never touches the network.
    Paper,
}

impl std::str::FromStr for ExchangeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(ExchangeMode::Live),
            "paper" | "stub" => Ok(ExchangeMode::Paper),
            _ => Err(format!("Invalid HYPERLIQUID_MODE: {} (expected 'live' or 'paper')", s)),
        }
    }
}

/// Transport the tool server is exposed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    #[default]
    Http,
    Stdio,
}

impl std::str::FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Transport::Http),
            "stdio" => Ok(Transport::Stdio),
            _ => Err(format!("Invalid MCP_TRANSPORT: {} (expected 'http' or 'stdio')", s)),
        }
    }
}

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// Private key for the trading wallet (hex string, optional 0x prefix).
    pub private_key: String,
    /// Mainnet or testnet.
    pub network: Network,
    /// REST base URL (defaults to the network's public endpoint).
    pub api_url: String,
    /// Live or paper adapter.
    pub mode: ExchangeMode,
    /// HTTP or stdio transport.
    pub transport: Transport,
    /// Listen address for the HTTP transport.
    pub bind_addr: SocketAddr,
    /// Timeout for each request to the exchange.
    pub request_timeout: Duration,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `HYPERLIQUID_PRIVATE_KEY` (or `PRIVATE_KEY`): wallet private key (hex)
    ///
    /// Optional environment variables:
    /// - `HYPERLIQUID_TESTNET`: use testnet when `true`/`1`/`yes` (default: mainnet)
    /// - `HYPERLIQUID_API_URL`: override the REST base URL
    /// - `HYPERLIQUID_MODE`: `live` or `paper` (default: live)
    /// - `MCP_TRANSPORT`: `http` or `stdio` (default: http)
    /// - `BIND_ADDR`: HTTP listen address (default: 0.0.0.0:8000)
    /// - `HTTP_TIMEOUT_SECS`: exchange request timeout (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: info)
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let private_key = env::var("HYPERLIQUID_PRIVATE_KEY")
            .or_else(|_| env::var("PRIVATE_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("HYPERLIQUID_PRIVATE_KEY environment variable not set".into())
            })?;

        let network = match env::var("HYPERLIQUID_TESTNET") {
            Ok(value) if parse_flag(&value)? => Network::Testnet,
            _ => Network::Mainnet,
        };

        let api_url = env::var("HYPERLIQUID_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| network.api_url().to_string());

        let mode = env::var("HYPERLIQUID_MODE")
            .ok()
            .map(|s| s.parse::<ExchangeMode>().map_err(AppError::Config))
            .transpose()?
            .unwrap_or_default();

        let transport = env::var("MCP_TRANSPORT")
            .ok()
            .map(|s| s.parse::<Transport>().map_err(AppError::Config))
            .transpose()?
            .unwrap_or_default();

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("Invalid BIND_ADDR: {}", e)))?;

        let request_timeout = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .map(|s| {
                s.parse::<u64>()
                    .map_err(|e| AppError::Config(format!("Invalid HTTP_TIMEOUT_SECS: {}", e)))
            })
            .transpose()?
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            private_key,
            network,
            api_url,
            mode,
            transport,
            bind_addr,
            request_timeout,
            log_level,
        })
    }

    /// Configuration for the paper exchange, used by tests and local runs.
    pub fn paper(private_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            network: Network::Testnet,
            api_url: TESTNET_API_URL.to_string(),
            mode: ExchangeMode::Paper,
            transport: Transport::Http,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            request_timeout: Duration::from_secs(10),
            log_level: "info".to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("network", &self.network)
            .field("api_url", &self.api_url)
            .field("mode", &self.mode)
            .field("transport", &self.transport)
            .field("bind_addr", &self.bind_addr)
            .field("request_timeout", &self.request_timeout)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

fn parse_flag(value: &str) -> Result<bool, AppError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!("Invalid HYPERLIQUID_TESTNET: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_api_url() {
        assert_eq!(Network::Mainnet.api_url(), "https://api.hyperliquid.xyz");
        assert_eq!(Network::Testnet.api_url(), "https://api.hyperliquid-testnet.xyz");
    }

    #[test]
    fn test_exchange_mode_parsing() {
        assert_eq!("live".parse::<ExchangeMode>().unwrap(), ExchangeMode::Live);
        assert_eq!("PAPER".parse::<ExchangeMode>().unwrap(), ExchangeMode::Paper);
        assert_eq!("stub".parse::<ExchangeMode>().unwrap(), ExchangeMode::Paper);
        assert!("mainnet".parse::<ExchangeMode>().is_err());
    }

    #[test]
    fn test_transport_parsing() {
        assert_eq!("http".parse::<Transport>().unwrap(), Transport::Http);
        assert_eq!(" Stdio ".parse::<Transport>().unwrap(), Transport::Stdio);
        assert!("grpc".parse::<Transport>().is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("false").unwrap());
        assert!(!parse_flag("").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_config_debug_hides_private_key() {
        let config = Config::paper("0xsecret");
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("Paper"));
        assert!(!debug_str.contains("0xsecret"));
    }
}

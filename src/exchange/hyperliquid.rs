//! Hyperliquid REST client.

use std::{
    collections::HashMap,
    time::{Duration, SystemTime},
};

use alloy::primitives::Address;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};

use crate::{
    config::Network,
    error::{AppError, Result},
    exchange::{
        constants::{EXCHANGE_PATH, INFO_PATH},
        signing::{sign_order_action, ActionOrder, OrderAction},
        wallet::WalletManager,
        ExchangeClient,
    },
    types::{
        collect_mids, AllMidsResponse, LimitOrder, MetaResponse, MidPrices, OrderAck, OrderWire,
    },
};

/// Current Unix timestamp in milliseconds, used as the action nonce.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Client for the public `/info` endpoint.
#[derive(Debug, Clone)]
pub struct InfoClient {
    http: reqwest::Client,
    api_url: String,
}

impl InfoClient {
    /// Create an info client. Makes no network calls.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, api_url: api_url.trim_end_matches('/').to_string() })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn post<T: DeserializeOwned>(&self, body: Value) -> Result<T> {
        let response = self.http.post(format!("{}{}", self.api_url, INFO_PATH)).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(AppError::Transport(format!(
                "Info API returned status: {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Fetch mid prices for all coins.
    pub async fn all_mids(&self) -> Result<MidPrices> {
        let response: AllMidsResponse = self
            .post(json!({"type": "allMids"}))
            .await
            .map_err(|e| AppError::Exchange(format!("Failed to fetch mids. {}", e)))?;

        collect_mids(response.into_records()).map_err(AppError::Exchange)
    }

    /// Fetch the perpetuals universe.
    pub async fn meta(&self) -> Result<MetaResponse> {
        self.post(json!({"type": "meta"}))
            .await
            .map_err(|e| AppError::Exchange(format!("Failed to fetch meta. {}", e)))
    }
}

/// Top-level response of the `/exchange` endpoint.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", content = "response", rename_all = "lowercase")]
enum ExchangeResponse {
    Ok(OrderResponse),
    Err(String),
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    data: OrderResponseData,
}

#[derive(Debug, Deserialize)]
struct OrderResponseData {
    statuses: Vec<OrderStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum OrderStatus {
    Resting(OrderId),
    Filled(OrderId),
    Error(String),
}

#[derive(Debug, Deserialize)]
struct OrderId {
    oid: u64,
}

/// Authenticated Hyperliquid client.
///
/// Holds the public info client, the signing wallet and the coin to asset
/// index table loaded at construction. Nothing is mutated afterwards.
pub struct HyperliquidClient {
    info: InfoClient,
    http: reqwest::Client,
    network: Network,
    wallet: WalletManager,
    asset_index: HashMap<String, u32>,
}

impl HyperliquidClient {
    /// Create a client and load the asset universe.
    ///
    /// Fails if the universe cannot be fetched.
    pub async fn connect(
        api_url: &str,
        network: Network,
        wallet: WalletManager,
        timeout: Duration,
    ) -> Result<Self> {
        let info = InfoClient::new(api_url, timeout)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        let asset_index = info.meta().await?.asset_index();

        tracing::info!(
            api_url = %info.api_url(),
            assets = asset_index.len(),
            "Loaded Hyperliquid asset universe"
        );

        Ok(Self { info, http, network, wallet, asset_index })
    }

    /// Asset index for a coin symbol.
    pub fn asset_index(&self, coin: &str) -> Option<u32> {
        self.asset_index.get(coin).copied()
    }

    async fn submit(&self, order: &LimitOrder) -> Result<OrderAck> {
        let asset = self
            .asset_index(&order.coin)
            .ok_or_else(|| AppError::Order(format!("Unknown asset: {}", order.coin)))?;

        let wire = OrderWire::from_order(order, asset).map_err(AppError::Order)?;
        let action = OrderAction::new(vec![ActionOrder::from(&wire)]);
        let request = sign_order_action(&self.wallet, action, current_timestamp_ms(), self.network)?;

        let response = self
            .http
            .post(format!("{}{}", self.info.api_url(), EXCHANGE_PATH))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Order(format!("Exchange returned status {}: {}", status, body)));
        }

        let bytes = response.bytes().await?;
        let parsed: ExchangeResponse = serde_json::from_slice(&bytes)?;

        let (status, oid) = match parsed {
            ExchangeResponse::Err(message) => return Err(AppError::Order(message)),
            ExchangeResponse::Ok(body) => match body.data.statuses.into_iter().next() {
                Some(OrderStatus::Resting(id)) => ("resting", id.oid),
                Some(OrderStatus::Filled(id)) => ("filled", id.oid),
                Some(OrderStatus::Error(message)) => return Err(AppError::Order(message)),
                None => return Err(AppError::Order("Exchange returned no order status".into())),
            },
        };

        Ok(OrderAck {
            status: status.to_string(),
            transaction_id: oid.to_string(),
            coin: order.coin.clone(),
            order: wire,
        })
    }
}

impl std::fmt::Debug for HyperliquidClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperliquidClient")
            .field("api_url", &self.info.api_url())
            .field("network", &self.network)
            .field("wallet", &self.wallet)
            .field("assets", &self.asset_index.len())
            .finish()
    }
}

#[async_trait]
impl ExchangeClient for HyperliquidClient {
    fn address(&self) -> Address {
        self.wallet.address()
    }

    async fn all_mids(&self) -> Result<MidPrices> {
        self.info.all_mids().await
    }

    async fn place_limit_order(&self, order: &LimitOrder) -> Result<OrderAck> {
        tracing::debug!(
            coin = %order.coin,
            side = ?order.side,
            size = order.size,
            limit_price = order.limit_price,
            "Submitting limit order"
        );

        self.submit(order).await.map_err(|e| match e {
            AppError::Order(_) => e,
            other => AppError::Order(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_response_resting() {
        let parsed: ExchangeResponse = serde_json::from_value(json!({
            "status": "ok",
            "response": {"type": "order", "data": {"statuses": [{"resting": {"oid": 77738308}}]}}
        }))
        .unwrap();

        match parsed {
            ExchangeResponse::Ok(body) => {
                assert!(matches!(body.data.statuses[0], OrderStatus::Resting(OrderId { oid: 77738308 })))
            }
            other => panic!("Expected ok response, got {:?}", other),
        }
    }

    #[test]
    fn test_exchange_response_filled() {
        let parsed: ExchangeResponse = serde_json::from_value(json!({
            "status": "ok",
            "response": {"type": "order", "data": {"statuses": [
                {"filled": {"totalSz": "0.02", "avgPx": "1891.4", "oid": 77747314}}
            ]}}
        }))
        .unwrap();

        match parsed {
            ExchangeResponse::Ok(body) => {
                assert!(matches!(body.data.statuses[0], OrderStatus::Filled(OrderId { oid: 77747314 })))
            }
            other => panic!("Expected ok response, got {:?}", other),
        }
    }

    #[test]
    fn test_exchange_response_order_error() {
        let parsed: ExchangeResponse = serde_json::from_value(json!({
            "status": "ok",
            "response": {"type": "order", "data": {"statuses": [
                {"error": "Insufficient margin to place order."}
            ]}}
        }))
        .unwrap();

        match parsed {
            ExchangeResponse::Ok(body) => match &body.data.statuses[0] {
                OrderStatus::Error(message) => assert!(message.contains("Insufficient margin")),
                other => panic!("Expected error status, got {:?}", other),
            },
            other => panic!("Expected ok response, got {:?}", other),
        }
    }

    #[test]
    fn test_exchange_response_err() {
        let parsed: ExchangeResponse =
            serde_json::from_value(json!({"status": "err", "response": "User or API Wallet does not exist."}))
                .unwrap();
        assert!(matches!(parsed, ExchangeResponse::Err(message) if message.contains("does not exist")));
    }

    #[test]
    fn test_info_client_trims_trailing_slash() {
        let info = InfoClient::new("https://api.hyperliquid.xyz/", Duration::from_secs(5)).unwrap();
        assert_eq!(info.api_url(), "https://api.hyperliquid.xyz");
    }

    #[test]
    fn test_current_timestamp_ms_is_recent() {
        // 2023-11-14 in milliseconds
        assert!(current_timestamp_ms() > 1_700_000_000_000);
    }
}

//! Exchange client module.
//!
//! Contains the exchange client contract, the live Hyperliquid adapter, the
//! paper adapter, wallet management and action signing.

pub mod constants;
pub mod hyperliquid;
pub mod paper;
pub mod signing;
pub mod wallet;

use std::sync::Arc;

use alloy::primitives::Address;
use async_trait::async_trait;

use crate::{
    config::{Config, ExchangeMode},
    error::{AppError, Result},
    types::{LimitOrder, MidPrices, OrderAck},
};

pub use hyperliquid::{HyperliquidClient, InfoClient};
pub use paper::PaperExchange;
pub use wallet::WalletManager;

/// Contract every exchange adapter satisfies.
///
/// Implementations are immutable after construction and shared across
/// concurrent tool invocations.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Address of the trading account.
    fn address(&self) -> Address;

    /// Fetch mid prices for all coins.
    ///
    /// Records without a price are skipped. Fails with
    /// [`AppError::Exchange`] on network or parse failure.
    async fn all_mids(&self) -> Result<MidPrices>;

    /// Place a single limit order. Never retried.
    ///
    /// Fails with [`AppError::Order`] when the exchange rejects the order or
    /// cannot be reached.
    async fn place_limit_order(&self, order: &LimitOrder) -> Result<OrderAck>;
}

/// Shared handle to the process-wide exchange client.
pub type ExchangeHandle = Arc<dyn ExchangeClient>;

/// Build the exchange client selected by `config`.
///
/// Any failure here is a startup error; the server must not start without a
/// working client.
pub async fn connect(config: &Config) -> Result<ExchangeHandle> {
    let wallet = WalletManager::from_private_key(&config.private_key)?;

    let handle: ExchangeHandle = match config.mode {
        ExchangeMode::Live => {
            let client = HyperliquidClient::connect(
                &config.api_url,
                config.network,
                wallet,
                config.request_timeout,
            )
            .await
            .map_err(|e| AppError::Startup(format!("Client initialization failed: {}", e)))?;
            Arc::new(client)
        }
        ExchangeMode::Paper => Arc::new(PaperExchange::new(wallet.address())),
    };

    tracing::info!(
        address = %handle.address(),
        mode = ?config.mode,
        network = ?config.network,
        "Exchange client initialized"
    );

    Ok(handle)
}

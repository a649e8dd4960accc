//! Paper exchange.
//!
//! A deterministic in-process adapter that satisfies the same contract as
//! the live client without touching the network.

use alloy::primitives::{keccak256, Address};
use async_trait::async_trait;

use crate::{
    error::{AppError, Result},
    exchange::ExchangeClient,
    types::{collect_mids, LimitOrder, MidPrices, MidRecord, OrderAck, OrderWire},
};

/// Status reported for every accepted paper order.
pub const PAPER_ORDER_STATUS: &str = "order_placed";

/// Deterministic fake exchange.
#[derive(Debug, Clone)]
pub struct PaperExchange {
    address: Address,
    records: Vec<MidRecord>,
}

impl PaperExchange {
    /// Paper exchange quoting BTC at 60000 and ETH at 2500.
    pub fn new(address: Address) -> Self {
        Self::with_records(
            address,
            vec![MidRecord::new("BTC", "60000"), MidRecord::new("ETH", "2500")],
        )
    }

    /// Paper exchange serving the given feed records.
    ///
    /// The asset universe is the list of coins in `records`, in order.
    pub fn with_records(address: Address, records: Vec<MidRecord>) -> Self {
        Self { address, records }
    }

    fn asset_index(&self, coin: &str) -> Option<u32> {
        self.records
            .iter()
            .filter_map(|record| record.coin.as_deref())
            .zip(0u32..)
            .find_map(|(name, index)| (name == coin).then_some(index))
    }
}

#[async_trait]
impl ExchangeClient for PaperExchange {
    fn address(&self) -> Address {
        self.address
    }

    async fn all_mids(&self) -> Result<MidPrices> {
        collect_mids(self.records.clone()).map_err(AppError::Exchange)
    }

    async fn place_limit_order(&self, order: &LimitOrder) -> Result<OrderAck> {
        let asset = self
            .asset_index(&order.coin)
            .ok_or_else(|| AppError::Order(format!("Unknown asset: {}", order.coin)))?;
        let wire = OrderWire::from_order(order, asset).map_err(AppError::Order)?;

        let digest = keccak256(format!("{}:{}:{}", order.coin, wire.sz, wire.limit_px));

        tracing::info!(coin = %order.coin, transaction_id = %digest, "Paper order placed");

        Ok(OrderAck {
            status: PAPER_ORDER_STATUS.to_string(),
            transaction_id: digest.to_string(),
            coin: order.coin.clone(),
            order: wire,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Side, TimeInForce};

    fn order(coin: &str, side: Side) -> LimitOrder {
        LimitOrder {
            coin: coin.to_string(),
            side,
            size: 0.5,
            limit_price: 2400.0,
            time_in_force: TimeInForce::Alo,
            reduce_only: false,
        }
    }

    #[tokio::test]
    async fn test_paper_all_mids() {
        let exchange = PaperExchange::new(Address::ZERO);
        let mids = exchange.all_mids().await.unwrap();

        assert_eq!(mids.len(), 2);
        assert_eq!(mids["BTC"], 60000.0);
        assert_eq!(mids["ETH"], 2500.0);
    }

    #[tokio::test]
    async fn test_paper_all_mids_skips_missing_prices() {
        let records = vec![
            MidRecord::new("BTC", "60000"),
            MidRecord { coin: Some("ETH".to_string()), mid: None },
        ];
        let exchange = PaperExchange::with_records(Address::ZERO, records);

        let mids = exchange.all_mids().await.unwrap();
        assert_eq!(mids.len(), 1);
        assert_eq!(mids["BTC"], 60000.0);
    }

    #[tokio::test]
    async fn test_paper_order_is_deterministic() {
        let exchange = PaperExchange::new(Address::ZERO);

        let first = exchange.place_limit_order(&order("ETH", Side::Sell)).await.unwrap();
        let second = exchange.place_limit_order(&order("ETH", Side::Sell)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.status, PAPER_ORDER_STATUS);
        assert!(first.transaction_id.starts_with("0x"));
        assert_eq!(first.order.asset, 1);
        assert!(!first.order.is_buy);
        assert_eq!(first.order.sz, "0.5");
        assert_eq!(first.order.limit_px, "2400");
    }

    #[tokio::test]
    async fn test_paper_order_unknown_asset() {
        let exchange = PaperExchange::new(Address::ZERO);
        let result = exchange.place_limit_order(&order("DOGE", Side::Buy)).await;

        assert!(matches!(result, Err(AppError::Order(message)) if message.contains("DOGE")));
    }
}

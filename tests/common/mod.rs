//! Common utilities for integration tests.

#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use alloy::primitives::Address;
use async_trait::async_trait;
use hyperliquid_trading_mcp::{
    types::{collect_mids, LimitOrder, MidPrices, MidRecord, OrderAck, OrderWire},
    AppError, ExchangeClient, Result, ToolDispatcher,
};
use serde_json::{Map, Value};

/// Well-known Hardhat/Foundry test key. DO NOT use in production!
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Fake exchange that accepts any coin and counts every call it receives.
#[derive(Debug, Default)]
pub struct RecordingExchange {
    records: Vec<MidRecord>,
    reject_orders: Option<String>,
    order_latency: Option<Duration>,
    mids_calls: AtomicUsize,
    order_calls: AtomicUsize,
    completed_orders: AtomicUsize,
}

impl RecordingExchange {
    pub fn new() -> Self {
        Self::with_records(vec![MidRecord::new("BTC", "60000"), MidRecord::new("ETH", "2500")])
    }

    pub fn with_records(records: Vec<MidRecord>) -> Self {
        Self { records, ..Default::default() }
    }

    /// Fake whose orders all fail with `reason`.
    pub fn rejecting(reason: &str) -> Self {
        Self { reject_orders: Some(reason.to_string()), ..Self::new() }
    }

    /// Fake whose orders take `latency` to be acknowledged.
    pub fn slow(latency: Duration) -> Self {
        Self { order_latency: Some(latency), ..Self::new() }
    }

    pub fn mids_calls(&self) -> usize {
        self.mids_calls.load(Ordering::SeqCst)
    }

    pub fn order_calls(&self) -> usize {
        self.order_calls.load(Ordering::SeqCst)
    }

    /// Orders that ran to the end of the fake's submission.
    pub fn completed_orders(&self) -> usize {
        self.completed_orders.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExchangeClient for RecordingExchange {
    fn address(&self) -> Address {
        Address::ZERO
    }

    async fn all_mids(&self) -> Result<MidPrices> {
        self.mids_calls.fetch_add(1, Ordering::SeqCst);
        collect_mids(self.records.clone()).map_err(AppError::Exchange)
    }

    async fn place_limit_order(&self, order: &LimitOrder) -> Result<OrderAck> {
        self.order_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.order_latency {
            tokio::time::sleep(latency).await;
        }
        self.completed_orders.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = &self.reject_orders {
            return Err(AppError::Order(reason.clone()));
        }

        let wire = OrderWire::from_order(order, 0).map_err(AppError::Order)?;
        Ok(OrderAck {
            status: "resting".to_string(),
            transaction_id: "1".to_string(),
            coin: order.coin.clone(),
            order: wire,
        })
    }
}

/// Dispatcher over a shared recording exchange.
pub fn recording_dispatcher() -> (ToolDispatcher, Arc<RecordingExchange>) {
    let exchange = Arc::new(RecordingExchange::new());
    (ToolDispatcher::new(exchange.clone()), exchange)
}

/// Turn a JSON object literal into an argument map.
pub fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

//! Order-related types.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum number of decimals Hyperliquid accepts on the wire.
pub const WIRE_DECIMALS: u32 = 8;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn is_buy(self) -> bool {
        self == Side::Buy
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            _ => Err("Parameter 'side' must be 'buy' or 'sell'.".to_string()),
        }
    }
}

/// Time-in-force policy for a limit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeInForce {
    /// Good till canceled.
    #[default]
    Gtc,
    /// Immediate or cancel.
    Ioc,
    /// Add liquidity only (post-only).
    Alo,
}

impl TimeInForce {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeInForce::Gtc => "Gtc",
            TimeInForce::Ioc => "Ioc",
            TimeInForce::Alo => "Alo",
        }
    }
}

impl FromStr for TimeInForce {
    type Err = String;

    // Case-sensitive: the exchange only accepts these exact spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Gtc" => Ok(TimeInForce::Gtc),
            "Ioc" => Ok(TimeInForce::Ioc),
            "Alo" => Ok(TimeInForce::Alo),
            _ => Err("Parameter 'time_in_force' must be 'Gtc', 'Ioc', or 'Alo'.".to_string()),
        }
    }
}

/// A validated limit order request.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitOrder {
    /// Coin symbol (e.g., "BTC").
    pub coin: String,
    pub side: Side,
    /// Order size in base units.
    pub size: f64,
    pub limit_price: f64,
    pub time_in_force: TimeInForce,
    pub reduce_only: bool,
}

/// Limit order type on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderType {
    pub tif: TimeInForce,
}

/// Order type on the wire. Only limit orders are supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderType {
    pub limit: LimitOrderType,
}

/// An order in the exchange's wire format.
///
/// Prices and sizes are decimal strings; floats never go on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWire {
    /// Asset index in the exchange universe.
    pub asset: u32,
    pub is_buy: bool,
    pub limit_px: String,
    pub sz: String,
    pub reduce_only: bool,
    pub order_type: OrderType,
}

impl OrderWire {
    /// Build the wire form of `order` for the asset at `asset`.
    pub fn from_order(order: &LimitOrder, asset: u32) -> Result<Self, String> {
        Ok(Self {
            asset,
            is_buy: order.side.is_buy(),
            limit_px: float_to_wire(order.limit_price)?,
            sz: float_to_wire(order.size)?,
            reduce_only: order.reduce_only,
            order_type: OrderType { limit: LimitOrderType { tif: order.time_in_force } },
        })
    }
}

/// Acknowledgment returned after an order is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAck {
    /// Status tag reported by the exchange (e.g. "resting", "filled").
    pub status: String,
    /// Opaque identifier of the placed order.
    pub transaction_id: String,
    /// Coin symbol the order was placed for.
    pub coin: String,
    /// The order exactly as submitted.
    pub order: OrderWire,
}

/// Convert a float to the exchange's decimal string representation.
///
/// The result is normalized (no trailing zeros, no exponent) and carries at
/// most [`WIRE_DECIMALS`] decimals. Values that cannot be represented that
/// way are rejected instead of being silently rounded.
pub fn float_to_wire(value: f64) -> Result<String, String> {
    if !value.is_finite() {
        return Err(format!("Cannot encode non-finite value {}", value));
    }

    // `Display` for f64 yields the shortest round-trip representation
    let decimal = Decimal::from_str(&value.to_string())
        .map_err(|e| format!("Cannot encode {} as decimal: {}", value, e))?;

    let rounded = decimal.round_dp(WIRE_DECIMALS);
    if rounded != decimal {
        return Err(format!("{} has more than {} decimals", value, WIRE_DECIMALS));
    }

    let normalized = rounded.normalize();
    if normalized.is_zero() {
        return Ok("0".to_string());
    }
    Ok(normalized.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parsing_case_insensitive() {
        assert_eq!("buy".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!("BUY".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!("Sell".parse::<Side>().unwrap(), Side::Sell);
        assert!("long".parse::<Side>().is_err());
        assert!("".parse::<Side>().is_err());
    }

    #[test]
    fn test_side_is_buy() {
        assert!(Side::Buy.is_buy());
        assert!(!Side::Sell.is_buy());
    }

    #[test]
    fn test_time_in_force_parsing_is_exact() {
        assert_eq!("Gtc".parse::<TimeInForce>().unwrap(), TimeInForce::Gtc);
        assert_eq!("Ioc".parse::<TimeInForce>().unwrap(), TimeInForce::Ioc);
        assert_eq!("Alo".parse::<TimeInForce>().unwrap(), TimeInForce::Alo);
        assert!("gtc".parse::<TimeInForce>().is_err());
        assert!("GTC".parse::<TimeInForce>().is_err());
        assert!("Fok".parse::<TimeInForce>().is_err());
    }

    #[test]
    fn test_time_in_force_default() {
        assert_eq!(TimeInForce::default(), TimeInForce::Gtc);
        assert_eq!(TimeInForce::Alo.as_str(), "Alo");
    }

    #[test]
    fn test_float_to_wire() {
        assert_eq!(float_to_wire(60000.0).unwrap(), "60000");
        assert_eq!(float_to_wire(0.1).unwrap(), "0.1");
        assert_eq!(float_to_wire(2500.25).unwrap(), "2500.25");
        assert_eq!(float_to_wire(0.00012345).unwrap(), "0.00012345");
        assert_eq!(float_to_wire(0.0).unwrap(), "0");
    }

    #[test]
    fn test_float_to_wire_rejects_precision_loss() {
        assert!(float_to_wire(0.123456789).is_err());
        assert!(float_to_wire(f64::NAN).is_err());
        assert!(float_to_wire(f64::INFINITY).is_err());
    }

    #[test]
    fn test_order_wire_from_order() {
        let order = LimitOrder {
            coin: "ETH".to_string(),
            side: Side::Sell,
            size: 1.5,
            limit_price: 2500.0,
            time_in_force: TimeInForce::Ioc,
            reduce_only: true,
        };

        let wire = OrderWire::from_order(&order, 1).unwrap();
        assert_eq!(wire.asset, 1);
        assert!(!wire.is_buy);
        assert_eq!(wire.limit_px, "2500");
        assert_eq!(wire.sz, "1.5");
        assert!(wire.reduce_only);
        assert_eq!(wire.order_type.limit.tif, TimeInForce::Ioc);
    }

    #[test]
    fn test_order_wire_serialization() {
        let order = LimitOrder {
            coin: "BTC".to_string(),
            side: Side::Buy,
            size: 0.01,
            limit_price: 60000.0,
            time_in_force: TimeInForce::Gtc,
            reduce_only: false,
        };

        let value = serde_json::to_value(OrderWire::from_order(&order, 0).unwrap()).unwrap();
        assert_eq!(value["isBuy"], true);
        assert_eq!(value["limitPx"], "60000");
        assert_eq!(value["sz"], "0.01");
        assert_eq!(value["reduceOnly"], false);
        assert_eq!(value["orderType"]["limit"]["tif"], "Gtc");
    }
}

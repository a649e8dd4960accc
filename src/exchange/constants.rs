//! Hyperliquid network constants.
//!
//! Contains API endpoints and signing parameters.

use alloy::primitives::{address, Address};

// ============================================================================
// API Endpoints
// ============================================================================

/// Hyperliquid mainnet REST base URL.
pub const MAINNET_API_URL: &str = "https://api.hyperliquid.xyz";

/// Hyperliquid testnet REST base URL.
pub const TESTNET_API_URL: &str = "https://api.hyperliquid-testnet.xyz";

/// Public market data endpoint.
pub const INFO_PATH: &str = "/info";

/// Signed action endpoint.
pub const EXCHANGE_PATH: &str = "/exchange";

// ============================================================================
// L1 Action Signing
// ============================================================================

/// Chain ID used in the EIP-712 domain for L1 actions.
pub const SIGNING_CHAIN_ID: u64 = 1337;

/// Verifying contract of the EIP-712 domain for L1 actions.
pub const SIGNING_VERIFYING_CONTRACT: Address = address!("0000000000000000000000000000000000000000");

/// Agent source tag for mainnet actions.
pub const MAINNET_SOURCE: &str = "a";

/// Agent source tag for testnet actions.
pub const TESTNET_SOURCE: &str = "b";

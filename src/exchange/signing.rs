//! L1 action signing.
//!
//! An action is hashed as `keccak256(msgpack(action) || nonce || vault flag)`
//! and the hash is signed as the `connectionId` of an EIP-712 `Agent` message.

use alloy::{
    primitives::{keccak256, B256},
    sol,
    sol_types::{eip712_domain, Eip712Domain, SolStruct},
};
use serde::{Deserialize, Serialize};

use crate::{
    config::Network,
    error::{AppError, Result},
    exchange::{
        constants::{MAINNET_SOURCE, SIGNING_CHAIN_ID, SIGNING_VERIFYING_CONTRACT, TESTNET_SOURCE},
        wallet::WalletManager,
    },
    types::OrderWire,
};

sol! {
    #[derive(Debug)]
    struct Agent {
        string source;
        bytes32 connectionId;
    }
}

/// Order as it appears inside a signed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOrder {
    pub a: u32,
    pub b: bool,
    pub p: String,
    pub s: String,
    pub r: bool,
    pub t: ActionOrderType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOrderType {
    pub limit: ActionLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLimit {
    pub tif: String,
}

impl From<&OrderWire> for ActionOrder {
    fn from(wire: &OrderWire) -> Self {
        Self {
            a: wire.asset,
            b: wire.is_buy,
            p: wire.limit_px.clone(),
            s: wire.sz.clone(),
            r: wire.reduce_only,
            t: ActionOrderType {
                limit: ActionLimit { tif: wire.order_type.limit.tif.as_str().to_string() },
            },
        }
    }
}

/// The `order` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub orders: Vec<ActionOrder>,
    pub grouping: String,
}

impl OrderAction {
    pub fn new(orders: Vec<ActionOrder>) -> Self {
        Self { action_type: "order".to_string(), orders, grouping: "na".to_string() }
    }

    /// MessagePack encoding of the action, fields named and in declaration order.
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(self)
            .map_err(|e| AppError::Order(format!("Failed to encode action: {}", e)))
    }
}

/// Signature in the form the exchange endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureWire {
    pub r: String,
    pub s: String,
    pub v: u8,
}

/// Body of a `POST /exchange` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    pub action: OrderAction,
    pub nonce: u64,
    pub signature: SignatureWire,
    pub vault_address: Option<String>,
}

/// Hash binding an action to a nonce. No vault is used.
pub fn action_hash(action: &OrderAction, nonce: u64) -> Result<B256> {
    let mut bytes = action.to_msgpack()?;
    bytes.extend_from_slice(&nonce.to_be_bytes());
    bytes.push(0x00);
    Ok(keccak256(bytes))
}

fn l1_domain() -> Eip712Domain {
    eip712_domain! {
        name: "Exchange",
        version: "1",
        chain_id: SIGNING_CHAIN_ID,
        verifying_contract: SIGNING_VERIFYING_CONTRACT,
    }
}

/// EIP-712 signing hash of the agent message for `connection_id`.
pub fn agent_signing_hash(connection_id: B256, network: Network) -> B256 {
    let source = match network {
        Network::Mainnet => MAINNET_SOURCE,
        Network::Testnet => TESTNET_SOURCE,
    };
    let agent = Agent { source: source.to_string(), connectionId: connection_id };
    agent.eip712_signing_hash(&l1_domain())
}

/// Sign an order action and build the exchange request body.
pub fn sign_order_action(
    wallet: &WalletManager,
    action: OrderAction,
    nonce: u64,
    network: Network,
) -> Result<ExchangeRequest> {
    let connection_id = action_hash(&action, nonce)?;
    let hash = agent_signing_hash(connection_id, network);
    let signature = wallet
        .sign_hash(&hash)
        .map_err(|e| AppError::Order(format!("Failed to sign order: {}", e)))?;

    Ok(ExchangeRequest {
        action,
        nonce,
        signature: SignatureWire {
            r: format!("0x{:x}", signature.r()),
            s: format!("0x{:x}", signature.s()),
            v: 27 + signature.v() as u8,
        },
        vault_address: None,
    })
}

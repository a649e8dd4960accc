//! Wallet management.

use alloy::{
    primitives::{Address, Signature, B256},
    signers::{local::PrivateKeySigner, SignerSync},
};

use crate::error::{AppError, Result};

/// Wallet used to sign exchange actions.
#[derive(Clone)]
pub struct WalletManager {
    /// The local signer.
    signer: PrivateKeySigner,
    /// Wallet address.
    address: Address,
}

impl WalletManager {
    /// Create a wallet manager from a private key string.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        // Remove 0x prefix if present
        let key = private_key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);

        let signer: PrivateKeySigner = key.parse()?;

        let address = signer.address();

        tracing::info!(address = %address, "Wallet initialized");

        Ok(Self { signer, address })
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a 32-byte prehash (e.g. an EIP-712 signing hash).
    pub fn sign_hash(&self, hash: &B256) -> Result<Signature> {
        Ok(self.signer.sign_hash_sync(hash)?)
    }
}

impl std::fmt::Debug for WalletManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletManager").field("address", &self.address).finish()
    }
}

//! Client configuration. Serde-deserializable so hosts can load it
//! from JSON; the default targets devnet with confirmed commitment.

use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;

use crate::constants::USDC_MINT;
use crate::errors::{ClientError, ClientResult};
use crate::ipfs::DEFAULT_GATEWAY;

pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub rpc_url: String,
    /// "processed", "confirmed", or "finalized".
    pub commitment: String,
    pub usdc_mint: String,
    pub ipfs_gateway: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEVNET_RPC_URL.to_owned(),
            commitment: "confirmed".to_owned(),
            usdc_mint: USDC_MINT.to_owned(),
            ipfs_gateway: DEFAULT_GATEWAY.to_owned(),
        }
    }
}

impl ClientConfig {
    pub fn commitment(&self) -> ClientResult<CommitmentConfig> {
        match self.commitment.as_str() {
            "processed" => Ok(CommitmentConfig::processed()),
            "confirmed" => Ok(CommitmentConfig::confirmed()),
            "finalized" => Ok(CommitmentConfig::finalized()),
            other => Err(ClientError::InvalidInput(format!(
                "unknown commitment level: {other}"
            ))),
        }
    }

    pub fn usdc_mint(&self) -> ClientResult<Pubkey> {
        self.usdc_mint
            .parse()
            .map_err(|_| ClientError::InvalidInput(format!("bad mint address: {}", self.usdc_mint)))
    }
}

//! Transport seam between the client layers and the chain.
//!
//! [`LedgerRpc`] is the only thing the query and dispatch layers know
//! about the network, which keeps both testable against an in-memory
//! ledger. [`SolanaLedger`] is the production implementation over the
//! nonblocking RPC client.

use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::InstructionError;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::{Transaction, TransactionError};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::errors::{ClientError, ClientResult};

/// Byte-prefix match against raw account data, offset included.
#[derive(Debug, Clone)]
pub struct AccountFilter {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl AccountFilter {
    pub fn new(offset: usize, bytes: Vec<u8>) -> Self {
        Self { offset, bytes }
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        data.len() >= self.offset + self.bytes.len()
            && &data[self.offset..self.offset + self.bytes.len()] == self.bytes.as_slice()
    }
}

#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Point fetch. `None` is the expected outcome for an address
    /// with no record behind it.
    async fn fetch_account(&self, address: &Pubkey) -> ClientResult<Option<Account>>;

    /// Filtered scan over the program's accounts.
    async fn scan_program_accounts(
        &self,
        filters: &[AccountFilter],
    ) -> ClientResult<Vec<(Pubkey, Account)>>;

    async fn latest_blockhash(&self) -> ClientResult<Hash>;

    /// Submits a signed transaction and waits for confirmation. One
    /// logical attempt; never retried here.
    async fn send_transaction(&self, transaction: &Transaction) -> ClientResult<Signature>;
}

pub struct SolanaLedger {
    rpc: RpcClient,
    commitment: CommitmentConfig,
}

impl SolanaLedger {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let commitment = config.commitment()?;
        Ok(Self {
            rpc: RpcClient::new_with_commitment(config.rpc_url.clone(), commitment),
            commitment,
        })
    }
}

#[async_trait]
impl LedgerRpc for SolanaLedger {
    async fn fetch_account(&self, address: &Pubkey) -> ClientResult<Option<Account>> {
        debug!(%address, "fetching account");
        let response = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(response.value)
    }

    async fn scan_program_accounts(
        &self,
        filters: &[AccountFilter],
    ) -> ClientResult<Vec<(Pubkey, Account)>> {
        let rpc_filters = filters
            .iter()
            .map(|f| RpcFilterType::Memcmp(Memcmp::new_raw_bytes(f.offset, f.bytes.clone())))
            .collect();
        let config = RpcProgramAccountsConfig {
            filters: Some(rpc_filters),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        debug!(filters = filters.len(), "scanning program accounts");
        self.rpc
            .get_program_accounts_with_config(&crate::ID, config)
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))
    }

    async fn latest_blockhash(&self) -> ClientResult<Hash> {
        self.rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))
    }

    async fn send_transaction(&self, transaction: &Transaction) -> ClientResult<Signature> {
        match self.rpc.send_and_confirm_transaction(transaction).await {
            Ok(signature) => Ok(signature),
            Err(error) => {
                let code = match error.get_transaction_error() {
                    Some(TransactionError::InstructionError(_, InstructionError::Custom(code))) => {
                        Some(code)
                    }
                    _ => None,
                };
                warn!(?code, message = %error, "transaction rejected");
                Err(ClientError::Submission {
                    code,
                    message: error.to_string(),
                })
            }
        }
    }
}

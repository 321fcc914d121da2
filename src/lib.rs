//! Client SDK for the HopeRise crowdfunding program.
//!
//! The program owns all durable state: campaigns, milestones,
//! contributions, and the escrow vaults. This crate gives off-chain
//! callers the pieces that have to agree with it exactly: derived
//! record addresses, account decoding, a freshness-windowed query
//! cache, and mutation submission.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use hope_rise_client::cache::CampaignStore;
//! use hope_rise_client::config::ClientConfig;
//! use hope_rise_client::ledger::SolanaLedger;
//! use hope_rise_client::query::CampaignReader;
//!
//! # async fn demo() -> Result<(), hope_rise_client::errors::ClientError> {
//! let config = ClientConfig::default();
//! let ledger = Arc::new(SolanaLedger::new(&config)?);
//! let store = Arc::new(CampaignStore::with_defaults());
//! let reader = CampaignReader::new(ledger, store);
//!
//! for campaign in reader.latest_campaigns(3).await? {
//!     println!("{} ({:.0}% funded)", campaign.title, campaign.progress_percent());
//! }
//! # Ok(())
//! # }
//! ```

use anchor_lang::declare_id;

pub mod cache;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod errors;
pub mod instructions;
pub mod ipfs;
pub mod ledger;
pub mod pda;
pub mod query;
pub mod state;
pub mod units;

declare_id!("BAaDjLVffrtNzgKLoUjmM9t1tWBHxMF6UFdnL1NYmQ3J");

pub use cache::{CacheEvent, CacheKey, CachePolicy, CacheUpdate, CampaignStore};
pub use config::ClientConfig;
pub use dispatch::{CampaignWriter, CreateCampaignParams};
pub use errors::{ClientError, ClientResult};
pub use ledger::{LedgerRpc, SolanaLedger};
pub use query::{CampaignReader, PollHandle};
pub use state::{CampaignRecord, Category, ContributionRecord, MilestoneRecord};

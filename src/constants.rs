//! Program-wide constants. Seed tags, length limits, and the mint are
//! fixed by the deployed program; changing any of them breaks address
//! agreement with the chain.

use std::time::Duration;

pub const SEED_CAMPAIGN_COUNTER: &[u8] = b"campaign_counter";
pub const SEED_CAMPAIGN: &[u8] = b"campaign";
pub const SEED_MILESTONE: &[u8] = b"milestone";
pub const SEED_CONTRIBUTION: &[u8] = b"contribution";
pub const SEED_CAMPAIGN_VAULT: &[u8] = b"campaign_vault";

pub const DISCRIMINATOR_SIZE: usize = 8;

/// Circle's USDC mint on devnet (faucet: https://faucet.circle.com/)
pub const USDC_MINT: &str = "Gh9ZwEmdLJ8DscKNTkTqPbNwLNNBjuSzaG9Vp2KGtKJr";
pub const USDC_DECIMALS: u8 = 6;

pub const MAX_TITLE_LENGTH: usize = 80;
pub const MAX_DESCRIPTION_LENGTH: usize = 200;
pub const MAX_URL_LENGTH: usize = 200;
pub const MAX_MILESTONE_TITLE_LENGTH: usize = 100;
pub const MAX_MILESTONES_PER_CAMPAIGN: u8 = 10;

pub const MIN_CAMPAIGN_DURATION_DAYS: u64 = 1;
pub const MAX_CAMPAIGN_DURATION_DAYS: u64 = 90;
pub const SECONDS_PER_DAY: i64 = 86_400;

// Cache freshness windows, per entity class.
pub const CAMPAIGN_STALE: Duration = Duration::from_secs(5 * 60);
pub const CAMPAIGN_RETAIN: Duration = Duration::from_secs(10 * 60);
pub const MILESTONE_STALE: Duration = Duration::from_secs(2 * 60);
pub const MILESTONE_RETAIN: Duration = Duration::from_secs(5 * 60);
pub const CONTRIBUTION_STALE: Duration = Duration::from_secs(30);
pub const CONTRIBUTION_RETAIN: Duration = Duration::from_secs(2 * 60);
pub const CONTRIBUTION_POLL_INTERVAL: Duration = Duration::from_secs(10);

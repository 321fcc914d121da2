use anchor_lang::prelude::*;

use crate::errors::{ClientError, ClientResult};

/// Global sequence counter for campaign ids. Singleton PDA; owned by
/// the program and only ever advanced on chain. The count is always
/// re-fetched immediately before deriving a new campaign address;
/// caching it across a creation attempt risks a stale-sequence
/// collision.
#[account]
pub struct CampaignCounter {
    pub count: u64,
    pub authority: Pubkey,
    pub bump: u8,
}

impl CampaignCounter {
    pub fn decode(data: &[u8]) -> ClientResult<Self> {
        Self::try_deserialize(&mut &data[..])
            .map_err(|e| ClientError::Decode(format!("campaign counter: {e}")))
    }
}

use anchor_lang::prelude::*;

use crate::errors::{ClientError, ClientResult};

/// On-chain contribution account, byte for byte. One per
/// (campaign, contributor) pair; repeat funding accumulates into
/// `amount` and leaves `contributed_at` at the first contribution.
#[account]
pub struct Contribution {
    pub campaign: Pubkey,
    pub contributor: Pubkey,
    pub amount: u64,
    pub contributed_at: i64,
    pub refund_claimed: bool,
    pub bump: u8,
}

#[derive(Debug, Clone)]
pub struct ContributionRecord {
    pub address: Pubkey,
    pub campaign: Pubkey,
    pub contributor: Pubkey,
    /// Cumulative USDC base units from this contributor.
    pub amount: u64,
    /// Unix timestamp of the first contribution.
    pub contributed_at: i64,
    pub refund_claimed: bool,
    pub bump: u8,
}

impl ContributionRecord {
    pub fn decode(address: Pubkey, data: &[u8]) -> ClientResult<Self> {
        let contribution = Contribution::try_deserialize(&mut &data[..])
            .map_err(|e| ClientError::Decode(format!("contribution {address}: {e}")))?;
        Ok(Self {
            address,
            campaign: contribution.campaign,
            contributor: contribution.contributor,
            amount: contribution.amount,
            contributed_at: contribution.contributed_at,
            refund_claimed: contribution.refund_claimed,
            bump: contribution.bump,
        })
    }
}

use anchor_lang::prelude::*;

use crate::errors::{ClientError, ClientResult};

/// On-chain milestone account, byte for byte.
#[account]
pub struct Milestone {
    pub campaign: Pubkey,
    pub milestone_index: u8,
    pub title: String,
    pub target_amount: u64,
    pub is_completed: bool,
    pub bump: u8,
}

#[derive(Debug, Clone)]
pub struct MilestoneRecord {
    pub address: Pubkey,
    pub campaign: Pubkey,
    pub milestone_index: u8,
    pub title: String,
    /// USDC base units.
    pub target_amount: u64,
    pub is_completed: bool,
    pub bump: u8,
}

impl MilestoneRecord {
    pub fn decode(address: Pubkey, data: &[u8]) -> ClientResult<Self> {
        let milestone = Milestone::try_deserialize(&mut &data[..])
            .map_err(|e| ClientError::Decode(format!("milestone {address}: {e}")))?;
        Ok(Self {
            address,
            campaign: milestone.campaign,
            milestone_index: milestone.milestone_index,
            title: milestone.title,
            target_amount: milestone.target_amount,
            is_completed: milestone.is_completed,
            bump: milestone.bump,
        })
    }
}

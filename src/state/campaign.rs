use anchor_lang::prelude::*;

use crate::constants::SECONDS_PER_DAY;
use crate::errors::{ClientError, ClientResult};
use crate::state::Category;

/// On-chain campaign account, byte for byte.
#[account]
pub struct Campaign {
    pub campaign_id: u64,
    pub creator: Pubkey,
    pub title: String,
    pub short_description: String,
    pub category: Category,
    pub cover_image_url: String,
    pub story_url: String,
    pub funding_goal: u64,
    pub deadline: i64,
    pub amount_raised: u64,
    pub backer_count: u64,
    pub is_active: bool,
    pub created_at: i64,
    pub milestone_count: u8,
    pub bump: u8,
}

/// Decoded, display-ready campaign snapshot.
#[derive(Debug, Clone)]
pub struct CampaignRecord {
    pub address: Pubkey,
    pub campaign_id: u64,
    pub creator: Pubkey,
    pub title: String,
    pub short_description: String,
    pub category: Category,
    pub cover_image_url: String,
    pub story_url: String,
    /// USDC base units (6 decimals).
    pub funding_goal: u64,
    /// Unix timestamp, seconds.
    pub deadline: i64,
    pub amount_raised: u64,
    pub backer_count: u64,
    pub is_active: bool,
    pub created_at: i64,
    pub milestone_count: u8,
    pub bump: u8,
}

impl CampaignRecord {
    pub fn decode(address: Pubkey, data: &[u8]) -> ClientResult<Self> {
        let campaign = Campaign::try_deserialize(&mut &data[..])
            .map_err(|e| ClientError::Decode(format!("campaign {address}: {e}")))?;
        Ok(Self::from_account(address, campaign))
    }

    pub fn from_account(address: Pubkey, campaign: Campaign) -> Self {
        Self {
            address,
            campaign_id: campaign.campaign_id,
            creator: campaign.creator,
            title: campaign.title,
            short_description: campaign.short_description,
            category: campaign.category,
            cover_image_url: campaign.cover_image_url,
            story_url: campaign.story_url,
            funding_goal: campaign.funding_goal,
            deadline: campaign.deadline,
            amount_raised: campaign.amount_raised,
            backer_count: campaign.backer_count,
            is_active: campaign.is_active,
            created_at: campaign.created_at,
            milestone_count: campaign.milestone_count,
            bump: campaign.bump,
        }
    }

    /// Whole days until the deadline, clamped at zero.
    pub fn days_left(&self, now: i64) -> u64 {
        if self.deadline <= now {
            0
        } else {
            ((self.deadline - now) / SECONDS_PER_DAY) as u64
        }
    }

    /// Raised / goal as a percentage. Unclamped; display layers clamp
    /// to 100 for bar widths themselves.
    pub fn progress_percent(&self) -> f64 {
        if self.funding_goal == 0 {
            return 0.0;
        }
        self.amount_raised as f64 / self.funding_goal as f64 * 100.0
    }

    pub fn goal_met(&self) -> bool {
        self.amount_raised >= self.funding_goal
    }
}

use anchor_lang::prelude::*;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::system_program;

use crate::errors::{ClientError, ClientResult};
use crate::state::Category;

pub const DISCRIMINATOR: [u8; 8] = [111, 131, 187, 98, 160, 193, 114, 244];

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone)]
pub struct CreateCampaignArgs {
    pub title: String,
    pub short_description: String,
    pub category: Category,
    pub cover_image_url: String,
    pub story_url: String,
    /// USDC base units.
    pub funding_goal: u64,
    pub duration_days: u64,
}

pub struct CreateCampaign {
    pub campaign: Pubkey,
    pub campaign_counter: Pubkey,
    pub creator: Pubkey,
}

impl CreateCampaign {
    pub fn build(&self, args: &CreateCampaignArgs) -> ClientResult<Instruction> {
        let mut data = DISCRIMINATOR.to_vec();
        args.serialize(&mut data)
            .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
        Ok(Instruction {
            program_id: crate::ID,
            accounts: vec![
                AccountMeta::new(self.campaign, false),
                AccountMeta::new(self.campaign_counter, false),
                AccountMeta::new(self.creator, true),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            data,
        })
    }
}

use anchor_lang::prelude::*;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::system_program;

use crate::errors::{ClientError, ClientResult};

pub const DISCRIMINATOR: [u8; 8] = [109, 57, 56, 239, 99, 111, 221, 121];

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone)]
pub struct FundCampaignArgs {
    /// USDC base units.
    pub amount: u64,
}

/// The vault and contribution accounts are created by the program on
/// first use; the contributor's token account must already exist
/// (the dispatcher creates it as a prerequisite step when absent).
pub struct FundCampaign {
    pub campaign: Pubkey,
    pub campaign_vault: Pubkey,
    pub contribution: Pubkey,
    pub contributor: Pubkey,
    pub contributor_token_account: Pubkey,
    pub usdc_mint: Pubkey,
}

impl FundCampaign {
    pub fn build(&self, args: &FundCampaignArgs) -> ClientResult<Instruction> {
        let mut data = DISCRIMINATOR.to_vec();
        args.serialize(&mut data)
            .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
        Ok(Instruction {
            program_id: crate::ID,
            accounts: vec![
                AccountMeta::new(self.campaign, false),
                AccountMeta::new(self.campaign_vault, false),
                AccountMeta::new(self.contribution, false),
                AccountMeta::new(self.contributor, true),
                AccountMeta::new(self.contributor_token_account, false),
                AccountMeta::new_readonly(self.usdc_mint, false),
                AccountMeta::new_readonly(spl_token::ID, false),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            data,
        })
    }
}

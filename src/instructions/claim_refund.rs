use anchor_lang::prelude::Pubkey;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::system_program;

pub const DISCRIMINATOR: [u8; 8] = [15, 16, 30, 161, 255, 228, 97, 60];

/// Only valid once a campaign is closed without meeting its goal.
/// The program pays the contributor's cumulative amount back out of
/// the vault and flips `refund_claimed`.
pub struct ClaimRefund {
    pub campaign: Pubkey,
    pub campaign_vault: Pubkey,
    pub contribution: Pubkey,
    pub contributor: Pubkey,
    pub contributor_token_account: Pubkey,
    pub usdc_mint: Pubkey,
}

impl ClaimRefund {
    pub fn build(&self) -> Instruction {
        Instruction {
            program_id: crate::ID,
            accounts: vec![
                AccountMeta::new(self.campaign, false),
                AccountMeta::new(self.campaign_vault, false),
                AccountMeta::new(self.contribution, false),
                AccountMeta::new(self.contributor, true),
                AccountMeta::new(self.contributor_token_account, false),
                AccountMeta::new_readonly(self.usdc_mint, false),
                AccountMeta::new_readonly(spl_token::ID, false),
                AccountMeta::new_readonly(spl_associated_token_account::ID, false),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            data: DISCRIMINATOR.to_vec(),
        }
    }
}

use anchor_lang::prelude::Pubkey;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::system_program;

pub const DISCRIMINATOR: [u8; 8] = [241, 36, 29, 111, 208, 31, 104, 217];

/// Creator-only. The program checks the goal and drains the vault to
/// the creator's token account, creating it if needed.
pub struct WithdrawFunds {
    pub campaign: Pubkey,
    pub campaign_vault: Pubkey,
    pub creator: Pubkey,
    pub creator_token_account: Pubkey,
    pub usdc_mint: Pubkey,
}

impl WithdrawFunds {
    pub fn build(&self) -> Instruction {
        Instruction {
            program_id: crate::ID,
            accounts: vec![
                AccountMeta::new(self.campaign, false),
                AccountMeta::new(self.campaign_vault, false),
                AccountMeta::new(self.creator, true),
                AccountMeta::new(self.creator_token_account, false),
                AccountMeta::new_readonly(self.usdc_mint, false),
                AccountMeta::new_readonly(spl_token::ID, false),
                AccountMeta::new_readonly(spl_associated_token_account::ID, false),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            data: DISCRIMINATOR.to_vec(),
        }
    }
}

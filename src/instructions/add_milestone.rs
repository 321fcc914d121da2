use anchor_lang::prelude::*;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::system_program;

use crate::errors::{ClientError, ClientResult};

pub const DISCRIMINATOR: [u8; 8] = [165, 18, 177, 128, 204, 172, 23, 249];

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone)]
pub struct AddMilestoneArgs {
    pub title: String,
    /// USDC base units.
    pub target_amount: u64,
}

pub struct AddMilestone {
    pub campaign: Pubkey,
    pub milestone: Pubkey,
    pub creator: Pubkey,
}

impl AddMilestone {
    pub fn build(&self, args: &AddMilestoneArgs) -> ClientResult<Instruction> {
        let mut data = DISCRIMINATOR.to_vec();
        args.serialize(&mut data)
            .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
        Ok(Instruction {
            program_id: crate::ID,
            accounts: vec![
                AccountMeta::new(self.campaign, false),
                AccountMeta::new(self.milestone, false),
                AccountMeta::new(self.creator, true),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            data,
        })
    }
}

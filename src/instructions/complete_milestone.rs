use anchor_lang::prelude::Pubkey;
use solana_sdk::instruction::{AccountMeta, Instruction};

pub const DISCRIMINATOR: [u8; 8] = [137, 164, 160, 100, 33, 64, 178, 10];

pub struct CompleteMilestone {
    pub campaign: Pubkey,
    pub milestone: Pubkey,
    pub creator: Pubkey,
}

impl CompleteMilestone {
    pub fn build(&self) -> Instruction {
        Instruction {
            program_id: crate::ID,
            accounts: vec![
                AccountMeta::new_readonly(self.campaign, false),
                AccountMeta::new(self.milestone, false),
                AccountMeta::new_readonly(self.creator, true),
            ],
            data: DISCRIMINATOR.to_vec(),
        }
    }
}

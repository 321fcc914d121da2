use anchor_lang::prelude::Pubkey;
use solana_sdk::instruction::{AccountMeta, Instruction};

pub const DISCRIMINATOR: [u8; 8] = [65, 49, 110, 7, 63, 238, 206, 77];

pub struct CloseCampaign {
    pub campaign: Pubkey,
    pub creator: Pubkey,
}

impl CloseCampaign {
    pub fn build(&self) -> Instruction {
        Instruction {
            program_id: crate::ID,
            accounts: vec![
                AccountMeta::new(self.campaign, false),
                AccountMeta::new(self.creator, true),
            ],
            data: DISCRIMINATOR.to_vec(),
        }
    }
}

use anchor_lang::prelude::Pubkey;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::system_program;

pub const DISCRIMINATOR: [u8; 8] = [175, 175, 109, 31, 13, 152, 155, 237];

/// Creates the global campaign counter. One-time; `create_campaign`
/// runs it implicitly when the counter is missing.
pub struct Initialize {
    pub campaign_counter: Pubkey,
    pub authority: Pubkey,
}

impl Initialize {
    pub fn build(&self) -> Instruction {
        Instruction {
            program_id: crate::ID,
            accounts: vec![
                AccountMeta::new(self.campaign_counter, false),
                AccountMeta::new(self.authority, true),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            data: DISCRIMINATOR.to_vec(),
        }
    }
}

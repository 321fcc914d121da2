//! Deterministic record addresses.
//!
//! Pure functions, no I/O. The program and this client agree on seed
//! tags and serialization order (integers little-endian), so both
//! sides compute the same address without a lookup round-trip. A
//! wrong seed never produces a decode error on the other side, only a
//! "not found".

use anchor_lang::prelude::Pubkey;

use crate::constants::{
    MAX_MILESTONES_PER_CAMPAIGN, SEED_CAMPAIGN, SEED_CAMPAIGN_COUNTER, SEED_CAMPAIGN_VAULT,
    SEED_CONTRIBUTION, SEED_MILESTONE,
};
use crate::errors::{ClientError, ClientResult};

/// Address of the global campaign sequence counter.
pub fn campaign_counter_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_CAMPAIGN_COUNTER], &crate::ID)
}

/// Campaign address for a creator and the counter value observed at
/// creation time.
///
/// Identical input always yields identical output, so a retried
/// creation must re-fetch the counter first; reusing an observed
/// sequence number is a caller bug, not a derivation concern.
pub fn campaign_address(creator: &Pubkey, campaign_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[SEED_CAMPAIGN, creator.as_ref(), &campaign_id.to_le_bytes()],
        &crate::ID,
    )
}

/// The campaign's escrow vault. One per campaign, never derived from
/// a contributor.
pub fn campaign_vault_address(campaign: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_CAMPAIGN_VAULT, campaign.as_ref()], &crate::ID)
}

/// Contribution record for a (campaign, contributor) pair. Repeated
/// calls with the same pair produce the same address, which is what
/// enforces the one-record-per-pair cumulative semantics on chain.
pub fn contribution_address(campaign: &Pubkey, contributor: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[SEED_CONTRIBUTION, campaign.as_ref(), contributor.as_ref()],
        &crate::ID,
    )
}

/// Milestone record for a campaign and 0-based index. The index byte
/// is part of the seed; indexes are assigned sequentially and the
/// program caps them at [`MAX_MILESTONES_PER_CAMPAIGN`].
pub fn milestone_address(
    campaign: &Pubkey,
    milestone_index: u8,
) -> ClientResult<(Pubkey, u8)> {
    if milestone_index >= MAX_MILESTONES_PER_CAMPAIGN {
        return Err(ClientError::InvalidInput(format!(
            "milestone index {milestone_index} out of range (max {})",
            MAX_MILESTONES_PER_CAMPAIGN - 1
        )));
    }
    Ok(Pubkey::find_program_address(
        &[SEED_MILESTONE, campaign.as_ref(), &[milestone_index]],
        &crate::ID,
    ))
}

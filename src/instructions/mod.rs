//! Instruction builders, one per program entry point.
//!
//! Each builder pins the account-meta order and the 8-byte
//! instruction discriminator the program dispatches on. Account
//! order must match the program's own accounts struct exactly.

pub mod add_milestone;
pub mod claim_refund;
pub mod close_campaign;
pub mod complete_milestone;
pub mod create_campaign;
pub mod fund_campaign;
pub mod initialize;
pub mod withdraw_funds;

pub use add_milestone::{AddMilestone, AddMilestoneArgs};
pub use claim_refund::ClaimRefund;
pub use close_campaign::CloseCampaign;
pub use complete_milestone::CompleteMilestone;
pub use create_campaign::{CreateCampaign, CreateCampaignArgs};
pub use fund_campaign::{FundCampaign, FundCampaignArgs};
pub use initialize::Initialize;
pub use withdraw_funds::WithdrawFunds;

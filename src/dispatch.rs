//! Mutation construction and submission.
//!
//! Every operation is a single logical attempt: derive the target
//! addresses, run any prerequisite account creation, submit once, and
//! surface failure verbatim. Nothing here retries: a rejected
//! financial submission is re-invoked by the user, not replayed
//! silently. Cache invalidation happens only after confirmed success,
//! so the cache can never imply a success that did not happen.

use std::sync::Arc;

use anchor_lang::prelude::Pubkey;
use solana_sdk::instruction::Instruction;
use solana_sdk::signature::Signature;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;
use spl_associated_token_account::get_associated_token_address;
use spl_associated_token_account::instruction::create_associated_token_account;
use tracing::{debug, info};

use crate::cache::{CacheKey, CampaignStore};
use crate::constants::{
    MAX_CAMPAIGN_DURATION_DAYS, MAX_DESCRIPTION_LENGTH, MAX_MILESTONE_TITLE_LENGTH,
    MAX_TITLE_LENGTH, MAX_URL_LENGTH, MIN_CAMPAIGN_DURATION_DAYS,
};
use crate::errors::{ClientError, ClientResult, map_submission_error};
use crate::instructions::{
    AddMilestone, AddMilestoneArgs, ClaimRefund, CloseCampaign, CompleteMilestone, CreateCampaign,
    CreateCampaignArgs, FundCampaign, FundCampaignArgs, Initialize, WithdrawFunds,
};
use crate::ledger::LedgerRpc;
use crate::pda;
use crate::state::{CampaignCounter, Category};

#[derive(Debug, Clone)]
pub struct CreateCampaignParams {
    pub title: String,
    pub short_description: String,
    pub category: Category,
    pub cover_image_url: String,
    pub story_url: String,
    /// USDC base units.
    pub funding_goal: u64,
    pub duration_days: u64,
}

pub struct CampaignWriter {
    ledger: Arc<dyn LedgerRpc>,
    store: Arc<CampaignStore>,
    signer: Arc<dyn Signer + Send + Sync>,
    usdc_mint: Pubkey,
}

impl CampaignWriter {
    pub fn new(
        ledger: Arc<dyn LedgerRpc>,
        store: Arc<CampaignStore>,
        signer: Arc<dyn Signer + Send + Sync>,
        usdc_mint: Pubkey,
    ) -> Self {
        Self {
            ledger,
            store,
            signer,
            usdc_mint,
        }
    }

    /// The connected wallet's address. Creator for creations,
    /// contributor for fundings.
    pub fn authority(&self) -> Pubkey {
        self.signer.pubkey()
    }

    /// One-time counter creation. `create_campaign` calls this
    /// implicitly when the counter does not exist yet.
    pub async fn initialize(&self) -> ClientResult<Signature> {
        let (campaign_counter, _) = pda::campaign_counter_address();
        let ix = Initialize {
            campaign_counter,
            authority: self.authority(),
        }
        .build();
        self.submit(&[ix]).await
    }

    /// Creates a campaign at the next sequence number and returns its
    /// derived address along with the signature.
    ///
    /// The counter is re-fetched inside every attempt. Deriving from
    /// a remembered count would collide with any creation that landed
    /// in between.
    pub async fn create_campaign(
        &self,
        params: CreateCampaignParams,
    ) -> ClientResult<(Signature, Pubkey)> {
        validate_create(&params)?;

        let counter = match self.fetch_counter().await? {
            Some(counter) => counter,
            None => {
                info!("campaign counter missing, initializing");
                self.initialize().await?;
                self.fetch_counter().await?.ok_or_else(|| {
                    ClientError::Transport("campaign counter unavailable after initialization".into())
                })?
            }
        };

        let creator = self.authority();
        let (campaign, _) = pda::campaign_address(&creator, counter.count);
        let (campaign_counter, _) = pda::campaign_counter_address();

        let args = CreateCampaignArgs {
            title: params.title,
            short_description: params.short_description,
            category: params.category,
            cover_image_url: params.cover_image_url,
            story_url: params.story_url,
            funding_goal: params.funding_goal,
            duration_days: params.duration_days,
        };
        let ix = CreateCampaign {
            campaign,
            campaign_counter,
            creator,
        }
        .build(&args)?;

        let signature = self.submit(&[ix]).await?;
        self.store.invalidate(&CacheKey::CampaignList);
        info!(%campaign, campaign_id = counter.count, "campaign created");
        Ok((signature, campaign))
    }

    /// Contributes USDC to a campaign. Creates the contributor's
    /// token account first when it does not exist, as its own
    /// prerequisite transaction.
    pub async fn fund_campaign(
        &self,
        campaign: &Pubkey,
        amount: u64,
    ) -> ClientResult<Signature> {
        if amount == 0 {
            return Err(ClientError::InvalidInput(
                "contribution amount must be greater than zero".into(),
            ));
        }

        let contributor = self.authority();
        let (contribution, _) = pda::contribution_address(campaign, &contributor);
        let (campaign_vault, _) = pda::campaign_vault_address(campaign);
        let token_account = self.ensure_token_account(&contributor).await?;

        let ix = FundCampaign {
            campaign: *campaign,
            campaign_vault,
            contribution,
            contributor,
            contributor_token_account: token_account,
            usdc_mint: self.usdc_mint,
        }
        .build(&FundCampaignArgs { amount })?;

        let signature = self.submit(&[ix]).await?;
        self.store.invalidate_campaign(campaign);
        info!(%campaign, amount, "campaign funded");
        Ok(signature)
    }

    /// Drains the vault to the creator. Only valid for the creator of
    /// a campaign whose goal is met; the program enforces both.
    pub async fn withdraw_funds(&self, campaign: &Pubkey) -> ClientResult<Signature> {
        let creator = self.authority();
        let (campaign_vault, _) = pda::campaign_vault_address(campaign);

        let ix = WithdrawFunds {
            campaign: *campaign,
            campaign_vault,
            creator,
            creator_token_account: get_associated_token_address(&creator, &self.usdc_mint),
            usdc_mint: self.usdc_mint,
        }
        .build();

        let signature = self.submit(&[ix]).await?;
        self.store.invalidate_campaign(campaign);
        info!(%campaign, "funds withdrawn");
        Ok(signature)
    }

    /// Adds the milestone at `milestone_index`. Indexes are assigned
    /// sequentially from 0; the program rejects anything past the
    /// campaign's current count or the cap of 10.
    pub async fn add_milestone(
        &self,
        campaign: &Pubkey,
        milestone_index: u8,
        title: String,
        target_amount: u64,
    ) -> ClientResult<Signature> {
        if title.len() > MAX_MILESTONE_TITLE_LENGTH {
            return Err(ClientError::InvalidInput(format!(
                "milestone title exceeds {MAX_MILESTONE_TITLE_LENGTH} characters"
            )));
        }
        let (milestone, _) = pda::milestone_address(campaign, milestone_index)?;

        let ix = AddMilestone {
            campaign: *campaign,
            milestone,
            creator: self.authority(),
        }
        .build(&AddMilestoneArgs {
            title,
            target_amount,
        })?;

        let signature = self.submit(&[ix]).await?;
        self.store.invalidate_milestones(campaign);
        self.store.invalidate(&CacheKey::Campaign(*campaign));
        Ok(signature)
    }

    pub async fn complete_milestone(
        &self,
        campaign: &Pubkey,
        milestone: &Pubkey,
    ) -> ClientResult<Signature> {
        let ix = CompleteMilestone {
            campaign: *campaign,
            milestone: *milestone,
            creator: self.authority(),
        }
        .build();

        let signature = self.submit(&[ix]).await?;
        self.store.invalidate_milestones(campaign);
        Ok(signature)
    }

    pub async fn close_campaign(&self, campaign: &Pubkey) -> ClientResult<Signature> {
        let ix = CloseCampaign {
            campaign: *campaign,
            creator: self.authority(),
        }
        .build();

        let signature = self.submit(&[ix]).await?;
        self.store.invalidate_campaign(campaign);
        info!(%campaign, "campaign closed");
        Ok(signature)
    }

    /// Claims this wallet's refund from a failed campaign. The
    /// program pays out of the vault and marks the contribution
    /// record claimed; claiming twice is rejected on chain.
    pub async fn claim_refund(&self, campaign: &Pubkey) -> ClientResult<Signature> {
        let contributor = self.authority();
        let (contribution, _) = pda::contribution_address(campaign, &contributor);
        let (campaign_vault, _) = pda::campaign_vault_address(campaign);

        let ix = ClaimRefund {
            campaign: *campaign,
            campaign_vault,
            contribution,
            contributor,
            contributor_token_account: get_associated_token_address(&contributor, &self.usdc_mint),
            usdc_mint: self.usdc_mint,
        }
        .build();

        let signature = self.submit(&[ix]).await?;
        self.store.invalidate_campaign(campaign);
        info!(%campaign, "refund claimed");
        Ok(signature)
    }

    async fn fetch_counter(&self) -> ClientResult<Option<CampaignCounter>> {
        let (address, _) = pda::campaign_counter_address();
        match self.ledger.fetch_account(&address).await? {
            Some(account) => Ok(Some(CampaignCounter::decode(&account.data)?)),
            None => Ok(None),
        }
    }

    /// Returns the wallet's USDC token account, creating it first in
    /// a separate transaction when it does not exist yet.
    async fn ensure_token_account(&self, owner: &Pubkey) -> ClientResult<Pubkey> {
        let token_account = get_associated_token_address(owner, &self.usdc_mint);
        if self.ledger.fetch_account(&token_account).await?.is_none() {
            debug!(%token_account, "creating associated token account");
            let ix = create_associated_token_account(
                &self.authority(),
                owner,
                &self.usdc_mint,
                &spl_token::ID,
            );
            self.submit(&[ix]).await?;
        }
        Ok(token_account)
    }

    async fn submit(&self, instructions: &[Instruction]) -> ClientResult<Signature> {
        let blockhash = self.ledger.latest_blockhash().await?;
        let mut transaction = Transaction::new_with_payer(instructions, Some(&self.authority()));
        let signers: Vec<&dyn Signer> = vec![self.signer.as_ref()];
        transaction
            .try_sign(&signers, blockhash)
            .map_err(|e| ClientError::Submission {
                code: None,
                message: e.to_string(),
            })?;
        self.ledger
            .send_transaction(&transaction)
            .await
            .map_err(|error| match error {
                ClientError::Submission { code, message } => map_submission_error(code, message),
                other => other,
            })
    }
}

fn validate_create(params: &CreateCampaignParams) -> ClientResult<()> {
    if params.title.len() > MAX_TITLE_LENGTH {
        return Err(ClientError::InvalidInput(format!(
            "title exceeds {MAX_TITLE_LENGTH} characters"
        )));
    }
    if params.short_description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(ClientError::InvalidInput(format!(
            "description exceeds {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    if params.cover_image_url.len() > MAX_URL_LENGTH || params.story_url.len() > MAX_URL_LENGTH {
        return Err(ClientError::InvalidInput(format!(
            "content reference exceeds {MAX_URL_LENGTH} characters"
        )));
    }
    if params.funding_goal == 0 {
        return Err(ClientError::InvalidInput(
            "funding goal must be greater than zero".into(),
        ));
    }
    if params.duration_days < MIN_CAMPAIGN_DURATION_DAYS
        || params.duration_days > MAX_CAMPAIGN_DURATION_DAYS
    {
        return Err(ClientError::InvalidInput(format!(
            "duration must be between {MIN_CAMPAIGN_DURATION_DAYS} and {MAX_CAMPAIGN_DURATION_DAYS} days"
        )));
    }
    Ok(())
}

//! Cache-aware reads.
//!
//! A read serves the cached snapshot while its entry is fresh;
//! otherwise it scans the ledger, decodes, recaches, and returns.
//! Empty results are normal and never an error; errors mean the
//! transport or a decode actually failed, and callers are expected to
//! render that as a distinct state from "empty".

use std::sync::Arc;
use std::time::Duration;

use anchor_lang::prelude::Pubkey;
use anchor_lang::Discriminator;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheKey, CachedValue, CampaignStore};
use crate::constants::{CONTRIBUTION_POLL_INTERVAL, DISCRIMINATOR_SIZE};
use crate::errors::ClientResult;
use crate::ledger::{AccountFilter, LedgerRpc};
use crate::pda;
use crate::state::{
    Campaign, CampaignCounter, CampaignRecord, Contribution, ContributionRecord, Milestone,
    MilestoneRecord,
};

#[derive(Clone)]
pub struct CampaignReader {
    ledger: Arc<dyn LedgerRpc>,
    store: Arc<CampaignStore>,
}

impl CampaignReader {
    pub fn new(ledger: Arc<dyn LedgerRpc>, store: Arc<CampaignStore>) -> Self {
        Self { ledger, store }
    }

    pub fn store(&self) -> &Arc<CampaignStore> {
        &self.store
    }

    /// All campaigns, in whatever order the scan returned them.
    /// Callers sort for their own surfaces.
    pub async fn list_campaigns(&self) -> ClientResult<Vec<CampaignRecord>> {
        if let Some(CachedValue::Campaigns(records)) = self.store.fresh(&CacheKey::CampaignList) {
            return Ok(records);
        }
        let records = self.fetch_campaigns().await?;
        self.store
            .put(CacheKey::CampaignList, CachedValue::Campaigns(records.clone()));
        Ok(records)
    }

    /// Newest campaigns first, for landing surfaces.
    pub async fn latest_campaigns(&self, limit: usize) -> ClientResult<Vec<CampaignRecord>> {
        let mut records = self.list_campaigns().await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }

    /// Campaigns closest to (or past) their goal first.
    pub async fn featured_campaigns(
        &self,
        limit: usize,
    ) -> ClientResult<Vec<CampaignRecord>> {
        let mut records = self.list_campaigns().await?;
        records.sort_by(|a, b| b.progress_percent().total_cmp(&a.progress_percent()));
        records.truncate(limit);
        Ok(records)
    }

    /// Point fetch. `Ok(None)` is the expected outcome for a closed,
    /// deleted, or mistyped address; the "not found" itself is cached
    /// like any other snapshot.
    pub async fn get_campaign(
        &self,
        address: &Pubkey,
    ) -> ClientResult<Option<CampaignRecord>> {
        let key = CacheKey::Campaign(*address);
        if let Some(CachedValue::Campaign(record)) = self.store.fresh(&key) {
            return Ok(record);
        }
        let record = match self.ledger.fetch_account(address).await? {
            Some(account) => Some(CampaignRecord::decode(*address, &account.data)?),
            None => None,
        };
        self.store.put(key, CachedValue::Campaign(record.clone()));
        Ok(record)
    }

    /// Milestones for a campaign, always sorted by index ascending.
    pub async fn list_milestones(
        &self,
        campaign: &Pubkey,
    ) -> ClientResult<Vec<MilestoneRecord>> {
        let key = CacheKey::Milestones(*campaign);
        if let Some(CachedValue::Milestones(records)) = self.store.fresh(&key) {
            return Ok(records);
        }
        let scanned = self
            .ledger
            .scan_program_accounts(&child_filters::<Milestone>(campaign))
            .await?;
        let mut records = scanned
            .into_iter()
            .map(|(address, account)| MilestoneRecord::decode(address, &account.data))
            .collect::<Result<Vec<_>, _>>()?;
        records.sort_by_key(|m| m.milestone_index);
        self.store.put(key, CachedValue::Milestones(records.clone()));
        Ok(records)
    }

    /// Contributions for a campaign, always newest first. The
    /// ordering feeds the live activity feed directly.
    pub async fn list_contributions(
        &self,
        campaign: &Pubkey,
    ) -> ClientResult<Vec<ContributionRecord>> {
        let key = CacheKey::Contributions(*campaign);
        if let Some(CachedValue::Contributions(records)) = self.store.fresh(&key) {
            return Ok(records);
        }
        let records = self.fetch_contributions(campaign).await?;
        self.store
            .put(key, CachedValue::Contributions(records.clone()));
        Ok(records)
    }

    /// This contributor's cumulative record for a campaign, at the
    /// derived address. `Ok(None)` means they never contributed.
    pub async fn get_contribution(
        &self,
        campaign: &Pubkey,
        contributor: &Pubkey,
    ) -> ClientResult<Option<ContributionRecord>> {
        let (address, _) = pda::contribution_address(campaign, contributor);
        match self.ledger.fetch_account(&address).await? {
            Some(account) => Ok(Some(ContributionRecord::decode(address, &account.data)?)),
            None => Ok(None),
        }
    }

    /// Whether the global sequence counter exists yet.
    pub async fn is_initialized(&self) -> ClientResult<bool> {
        let (counter, _) = pda::campaign_counter_address();
        Ok(self.ledger.fetch_account(&counter).await?.is_some())
    }

    pub async fn fetch_counter(&self) -> ClientResult<Option<CampaignCounter>> {
        let (address, _) = pda::campaign_counter_address();
        match self.ledger.fetch_account(&address).await? {
            Some(account) => Ok(Some(CampaignCounter::decode(&account.data)?)),
            None => Ok(None),
        }
    }

    /// Starts the live-activity poll for a campaign's contributions.
    /// Each tick refetches and republishes through the store. The
    /// poll stops when the returned handle is dropped or stopped,
    /// which is how leaving a detail view cancels it.
    pub fn watch_contributions(&self, campaign: Pubkey) -> PollHandle {
        self.watch_contributions_every(campaign, CONTRIBUTION_POLL_INTERVAL)
    }

    pub fn watch_contributions_every(&self, campaign: Pubkey, period: Duration) -> PollHandle {
        let reader = self.clone();
        debug!(%campaign, ?period, "starting contribution poll");
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                match reader.fetch_contributions(&campaign).await {
                    Ok(records) => reader.store.put(
                        CacheKey::Contributions(campaign),
                        CachedValue::Contributions(records),
                    ),
                    Err(error) => warn!(%campaign, %error, "contribution poll tick failed"),
                }
            }
        });
        PollHandle { task }
    }

    async fn fetch_campaigns(&self) -> ClientResult<Vec<CampaignRecord>> {
        let filter = AccountFilter::new(0, Campaign::DISCRIMINATOR.to_vec());
        let scanned = self.ledger.scan_program_accounts(&[filter]).await?;
        scanned
            .into_iter()
            .map(|(address, account)| CampaignRecord::decode(address, &account.data))
            .collect()
    }

    async fn fetch_contributions(
        &self,
        campaign: &Pubkey,
    ) -> ClientResult<Vec<ContributionRecord>> {
        let scanned = self
            .ledger
            .scan_program_accounts(&child_filters::<Contribution>(campaign))
            .await?;
        let mut records = scanned
            .into_iter()
            .map(|(address, account)| ContributionRecord::decode(address, &account.data))
            .collect::<Result<Vec<_>, _>>()?;
        records.sort_by(|a, b| b.contributed_at.cmp(&a.contributed_at));
        Ok(records)
    }
}

/// Discriminator match plus campaign-reference match directly after
/// it. Both child account types store the campaign pubkey as their
/// first field.
fn child_filters<T: Discriminator>(campaign: &Pubkey) -> [AccountFilter; 2] {
    [
        AccountFilter::new(0, T::DISCRIMINATOR.to_vec()),
        AccountFilter::new(DISCRIMINATOR_SIZE, campaign.to_bytes().to_vec()),
    ]
}

/// Aborts its polling task when dropped.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(self) {
        // Drop does the abort.
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

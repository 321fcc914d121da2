//! Process-wide read cache with explicit freshness windows.
//!
//! Entries are keyed by [`CacheKey`] and carry the `Instant` they
//! were fetched. A read inside the fresh window is served from
//! memory; a stale read triggers a refetch in the query layer. Past
//! the retained window the entry is evicted outright. Invalidation is
//! a single atomic mark-stale per key; there is no in-process
//! concurrent writer beyond that, so a `RwLock` around the map is all
//! the coordination required.
//!
//! Interested components subscribe to a broadcast stream of
//! [`CacheUpdate`]s instead of holding framework-managed
//! subscriptions; the store owes them a notification on every refresh
//! and invalidation.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anchor_lang::prelude::Pubkey;
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

use crate::constants::{
    CAMPAIGN_RETAIN, CAMPAIGN_STALE, CONTRIBUTION_RETAIN, CONTRIBUTION_STALE, MILESTONE_RETAIN,
    MILESTONE_STALE,
};
use crate::state::{CampaignRecord, ContributionRecord, MilestoneRecord};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    CampaignList,
    Campaign(Pubkey),
    Milestones(Pubkey),
    Contributions(Pubkey),
}

#[derive(Debug, Clone)]
pub enum CachedValue {
    Campaigns(Vec<CampaignRecord>),
    Campaign(Option<CampaignRecord>),
    Milestones(Vec<MilestoneRecord>),
    Contributions(Vec<ContributionRecord>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    Refreshed,
    Invalidated,
}

#[derive(Debug, Clone)]
pub struct CacheUpdate {
    pub key: CacheKey,
    pub event: CacheEvent,
}

/// Fresh/retained windows per entity class.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    pub campaign_fresh: Duration,
    pub campaign_retain: Duration,
    pub milestone_fresh: Duration,
    pub milestone_retain: Duration,
    pub contribution_fresh: Duration,
    pub contribution_retain: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            campaign_fresh: CAMPAIGN_STALE,
            campaign_retain: CAMPAIGN_RETAIN,
            milestone_fresh: MILESTONE_STALE,
            milestone_retain: MILESTONE_RETAIN,
            contribution_fresh: CONTRIBUTION_STALE,
            contribution_retain: CONTRIBUTION_RETAIN,
        }
    }
}

impl CachePolicy {
    fn windows(&self, key: &CacheKey) -> (Duration, Duration) {
        match key {
            CacheKey::CampaignList | CacheKey::Campaign(_) => {
                (self.campaign_fresh, self.campaign_retain)
            }
            CacheKey::Milestones(_) => (self.milestone_fresh, self.milestone_retain),
            CacheKey::Contributions(_) => (self.contribution_fresh, self.contribution_retain),
        }
    }
}

struct Entry {
    value: CachedValue,
    fetched_at: Instant,
    stale: bool,
}

pub struct CampaignStore {
    entries: RwLock<HashMap<CacheKey, Entry>>,
    policy: CachePolicy,
    updates: broadcast::Sender<CacheUpdate>,
}

impl CampaignStore {
    pub fn new(policy: CachePolicy) -> Self {
        let (updates, _) = broadcast::channel(64);
        Self {
            entries: RwLock::new(HashMap::new()),
            policy,
            updates,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(CachePolicy::default())
    }

    /// Serves the entry only while it is inside its fresh window and
    /// not invalidated. Evicts entries past their retained window.
    pub fn fresh(&self, key: &CacheKey) -> Option<CachedValue> {
        let (fresh, retain) = self.policy.windows(key);
        let mut entries = self.entries.write();
        let entry = entries.get(key)?;
        let age = entry.fetched_at.elapsed();
        if age >= retain {
            entries.remove(key);
            return None;
        }
        if entry.stale || age >= fresh {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Serves the entry regardless of staleness, as long as it is
    /// still retained. Display layers can show this while a refetch
    /// is in flight.
    pub fn cached(&self, key: &CacheKey) -> Option<CachedValue> {
        let (_, retain) = self.policy.windows(key);
        let mut entries = self.entries.write();
        let entry = entries.get(key)?;
        if entry.fetched_at.elapsed() >= retain {
            entries.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    pub fn put(&self, key: CacheKey, value: CachedValue) {
        self.entries.write().insert(
            key.clone(),
            Entry {
                value,
                fetched_at: Instant::now(),
                stale: false,
            },
        );
        self.notify(key, CacheEvent::Refreshed);
    }

    /// Marks the entry stale; the next read refetches. This is what
    /// gives a caller read-own-write consistency after a mutation.
    pub fn invalidate(&self, key: &CacheKey) {
        if let Some(entry) = self.entries.write().get_mut(key) {
            entry.stale = true;
        }
        debug!(?key, "cache entry invalidated");
        self.notify(key.clone(), CacheEvent::Invalidated);
    }

    /// Invalidates everything a campaign mutation can have touched:
    /// the detail entry, its contributions, and the list.
    pub fn invalidate_campaign(&self, campaign: &Pubkey) {
        self.invalidate(&CacheKey::Campaign(*campaign));
        self.invalidate(&CacheKey::Contributions(*campaign));
        self.invalidate(&CacheKey::CampaignList);
    }

    pub fn invalidate_milestones(&self, campaign: &Pubkey) {
        self.invalidate(&CacheKey::Milestones(*campaign));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheUpdate> {
        self.updates.subscribe()
    }

    fn notify(&self, key: CacheKey, event: CacheEvent) {
        // Nobody listening is fine.
        let _ = self.updates.send(CacheUpdate { key, event });
    }
}

#![allow(dead_code)]

//! In-memory ledger double.
//!
//! Implements `LedgerRpc` over a account map and applies the
//! program's state-transition rules for the entry points the tests
//! exercise, so dispatch and query behavior can be checked end to
//! end without a validator.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use anchor_lang::prelude::Pubkey;
use anchor_lang::{AccountDeserialize, AccountSerialize, AnchorDeserialize};
use async_trait::async_trait;
use parking_lot::Mutex;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use hope_rise_client::constants::SECONDS_PER_DAY;
use hope_rise_client::errors::ClientError;
use hope_rise_client::instructions::{self, CreateCampaignArgs, FundCampaignArgs};
use hope_rise_client::ledger::{AccountFilter, LedgerRpc};
use hope_rise_client::state::{Campaign, CampaignCounter, Category, Contribution, Milestone};

pub const EPOCH: i64 = 1_700_000_000;

pub struct MockLedger {
    accounts: Mutex<HashMap<Pubkey, Account>>,
    clock: AtomicI64,
    fail_next: Mutex<Option<(Option<u32>, String)>>,
    pub fetches: AtomicUsize,
    pub scans: AtomicUsize,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            clock: AtomicI64::new(EPOCH),
            fail_next: Mutex::new(None),
            fetches: AtomicUsize::new(0),
            scans: AtomicUsize::new(0),
        }
    }

    pub fn now(&self) -> i64 {
        self.clock.load(Ordering::SeqCst)
    }

    pub fn advance_clock(&self, seconds: i64) {
        self.clock.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Makes the next submitted transaction fail with the given
    /// custom program error code.
    pub fn fail_next_submission(&self, code: u32) {
        let message = format!("custom program error: {code:#x}");
        *self.fail_next.lock() = Some((Some(code), message));
    }

    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    pub fn contains(&self, address: &Pubkey) -> bool {
        self.accounts.lock().contains_key(address)
    }

    pub fn insert_program_account<T: AccountSerialize>(&self, address: Pubkey, value: &T) {
        let mut data = Vec::new();
        value.try_serialize(&mut data).unwrap();
        self.accounts.lock().insert(
            address,
            Account {
                lamports: 1_000_000,
                data,
                owner: hope_rise_client::ID,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    pub fn insert_token_account(&self, address: Pubkey) {
        self.accounts.lock().insert(
            address,
            Account {
                lamports: 2_039_280,
                data: vec![0; 165],
                owner: spl_token::ID,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    pub fn read_campaign(&self, address: &Pubkey) -> Campaign {
        let accounts = self.accounts.lock();
        let account = accounts.get(address).expect("campaign account");
        Campaign::try_deserialize(&mut account.data.as_slice()).unwrap()
    }

    pub fn read_contribution(&self, address: &Pubkey) -> Contribution {
        let accounts = self.accounts.lock();
        let account = accounts.get(address).expect("contribution account");
        Contribution::try_deserialize(&mut account.data.as_slice()).unwrap()
    }

    fn execute(&self, program_id: Pubkey, keys: &[Pubkey], data: &[u8]) -> Result<(), ClientError> {
        if program_id == spl_associated_token_account::ID {
            // [payer, ata, owner, mint, system, token]
            self.insert_token_account(keys[1]);
            return Ok(());
        }
        if program_id != hope_rise_client::ID {
            return Ok(());
        }

        let discriminator: [u8; 8] = data[..8].try_into().unwrap();
        let args = &data[8..];
        match discriminator {
            instructions::initialize::DISCRIMINATOR => {
                let counter = CampaignCounter {
                    count: 0,
                    authority: keys[1],
                    bump: 255,
                };
                self.insert_program_account(keys[0], &counter);
            }
            instructions::create_campaign::DISCRIMINATOR => {
                let args = CreateCampaignArgs::try_from_slice(args).unwrap();
                let counter_address = keys[1];
                let mut counter = {
                    let accounts = self.accounts.lock();
                    let account = accounts.get(&counter_address).expect("counter");
                    CampaignCounter::try_deserialize(&mut account.data.as_slice()).unwrap()
                };
                let campaign = Campaign {
                    campaign_id: counter.count,
                    creator: keys[2],
                    title: args.title,
                    short_description: args.short_description,
                    category: args.category,
                    cover_image_url: args.cover_image_url,
                    story_url: args.story_url,
                    funding_goal: args.funding_goal,
                    deadline: self.now() + args.duration_days as i64 * SECONDS_PER_DAY,
                    amount_raised: 0,
                    backer_count: 0,
                    is_active: true,
                    created_at: self.now(),
                    milestone_count: 0,
                    bump: 254,
                };
                self.insert_program_account(keys[0], &campaign);
                counter.count += 1;
                self.insert_program_account(counter_address, &counter);
            }
            instructions::fund_campaign::DISCRIMINATOR => {
                let args = FundCampaignArgs::try_from_slice(args).unwrap();
                let campaign_address = keys[0];
                let contribution_address = keys[2];
                let contributor = keys[3];

                let mut campaign = self.read_campaign(&campaign_address);
                let mut contribution = if self.contains(&contribution_address) {
                    self.read_contribution(&contribution_address)
                } else {
                    campaign.backer_count += 1;
                    Contribution {
                        campaign: campaign_address,
                        contributor,
                        amount: 0,
                        contributed_at: self.now(),
                        refund_claimed: false,
                        bump: 253,
                    }
                };
                contribution.amount += args.amount;
                campaign.amount_raised += args.amount;
                self.insert_program_account(contribution_address, &contribution);
                self.insert_program_account(campaign_address, &campaign);
            }
            instructions::add_milestone::DISCRIMINATOR => {
                let args =
                    instructions::AddMilestoneArgs::try_from_slice(args).unwrap();
                let mut campaign = self.read_campaign(&keys[0]);
                let milestone = Milestone {
                    campaign: keys[0],
                    milestone_index: campaign.milestone_count,
                    title: args.title,
                    target_amount: args.target_amount,
                    is_completed: false,
                    bump: 252,
                };
                self.insert_program_account(keys[1], &milestone);
                campaign.milestone_count += 1;
                self.insert_program_account(keys[0], &campaign);
            }
            instructions::complete_milestone::DISCRIMINATOR => {
                let mut milestone = {
                    let accounts = self.accounts.lock();
                    let account = accounts.get(&keys[1]).expect("milestone");
                    Milestone::try_deserialize(&mut account.data.as_slice()).unwrap()
                };
                milestone.is_completed = true;
                self.insert_program_account(keys[1], &milestone);
            }
            instructions::close_campaign::DISCRIMINATOR => {
                let mut campaign = self.read_campaign(&keys[0]);
                campaign.is_active = false;
                self.insert_program_account(keys[0], &campaign);
            }
            instructions::claim_refund::DISCRIMINATOR => {
                let mut contribution = self.read_contribution(&keys[2]);
                if contribution.refund_claimed {
                    return Err(ClientError::Submission {
                        code: Some(6008),
                        message: "custom program error: 0x1778".into(),
                    });
                }
                contribution.refund_claimed = true;
                self.insert_program_account(keys[2], &contribution);
            }
            instructions::withdraw_funds::DISCRIMINATOR => {
                // Vault balances are not modeled.
            }
            other => panic!("unexpected instruction discriminator {other:?}"),
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerRpc for MockLedger {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>, ClientError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.lock().get(address).cloned())
    }

    async fn scan_program_accounts(
        &self,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Pubkey, Account)>, ClientError> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        let accounts = self.accounts.lock();
        Ok(accounts
            .iter()
            .filter(|(_, account)| account.owner == hope_rise_client::ID)
            .filter(|(_, account)| filters.iter().all(|f| f.matches(&account.data)))
            .map(|(address, account)| (*address, account.clone()))
            .collect())
    }

    async fn latest_blockhash(&self) -> Result<Hash, ClientError> {
        Ok(Hash::default())
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, ClientError> {
        if let Some((code, message)) = self.fail_next.lock().take() {
            return Err(ClientError::Submission { code, message });
        }
        let message = &transaction.message;
        for instruction in &message.instructions {
            let program_id = message.account_keys[instruction.program_id_index as usize];
            let keys: Vec<Pubkey> = instruction
                .accounts
                .iter()
                .map(|index| message.account_keys[*index as usize])
                .collect();
            self.execute(program_id, &keys, &instruction.data)?;
        }
        Ok(Signature::new_unique())
    }
}

/// A campaign account with sensible defaults for seeding fixtures.
pub fn campaign_fixture(creator: Pubkey, campaign_id: u64) -> Campaign {
    Campaign {
        campaign_id,
        creator,
        title: format!("Campaign #{campaign_id}"),
        short_description: "Fixture".into(),
        category: Category::Community,
        cover_image_url: "ipfs://QmCover".into(),
        story_url: "ipfs://QmStory".into(),
        funding_goal: 60_000_000_000,
        deadline: EPOCH + 30 * SECONDS_PER_DAY,
        amount_raised: 0,
        backer_count: 0,
        is_active: true,
        created_at: EPOCH,
        milestone_count: 0,
        bump: 254,
    }
}

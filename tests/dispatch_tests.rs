mod common;

use std::sync::Arc;

use anchor_lang::prelude::Pubkey;
use solana_sdk::signature::Keypair;
use spl_associated_token_account::get_associated_token_address;

use hope_rise_client::cache::CampaignStore;
use hope_rise_client::dispatch::{CampaignWriter, CreateCampaignParams};
use hope_rise_client::errors::ClientError;
use hope_rise_client::pda;
use hope_rise_client::query::CampaignReader;
use hope_rise_client::state::Category;

use common::MockLedger;

struct Harness {
    ledger: Arc<MockLedger>,
    reader: CampaignReader,
    writer: CampaignWriter,
    usdc_mint: Pubkey,
}

fn harness() -> Harness {
    let ledger = Arc::new(MockLedger::new());
    let store = Arc::new(CampaignStore::with_defaults());
    let usdc_mint = Pubkey::new_unique();
    let signer = Arc::new(Keypair::new());
    Harness {
        ledger: ledger.clone(),
        reader: CampaignReader::new(ledger.clone(), store.clone()),
        writer: CampaignWriter::new(ledger, store, signer, usdc_mint),
        usdc_mint,
    }
}

fn create_params() -> CreateCampaignParams {
    CreateCampaignParams {
        title: "Reforest the valley".into(),
        short_description: "Ten thousand native trees".into(),
        category: Category::Environment,
        cover_image_url: "ipfs://QmCover".into(),
        story_url: "ipfs://QmStory".into(),
        funding_goal: 60_000_000_000,
        duration_days: 30,
    }
}

#[tokio::test]
async fn create_campaign_initializes_the_counter_on_first_use() {
    let h = harness();
    assert!(!h.reader.is_initialized().await.unwrap());

    let (_, campaign) = h.writer.create_campaign(create_params()).await.unwrap();
    assert!(h.reader.is_initialized().await.unwrap());

    // The campaign sits at the address derived from (creator, 0).
    let (expected, _) = pda::campaign_address(&h.writer.authority(), 0);
    assert_eq!(campaign, expected);

    let record = h.reader.get_campaign(&campaign).await.unwrap().unwrap();
    assert_eq!(record.campaign_id, 0);
    assert_eq!(record.creator, h.writer.authority());
    assert!(record.is_active);
}

#[tokio::test]
async fn sequential_creations_take_sequential_ids() {
    let h = harness();
    let (_, first) = h.writer.create_campaign(create_params()).await.unwrap();
    let (_, second) = h.writer.create_campaign(create_params()).await.unwrap();
    assert_ne!(first, second);

    let (expected_second, _) = pda::campaign_address(&h.writer.authority(), 1);
    assert_eq!(second, expected_second);
}

#[tokio::test]
async fn funding_twice_accumulates_into_one_record() {
    let h = harness();
    let (_, campaign) = h.writer.create_campaign(create_params()).await.unwrap();

    h.writer.fund_campaign(&campaign, 5_000_000).await.unwrap();
    let first_seen_at = h
        .ledger
        .read_contribution(&pda::contribution_address(&campaign, &h.writer.authority()).0)
        .contributed_at;

    h.ledger.advance_clock(3_600);
    h.writer.fund_campaign(&campaign, 7_000_000).await.unwrap();

    let (contribution_address, _) =
        pda::contribution_address(&campaign, &h.writer.authority());
    let contribution = h.ledger.read_contribution(&contribution_address);
    assert_eq!(contribution.amount, 12_000_000);
    // First-contribution timestamp survives the top-up.
    assert_eq!(contribution.contributed_at, first_seen_at);

    let record = h.reader.get_campaign(&campaign).await.unwrap().unwrap();
    assert_eq!(record.amount_raised, 12_000_000);
    assert_eq!(record.backer_count, 1);

    let contributions = h.reader.list_contributions(&campaign).await.unwrap();
    assert_eq!(contributions.len(), 1);
}

#[tokio::test]
async fn funding_creates_the_token_account_when_missing() {
    let h = harness();
    let (_, campaign) = h.writer.create_campaign(create_params()).await.unwrap();

    let ata = get_associated_token_address(&h.writer.authority(), &h.usdc_mint);
    assert!(!h.ledger.contains(&ata));

    h.writer.fund_campaign(&campaign, 1_000_000).await.unwrap();
    assert!(h.ledger.contains(&ata));
}

#[tokio::test]
async fn a_read_after_funding_sees_the_new_total() {
    let h = harness();
    let (_, campaign) = h.writer.create_campaign(create_params()).await.unwrap();

    // Prime the cache with the pre-mutation snapshot.
    let before = h.reader.get_campaign(&campaign).await.unwrap().unwrap();
    assert_eq!(before.amount_raised, 0);

    h.writer.fund_campaign(&campaign, 9_000_000).await.unwrap();

    // The mutation invalidated the detail entry, so this refetches
    // instead of serving the stale snapshot.
    let after = h.reader.get_campaign(&campaign).await.unwrap().unwrap();
    assert_eq!(after.amount_raised, before.amount_raised + 9_000_000);
}

#[tokio::test]
async fn zero_amount_contributions_are_rejected_locally() {
    let h = harness();
    let (_, campaign) = h.writer.create_campaign(create_params()).await.unwrap();
    let result = h.writer.fund_campaign(&campaign, 0).await;
    assert!(matches!(result, Err(ClientError::InvalidInput(_))));
}

#[tokio::test]
async fn close_campaign_is_visible_after_invalidation() {
    let h = harness();
    let (_, campaign) = h.writer.create_campaign(create_params()).await.unwrap();
    assert!(h.reader.get_campaign(&campaign).await.unwrap().unwrap().is_active);

    h.writer.close_campaign(&campaign).await.unwrap();
    assert!(!h.reader.get_campaign(&campaign).await.unwrap().unwrap().is_active);
}

#[tokio::test]
async fn milestones_are_added_and_completed_in_order() {
    let h = harness();
    let (_, campaign) = h.writer.create_campaign(create_params()).await.unwrap();

    h.writer
        .add_milestone(&campaign, 0, "First borehole".into(), 10_000_000_000)
        .await
        .unwrap();
    h.writer
        .add_milestone(&campaign, 1, "Second borehole".into(), 25_000_000_000)
        .await
        .unwrap();

    let milestones = h.reader.list_milestones(&campaign).await.unwrap();
    assert_eq!(milestones.len(), 2);
    assert_eq!(milestones[0].milestone_index, 0);
    assert!(!milestones[0].is_completed);

    h.writer
        .complete_milestone(&campaign, &milestones[0].address)
        .await
        .unwrap();
    let milestones = h.reader.list_milestones(&campaign).await.unwrap();
    assert!(milestones[0].is_completed);
    assert!(!milestones[1].is_completed);
}

#[tokio::test]
async fn milestone_index_past_the_cap_fails_before_submission() {
    let h = harness();
    let (_, campaign) = h.writer.create_campaign(create_params()).await.unwrap();
    let result = h
        .writer
        .add_milestone(&campaign, 10, "Too many".into(), 1_000_000)
        .await;
    assert!(matches!(result, Err(ClientError::InvalidInput(_))));
}

#[tokio::test]
async fn refund_can_only_be_claimed_once() {
    let h = harness();
    let (_, campaign) = h.writer.create_campaign(create_params()).await.unwrap();
    h.writer.fund_campaign(&campaign, 2_000_000).await.unwrap();
    h.writer.close_campaign(&campaign).await.unwrap();

    h.writer.claim_refund(&campaign).await.unwrap();
    let again = h.writer.claim_refund(&campaign).await;
    assert!(matches!(again, Err(ClientError::RefundAlreadyClaimed(_))));
}

#[tokio::test]
async fn program_rejections_surface_as_typed_errors() {
    let h = harness();
    let (_, campaign) = h.writer.create_campaign(create_params()).await.unwrap();

    h.ledger.fail_next_submission(6006);
    let result = h.writer.withdraw_funds(&campaign).await;
    match result {
        Err(ClientError::GoalNotMet(message)) => {
            assert_eq!(message, "Funding goal was not met");
        }
        other => panic!("expected GoalNotMet, got {other:?}"),
    }

    h.ledger.fail_next_submission(6000);
    let result = h.writer.close_campaign(&campaign).await;
    assert!(matches!(result, Err(ClientError::Unauthorized(_))));
}

#[tokio::test]
async fn failed_submissions_leave_the_cached_snapshot_alone() {
    let h = harness();
    let (_, campaign) = h.writer.create_campaign(create_params()).await.unwrap();
    h.writer.fund_campaign(&campaign, 3_000_000).await.unwrap();

    let before = h.reader.get_campaign(&campaign).await.unwrap().unwrap();

    h.ledger.fail_next_submission(6001);
    assert!(h.writer.fund_campaign(&campaign, 1_000_000).await.is_err());

    // No invalidation happened, so the follow-up read is a cache hit
    // with the pre-failure value.
    let fetches_before_read = h.ledger.fetches.load(std::sync::atomic::Ordering::SeqCst);
    let after = h.reader.get_campaign(&campaign).await.unwrap().unwrap();
    assert_eq!(after.amount_raised, before.amount_raised);
    let fetches_after_read = h.ledger.fetches.load(std::sync::atomic::Ordering::SeqCst);
    assert_eq!(fetches_after_read, fetches_before_read);
}

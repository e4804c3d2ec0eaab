use custody_primitives::{AssetType, Direction};
use pretty_assertions::assert_eq;

use super::*;
use crate::ledger::LedgerExt;

fn et() -> AssetType {
	AssetType::new("custodian", "ET", true)
}

fn account(owner: &str) -> AssetAccount {
	AssetAccount {
		asset_type: et(),
		owner: Party::new(owner),
		airdroppable: false,
		resharable: true,
	}
}

fn holding(owner: &str, amount: i64) -> AssetHolding {
	AssetHolding {
		asset_type: et(),
		owner: Party::new(owner),
		amount: Decimal::new(amount, 0),
	}
}

fn seeded() -> (MemoryLedger, ContractId, ContractId) {
	let ledger = MemoryLedger::new();
	let alice = ledger.create(account("alice"), vec![Party::new("alice")]).unwrap();
	let bob = ledger.create(account("bob"), vec![Party::new("bob")]).unwrap();
	ledger.create(holding("alice", 10), vec![Party::new("alice")]).unwrap();
	ledger.create(holding("alice", 15), vec![Party::new("alice")]).unwrap();
	(ledger, alice, bob)
}

async fn balance(ledger: &MemoryLedger, owner: &str) -> Decimal {
	ledger
		.query_as::<AssetHolding>(&Filter::owned(&Party::new(owner), &et().identity()))
		.await
		.unwrap()
		.iter()
		.map(|holding| holding.payload.amount)
		.sum()
}

#[tokio::test]
async fn send_then_accept_moves_the_amount() {
	let (ledger, alice, bob) = seeded();
	let sent = ledger
		.exercise(templates::ASSET_ACCOUNT, &alice, Choice::Send, args::send(&Party::new("bob"), Decimal::new(20, 0)))
		.await
		.unwrap();
	assert_eq!(balance(&ledger, "alice").await, Decimal::new(5, 0));

	let transfers = ledger
		.query_as::<PendingTransfer>(&Filter::transfers(&Party::new("bob"), Direction::Inbound))
		.await
		.unwrap();
	assert_eq!(transfers.len(), 1);
	assert_eq!(Some(&transfers[0].contract_id), sent.created.last());

	let accepted = ledger
		.exercise(templates::ASSET_TRANSFER, &transfers[0].contract_id, Choice::Accept, args::accept_transfer(&bob))
		.await
		.unwrap();
	assert_eq!(accepted.archived.as_ref(), Some(&transfers[0].contract_id));
	assert_eq!(balance(&ledger, "bob").await, Decimal::new(20, 0));
	assert_eq!(ledger.count(templates::ASSET_TRANSFER), 0);
}

#[tokio::test]
async fn archived_transfer_cannot_be_exercised_twice() {
	let (ledger, alice, _) = seeded();
	let sent = ledger
		.exercise(templates::ASSET_ACCOUNT, &alice, Choice::Send, args::send(&Party::new("bob"), Decimal::new(5, 0)))
		.await
		.unwrap();
	let transfer = sent.created.last().unwrap().clone();
	ledger.exercise(templates::ASSET_TRANSFER, &transfer, Choice::Cancel, args::none()).await.unwrap();
	assert_eq!(balance(&ledger, "alice").await, Decimal::new(25, 0));

	let again = ledger.exercise(templates::ASSET_TRANSFER, &transfer, Choice::Cancel, args::none()).await;
	assert!(matches!(again, Err(LedgerError::Archived(id)) if id == transfer));
	assert!(ledger.fetch(templates::ASSET_TRANSFER, &transfer).await.unwrap().is_none());
}

#[tokio::test]
async fn send_rejects_overdraft_without_side_effects() {
	let (ledger, alice, _) = seeded();
	let before = ledger.snapshot();
	let result = ledger
		.exercise(templates::ASSET_ACCOUNT, &alice, Choice::Send, args::send(&Party::new("bob"), Decimal::new(26, 0)))
		.await;
	assert!(matches!(result, Err(LedgerError::Rejected { choice: Choice::Send, .. })));
	assert_eq!(ledger.snapshot(), before);
}

#[tokio::test]
async fn send_rejects_holdings_that_overflow_the_total() {
	let (ledger, alice, _) = seeded();
	for _ in 0..2 {
		let huge = AssetHolding {
			amount: Decimal::MAX,
			..holding("alice", 0)
		};
		ledger.create(huge, vec![Party::new("alice")]).unwrap();
	}
	let before = ledger.snapshot();
	let result = ledger
		.exercise(templates::ASSET_ACCOUNT, &alice, Choice::Send, args::send(&Party::new("bob"), Decimal::ONE))
		.await;
	assert!(matches!(&result, Err(LedgerError::Rejected { reason, .. }) if reason == "amount overflow"), "{result:?}");
	assert_eq!(ledger.snapshot(), before);
}

#[tokio::test]
async fn accept_requires_recipient_account() {
	let (ledger, alice, _) = seeded();
	let sent = ledger
		.exercise(templates::ASSET_ACCOUNT, &alice, Choice::Send, args::send(&Party::new("bob"), Decimal::ONE))
		.await
		.unwrap();
	let transfer = sent.created.last().unwrap().clone();
	let wrong_owner = ledger
		.exercise(templates::ASSET_TRANSFER, &transfer, Choice::Accept, args::accept_transfer(&alice))
		.await;
	assert!(matches!(wrong_owner, Err(LedgerError::Rejected { .. })));
	assert!(ledger.fetch(templates::ASSET_TRANSFER, &transfer).await.unwrap().is_some());
}

#[tokio::test]
async fn injected_rejection_is_consumed_once() {
	let (ledger, alice, _) = seeded();
	ledger.reject_next("authorization failure");
	let invite = args::invite(&Party::new("carol"));
	let first = ledger.exercise(templates::ASSET_ACCOUNT, &alice, Choice::Invite, invite.clone()).await;
	assert!(matches!(&first, Err(LedgerError::Rejected { reason, .. }) if reason == "authorization failure"));
	let second = ledger.exercise(templates::ASSET_ACCOUNT, &alice, Choice::Invite, invite).await.unwrap();
	let proposal = ledger.fetch_as::<PendingAccountInvite>(&second.created[0]).await.unwrap().unwrap();
	assert_eq!(proposal.payload.recipient, Party::new("carol"));
	assert_eq!(proposal.sender(), Some(&Party::new("alice")));
}

#[tokio::test]
async fn snapshot_round_trips_through_json() {
	let (ledger, _, _) = seeded();
	let json = serde_json::to_string(&ledger.snapshot()).unwrap();
	let restored = MemoryLedger::from_snapshot(serde_json::from_str(&json).unwrap());
	assert_eq!(restored.snapshot(), ledger.snapshot());
	assert_eq!(balance(&restored, "alice").await, Decimal::new(25, 0));
}

#[tokio::test]
async fn undefined_choice_is_rejected() {
	let (ledger, alice, _) = seeded();
	let result = ledger.exercise(templates::ASSET_ACCOUNT, &alice, Choice::Accept, args::none()).await;
	assert!(matches!(result, Err(LedgerError::Rejected { choice: Choice::Accept, .. })));
}

use async_trait::async_trait;
use custody_ledger::{Choice, ExerciseResult, Filter, LedgerExt, MemoryLedger, RawContract};
use custody_params::{AssetParams, PendingInviteParams, PendingTransferParams, RouteParams};
use custody_primitives::{
	AssetAccount, AssetHolding, AssetType, Contract, ContractId, Decimal, Direction, Party, PendingAccountInvite,
	PendingTransfer, TemplateId,
};
use pretty_assertions::assert_eq;
use serde_json::Value;

use super::*;

fn bond() -> AssetType {
	AssetType::new("custodian", "Bond RTL", true)
}

fn party(name: &str) -> Party {
	Party::new(name)
}

fn account(owner: &str) -> AssetAccount {
	AssetAccount {
		asset_type: bond(),
		owner: party(owner),
		airdroppable: false,
		resharable: true,
	}
}

fn holding(owner: &str, amount: i64) -> AssetHolding {
	AssetHolding {
		asset_type: bond(),
		owner: party(owner),
		amount: Decimal::new(amount, 0),
	}
}

struct Fixture {
	ledger: MemoryLedger,
	transfer: Contract<PendingTransfer>,
}

/// Alice has sent bob 50; bob holds an account for the asset.
fn fixture() -> Fixture {
	let ledger = MemoryLedger::new();
	ledger.create(account("alice"), vec![party("alice")]).unwrap();
	ledger.create(account("bob"), vec![party("bob")]).unwrap();
	let payload = PendingTransfer {
		asset: holding("alice", 50),
		recipient: party("bob"),
	};
	let id = ledger.create(payload.clone(), vec![party("alice")]).unwrap();
	Fixture {
		ledger,
		transfer: Contract::new(id, payload),
	}
}

fn transfer_query(transfer: &Contract<PendingTransfer>, direction: Direction) -> String {
	custody_params::encode(&PendingTransferParams::for_transfer(transfer, direction).to_params())
}

async fn opened(ledger: &MemoryLedger, transfer: &Contract<PendingTransfer>, viewer: &str) -> PendingTransferPage {
	let direction = transfer.payload.direction_for(&party(viewer));
	let mut page = PendingTransferPage::open(&transfer_query(transfer, direction), party(viewer));
	assert_eq!(page.phase(), Phase::Decoding);
	page.refresh(ledger).await;
	page
}

#[tokio::test]
async fn inbound_transfer_offers_accept_and_reject() {
	let Fixture { ledger, transfer } = fixture();
	let page = opened(&ledger, &transfer, "bob").await;

	assert_eq!(page.phase(), Phase::Ready);
	assert_eq!(page.title(), "Inbound Send Request");
	assert_eq!(page.available_actions(), [Action::Accept, Action::Reject]);
	let view = page.view().unwrap();
	assert_eq!(view.counterparty_label(), "From:");
	assert_eq!(view.counterparty(), &party("alice"));
	assert_eq!(view.amount_text(), "50");
	assert_eq!(view.notice(), None);
}

#[tokio::test]
async fn outbound_transfer_offers_cancel_only() {
	let Fixture { ledger, transfer } = fixture();
	let page = opened(&ledger, &transfer, "alice").await;

	assert_eq!(page.title(), "Outbound Send Request");
	assert_eq!(page.available_actions(), [Action::Cancel]);
	assert_eq!(page.view().unwrap().counterparty_label(), "To:");
}

#[tokio::test]
async fn receiver_without_account_sees_notice_and_no_actions() {
	let ledger = MemoryLedger::new();
	let payload = PendingTransfer {
		asset: holding("alice", 5),
		recipient: party("carol"),
	};
	let id = ledger.create(payload.clone(), vec![party("alice")]).unwrap();
	let mut page = opened(&ledger, &Contract::new(id, payload), "carol").await;

	assert_eq!(page.phase(), Phase::Ready);
	assert_eq!(page.view().unwrap().notice(), Some(NO_ACCOUNT_NOTICE));
	assert!(page.available_actions().is_empty());
	assert!(matches!(page.begin_action(ActionRequest::Accept), Err(ActionError::Unavailable(Action::Accept))));
}

#[tokio::test]
async fn unknown_contract_renders_missing_without_actions() {
	let ledger = MemoryLedger::new();
	let mut page = PendingTransferPage::open("?contractId=%2399%3A0&isInbound=true", party("bob"));
	assert_eq!(page.refresh(&ledger).await, Phase::Missing);

	assert_eq!(page.view(), None);
	assert!(page.available_actions().is_empty());
	for request in [ActionRequest::Accept, ActionRequest::Reject, ActionRequest::Cancel] {
		assert!(matches!(page.begin_action(request), Err(ActionError::Unavailable(_))));
	}
	assert_eq!(page.phase(), Phase::Missing);
}

#[tokio::test]
async fn rejection_returns_to_ready_and_allows_retry() {
	let Fixture { ledger, transfer } = fixture();
	let mut page = opened(&ledger, &transfer, "bob").await;

	ledger.reject_next("authorization failed");
	let refused = page.act(&ledger, ActionRequest::Accept).await;
	assert!(matches!(&refused, Err(error) if error.is_rejection()));
	assert_eq!(page.phase(), Phase::Ready);
	assert!(page.alert().is_some_and(|alert| alert.contains("authorization failed")));
	assert_eq!(page.available_actions(), [Action::Accept, Action::Reject]);
	assert_eq!(ledger.count(custody_primitives::templates::ASSET_TRANSFER), 1);

	let settled = page.act(&ledger, ActionRequest::Accept).await.unwrap();
	assert_eq!(settled.exercised.choice, Choice::Accept);
	assert_eq!(settled.exercised.target, transfer.contract_id);
	// The accepted transfer is archived, so the follow-up read finds nothing.
	assert_eq!(settled.phase, Phase::Missing);
	assert_eq!(page.alert(), None);
}

#[tokio::test]
async fn accepting_a_cancelled_transfer_lands_on_missing() {
	let Fixture { ledger, transfer } = fixture();
	let mut receiver = opened(&ledger, &transfer, "bob").await;
	let mut sender = opened(&ledger, &transfer, "alice").await;

	let cancelled = sender.act(&ledger, ActionRequest::Cancel).await.unwrap();
	assert_eq!(cancelled.phase, Phase::Missing);

	// The receiver's page still shows the transfer it read before the cancel.
	assert_eq!(receiver.phase(), Phase::Ready);
	let error = receiver.act(&ledger, ActionRequest::Accept).await.unwrap_err();
	assert!(error.is_stale());
	assert!(!error.is_rejection());
	assert_eq!(receiver.phase(), Phase::Missing);
	assert_eq!(receiver.view(), None);
	assert!(receiver.available_actions().is_empty());
	assert!(matches!(
		receiver.act(&ledger, ActionRequest::Accept).await,
		Err(ActionError::Unavailable(Action::Accept))
	));
}

#[tokio::test]
async fn stale_target_hands_back_a_reread() {
	let Fixture { ledger, transfer } = fixture();
	let mut page = opened(&ledger, &transfer, "bob").await;
	ledger
		.exercise(
			custody_primitives::templates::ASSET_TRANSFER,
			&transfer.contract_id,
			Choice::Reject,
			Value::Null,
		)
		.await
		.unwrap();

	let ticket = page.begin_action(ActionRequest::Reject).unwrap();
	let outcome = ticket.dispatch(&ledger).await;
	let Err(Refused { error, reread }) = page.finish_action(outcome) else {
		panic!("dispatch on an archived transfer must be refused");
	};
	assert!(error.is_stale());
	assert_eq!(page.phase(), Phase::Refreshing);
	let loaded = reread.unwrap().load(&ledger).await;
	assert!(page.apply(loaded));
	assert_eq!(page.phase(), Phase::Missing);
}

#[tokio::test]
async fn ledger_refusal_hands_back_no_reread() {
	let Fixture { ledger, transfer } = fixture();
	let mut page = opened(&ledger, &transfer, "bob").await;
	ledger.reject_next("authorization failed");

	let ticket = page.begin_action(ActionRequest::Accept).unwrap();
	let outcome = ticket.dispatch(&ledger).await;
	let Err(Refused { error, reread }) = page.finish_action(outcome) else {
		panic!("injected rejection must refuse the dispatch");
	};
	assert!(error.is_rejection());
	assert!(reread.is_none());
	assert_eq!(page.phase(), Phase::Ready);
}

#[tokio::test]
async fn bystander_is_offered_nothing() {
	let Fixture { ledger, transfer } = fixture();
	let page = opened(&ledger, &transfer, "carol").await;

	assert_eq!(page.phase(), Phase::Ready);
	assert!(page.available_actions().is_empty());

	let payload = PendingAccountInvite {
		account: account("dave"),
		recipient: party("dave"),
	};
	let id = ledger.create(payload.clone(), vec![party("custodian")]).unwrap();
	let invite = Contract::new(id, payload).with_signatories(vec![party("custodian")]);
	let query = custody_params::encode(&PendingInviteParams::for_invite(&invite, Direction::Outbound).to_params());
	let mut page = PendingInvitePage::open(&query, party("carol"));
	assert_eq!(page.refresh(&ledger).await, Phase::Ready);
	assert!(page.available_actions().is_empty());
}

#[tokio::test]
async fn acting_blocks_a_second_action() {
	let Fixture { ledger, transfer } = fixture();
	let mut page = opened(&ledger, &transfer, "bob").await;

	let ticket = page.begin_action(ActionRequest::Reject).unwrap();
	assert_eq!(page.phase(), Phase::Acting(Action::Reject));
	assert!(page.available_actions().is_empty());
	assert!(matches!(page.begin_action(ActionRequest::Accept), Err(ActionError::Unavailable(Action::Accept))));

	let outcome = ticket.dispatch(&ledger).await;
	let (exercised, reread) = page.finish_action(outcome).unwrap();
	assert_eq!(exercised.choice, Choice::Reject);
	assert_eq!(page.phase(), Phase::Refreshing);
	let loaded = reread.load(&ledger).await;
	assert!(page.apply(loaded));
	assert_eq!(page.phase(), Phase::Missing);
}

#[tokio::test]
async fn read_after_unmount_is_a_no_op() {
	let Fixture { ledger, transfer } = fixture();
	let mut page = PendingTransferPage::open(&transfer_query(&transfer, Direction::Inbound), party("bob"));

	let ticket = page.begin_refresh();
	page.unmount();
	let loaded = ticket.load(&ledger).await;
	assert!(matches!(loaded.outcome, ReadOutcome::Abandoned));
	assert!(!page.apply(loaded));
	assert_eq!(page.view(), None);
	assert!(!page.is_mounted());
}

#[tokio::test]
async fn completed_read_applied_after_unmount_is_dropped() {
	let Fixture { ledger, transfer } = fixture();
	let mut page = PendingTransferPage::open(&transfer_query(&transfer, Direction::Inbound), party("bob"));

	let loaded = page.begin_refresh().load(&ledger).await;
	assert!(matches!(loaded.outcome, ReadOutcome::Found(_)));
	page.unmount();
	assert!(!page.apply(loaded));
	assert_eq!(page.view(), None);
}

#[tokio::test]
async fn only_the_latest_generation_applies() {
	let Fixture { ledger, transfer } = fixture();
	let mut page = PendingTransferPage::open(&transfer_query(&transfer, Direction::Inbound), party("bob"));

	let stale = page.begin_refresh().load(&ledger).await;
	let fresh = page.begin_refresh();
	assert!(fresh.generation() > stale.generation);
	assert!(!page.apply(stale));
	assert_eq!(page.phase(), Phase::Refreshing);

	let fresh = fresh.load(&ledger).await;
	assert!(page.apply(fresh));
	assert_eq!(page.phase(), Phase::Ready);
}

#[tokio::test]
async fn superseded_ticket_is_abandoned() {
	let Fixture { ledger, transfer } = fixture();
	let mut page = PendingTransferPage::open(&transfer_query(&transfer, Direction::Inbound), party("bob"));

	let first = page.begin_refresh();
	let _second = page.begin_refresh();
	assert!(matches!(first.load(&ledger).await.outcome, ReadOutcome::Abandoned));
}

struct Unreachable;

#[async_trait]
impl Ledger for Unreachable {
	async fn query(&self, _: TemplateId, _: &Filter) -> custody_ledger::Result<Vec<RawContract>> {
		Err(LedgerError::Unavailable("connection refused".into()))
	}

	async fn fetch(&self, _: TemplateId, _: &ContractId) -> custody_ledger::Result<Option<RawContract>> {
		Err(LedgerError::Unavailable("connection refused".into()))
	}

	async fn exercise(&self, _: TemplateId, _: &ContractId, _: Choice, _: Value) -> custody_ledger::Result<ExerciseResult> {
		Err(LedgerError::Unavailable("connection refused".into()))
	}
}

#[tokio::test]
async fn failed_read_surfaces_an_alert() {
	let mut page = PendingTransferPage::open("?contractId=%233%3A0", party("bob"));
	assert_eq!(page.refresh(&Unreachable).await, Phase::Failed);
	assert!(page.alert().is_some_and(|alert| alert.contains("connection refused")));
	assert!(page.available_actions().is_empty());

	let ledger = fixture().ledger;
	assert_eq!(page.refresh(&ledger).await, Phase::Ready);
	assert_eq!(page.alert(), None);
}

#[tokio::test]
async fn invite_page_accept_opens_an_account() {
	let ledger = MemoryLedger::new();
	let payload = PendingAccountInvite {
		account: account("dave"),
		recipient: party("dave"),
	};
	let id = ledger.create(payload.clone(), vec![party("custodian")]).unwrap();
	let invite = Contract::new(id, payload).with_signatories(vec![party("custodian")]);
	let query = custody_params::encode(&PendingInviteParams::for_invite(&invite, Direction::Inbound).to_params());

	let mut page = PendingInvitePage::open(&query, party("dave"));
	page.refresh(&ledger).await;
	assert_eq!(page.title(), "Inbound Account Invite");
	assert_eq!(page.view().unwrap().sender(), Some(&party("custodian")));
	assert_eq!(page.available_actions(), [Action::Accept, Action::Reject]);

	let settled = page.act(&ledger, ActionRequest::Accept).await.unwrap();
	assert_eq!(settled.phase, Phase::Missing);
	let opened = ledger
		.fetch_by_key::<AssetAccount>(&Filter::owned(&party("dave"), &bond().identity()))
		.await
		.unwrap();
	assert!(opened.is_some());
}

#[tokio::test]
async fn outbound_invite_offers_cancel() {
	let ledger = MemoryLedger::new();
	let payload = PendingAccountInvite {
		account: account("dave"),
		recipient: party("dave"),
	};
	let id = ledger.create(payload.clone(), vec![party("custodian")]).unwrap();
	let invite = Contract::new(id, payload).with_signatories(vec![party("custodian")]);
	let query = custody_params::encode(&PendingInviteParams::for_invite(&invite, Direction::Outbound).to_params());

	let mut page = PendingInvitePage::open(&query, party("custodian"));
	page.refresh(&ledger).await;
	assert_eq!(page.title(), "Outbound Account Invite");
	assert_eq!(page.available_actions(), [Action::Cancel]);
	assert_eq!(page.view().unwrap().counterparty(), Some(&party("dave")));
}

/// Seeds alice's account and returns the query its list row links to.
fn send_query(ledger: &MemoryLedger) -> String {
	let id = ledger.create(account("alice"), vec![party("alice")]).unwrap();
	let row = Contract::new(id, account("alice"));
	custody_params::encode(&AssetParams::for_account(&row).to_params())
}

#[tokio::test]
async fn send_page_resolves_by_key_and_rereads_balance() {
	let ledger = MemoryLedger::new();
	let query = send_query(&ledger);
	ledger.create(holding("alice", 10), vec![party("alice")]).unwrap();
	ledger.create(holding("alice", 15), vec![party("alice")]).unwrap();

	let mut page = AccountActionPage::open_send(&query);
	page.refresh(&ledger).await;
	assert_eq!(page.title(), "Send");
	assert_eq!(page.view().unwrap().balance_text(), "25");
	assert_eq!(page.available_actions(), [Action::Send]);

	let request = ActionRequest::Send {
		recipient: party("bob"),
		amount: Decimal::new(20, 0),
	};
	let settled = page.act(&ledger, request).await.unwrap();
	assert_eq!(settled.phase, Phase::Ready);
	assert_eq!(page.view().unwrap().balance, Decimal::new(5, 0));
}

#[tokio::test]
async fn send_page_ignores_a_stale_contract_id() {
	let ledger = MemoryLedger::new();
	ledger.create(account("alice"), vec![party("alice")]).unwrap();
	let mut params = AssetParams::for_account(&Contract::new("#0:0", account("alice")));
	params.contract_id = ContractId::new("#404:0");

	let mut page = AccountActionPage::open_send(&custody_params::encode(&params.to_params()));
	assert_eq!(page.refresh(&ledger).await, Phase::Ready);
	assert_ne!(page.view().unwrap().account.id(), &params.contract_id);
}

#[tokio::test]
async fn overdraft_is_refused_and_page_stays_ready() {
	let ledger = MemoryLedger::new();
	let query = send_query(&ledger);
	ledger.create(holding("alice", 3), vec![party("alice")]).unwrap();

	let mut page = AccountActionPage::open_send(&query);
	page.refresh(&ledger).await;
	let request = ActionRequest::Send {
		recipient: party("bob"),
		amount: Decimal::new(4, 0),
	};
	assert!(page.act(&ledger, request).await.is_err());
	assert_eq!(page.phase(), Phase::Ready);
	assert!(page.alert().is_some());
	assert_eq!(page.available_actions(), [Action::Send]);
}

#[tokio::test]
async fn invite_page_rejects_a_send_request() {
	let ledger = MemoryLedger::new();
	let query = send_query(&ledger);
	let mut page = AccountActionPage::open_invite(&query);
	page.refresh(&ledger).await;
	assert_eq!(page.title(), "Invite");
	let request = ActionRequest::Send {
		recipient: party("bob"),
		amount: Decimal::ONE,
	};
	assert!(matches!(page.begin_action(request), Err(ActionError::Unavailable(Action::Send))));
	assert_eq!(page.phase(), Phase::Ready);

	let settled = page
		.act(&ledger, ActionRequest::Invite { recipient: party("erin") })
		.await
		.unwrap();
	assert_eq!(settled.exercised.result.created.len(), 1);
	assert_eq!(ledger.count(custody_primitives::templates::ACCOUNT_INVITE), 1);
}

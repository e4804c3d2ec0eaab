//! In-process ledger.
//!
//! Implements the custody choices closely enough to drive every page: accepted
//! transfers become holdings of the receiver, rejected or cancelled transfers
//! return the holding to the sender, sends lock part of the sender's holdings
//! into a pending transfer, invites create account proposals.

use std::collections::VecDeque;

use async_trait::async_trait;
use custody_primitives::{
	AssetAccount, AssetHolding, Contract, ContractId, Decimal, Party, PendingAccountInvite, PendingTransfer, Template,
	TemplateId, templates,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::choice::{Choice, args};
use crate::error::{LedgerError, Result};
use crate::filter::Filter;
use crate::ledger::{ExerciseResult, Ledger, RawContract, encode};

/// Serializable state of a [`MemoryLedger`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySnapshot {
	#[serde(default)]
	pub next_id: u64,
	#[serde(default)]
	pub contracts: Vec<StoredContract>,
}

/// One active contract with its template name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredContract {
	pub template: String,
	#[serde(flatten)]
	pub contract: RawContract,
}

#[derive(Debug, Default)]
struct State {
	snapshot: MemorySnapshot,
	rejections: VecDeque<String>,
}

impl State {
	fn next_id(&mut self) -> ContractId {
		self.snapshot.next_id += 1;
		ContractId::new(format!("#{}:0", self.snapshot.next_id))
	}

	fn position(&self, template: TemplateId, id: &ContractId) -> Option<usize> {
		self.snapshot
			.contracts
			.iter()
			.position(|stored| stored.template == template.as_str() && &stored.contract.contract_id == id)
	}

	fn get<T: Template>(&self, id: &ContractId) -> Option<Contract<T>> {
		let at = self.position(T::ID, id)?;
		let raw = &self.snapshot.contracts[at].contract;
		let payload = serde_json::from_value(raw.payload.clone()).ok()?;
		Some(Contract {
			contract_id: raw.contract_id.clone(),
			payload,
			signatories: raw.signatories.clone(),
		})
	}

	fn archive(&mut self, template: TemplateId, id: &ContractId) -> Option<StoredContract> {
		let at = self.position(template, id)?;
		Some(self.snapshot.contracts.remove(at))
	}

	fn create<T: Template>(&mut self, payload: T, signatories: Vec<Party>) -> Result<ContractId> {
		let contract_id = self.next_id();
		let contract = Contract {
			contract_id: contract_id.clone(),
			payload,
			signatories,
		};
		self.snapshot.contracts.push(StoredContract {
			template: T::ID.as_str().to_string(),
			contract: encode(&contract)?,
		});
		Ok(contract_id)
	}
}

/// A [`Ledger`] held in memory.
///
/// State is guarded by a mutex that is never held across an await point.
#[derive(Debug, Default)]
pub struct MemoryLedger {
	state: Mutex<State>,
}

impl MemoryLedger {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_snapshot(snapshot: MemorySnapshot) -> Self {
		Self {
			state: Mutex::new(State {
				snapshot,
				rejections: VecDeque::new(),
			}),
		}
	}

	pub fn snapshot(&self) -> MemorySnapshot {
		self.state.lock().snapshot.clone()
	}

	/// Creates a contract directly, bypassing choices. Used for seeding.
	pub fn create<T: Template>(&self, payload: T, signatories: Vec<Party>) -> Result<ContractId> {
		self.state.lock().create(payload, signatories)
	}

	/// Makes the next exercise fail with `reason`, regardless of its target.
	pub fn reject_next(&self, reason: impl Into<String>) {
		self.state.lock().rejections.push_back(reason.into());
	}

	/// Number of active contracts of `template`.
	pub fn count(&self, template: TemplateId) -> usize {
		self.state
			.lock()
			.snapshot
			.contracts
			.iter()
			.filter(|stored| stored.template == template.as_str())
			.count()
	}
}

#[async_trait]
impl Ledger for MemoryLedger {
	async fn query(&self, template: TemplateId, filter: &Filter) -> Result<Vec<RawContract>> {
		let state = self.state.lock();
		let found: Vec<RawContract> = state
			.snapshot
			.contracts
			.iter()
			.filter(|stored| stored.template == template.as_str())
			.filter(|stored| filter.matches(&stored.contract.payload, &stored.contract.signatories))
			.map(|stored| stored.contract.clone())
			.collect();
		debug!(%template, found = found.len(), "ledger query");
		Ok(found)
	}

	async fn fetch(&self, template: TemplateId, id: &ContractId) -> Result<Option<RawContract>> {
		let state = self.state.lock();
		let found = state.position(template, id).map(|at| state.snapshot.contracts[at].contract.clone());
		debug!(%template, contract_id = %id, found = found.is_some(), "ledger fetch");
		Ok(found)
	}

	async fn exercise(&self, template: TemplateId, id: &ContractId, choice: Choice, args: Value) -> Result<ExerciseResult> {
		let mut state = self.state.lock();
		if let Some(reason) = state.rejections.pop_front() {
			warn!(%template, contract_id = %id, %choice, %reason, "injected rejection");
			return Err(LedgerError::Rejected { choice, reason });
		}
		if state.position(template, id).is_none() {
			return Err(LedgerError::Archived(id.clone()));
		}
		let result = match (template, choice) {
			(templates::ASSET_TRANSFER, Choice::Accept) => accept_transfer(&mut state, id, &args),
			(templates::ASSET_TRANSFER, Choice::Reject | Choice::Cancel) => return_transfer(&mut state, id),
			(templates::ACCOUNT_INVITE, Choice::Accept) => accept_invite(&mut state, id),
			(templates::ACCOUNT_INVITE, Choice::Reject | Choice::Cancel) => Ok(ExerciseResult {
				archived: state.archive(template, id).map(|stored| stored.contract.contract_id),
				created: Vec::new(),
			}),
			(templates::ASSET_ACCOUNT, Choice::Send) => send(&mut state, id, &args),
			(templates::ASSET_ACCOUNT, Choice::Invite) => invite(&mut state, id, &args),
			_ => Err(rejected(choice, format!("choice not defined on {template}"))),
		};
		match &result {
			Ok(outcome) => info!(%template, contract_id = %id, %choice, created = outcome.created.len(), "choice exercised"),
			Err(error) => warn!(%template, contract_id = %id, %choice, %error, "choice rejected"),
		}
		result
	}
}

fn rejected(choice: Choice, reason: impl Into<String>) -> LedgerError {
	LedgerError::Rejected {
		choice,
		reason: reason.into(),
	}
}

fn arg<'a>(args: &'a Value, choice: Choice, name: &str) -> Result<&'a Value> {
	args.get(name).ok_or_else(|| rejected(choice, format!("missing argument {name}")))
}

fn arg_as<T: serde::de::DeserializeOwned>(args: &Value, choice: Choice, name: &str) -> Result<T> {
	serde_json::from_value(arg(args, choice, name)?.clone()).map_err(|error| rejected(choice, format!("argument {name}: {error}")))
}

fn accept_transfer(state: &mut State, id: &ContractId, args: &Value) -> Result<ExerciseResult> {
	let choice = Choice::Accept;
	let account_cid: ContractId = arg_as(args, choice, args::ACCOUNT_CID)?;
	let transfer = state.get::<PendingTransfer>(id).ok_or_else(|| LedgerError::Archived(id.clone()))?;
	let account = state
		.get::<AssetAccount>(&account_cid)
		.ok_or_else(|| rejected(choice, format!("holding account {account_cid} not found")))?;
	let payload = transfer.payload;
	if account.payload.owner != payload.recipient {
		return Err(rejected(choice, "holding account is not owned by the recipient"));
	}
	if account.payload.asset_type.identity() != payload.asset.asset_type.identity() {
		return Err(rejected(choice, "holding account is for a different asset"));
	}
	state.archive(templates::ASSET_TRANSFER, id);
	let holding = AssetHolding {
		owner: payload.recipient.clone(),
		..payload.asset
	};
	let created = state.create(holding, vec![payload.recipient])?;
	Ok(ExerciseResult {
		archived: Some(id.clone()),
		created: vec![created],
	})
}

fn return_transfer(state: &mut State, id: &ContractId) -> Result<ExerciseResult> {
	let transfer = state.get::<PendingTransfer>(id).ok_or_else(|| LedgerError::Archived(id.clone()))?;
	state.archive(templates::ASSET_TRANSFER, id);
	let sender = transfer.payload.sender().clone();
	let created = state.create(transfer.payload.asset, vec![sender])?;
	Ok(ExerciseResult {
		archived: Some(id.clone()),
		created: vec![created],
	})
}

fn accept_invite(state: &mut State, id: &ContractId) -> Result<ExerciseResult> {
	let invite = state.get::<PendingAccountInvite>(id).ok_or_else(|| LedgerError::Archived(id.clone()))?;
	state.archive(templates::ACCOUNT_INVITE, id);
	let PendingAccountInvite { account, recipient } = invite.payload;
	let account = AssetAccount {
		owner: recipient.clone(),
		..account
	};
	let created = state.create(account, vec![recipient])?;
	Ok(ExerciseResult {
		archived: Some(id.clone()),
		created: vec![created],
	})
}

fn send(state: &mut State, id: &ContractId, args: &Value) -> Result<ExerciseResult> {
	let choice = Choice::Send;
	let recipient: Party = arg_as(args, choice, args::RECIPIENT)?;
	let amount: Decimal = arg_as(args, choice, args::AMOUNT)?;
	if amount <= Decimal::ZERO {
		return Err(rejected(choice, "amount must be positive"));
	}
	let account = state.get::<AssetAccount>(id).ok_or_else(|| LedgerError::Archived(id.clone()))?;
	let owner = account.payload.owner.clone();
	let identity = account.payload.asset_type.identity();

	let held: Vec<Contract<AssetHolding>> = state
		.snapshot
		.contracts
		.iter()
		.filter(|stored| stored.template == templates::ASSET_HOLDING.as_str())
		.filter_map(|stored| state.get::<AssetHolding>(&stored.contract.contract_id))
		.filter(|holding| holding.payload.owner == owner && holding.payload.asset_type.identity() == identity)
		.collect();
	let available = held
		.iter()
		.try_fold(Decimal::ZERO, |total, holding| total.checked_add(holding.payload.amount))
		.ok_or_else(|| rejected(choice, "amount overflow"))?;
	if available < amount {
		return Err(rejected(choice, format!("insufficient holdings: {available} available, {amount} requested")));
	}

	for holding in &held {
		state.archive(templates::ASSET_HOLDING, &holding.contract_id);
	}
	let mut created = Vec::new();
	let asset_type = account.payload.asset_type;
	if available > amount {
		let change = AssetHolding {
			asset_type: asset_type.clone(),
			owner: owner.clone(),
			amount: available - amount,
		};
		created.push(state.create(change, vec![owner.clone()])?);
	}
	let transfer = PendingTransfer {
		asset: AssetHolding {
			asset_type,
			owner: owner.clone(),
			amount,
		},
		recipient,
	};
	created.push(state.create(transfer, vec![owner])?);
	Ok(ExerciseResult { archived: None, created })
}

fn invite(state: &mut State, id: &ContractId, args: &Value) -> Result<ExerciseResult> {
	let choice = Choice::Invite;
	let recipient: Party = arg_as(args, choice, args::RECIPIENT)?;
	let account = state.get::<AssetAccount>(id).ok_or_else(|| LedgerError::Archived(id.clone()))?;
	if recipient == account.payload.owner {
		return Err(rejected(choice, "cannot invite the account owner"));
	}
	let inviter = account.payload.owner.clone();
	let proposal = PendingAccountInvite {
		account: AssetAccount {
			owner: recipient.clone(),
			..account.payload
		},
		recipient,
	};
	let created = state.create(proposal, vec![inviter])?;
	Ok(ExerciseResult {
		archived: None,
		created: vec![created],
	})
}

#[cfg(test)]
mod tests;

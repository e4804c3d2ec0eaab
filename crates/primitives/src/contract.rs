use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::asset::{AssetAccount, AssetHolding};
use crate::ids::{ContractId, Party};
use crate::pending::{PendingAccountInvite, PendingTransfer};

/// Qualified name of a ledger template (`Module:Entity`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(&'static str);

impl TemplateId {
	pub const fn new(name: &'static str) -> Self {
		Self(name)
	}

	pub const fn as_str(self) -> &'static str {
		self.0
	}
}

impl fmt::Display for TemplateId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0)
	}
}

/// Template identifiers of the custody model.
pub mod templates {
	use super::TemplateId;

	pub const ASSET_ACCOUNT: TemplateId = TemplateId::new("Account:AssetHoldingAccount");
	pub const ASSET_HOLDING: TemplateId = TemplateId::new("Asset:Asset");
	pub const ASSET_TRANSFER: TemplateId = TemplateId::new("Asset:AssetTransfer");
	pub const ACCOUNT_INVITE: TemplateId = TemplateId::new("Account:AssetHoldingAccountProposal");

	/// Every template the view layer reads.
	pub const ALL: [TemplateId; 4] = [ASSET_ACCOUNT, ASSET_HOLDING, ASSET_TRANSFER, ACCOUNT_INVITE];
}

/// A payload type stored on the ledger under a fixed template.
pub trait Template: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
	const ID: TemplateId;
}

impl Template for AssetAccount {
	const ID: TemplateId = templates::ASSET_ACCOUNT;
}

impl Template for AssetHolding {
	const ID: TemplateId = templates::ASSET_HOLDING;
}

impl Template for PendingTransfer {
	const ID: TemplateId = templates::ASSET_TRANSFER;
}

impl Template for PendingAccountInvite {
	const ID: TemplateId = templates::ACCOUNT_INVITE;
}

/// An active ledger contract as returned by a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract<T> {
	pub contract_id: ContractId,
	pub payload: T,
	#[serde(default)]
	pub signatories: Vec<Party>,
}

impl<T> Contract<T> {
	pub fn new(contract_id: impl Into<ContractId>, payload: T) -> Self {
		Self {
			contract_id: contract_id.into(),
			payload,
			signatories: Vec::new(),
		}
	}

	#[must_use]
	pub fn with_signatories(mut self, signatories: Vec<Party>) -> Self {
		self.signatories = signatories;
		self
	}

	/// Transforms the payload, keeping id and signatories.
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Contract<U> {
		Contract {
			contract_id: self.contract_id,
			payload: f(self.payload),
			signatories: self.signatories,
		}
	}
}

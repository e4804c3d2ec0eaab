use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::Party;

/// Bond attributes attached to bond-backed asset types.
///
/// The ledger carries these as text; numeric members hold decimal text such
/// as `"185.0"` and `duration` is free-form (`"1 year"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondData {
	pub price: String,
	pub interest_rate: String,
	pub amount_issued: String,
	pub duration: String,
	pub bond_issuer: Party,
}

/// Immutable descriptor of an asset class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetType {
	pub issuer: Party,
	pub symbol: String,
	pub fungible: bool,
	#[serde(default)]
	pub reference: Option<String>,
	#[serde(default, rename = "bondData", skip_serializing_if = "Option::is_none")]
	pub bond: Option<BondData>,
}

impl AssetType {
	pub fn new(issuer: impl Into<Party>, symbol: impl Into<String>, fungible: bool) -> Self {
		Self {
			issuer: issuer.into(),
			symbol: symbol.into(),
			fungible,
			reference: None,
			bond: None,
		}
	}

	#[must_use]
	pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
		self.reference = Some(reference.into());
		self
	}

	#[must_use]
	pub fn with_bond(mut self, bond: BondData) -> Self {
		self.bond = Some(bond);
		self
	}

	/// Key used to look this asset class up on the ledger.
	pub fn identity(&self) -> AssetIdentity {
		AssetIdentity {
			issuer: self.issuer.clone(),
			symbol: self.symbol.clone(),
			fungible: self.fungible,
			reference: self.reference.clone(),
		}
	}
}

/// Lookup key of an asset class: `(issuer, symbol, fungible, reference)`.
///
/// Bond attributes are deliberately excluded; two asset types that differ
/// only in bond data name the same asset class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIdentity {
	pub issuer: Party,
	pub symbol: String,
	pub fungible: bool,
	pub reference: Option<String>,
}

/// An owner's account for one asset class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAccount {
	pub asset_type: AssetType,
	pub owner: Party,
	#[serde(default)]
	pub airdroppable: bool,
	#[serde(default)]
	pub resharable: bool,
}

impl AssetAccount {
	/// True when the owner also issues the asset.
	pub fn is_issuer(&self) -> bool {
		self.asset_type.issuer == self.owner
	}
}

/// A quantity of an asset held by one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetHolding {
	pub asset_type: AssetType,
	pub owner: Party,
	pub amount: Decimal,
}

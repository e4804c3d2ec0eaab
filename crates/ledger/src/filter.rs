//! Payload-equality filters for ledger queries.

use custody_primitives::{AssetIdentity, Direction, Party};
use serde_json::Value;

/// Conjunction of field equalities over a contract payload, plus an optional
/// signatory constraint.
///
/// Paths are dotted (`asset.assetType.symbol`) and use ledger field names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
	fields: Vec<(String, Value)>,
	signatory: Option<Party>,
}

impl Filter {
	/// A filter matching every contract of the template.
	pub fn all() -> Self {
		Self::default()
	}

	/// Requires the payload value at `path` to equal `value`. A `None` matches
	/// both an explicit null and an absent field.
	#[must_use]
	pub fn field(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
		self.fields.push((path.into(), value.into()));
		self
	}

	#[must_use]
	pub fn signed_by(mut self, party: &Party) -> Self {
		self.signatory = Some(party.clone());
		self
	}

	/// Adds equalities for an asset identity rooted at `prefix` (the path of
	/// an `assetType` record).
	#[must_use]
	pub fn asset(self, prefix: &str, identity: &AssetIdentity) -> Self {
		self.field(format!("{prefix}.issuer"), identity.issuer.as_str())
			.field(format!("{prefix}.symbol"), identity.symbol.as_str())
			.field(format!("{prefix}.fungible"), identity.fungible)
			.field(format!("{prefix}.reference"), identity.reference.as_deref())
	}

	/// Contracts of one asset class owned by `owner`: the key of an asset
	/// holding account, and the selector of its holdings.
	pub fn owned(owner: &Party, identity: &AssetIdentity) -> Self {
		Self::accounts_of(owner).asset("assetType", identity)
	}

	/// Accounts owned by `owner`.
	pub fn accounts_of(owner: &Party) -> Self {
		Self::all().field("owner", owner.as_str())
	}

	/// Pending transfers addressed to (`Inbound`) or sent by (`Outbound`) `party`.
	pub fn transfers(party: &Party, direction: Direction) -> Self {
		match direction {
			Direction::Inbound => Self::all().field("recipient", party.as_str()),
			Direction::Outbound => Self::all().field("asset.owner", party.as_str()),
		}
	}

	/// Pending account invites addressed to or signed by `party`.
	pub fn invites(party: &Party, direction: Direction) -> Self {
		match direction {
			Direction::Inbound => Self::all().field("recipient", party.as_str()),
			Direction::Outbound => Self::all().signed_by(party),
		}
	}

	/// Whether a payload signed by `signatories` satisfies the filter.
	pub fn matches(&self, payload: &Value, signatories: &[Party]) -> bool {
		if let Some(party) = &self.signatory
			&& !signatories.contains(party)
		{
			return false;
		}
		self.fields.iter().all(|(path, expected)| lookup(payload, path).unwrap_or(&Value::Null) == expected)
	}
}

fn lookup<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
	path.split('.').try_fold(payload, |value, segment| value.get(segment))
}

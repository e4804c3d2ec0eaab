use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a ledger participant (issuer, owner, sender, receiver).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Party(String);

impl Party {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for Party {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Party {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for Party {
	fn from(id: String) -> Self {
		Self(id)
	}
}

/// Identifier of one version of a ledger contract.
///
/// Exercising a consuming choice archives the contract, so an id held across
/// a state transition goes stale and must be re-resolved before acting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(String);

impl ContractId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for ContractId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for ContractId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for ContractId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

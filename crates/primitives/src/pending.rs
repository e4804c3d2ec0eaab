use serde::{Deserialize, Serialize};

use crate::asset::{AssetAccount, AssetHolding};
use crate::contract::Contract;
use crate::ids::Party;

/// Which side of a pending activity the viewing party is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	/// The viewer is the recipient.
	Inbound,
	/// The viewer is the sender.
	Outbound,
}

impl Direction {
	pub const fn from_inbound(is_inbound: bool) -> Self {
		if is_inbound { Self::Inbound } else { Self::Outbound }
	}

	pub const fn is_inbound(self) -> bool {
		matches!(self, Self::Inbound)
	}
}

/// An offer to move a holding to `recipient`, awaiting accept/reject/cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransfer {
	pub asset: AssetHolding,
	pub recipient: Party,
}

impl PendingTransfer {
	pub fn sender(&self) -> &Party {
		&self.asset.owner
	}

	/// Whether `viewer` is on the receiving end.
	pub fn direction_for(&self, viewer: &Party) -> Direction {
		Direction::from_inbound(&self.recipient == viewer)
	}
}

/// An invitation for `recipient` to open an account for an asset class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAccountInvite {
	pub account: AssetAccount,
	pub recipient: Party,
}

impl Contract<PendingAccountInvite> {
	/// The inviting party is the first signatory of the proposal.
	pub fn sender(&self) -> Option<&Party> {
		self.signatories.first()
	}
}

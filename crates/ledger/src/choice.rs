use std::fmt;

use custody_primitives::{ContractId, Party};
use rust_decimal::Decimal;
use serde_json::{Value, json};

/// Named ledger state transitions the view layer can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
	/// Receiver takes a pending transfer or invite.
	Accept,
	/// Receiver declines a pending transfer or invite.
	Reject,
	/// Sender withdraws a pending transfer or invite.
	Cancel,
	/// Account owner offers part of a holding to another party.
	Send,
	/// Account owner invites another party to open an account.
	Invite,
}

impl Choice {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Accept => "accept",
			Self::Reject => "reject",
			Self::Cancel => "cancel",
			Self::Send => "send",
			Self::Invite => "invite",
		}
	}

	/// Whether exercising archives the target contract.
	pub const fn is_consuming(self) -> bool {
		matches!(self, Self::Accept | Self::Reject | Self::Cancel)
	}
}

impl fmt::Display for Choice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Choice argument records.
pub mod args {
	use super::*;

	pub const ACCOUNT_CID: &str = "accountCid";
	pub const RECIPIENT: &str = "recipient";
	pub const AMOUNT: &str = "amount";

	/// Accepting a transfer deposits it into the receiver's holding account.
	pub fn accept_transfer(account: &ContractId) -> Value {
		json!({ ACCOUNT_CID: account })
	}

	pub fn send(recipient: &Party, amount: Decimal) -> Value {
		json!({ RECIPIENT: recipient, AMOUNT: amount })
	}

	pub fn invite(recipient: &Party) -> Value {
		json!({ RECIPIENT: recipient })
	}

	/// Choices that take no argument.
	pub fn none() -> Value {
		json!({})
	}
}

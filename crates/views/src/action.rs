//! Buttons a page can offer and the requests they submit.

use std::fmt;

use custody_ledger::Choice;
use custody_primitives::{Decimal, Party};

/// An action offered by a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
	Accept,
	Reject,
	Cancel,
	Send,
	Invite,
}

impl Action {
	pub const ALL: [Action; 5] = [Self::Accept, Self::Reject, Self::Cancel, Self::Send, Self::Invite];

	/// Ledger choice exercised by this action.
	pub const fn choice(self) -> Choice {
		match self {
			Self::Accept => Choice::Accept,
			Self::Reject => Choice::Reject,
			Self::Cancel => Choice::Cancel,
			Self::Send => Choice::Send,
			Self::Invite => Choice::Invite,
		}
	}

	pub const fn label(self) -> &'static str {
		match self {
			Self::Accept => "Accept",
			Self::Reject => "Reject",
			Self::Cancel => "Cancel",
			Self::Send => "Send",
			Self::Invite => "Invite",
		}
	}

	/// Parses a lowercase choice name.
	pub fn parse(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|action| action.choice().as_str() == name)
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// A submitted action together with its form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
	Accept,
	Reject,
	Cancel,
	Send { recipient: Party, amount: Decimal },
	Invite { recipient: Party },
}

impl ActionRequest {
	pub const fn action(&self) -> Action {
		match self {
			Self::Accept => Action::Accept,
			Self::Reject => Action::Reject,
			Self::Cancel => Action::Cancel,
			Self::Send { .. } => Action::Send,
			Self::Invite { .. } => Action::Invite,
		}
	}
}

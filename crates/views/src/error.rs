use custody_ledger::LedgerError;
use thiserror::Error;

use crate::action::Action;

/// Errors from a page action.
#[derive(Debug, Error)]
pub enum ActionError {
	/// The action is not offered in the page's current phase.
	#[error("{0} is not available on this page")]
	Unavailable(Action),

	/// The ledger refused the exercise or could not be reached.
	#[error(transparent)]
	Ledger(#[from] LedgerError),
}

impl ActionError {
	/// True when the ledger answered and refused.
	pub fn is_rejection(&self) -> bool {
		matches!(self, Self::Ledger(error) if error.is_rejection())
	}

	/// True when the target contract was already archived.
	pub fn is_stale(&self) -> bool {
		matches!(self, Self::Ledger(LedgerError::Archived(_)))
	}
}

//! Errors surfaced by the ledger collaborator.

use custody_primitives::{ContractId, TemplateId};
use thiserror::Error;

use crate::choice::Choice;

/// Errors from ledger reads and choice exercises.
#[derive(Debug, Error)]
pub enum LedgerError {
	/// The ledger refused the exercise (authorization, validation, business rule).
	#[error("ledger rejected {choice}: {reason}")]
	Rejected {
		/// Choice that was refused.
		choice: Choice,
		/// Reason reported by the ledger.
		reason: String,
	},

	/// The target contract is no longer active.
	#[error("contract {0} is archived or unknown")]
	Archived(ContractId),

	/// A contract payload did not match the expected template shape.
	#[error("malformed {template} payload: {source}")]
	Decode {
		/// Template the payload was read as.
		template: TemplateId,
		/// Underlying deserialization error.
		#[source]
		source: serde_json::Error,
	},

	/// The ledger could not be reached or answered with a transport failure.
	#[error("ledger unavailable: {0}")]
	Unavailable(String),
}

impl LedgerError {
	/// True for refusals of an exercise, as opposed to read/transport failures.
	pub fn is_rejection(&self) -> bool {
		matches!(self, Self::Rejected { .. } | Self::Archived(_))
	}
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

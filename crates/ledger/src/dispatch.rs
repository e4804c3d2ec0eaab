//! Choice dispatch against resolved contracts.
//!
//! The dispatcher never retries and never mutates local state. An
//! [`Exercised`] value records that the ledger accepted the request; callers
//! still have to re-read before treating the action as settled.

use custody_primitives::{Contract, ContractId, Template};
use serde_json::Value;
use tracing::{info, warn};

use crate::choice::Choice;
use crate::error::Result;
use crate::ledger::{ExerciseResult, Ledger};

/// A contract that was live on the ledger when last read.
///
/// Only a ledger read can produce one, so exercising against an id that was
/// never resolved is not expressible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
	contract: Contract<T>,
}

impl<T> Resolved<T> {
	/// Wraps a contract returned by a ledger read.
	pub fn from_read(contract: Contract<T>) -> Self {
		Self { contract }
	}

	pub fn id(&self) -> &ContractId {
		&self.contract.contract_id
	}

	pub fn payload(&self) -> &T {
		&self.contract.payload
	}

	pub fn contract(&self) -> &Contract<T> {
		&self.contract
	}
}

/// A choice the ledger accepted. Not yet a settled outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an exercised choice is settled only after a fresh ledger read"]
pub struct Exercised {
	pub choice: Choice,
	pub target: ContractId,
	pub result: ExerciseResult,
}

/// Exercises choices through a borrowed [`Ledger`].
pub struct Dispatcher<'a, L: ?Sized> {
	ledger: &'a L,
}

impl<'a, L: Ledger + ?Sized> Dispatcher<'a, L> {
	pub fn new(ledger: &'a L) -> Self {
		Self { ledger }
	}

	/// Exercises `choice` on `target`. Rejections are returned as-is.
	pub async fn exercise<T: Template>(&self, choice: Choice, target: &Resolved<T>, args: Value) -> Result<Exercised> {
		let target = target.id().clone();
		match self.ledger.exercise(T::ID, &target, choice, args).await {
			Ok(result) => {
				info!(template = %T::ID, contract_id = %target, %choice, "dispatched choice");
				Ok(Exercised { choice, target, result })
			}
			Err(error) => {
				warn!(template = %T::ID, contract_id = %target, %choice, %error, "dispatch refused");
				Err(error)
			}
		}
	}
}

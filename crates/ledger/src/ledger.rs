use async_trait::async_trait;
use custody_primitives::{Contract, ContractId, Template, TemplateId};
use serde_json::Value;

use crate::choice::Choice;
use crate::error::{LedgerError, Result};
use crate::filter::Filter;

/// A contract whose payload has not been decoded yet.
pub type RawContract = Contract<Value>;

/// Outcome of an accepted exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseResult {
	/// The target, when the choice consumed it.
	pub archived: Option<ContractId>,
	/// Contracts created by the choice, in creation order.
	pub created: Vec<ContractId>,
}

/// The ledger collaborator.
///
/// Reads are independent; nothing here orders or coordinates concurrent
/// calls. All mutation goes through [`Ledger::exercise`].
#[async_trait]
pub trait Ledger: Send + Sync {
	/// Active contracts of `template` whose payload satisfies `filter`, in
	/// ledger order.
	async fn query(&self, template: TemplateId, filter: &Filter) -> Result<Vec<RawContract>>;

	/// The active contract `id` of `template`, or `None` once archived.
	async fn fetch(&self, template: TemplateId, id: &ContractId) -> Result<Option<RawContract>>;

	/// Exercises `choice` on contract `id`.
	async fn exercise(&self, template: TemplateId, id: &ContractId, choice: Choice, args: Value) -> Result<ExerciseResult>;
}

/// Typed reads on top of [`Ledger`].
#[async_trait]
pub trait LedgerExt: Ledger {
	async fn query_as<T: Template>(&self, filter: &Filter) -> Result<Vec<Contract<T>>> {
		self.query(T::ID, filter).await?.into_iter().map(decode::<T>).collect()
	}

	async fn fetch_as<T: Template>(&self, id: &ContractId) -> Result<Option<Contract<T>>> {
		self.fetch(T::ID, id).await?.map(decode::<T>).transpose()
	}

	/// First contract matching a key filter.
	async fn fetch_by_key<T: Template>(&self, key: &Filter) -> Result<Option<Contract<T>>> {
		Ok(self.query_as::<T>(key).await?.into_iter().next())
	}
}

impl<L: Ledger + ?Sized> LedgerExt for L {}

fn decode<T: Template>(raw: RawContract) -> Result<Contract<T>> {
	let Contract {
		contract_id,
		payload,
		signatories,
	} = raw;
	let payload = serde_json::from_value(payload).map_err(|source| LedgerError::Decode { template: T::ID, source })?;
	Ok(Contract {
		contract_id,
		payload,
		signatories,
	})
}

/// Encodes a typed contract for storage or transport.
pub(crate) fn encode<T: Template>(contract: &Contract<T>) -> Result<RawContract> {
	let payload = serde_json::to_value(&contract.payload).map_err(|source| LedgerError::Decode { template: T::ID, source })?;
	Ok(Contract {
		contract_id: contract.contract_id.clone(),
		payload,
		signatories: contract.signatories.clone(),
	})
}

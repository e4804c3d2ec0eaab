use async_trait::async_trait;
use custody_ledger::choice::args;
use custody_ledger::{Dispatcher, Exercised, Filter, Ledger, LedgerExt, Resolved};
use custody_params::{PendingTransferParams, Route, RouteParams};
use custody_primitives::{AssetAccount, Direction, Party, PendingTransfer};

use super::{Page, PageModel};
use crate::action::{Action, ActionRequest};
use crate::error::ActionError;
use crate::projection::format_quantity;

/// Shown to a receiver who cannot accept because they hold no account for
/// the asset.
pub const NO_ACCOUNT_NOTICE: &str = "You do not have an Asset Holding Account for this asset. Please ask the sender of this asset to invite you as an asset holder.";

/// Detail page of one pending transfer (`/pending-transfer`).
pub type PendingTransferPage = Page<PendingTransferModel>;

impl Page<PendingTransferModel> {
	/// Decodes `query` into a page seen by `viewer`.
	pub fn open(query: &str, viewer: Party) -> Self {
		Self::new(PendingTransferModel {
			params: PendingTransferParams::from_query(query),
			viewer,
		})
	}
}

#[derive(Debug, Clone)]
pub struct PendingTransferModel {
	pub params: PendingTransferParams,
	pub viewer: Party,
}

/// A live transfer and, for the receiver, the account that would take it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransferView {
	pub transfer: Resolved<PendingTransfer>,
	pub direction: Direction,
	pub account: Option<Resolved<AssetAccount>>,
}

impl PendingTransferView {
	pub fn counterparty_label(&self) -> &'static str {
		if self.direction.is_inbound() { "From:" } else { "To:" }
	}

	pub fn counterparty(&self) -> &Party {
		let transfer = self.transfer.payload();
		if self.direction.is_inbound() {
			transfer.sender()
		} else {
			&transfer.recipient
		}
	}

	pub fn amount_text(&self) -> String {
		format_quantity(self.transfer.payload().asset.amount)
	}

	/// Explains why an inbound transfer offers no actions.
	pub fn notice(&self) -> Option<&'static str> {
		(self.direction.is_inbound() && self.account.is_none()).then_some(NO_ACCOUNT_NOTICE)
	}
}

#[async_trait]
impl PageModel for PendingTransferModel {
	type View = PendingTransferView;

	fn route(&self) -> Route {
		Route::PendingTransfer
	}

	fn title(&self, view: Option<&PendingTransferView>) -> &'static str {
		let direction = view.map_or(self.params.direction, |view| view.direction);
		if direction.is_inbound() {
			"Inbound Send Request"
		} else {
			"Outbound Send Request"
		}
	}

	async fn read(&self, ledger: &dyn Ledger) -> custody_ledger::Result<Option<PendingTransferView>> {
		let Some(transfer) = ledger.fetch_as::<PendingTransfer>(&self.params.contract_id).await? else {
			return Ok(None);
		};
		let direction = transfer.payload.direction_for(&self.viewer);
		let account = match direction {
			Direction::Inbound => {
				let key = Filter::owned(&transfer.payload.recipient, &transfer.payload.asset.asset_type.identity());
				ledger.fetch_by_key::<AssetAccount>(&key).await?
			}
			Direction::Outbound => None,
		};
		Ok(Some(PendingTransferView {
			transfer: Resolved::from_read(transfer),
			direction,
			account: account.map(Resolved::from_read),
		}))
	}

	/// Only the sender may cancel; a bystander holding the link gets nothing.
	fn actions(&self, view: &PendingTransferView) -> Vec<Action> {
		match view.direction {
			Direction::Inbound if view.account.is_some() => vec![Action::Accept, Action::Reject],
			Direction::Outbound if view.transfer.payload().sender() == &self.viewer => vec![Action::Cancel],
			_ => Vec::new(),
		}
	}

	async fn dispatch(&self, ledger: &dyn Ledger, view: &PendingTransferView, request: &ActionRequest) -> Result<Exercised, ActionError> {
		let action = request.action();
		let args = match (request, &view.account) {
			(ActionRequest::Accept, Some(account)) => args::accept_transfer(account.id()),
			(ActionRequest::Reject | ActionRequest::Cancel, _) => args::none(),
			_ => return Err(ActionError::Unavailable(action)),
		};
		Ok(Dispatcher::new(ledger).exercise(action.choice(), &view.transfer, args).await?)
	}
}

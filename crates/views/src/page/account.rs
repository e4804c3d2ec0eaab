use async_trait::async_trait;
use custody_ledger::choice::args;
use custody_ledger::{Dispatcher, Exercised, Filter, Ledger, LedgerExt, Resolved};
use custody_params::{AssetParams, Route, RouteParams};
use custody_primitives::{AssetAccount, AssetHolding, Decimal};

use super::{Page, PageModel};
use crate::action::{Action, ActionRequest};
use crate::error::ActionError;
use crate::projection::{aggregate_quantity, format_quantity};

/// Form page acting on the viewer's own account (`/send`, `/invite`).
pub type AccountActionPage = Page<AccountActionModel>;

impl Page<AccountActionModel> {
	pub fn open_send(query: &str) -> Self {
		Self::new(AccountActionModel {
			route: Route::Send,
			params: AssetParams::from_query(query),
		})
	}

	pub fn open_invite(query: &str) -> Self {
		Self::new(AccountActionModel {
			route: Route::Invite,
			params: AssetParams::from_query(query),
		})
	}
}

#[derive(Debug, Clone)]
pub struct AccountActionModel {
	/// [`Route::Send`] or [`Route::Invite`].
	pub route: Route,
	pub params: AssetParams,
}

/// The account resolved by key, with the owner's current balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountView {
	pub account: Resolved<AssetAccount>,
	pub balance: Decimal,
}

impl AccountView {
	pub fn balance_text(&self) -> String {
		format_quantity(self.balance)
	}
}

#[async_trait]
impl PageModel for AccountActionModel {
	type View = AccountView;

	fn route(&self) -> Route {
		self.route
	}

	fn title(&self, _view: Option<&AccountView>) -> &'static str {
		match self.route {
			Route::Send => "Send",
			_ => "Invite",
		}
	}

	// Keyed by owner and asset identity; the contract id in the URL may
	// predate the last exercise on this account.
	async fn read(&self, ledger: &dyn Ledger) -> custody_ledger::Result<Option<AccountView>> {
		let identity = self.params.identity();
		let key = Filter::owned(&self.params.owner, &identity);
		let Some(account) = ledger.fetch_by_key::<AssetAccount>(&key).await? else {
			return Ok(None);
		};
		let holdings = ledger
			.query_as::<AssetHolding>(&Filter::owned(&self.params.owner, &identity))
			.await?;
		Ok(Some(AccountView {
			account: Resolved::from_read(account),
			balance: aggregate_quantity(&holdings),
		}))
	}

	fn actions(&self, _view: &AccountView) -> Vec<Action> {
		match self.route {
			Route::Send => vec![Action::Send],
			Route::Invite => vec![Action::Invite],
			_ => Vec::new(),
		}
	}

	async fn dispatch(&self, ledger: &dyn Ledger, view: &AccountView, request: &ActionRequest) -> Result<Exercised, ActionError> {
		let args = match request {
			ActionRequest::Send { recipient, amount } => args::send(recipient, *amount),
			ActionRequest::Invite { recipient } => args::invite(recipient),
			_ => return Err(ActionError::Unavailable(request.action())),
		};
		Ok(Dispatcher::new(ledger)
			.exercise(request.action().choice(), &view.account, args)
			.await?)
	}
}

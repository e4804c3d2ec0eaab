use async_trait::async_trait;
use custody_ledger::choice::args;
use custody_ledger::{Dispatcher, Exercised, Ledger, LedgerExt, Resolved};
use custody_params::{PendingInviteParams, Route, RouteParams};
use custody_primitives::{Direction, Party, PendingAccountInvite};

use super::{Page, PageModel};
use crate::action::{Action, ActionRequest};
use crate::error::ActionError;

/// Detail page of one pending account invite (`/pending-account-invite`).
pub type PendingInvitePage = Page<PendingInviteModel>;

impl Page<PendingInviteModel> {
	pub fn open(query: &str, viewer: Party) -> Self {
		Self::new(PendingInviteModel {
			params: PendingInviteParams::from_query(query),
			viewer,
		})
	}
}

#[derive(Debug, Clone)]
pub struct PendingInviteModel {
	pub params: PendingInviteParams,
	pub viewer: Party,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInviteView {
	pub invite: Resolved<PendingAccountInvite>,
	pub direction: Direction,
}

impl PendingInviteView {
	/// Inviting party, the first signatory of the proposal.
	pub fn sender(&self) -> Option<&Party> {
		self.invite.contract().sender()
	}

	pub fn counterparty_label(&self) -> &'static str {
		if self.direction.is_inbound() { "From:" } else { "To:" }
	}

	pub fn counterparty(&self) -> Option<&Party> {
		if self.direction.is_inbound() {
			self.sender()
		} else {
			Some(&self.invite.payload().recipient)
		}
	}
}

#[async_trait]
impl PageModel for PendingInviteModel {
	type View = PendingInviteView;

	fn route(&self) -> Route {
		Route::PendingAccountInvite
	}

	fn title(&self, view: Option<&PendingInviteView>) -> &'static str {
		let direction = view.map_or(self.params.direction, |view| view.direction);
		if direction.is_inbound() {
			"Inbound Account Invite"
		} else {
			"Outbound Account Invite"
		}
	}

	async fn read(&self, ledger: &dyn Ledger) -> custody_ledger::Result<Option<PendingInviteView>> {
		let invite = ledger.fetch_as::<PendingAccountInvite>(&self.params.contract_id).await?;
		Ok(invite.map(|invite| PendingInviteView {
			direction: Direction::from_inbound(invite.payload.recipient == self.viewer),
			invite: Resolved::from_read(invite),
		}))
	}

	fn actions(&self, view: &PendingInviteView) -> Vec<Action> {
		match view.direction {
			Direction::Inbound => vec![Action::Accept, Action::Reject],
			Direction::Outbound if view.sender() == Some(&self.viewer) => vec![Action::Cancel],
			Direction::Outbound => Vec::new(),
		}
	}

	async fn dispatch(&self, ledger: &dyn Ledger, view: &PendingInviteView, request: &ActionRequest) -> Result<Exercised, ActionError> {
		let action = request.action();
		if !matches!(request, ActionRequest::Accept | ActionRequest::Reject | ActionRequest::Cancel) {
			return Err(ActionError::Unavailable(action));
		}
		Ok(Dispatcher::new(ledger).exercise(action.choice(), &view.invite, args::none()).await?)
	}
}

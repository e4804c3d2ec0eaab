//! Route pages.
//!
//! A [`Page`] owns the decoded URL parameters of one mounted route and walks
//! the state machine below. Every transition that waits on the ledger is split
//! in three so the page is never borrowed across an await:
//!
//! 1. `begin_*` validates the transition and returns a ticket.
//! 2. The ticket runs against the ledger without touching the page.
//! 3. `apply`/`finish_action` feed the result back. Results from a superseded
//!    generation, or arriving after [`Page::unmount`], are dropped.
//!
//! ```text
//! Decoding ─► Refreshing ─┬─► Ready ─► Acting ─┬─► Refreshing (accepted or target archived)
//!                         ├─► Missing          └─► Ready + alert (refused)
//!                         └─► Failed
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use custody_ledger::{Exercised, Ledger, LedgerError};
use custody_params::Route;
use tracing::{debug, info, warn};

use crate::action::{Action, ActionRequest};
use crate::error::ActionError;
use crate::mount::{GenerationToken, Mount};

mod account;
mod invite;
mod transfer;

pub use account::{AccountActionModel, AccountActionPage, AccountView};
pub use invite::{PendingInviteModel, PendingInvitePage, PendingInviteView};
pub use transfer::{NO_ACCOUNT_NOTICE, PendingTransferModel, PendingTransferPage, PendingTransferView};

/// Shown when the contract a page was opened for is no longer active.
pub const MISSING_NOTICE: &str = "Contract doesn't exist anymore";

/// Lifecycle phase of a mounted page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	/// URL parameters decoded, no read issued yet.
	Decoding,
	/// A ledger read is in flight.
	Refreshing,
	/// The live contract is resolved and actions may be offered.
	Ready,
	/// One action is in flight.
	Acting(Action),
	/// The contract no longer exists. No actions.
	Missing,
	/// The read itself failed; the alert carries the reason.
	Failed,
}

/// Route-specific half of a page: what to read and what to exercise.
#[async_trait]
pub trait PageModel: Send + Sync + 'static {
	/// Ledger state the page renders once resolved.
	type View: Clone + fmt::Debug + Send + Sync + 'static;

	fn route(&self) -> Route;

	/// Heading; `view` is present once the page is resolved.
	fn title(&self, view: Option<&Self::View>) -> &'static str;

	/// Re-resolves the page against the ledger. `None` means the contract the
	/// page was opened for is gone.
	async fn read(&self, ledger: &dyn Ledger) -> custody_ledger::Result<Option<Self::View>>;

	/// Actions offered for a resolved view.
	fn actions(&self, view: &Self::View) -> Vec<Action>;

	async fn dispatch(&self, ledger: &dyn Ledger, view: &Self::View, request: &ActionRequest) -> Result<Exercised, ActionError>;
}

/// One mounted page instance.
#[derive(Debug)]
pub struct Page<M: PageModel> {
	model: Arc<M>,
	phase: Phase,
	view: Option<M::View>,
	alert: Option<String>,
	mount: Mount,
}

impl<M: PageModel> Page<M> {
	pub fn new(model: M) -> Self {
		debug!(route = model.route().path(), "page decoded");
		Self {
			model: Arc::new(model),
			phase: Phase::Decoding,
			view: None,
			alert: None,
			mount: Mount::default(),
		}
	}

	pub fn model(&self) -> &M {
		&self.model
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Last resolved view. Cleared when the contract goes missing.
	pub fn view(&self) -> Option<&M::View> {
		self.view.as_ref()
	}

	/// User-visible error from the last refused action or failed read.
	/// Cleared by the next successful read.
	pub fn alert(&self) -> Option<&str> {
		self.alert.as_deref()
	}

	pub fn dismiss_alert(&mut self) {
		self.alert = None;
	}

	pub fn title(&self) -> &'static str {
		self.model.title(self.view.as_ref())
	}

	pub fn is_mounted(&self) -> bool {
		self.mount.is_mounted()
	}

	/// Actions the page offers right now. Empty outside [`Phase::Ready`].
	pub fn available_actions(&self) -> Vec<Action> {
		match (self.phase, &self.view) {
			(Phase::Ready, Some(view)) => self.model.actions(view),
			_ => Vec::new(),
		}
	}

	/// Issues a new read generation. Any earlier read still in flight becomes
	/// stale.
	pub fn begin_refresh(&mut self) -> ReadTicket<M> {
		let token = self.mount.next();
		if self.mount.is_mounted() {
			self.phase = Phase::Refreshing;
		}
		debug!(route = self.model.route().path(), generation = token.generation(), "refresh issued");
		ReadTicket {
			model: Arc::clone(&self.model),
			token,
		}
	}

	/// Applies a finished read. Returns false when the read was dropped
	/// because the page unmounted or a newer read was issued.
	pub fn apply(&mut self, loaded: Loaded<M::View>) -> bool {
		let route = self.model.route().path();
		if !self.mount.is_current(loaded.generation) {
			debug!(route, generation = loaded.generation, "stale read dropped");
			return false;
		}
		match loaded.outcome {
			ReadOutcome::Found(view) => {
				self.view = Some(view);
				self.alert = None;
				self.phase = Phase::Ready;
			}
			ReadOutcome::Gone => {
				info!(route, "contract no longer exists");
				self.view = None;
				self.alert = None;
				self.phase = Phase::Missing;
			}
			ReadOutcome::Failed(error) => {
				warn!(route, %error, "page read failed");
				self.alert = Some(error.to_string());
				self.phase = Phase::Failed;
			}
			ReadOutcome::Abandoned => return false,
		}
		debug!(route, generation = loaded.generation, phase = ?self.phase, "read applied");
		true
	}

	/// Reads the ledger and applies the result.
	pub async fn refresh(&mut self, ledger: &dyn Ledger) -> Phase {
		let loaded = self.begin_refresh().load(ledger).await;
		self.apply(loaded);
		self.phase
	}

	/// Moves `Ready → Acting` if the request's action is on offer.
	pub fn begin_action(&mut self, request: ActionRequest) -> Result<ActionTicket<M>, ActionError> {
		let action = request.action();
		let view = match (self.phase, &self.view) {
			(Phase::Ready, Some(view)) if self.model.actions(view).contains(&action) => view.clone(),
			_ => {
				debug!(route = self.model.route().path(), %action, phase = ?self.phase, "action not on offer");
				return Err(ActionError::Unavailable(action));
			}
		};
		self.phase = Phase::Acting(action);
		self.alert = None;
		Ok(ActionTicket {
			model: Arc::clone(&self.model),
			view,
			request,
		})
	}

	/// Feeds a dispatch result back.
	///
	/// An accepted exercise moves to [`Phase::Refreshing`] and hands back the
	/// read that settles it. A refusal returns the page to [`Phase::Ready`]
	/// with an alert and the same actions on offer, unless the target was
	/// already archived: then the page re-reads, which lands on
	/// [`Phase::Missing`].
	pub fn finish_action(&mut self, outcome: Result<Exercised, ActionError>) -> Result<(Exercised, ReadTicket<M>), Refused<M>> {
		let route = self.model.route().path();
		let error = match outcome {
			Ok(exercised) => {
				info!(route, choice = %exercised.choice, contract_id = %exercised.target, "action accepted, re-reading");
				return Ok((exercised, self.begin_refresh()));
			}
			Err(error) => error,
		};
		warn!(route, %error, stale = error.is_stale(), "action refused");
		if !self.mount.is_mounted() {
			return Err(Refused { error, reread: None });
		}
		self.alert = Some(error.to_string());
		let reread = if error.is_stale() {
			Some(self.begin_refresh())
		} else {
			self.phase = Phase::Ready;
			None
		};
		Err(Refused { error, reread })
	}

	/// Runs an action to completion, including the read that follows it.
	pub async fn act(&mut self, ledger: &dyn Ledger, request: ActionRequest) -> Result<Settled, ActionError> {
		let ticket = self.begin_action(request)?;
		let outcome = ticket.dispatch(ledger).await;
		let (exercised, reread) = match self.finish_action(outcome) {
			Ok(accepted) => accepted,
			Err(Refused { error, reread }) => {
				if let Some(reread) = reread {
					let loaded = reread.load(ledger).await;
					self.apply(loaded);
				}
				return Err(error);
			}
		};
		let loaded = reread.load(ledger).await;
		self.apply(loaded);
		Ok(Settled {
			exercised,
			phase: self.phase,
		})
	}

	/// Tears the page down. Reads still in flight resolve to no-ops.
	pub fn unmount(&mut self) {
		debug!(route = self.model.route().path(), "page unmounted");
		self.mount.unmount();
	}
}

/// A read issued by [`Page::begin_refresh`]. Holds no borrow of the page.
#[derive(Debug)]
pub struct ReadTicket<M: PageModel> {
	model: Arc<M>,
	token: GenerationToken,
}

impl<M: PageModel> ReadTicket<M> {
	pub fn generation(&self) -> u64 {
		self.token.generation()
	}

	/// Runs the read, abandoning it if the generation is cancelled first.
	pub async fn load(self, ledger: &dyn Ledger) -> Loaded<M::View> {
		let outcome = tokio::select! {
			biased;
			_ = self.token.cancelled() => ReadOutcome::Abandoned,
			read = self.model.read(ledger) => match read {
				Ok(Some(view)) => ReadOutcome::Found(view),
				Ok(None) => ReadOutcome::Gone,
				Err(error) => ReadOutcome::Failed(error),
			},
		};
		Loaded {
			generation: self.token.generation(),
			outcome,
		}
	}
}

/// Result of a [`ReadTicket`], to be passed to [`Page::apply`].
#[derive(Debug)]
pub struct Loaded<V> {
	pub generation: u64,
	pub outcome: ReadOutcome<V>,
}

#[derive(Debug)]
pub enum ReadOutcome<V> {
	Found(V),
	Gone,
	Failed(LedgerError),
	/// Cancelled before the ledger answered.
	Abandoned,
}

/// An action accepted by [`Page::begin_action`].
#[derive(Debug)]
pub struct ActionTicket<M: PageModel> {
	model: Arc<M>,
	view: M::View,
	request: ActionRequest,
}

impl<M: PageModel> ActionTicket<M> {
	pub async fn dispatch(self, ledger: &dyn Ledger) -> Result<Exercised, ActionError> {
		self.model.dispatch(ledger, &self.view, &self.request).await
	}
}

/// A dispatch the ledger did not accept.
#[derive(Debug)]
pub struct Refused<M: PageModel> {
	pub error: ActionError,
	/// Set when the target was already archived; apply its result to move the
	/// page off the dead contract.
	pub reread: Option<ReadTicket<M>>,
}

/// An accepted action together with the phase reached by the read after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
	pub exercised: Exercised,
	pub phase: Phase,
}

#[cfg(test)]
mod tests;

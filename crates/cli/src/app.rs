//! Command handlers. Each returns the text to print.

use anyhow::{Context, bail};
use custody_ledger::{Filter, LedgerExt, MemoryLedger};
use custody_params::{AssetParams, Location, PendingInviteParams, PendingTransferParams, Route, RouteParams};
use custody_primitives::{AssetAccount, AssetHolding, Decimal, Direction, Party, PendingAccountInvite, PendingTransfer};
use custody_views::page::{AccountActionPage, PendingInvitePage, PendingTransferPage};
use custody_views::projection::{account_rows, invite_rows, transfer_rows};
use custody_views::{Action, ActionError, ActionRequest, History, Navigator, Phase, Settled};
use tracing::debug;

use crate::render;

/// One invocation's view of the ledger.
pub struct Session {
	pub party: Party,
	pub admin: Party,
	pub ledger: MemoryLedger,
	pub history: History,
}

impl Session {
	pub fn new(party: Party, admin: Party, ledger: MemoryLedger) -> Self {
		Self {
			party,
			admin,
			ledger,
			history: History::default(),
		}
	}

	pub async fn accounts(&self) -> anyhow::Result<String> {
		let accounts = self
			.ledger
			.query_as::<AssetAccount>(&Filter::accounts_of(&self.party))
			.await?;
		let holdings = self
			.ledger
			.query_as::<AssetHolding>(&Filter::all().field("owner", self.party.as_str()))
			.await?;
		let rows = account_rows(&accounts, &holdings, &self.admin);
		if rows.is_empty() {
			return Ok(format!("{} holds no asset accounts", self.party));
		}
		Ok(rows.iter().map(render::account_row).collect::<Vec<_>>().join("\n"))
	}

	pub async fn pending(&self, direction: Direction) -> anyhow::Result<String> {
		let transfers = self
			.ledger
			.query_as::<PendingTransfer>(&Filter::transfers(&self.party, direction))
			.await?;
		let invites = self
			.ledger
			.query_as::<PendingAccountInvite>(&Filter::invites(&self.party, direction))
			.await?;
		let lines: Vec<String> = transfer_rows(&transfers, direction)
			.iter()
			.map(render::transfer_row)
			.chain(invite_rows(&invites, direction).iter().map(render::invite_row))
			.collect();
		if lines.is_empty() {
			return Ok("no pending activity".to_string());
		}
		Ok(lines.join("\n"))
	}

	/// Navigates to `url` and renders the page once resolved.
	pub async fn open(&mut self, url: &str) -> anyhow::Result<String> {
		let mut page = self.navigate(url)?;
		page.refresh(&self.ledger).await;
		let out = page.render();
		page.unmount();
		Ok(out)
	}

	/// Navigates to `url`, runs `action` and navigates back on success.
	pub async fn act(
		&mut self,
		url: &str,
		action: &str,
		recipient: Option<Party>,
		amount: Option<Decimal>,
	) -> anyhow::Result<String> {
		let action = Action::parse(action).with_context(|| format!("unknown action {action:?}"))?;
		let request = request(action, recipient, amount)?;
		let mut page = self.navigate(url)?;
		let phase = page.refresh(&self.ledger).await;
		debug!(url, ?phase, %action, "page resolved for action");

		let settled = match page.act(&self.ledger, request).await {
			Ok(settled) => settled,
			Err(error) => {
				let out = page.render();
				page.unmount();
				return Err(anyhow::Error::new(error).context(out));
			}
		};
		page.unmount();
		self.history.back();
		let Settled { exercised, phase } = settled;
		let mut out = format!("{} exercised on {}", exercised.choice, exercised.target);
		for created in &exercised.result.created {
			out.push_str(&format!("\ncreated {created}"));
		}
		if phase == Phase::Ready {
			out.push_str("\npage still live; re-open to review");
		}
		Ok(out)
	}

	fn navigate(&mut self, url: &str) -> anyhow::Result<OpenPage> {
		self.history.navigate(url);
		let location = self.history.location();
		let query = location.query.as_str();
		Ok(match location.route() {
			Some(Route::PendingTransfer) => OpenPage::Transfer(PendingTransferPage::open(query, self.party.clone())),
			Some(Route::PendingAccountInvite) => OpenPage::Invite(PendingInvitePage::open(query, self.party.clone())),
			Some(Route::Send) => OpenPage::Account(AccountActionPage::open_send(query)),
			Some(Route::Invite) => OpenPage::Account(AccountActionPage::open_invite(query)),
			Some(route) => bail!("{} has no detail view", route.path()),
			None => bail!("unknown page {}", location.path),
		})
	}
}

fn request(action: Action, recipient: Option<Party>, amount: Option<Decimal>) -> anyhow::Result<ActionRequest> {
	let needs_recipient = || recipient.clone().with_context(|| format!("{action} needs --recipient"));
	Ok(match action {
		Action::Accept => ActionRequest::Accept,
		Action::Reject => ActionRequest::Reject,
		Action::Cancel => ActionRequest::Cancel,
		Action::Send => ActionRequest::Send {
			recipient: needs_recipient()?,
			amount: amount.context("Send needs --amount")?,
		},
		Action::Invite => ActionRequest::Invite {
			recipient: needs_recipient()?,
		},
	})
}

enum OpenPage {
	Transfer(PendingTransferPage),
	Invite(PendingInvitePage),
	Account(AccountActionPage),
}

impl OpenPage {
	async fn refresh(&mut self, ledger: &MemoryLedger) -> Phase {
		match self {
			Self::Transfer(page) => page.refresh(ledger).await,
			Self::Invite(page) => page.refresh(ledger).await,
			Self::Account(page) => page.refresh(ledger).await,
		}
	}

	async fn act(&mut self, ledger: &MemoryLedger, request: ActionRequest) -> Result<Settled, ActionError> {
		match self {
			Self::Transfer(page) => page.act(ledger, request).await,
			Self::Invite(page) => page.act(ledger, request).await,
			Self::Account(page) => page.act(ledger, request).await,
		}
	}

	fn render(&self) -> String {
		match self {
			Self::Transfer(page) => render::page(page),
			Self::Invite(page) => render::page(page),
			Self::Account(page) => render::page(page),
		}
	}

	fn unmount(&mut self) {
		match self {
			Self::Transfer(page) => page.unmount(),
			Self::Invite(page) => page.unmount(),
			Self::Account(page) => page.unmount(),
		}
	}
}

/// Re-encodes a page link in canonical form. `legacy` reads the query as
/// written by the unescaped encoder, where `null` is a word.
pub fn canonical_link(url: &str, legacy: bool) -> anyhow::Result<String> {
	let location = Location::parse(url);
	let route = location
		.route()
		.with_context(|| format!("unknown page {}", location.path))?;
	let query = location.query.as_str();
	Ok(match route {
		Route::PendingTransfer => route.link(&decode_as::<PendingTransferParams>(query, legacy)),
		Route::PendingAccountInvite => route.link(&decode_as::<PendingInviteParams>(query, legacy)),
		Route::MyAccounts | Route::Pending | Route::Create | Route::Transactions => route.path().to_string(),
		_ => route.link(&decode_as::<AssetParams>(query, legacy)),
	})
}

fn decode_as<P: RouteParams>(query: &str, legacy: bool) -> P {
	if legacy {
		P::from_legacy_query(query)
	} else {
		P::from_query(query)
	}
}

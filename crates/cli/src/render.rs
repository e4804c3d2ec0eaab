//! Plain-text rendering of rows and pages.

use std::fmt::Write;

use custody_views::page::{AccountView, MISSING_NOTICE, PendingInviteView, PendingTransferView};
use custody_views::projection::{AssetAccountRow, PendingInviteRow, PendingTransferRow};
use custody_views::{Page, PageModel, Phase};

pub fn account_row(row: &AssetAccountRow) -> String {
	let mut out = format!("{}  {}", row.symbol, row.quantity_text());
	if row.is_issuer {
		out.push_str("  [Issuer]");
	}
	let links = &row.links;
	let _ = write!(out, "\n  profile  {}\n  send     {}\n  invite   {}", links.profile, links.send, links.invite);
	if let Some(link) = &links.issue_airdrop {
		let _ = write!(out, "\n  airdrop  {link}");
	}
	if let Some(link) = &links.airdrop_request {
		let _ = write!(out, "\n  request  {link}");
	}
	out
}

pub fn transfer_row(row: &PendingTransferRow) -> String {
	format!(
		"{}  {} {}  {} -> {}\n  {}",
		row.kind.title(),
		row.amount_text(),
		row.symbol,
		row.sender,
		row.receiver,
		row.link
	)
}

pub fn invite_row(row: &PendingInviteRow) -> String {
	format!("{}  {}  {} -> {}\n  {}", row.kind.title(), row.symbol, row.sender, row.receiver, row.link)
}

/// Page body for a resolved view.
pub trait Detail {
	fn detail(&self) -> String;
}

impl Detail for PendingTransferView {
	fn detail(&self) -> String {
		let transfer = self.transfer.payload();
		let mut out = format!(
			"{} {}\n{} {}",
			self.counterparty_label(),
			self.counterparty(),
			self.amount_text(),
			transfer.asset.asset_type.symbol
		);
		if let Some(notice) = self.notice() {
			let _ = write!(out, "\n{notice}");
		}
		out
	}
}

impl Detail for PendingInviteView {
	fn detail(&self) -> String {
		let account = &self.invite.payload().account;
		let counterparty = self.counterparty().map(ToString::to_string).unwrap_or_default();
		format!("{} {}\n{}", self.counterparty_label(), counterparty, account.asset_type.symbol)
	}
}

impl Detail for AccountView {
	fn detail(&self) -> String {
		let account = self.account.payload();
		format!("{}  {}\nowner {}", account.asset_type.symbol, self.balance_text(), account.owner)
	}
}

pub fn page<M>(page: &Page<M>) -> String
where
	M: PageModel,
	M::View: Detail,
{
	let mut out = page.title().to_string();
	match (page.phase(), page.view()) {
		(Phase::Missing, _) => {
			let _ = write!(out, "\n{MISSING_NOTICE}");
		}
		(_, Some(view)) => {
			let _ = write!(out, "\n{}", view.detail());
		}
		_ => {}
	}
	if let Some(alert) = page.alert() {
		let _ = write!(out, "\nerror: {alert}");
	}
	let actions: Vec<_> = page.available_actions().iter().map(|action| action.choice().as_str()).collect();
	if !actions.is_empty() {
		let _ = write!(out, "\nactions: {}", actions.join(", "));
	}
	out
}

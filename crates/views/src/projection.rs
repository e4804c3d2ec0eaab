//! Row view-models built from ledger query results.
//!
//! Rows come out one per contract in query order; nothing here re-sorts or
//! deduplicates. Quantities are folded as [`Decimal`] and only formatted for
//! display.

use custody_params::{AssetParams, PendingInviteParams, PendingTransferParams, Route};
use custody_primitives::{
	AssetAccount, AssetHolding, AssetIdentity, Contract, ContractId, Decimal, Direction, Party, PendingAccountInvite,
	PendingTransfer,
};
use indexmap::IndexMap;
use num_format::{Locale, ToFormattedString};

/// Symbol whose accounts issued by the admin party offer an airdrop request.
pub const AIRDROP_SYMBOL: &str = "ET";

/// Sum of holding amounts. Saturates instead of overflowing.
pub fn aggregate_quantity<'a>(holdings: impl IntoIterator<Item = &'a Contract<AssetHolding>>) -> Decimal {
	holdings
		.into_iter()
		.fold(Decimal::ZERO, |sum, holding| sum.saturating_add(holding.payload.amount))
}

/// Aggregate quantity per asset identity, in order of first appearance.
pub fn quantities_by_identity<'a>(
	holdings: impl IntoIterator<Item = &'a Contract<AssetHolding>>,
) -> IndexMap<AssetIdentity, Decimal> {
	let mut totals = IndexMap::new();
	for holding in holdings {
		let total = totals
			.entry(holding.payload.asset_type.identity())
			.or_insert(Decimal::ZERO);
		*total = total.saturating_add(holding.payload.amount);
	}
	totals
}

/// Groups the integer part in thousands and keeps the significant fraction:
/// `1000` → `"1,000"`, `1234.50` → `"1,234.5"`.
pub fn format_quantity(quantity: Decimal) -> String {
	let quantity = quantity.normalize();
	let digits = quantity.abs().to_string();
	let (integer, fraction) = match digits.split_once('.') {
		Some((integer, fraction)) => (integer, Some(fraction)),
		None => (digits.as_str(), None),
	};
	let mut text = String::with_capacity(digits.len() + digits.len() / 3 + 1);
	if quantity.is_sign_negative() && !quantity.is_zero() {
		text.push('-');
	}
	match integer.parse::<u128>() {
		Ok(integer) => text.push_str(&integer.to_formatted_string(&Locale::en)),
		Err(_) => text.push_str(integer),
	}
	if let Some(fraction) = fraction {
		text.push('.');
		text.push_str(fraction);
	}
	text
}

/// Navigation targets of an account row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLinks {
	pub profile: String,
	pub send: String,
	pub swap: String,
	pub invite: String,
	pub transactions: String,
	/// Only for the issuer's own account.
	pub issue_airdrop: Option<String>,
	/// Only for [`AIRDROP_SYMBOL`] accounts issued by the admin party.
	pub airdrop_request: Option<String>,
}

/// One row of the account list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetAccountRow {
	pub contract_id: ContractId,
	pub symbol: String,
	pub quantity: Decimal,
	pub is_issuer: bool,
	pub links: AccountLinks,
}

impl AssetAccountRow {
	/// Projects `account`, summing the holdings among `holdings` that belong
	/// to its owner and asset identity.
	pub fn project(account: &Contract<AssetAccount>, holdings: &[Contract<AssetHolding>], admin: &Party) -> Self {
		let payload = &account.payload;
		let identity = payload.asset_type.identity();
		let quantity = aggregate_quantity(
			holdings
				.iter()
				.filter(|holding| holding.payload.owner == payload.owner && holding.payload.asset_type.identity() == identity),
		);
		let params = AssetParams::for_account(account);
		let is_issuer = payload.is_issuer();
		let offers_airdrop_request = payload.asset_type.issuer == *admin && payload.asset_type.symbol == AIRDROP_SYMBOL;
		Self {
			contract_id: account.contract_id.clone(),
			symbol: payload.asset_type.symbol.clone(),
			quantity,
			is_issuer,
			links: AccountLinks {
				profile: Route::AssetProfile.link(&params),
				send: Route::Send.link(&params),
				swap: Route::Swap.link(&params),
				invite: Route::Invite.link(&params),
				transactions: Route::TokenTransactions.link(&params),
				issue_airdrop: is_issuer.then(|| Route::IssueAirdrop.link(&params)),
				airdrop_request: offers_airdrop_request.then(|| Route::AirdropRequest.link(&params)),
			},
		}
	}

	/// First character of the symbol, shown as the row avatar.
	pub fn avatar(&self) -> Option<char> {
		self.symbol.chars().next()
	}

	pub fn quantity_text(&self) -> String {
		format_quantity(self.quantity)
	}
}

pub fn account_rows(
	accounts: &[Contract<AssetAccount>],
	holdings: &[Contract<AssetHolding>],
	admin: &Party,
) -> Vec<AssetAccountRow> {
	accounts
		.iter()
		.map(|account| AssetAccountRow::project(account, holdings, admin))
		.collect()
}

/// Kind of pending activity, for the row badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
	Transfer,
	AccountInvite,
}

impl TransactionKind {
	pub const fn title(self) -> &'static str {
		match self {
			Self::Transfer => "Send Request",
			Self::AccountInvite => "Account Invite",
		}
	}
}

/// One row of the pending transfer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransferRow {
	pub contract_id: ContractId,
	pub sender: Party,
	pub receiver: Party,
	pub symbol: String,
	pub amount: Decimal,
	pub direction: Direction,
	pub kind: TransactionKind,
	pub link: String,
}

impl PendingTransferRow {
	pub fn project(transfer: &Contract<PendingTransfer>, direction: Direction) -> Self {
		let payload = &transfer.payload;
		Self {
			contract_id: transfer.contract_id.clone(),
			sender: payload.sender().clone(),
			receiver: payload.recipient.clone(),
			symbol: payload.asset.asset_type.symbol.clone(),
			amount: payload.asset.amount,
			direction,
			kind: TransactionKind::Transfer,
			link: PendingTransferParams::for_transfer(transfer, direction).link(),
		}
	}

	pub fn amount_text(&self) -> String {
		format_quantity(self.amount)
	}
}

/// One row of the pending account-invite list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInviteRow {
	pub contract_id: ContractId,
	/// Empty when the proposal carries no signatory.
	pub sender: Party,
	pub receiver: Party,
	pub symbol: String,
	pub direction: Direction,
	pub kind: TransactionKind,
	pub link: String,
}

impl PendingInviteRow {
	pub fn project(invite: &Contract<PendingAccountInvite>, direction: Direction) -> Self {
		Self {
			contract_id: invite.contract_id.clone(),
			sender: invite.sender().cloned().unwrap_or_default(),
			receiver: invite.payload.recipient.clone(),
			symbol: invite.payload.account.asset_type.symbol.clone(),
			direction,
			kind: TransactionKind::AccountInvite,
			link: PendingInviteParams::for_invite(invite, direction).link(),
		}
	}
}

pub fn transfer_rows(transfers: &[Contract<PendingTransfer>], direction: Direction) -> Vec<PendingTransferRow> {
	transfers
		.iter()
		.map(|transfer| PendingTransferRow::project(transfer, direction))
		.collect()
}

pub fn invite_rows(invites: &[Contract<PendingAccountInvite>], direction: Direction) -> Vec<PendingInviteRow> {
	invites
		.iter()
		.map(|invite| PendingInviteRow::project(invite, direction))
		.collect()
}

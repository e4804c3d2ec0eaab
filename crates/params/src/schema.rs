use custody_primitives::{
	AssetAccount, AssetIdentity, AssetType, BondData, Contract, ContractId, Direction, Party, PendingAccountInvite,
	PendingTransfer,
};
use rust_decimal::Decimal;

use crate::codec;
use crate::decoded::DecodedParams;
use crate::fields;
use crate::route::Route;
use crate::value::{NavigationParams, ParamValue};

/// Typed parameter record of a destination page.
///
/// `from_params` must accept anything [`Self::to_params`] can produce and
/// must never fail on foreign input; defaults are owned by the
/// [`DecodedParams`] accessors.
pub trait RouteParams: Sized {
	fn to_params(&self) -> NavigationParams;

	fn from_params(params: &DecodedParams) -> Self;

	/// Decodes a canonical query string.
	fn from_query(query: &str) -> Self {
		Self::from_params(&codec::decode(query))
	}

	/// Decodes a query written by the legacy unescaped encoder.
	fn from_legacy_query(query: &str) -> Self {
		Self::from_params(&DecodedParams::from_legacy(codec::decode_legacy(query)))
	}
}

fn push_bond(params: &mut NavigationParams, bond: Option<&BondData>) {
	let field = |select: fn(&BondData) -> &str| -> ParamValue { bond.map(select).into() };
	params.insert(fields::BOND_ISSUER, field(|b| b.bond_issuer.as_str()));
	params.insert(fields::INTEREST_RATE, field(|b| b.interest_rate.as_str()));
	params.insert(fields::AMOUNT_ISSUED, field(|b| b.amount_issued.as_str()));
	params.insert(fields::DURATION, field(|b| b.duration.as_str()));
	params.insert(fields::PRICE, field(|b| b.price.as_str()));
}

fn asset_type(issuer: &Party, symbol: &str, fungible: bool, reference: &Option<String>, bond: &Option<BondData>) -> AssetType {
	AssetType {
		issuer: issuer.clone(),
		symbol: symbol.to_string(),
		fungible,
		reference: reference.clone(),
		bond: bond.clone(),
	}
}

/// Parameters of the per-account pages: profile, send, swap, invite, issue,
/// airdrop request and token transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetParams {
	pub issuer: Party,
	pub symbol: String,
	pub is_fungible: bool,
	pub is_shareable: bool,
	pub is_airdroppable: bool,
	pub owner: Party,
	/// Account contract id at link time. A hint only; pages re-resolve by key.
	pub contract_id: ContractId,
	pub reference: Option<String>,
	pub bond: Option<BondData>,
}

impl AssetParams {
	pub fn for_account(account: &Contract<AssetAccount>) -> Self {
		let payload = &account.payload;
		let asset = &payload.asset_type;
		Self {
			issuer: asset.issuer.clone(),
			symbol: asset.symbol.clone(),
			is_fungible: asset.fungible,
			is_shareable: payload.resharable,
			is_airdroppable: payload.airdroppable,
			owner: payload.owner.clone(),
			contract_id: account.contract_id.clone(),
			reference: asset.reference.clone(),
			bond: asset.bond.clone(),
		}
	}

	pub fn asset_type(&self) -> AssetType {
		asset_type(&self.issuer, &self.symbol, self.is_fungible, &self.reference, &self.bond)
	}

	pub fn identity(&self) -> AssetIdentity {
		self.asset_type().identity()
	}
}

impl RouteParams for AssetParams {
	fn to_params(&self) -> NavigationParams {
		let mut params = NavigationParams::new()
			.with(fields::ISSUER, &self.issuer)
			.with(fields::SYMBOL, &self.symbol)
			.with(fields::IS_FUNGIBLE, self.is_fungible)
			.with(fields::IS_SHAREABLE, self.is_shareable)
			.with(fields::IS_AIRDROPPABLE, self.is_airdroppable)
			.with(fields::OWNER, &self.owner)
			.with(fields::CONTRACT_ID, &self.contract_id)
			.with(fields::REFERENCE, self.reference.as_deref());
		push_bond(&mut params, self.bond.as_ref());
		params
	}

	fn from_params(params: &DecodedParams) -> Self {
		Self {
			issuer: params.party(fields::ISSUER),
			symbol: params.text(fields::SYMBOL),
			is_fungible: params.flag(fields::IS_FUNGIBLE),
			is_shareable: params.flag(fields::IS_SHAREABLE),
			is_airdroppable: params.flag(fields::IS_AIRDROPPABLE),
			owner: params.party(fields::OWNER),
			contract_id: params.contract_id(fields::CONTRACT_ID),
			reference: params.optional_text(fields::REFERENCE),
			bond: params.bond(),
		}
	}
}

/// Parameters of the pending-transfer detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransferParams {
	pub sender: Party,
	pub receiver: Party,
	pub amount: Decimal,
	pub symbol: String,
	pub issuer: Party,
	/// Transfer contract id; the page fetches it to learn whether it is still live.
	pub contract_id: ContractId,
	pub template_name: String,
	pub is_fungible: bool,
	pub reference: Option<String>,
	pub owner: Party,
	pub direction: Direction,
	pub bond: Option<BondData>,
}

impl PendingTransferParams {
	pub fn for_transfer(transfer: &Contract<PendingTransfer>, direction: Direction) -> Self {
		let payload = &transfer.payload;
		let asset = &payload.asset.asset_type;
		Self {
			sender: payload.sender().clone(),
			receiver: payload.recipient.clone(),
			amount: payload.asset.amount,
			symbol: asset.symbol.clone(),
			issuer: asset.issuer.clone(),
			contract_id: transfer.contract_id.clone(),
			template_name: fields::TEMPLATE_SEND.to_string(),
			is_fungible: asset.fungible,
			reference: asset.reference.clone(),
			owner: payload.asset.owner.clone(),
			direction,
			bond: asset.bond.clone(),
		}
	}

	pub fn asset_type(&self) -> AssetType {
		asset_type(&self.issuer, &self.symbol, self.is_fungible, &self.reference, &self.bond)
	}

	pub fn link(&self) -> String {
		Route::PendingTransfer.link(self)
	}
}

impl RouteParams for PendingTransferParams {
	fn to_params(&self) -> NavigationParams {
		let mut params = NavigationParams::new()
			.with(fields::SENDER, &self.sender)
			.with(fields::RECEIVER, &self.receiver)
			.with(fields::AMOUNT, self.amount)
			.with(fields::SYMBOL, &self.symbol)
			.with(fields::ISSUER, &self.issuer)
			.with(fields::CONTRACT_ID, &self.contract_id)
			.with(fields::TEMPLATE_NAME, &self.template_name)
			.with(fields::IS_FUNGIBLE, self.is_fungible)
			.with(fields::REFERENCE, self.reference.as_deref())
			.with(fields::OWNER, &self.owner)
			.with(fields::IS_INBOUND, self.direction.is_inbound());
		push_bond(&mut params, self.bond.as_ref());
		params
	}

	fn from_params(params: &DecodedParams) -> Self {
		Self {
			sender: params.party(fields::SENDER),
			receiver: params.party(fields::RECEIVER),
			amount: params.number(fields::AMOUNT).unwrap_or_default(),
			symbol: params.text(fields::SYMBOL),
			issuer: params.party(fields::ISSUER),
			contract_id: params.contract_id(fields::CONTRACT_ID),
			template_name: params.text(fields::TEMPLATE_NAME),
			is_fungible: params.flag(fields::IS_FUNGIBLE),
			reference: params.optional_text(fields::REFERENCE),
			owner: params.party(fields::OWNER),
			direction: Direction::from_inbound(params.flag(fields::IS_INBOUND)),
			bond: params.bond(),
		}
	}
}

/// Parameters of the pending account-invite detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInviteParams {
	pub sender: Party,
	pub receiver: Party,
	pub symbol: String,
	pub issuer: Party,
	pub is_fungible: bool,
	pub reference: Option<String>,
	pub owner: Party,
	pub direction: Direction,
	pub is_airdroppable: bool,
	pub is_shareable: bool,
	pub contract_id: ContractId,
	pub bond: Option<BondData>,
}

impl PendingInviteParams {
	pub fn for_invite(invite: &Contract<PendingAccountInvite>, direction: Direction) -> Self {
		let account = &invite.payload.account;
		let asset = &account.asset_type;
		Self {
			sender: invite.sender().cloned().unwrap_or_default(),
			receiver: invite.payload.recipient.clone(),
			symbol: asset.symbol.clone(),
			issuer: asset.issuer.clone(),
			is_fungible: asset.fungible,
			reference: asset.reference.clone(),
			owner: account.owner.clone(),
			direction,
			is_airdroppable: account.airdroppable,
			is_shareable: account.resharable,
			contract_id: invite.contract_id.clone(),
			bond: asset.bond.clone(),
		}
	}

	pub fn asset_type(&self) -> AssetType {
		asset_type(&self.issuer, &self.symbol, self.is_fungible, &self.reference, &self.bond)
	}

	pub fn link(&self) -> String {
		Route::PendingAccountInvite.link(self)
	}
}

impl RouteParams for PendingInviteParams {
	fn to_params(&self) -> NavigationParams {
		let mut params = NavigationParams::new()
			.with(fields::SENDER, &self.sender)
			.with(fields::RECEIVER, &self.receiver)
			.with(fields::SYMBOL, &self.symbol)
			.with(fields::ISSUER, &self.issuer)
			.with(fields::IS_FUNGIBLE, self.is_fungible)
			.with(fields::REFERENCE, self.reference.as_deref())
			.with(fields::OWNER, &self.owner)
			.with(fields::IS_INBOUND, self.direction.is_inbound())
			.with(fields::IS_AIRDROPPABLE, self.is_airdroppable)
			.with(fields::IS_SHAREABLE, self.is_shareable)
			.with(fields::CONTRACT_ID, &self.contract_id);
		push_bond(&mut params, self.bond.as_ref());
		params
	}

	fn from_params(params: &DecodedParams) -> Self {
		Self {
			sender: params.party(fields::SENDER),
			receiver: params.party(fields::RECEIVER),
			symbol: params.text(fields::SYMBOL),
			issuer: params.party(fields::ISSUER),
			is_fungible: params.flag(fields::IS_FUNGIBLE),
			reference: params.optional_text(fields::REFERENCE),
			owner: params.party(fields::OWNER),
			direction: Direction::from_inbound(params.flag(fields::IS_INBOUND)),
			is_airdroppable: params.flag(fields::IS_AIRDROPPABLE),
			is_shareable: params.flag(fields::IS_SHAREABLE),
			contract_id: params.contract_id(fields::CONTRACT_ID),
			bond: params.bond(),
		}
	}
}

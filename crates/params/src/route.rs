use crate::codec;
use crate::schema::RouteParams;

/// Every routed page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
	MyAccounts,
	Pending,
	Create,
	Transactions,
	AssetProfile,
	Send,
	Swap,
	AirdropRequest,
	Invite,
	IssueAirdrop,
	TokenTransactions,
	PendingTransfer,
	PendingAccountInvite,
}

impl Route {
	pub const ALL: [Route; 13] = [
		Self::MyAccounts,
		Self::Pending,
		Self::Create,
		Self::Transactions,
		Self::AssetProfile,
		Self::Send,
		Self::Swap,
		Self::AirdropRequest,
		Self::Invite,
		Self::IssueAirdrop,
		Self::TokenTransactions,
		Self::PendingTransfer,
		Self::PendingAccountInvite,
	];

	pub const fn path(self) -> &'static str {
		match self {
			Self::MyAccounts => "/",
			Self::Pending => "/pending",
			Self::Create => "/create",
			Self::Transactions => "/transactions",
			Self::AssetProfile => "/asset",
			Self::Send => "/send",
			Self::Swap => "/swap",
			Self::AirdropRequest => "/airdrop-request",
			Self::Invite => "/invite",
			Self::IssueAirdrop => "/issue",
			Self::TokenTransactions => "/transactionstoken",
			Self::PendingTransfer => "/pending-transfer",
			Self::PendingAccountInvite => "/pending-account-invite",
		}
	}

	pub fn from_path(path: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|route| route.path() == path)
	}

	/// Heading shown in the app bar; only top-level menu routes have one.
	pub const fn title(self) -> Option<&'static str> {
		match self {
			Self::MyAccounts => Some("My Asset Accounts"),
			Self::Pending => Some("Pending Activities"),
			Self::Create => Some("Create"),
			Self::Transactions => Some("Transaction History"),
			_ => None,
		}
	}

	/// Path plus canonical query for `params`.
	pub fn link(self, params: &impl RouteParams) -> String {
		format!("{}{}", self.path(), codec::encode(&params.to_params()))
	}
}

/// A location split into path and query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
	pub path: String,
	/// Query including the leading `?`, or empty.
	pub query: String,
}

impl Location {
	/// Splits `target` at the first `?`. A fragment, if any, is dropped.
	pub fn parse(target: &str) -> Self {
		let target = target.split_once('#').map_or(target, |(before, _)| before);
		match target.find('?') {
			Some(at) => Self {
				path: target[..at].to_string(),
				query: target[at..].to_string(),
			},
			None => Self {
				path: target.to_string(),
				query: String::new(),
			},
		}
	}

	pub fn route(&self) -> Option<Route> {
		Route::from_path(&self.path)
	}

	pub fn href(&self) -> String {
		format!("{}{}", self.path, self.query)
	}
}

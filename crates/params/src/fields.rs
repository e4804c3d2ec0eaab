//! Query-string field names shared by every encoder and decoder.
//!
//! Renaming any of these is a breaking change for links already in flight.

// ---------------------------------------------------------------------------
// Parties and contract handles
// ---------------------------------------------------------------------------

pub const SENDER: &str = "sender";
pub const RECEIVER: &str = "receiver";
pub const OWNER: &str = "owner";
pub const ISSUER: &str = "issuer";
pub const CONTRACT_ID: &str = "contractId";
pub const TEMPLATE_NAME: &str = "templateName";

// ---------------------------------------------------------------------------
// Asset type
// ---------------------------------------------------------------------------

pub const SYMBOL: &str = "symbol";
pub const AMOUNT: &str = "amount";
pub const IS_FUNGIBLE: &str = "isFungible";
pub const REFERENCE: &str = "reference";

// ---------------------------------------------------------------------------
// Account flags and direction
// ---------------------------------------------------------------------------

pub const IS_SHAREABLE: &str = "isShareable";
pub const IS_AIRDROPPABLE: &str = "isAirdroppable";
pub const IS_INBOUND: &str = "isInbound";

// ---------------------------------------------------------------------------
// Bond attributes
// ---------------------------------------------------------------------------

pub const BOND_ISSUER: &str = "bondIssuer";
pub const INTEREST_RATE: &str = "interestRate";
pub const AMOUNT_ISSUED: &str = "amountIssued";
pub const DURATION: &str = "duration";
pub const PRICE: &str = "price";

/// Template name written by pending-transfer rows.
pub const TEMPLATE_SEND: &str = "send";

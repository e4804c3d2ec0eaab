//! Read-model types for ledger contracts consumed by the custody view layer.
//!
//! Nothing here is owned by the view layer: every value is a render-scoped
//! copy of an externally owned ledger contract.

/// Asset descriptors, accounts and holdings.
pub mod asset;
/// Contract envelopes and template identifiers.
pub mod contract;
/// Party and contract identifiers.
pub mod ids;
/// In-flight transfers and account invites.
pub mod pending;

pub use asset::{AssetAccount, AssetHolding, AssetIdentity, AssetType, BondData};
pub use contract::{Contract, Template, TemplateId, templates};
pub use ids::{ContractId, Party};
pub use pending::{Direction, PendingAccountInvite, PendingTransfer};
pub use rust_decimal::Decimal;

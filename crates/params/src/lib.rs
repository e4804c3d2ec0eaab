//! Navigation parameters carried between routed pages in the URL query string.
//!
//! Pages do not share a client-side store; everything a destination page needs
//! to re-resolve its ledger state travels as query parameters. This crate owns
//! both ends of that channel:
//!
//! * [`codec`]: the wire format. [`codec::encode`]/[`codec::decode`] are the
//!   canonical, percent-encoded form with an explicit null sentinel;
//!   [`codec::encode_legacy`]/[`codec::decode_legacy`] reproduce the older
//!   unescaped `key=value` links.
//! * [`DecodedParams`]: typed per-field accessors that own every default, so
//!   no page re-implements `"true"` comparisons or `"null"` checks.
//! * [`RouteParams`]: one record per destination page.
//!
//! The URL carries hints for ledger queries, never ground truth.

pub mod codec;
mod decoded;
pub mod fields;
mod route;
mod schema;
mod value;

pub use codec::{decode, decode_legacy, encode, encode_legacy};
pub use decoded::DecodedParams;
pub use route::{Location, Route};
pub use schema::{AssetParams, PendingInviteParams, PendingTransferParams, RouteParams};
pub use value::{NavigationParams, ParamValue};

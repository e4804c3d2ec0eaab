//! View layer of the custody front end.
//!
//! Pages are rebuilt from the URL on every mount and re-synchronized against
//! the ledger before offering any action:
//!
//! * [`page`]: per-route state machines (`Decoding → Refreshing → Ready`,
//!   `Ready → Acting → Refreshing`) with generation-stamped reads that become
//!   no-ops once the page is unmounted or superseded.
//! * [`projection`]: one row per contract in query order, decimal-safe
//!   aggregate quantities and their display formatting.
//! * [`region`]: open/closed state of the side menu and help drawer.
//! * [`nav`]: the routing collaborator.

pub mod action;
pub mod error;
mod mount;
pub mod nav;
pub mod page;
pub mod projection;
pub mod region;

pub use action::{Action, ActionRequest};
pub use error::ActionError;
pub use nav::{History, Navigator};
pub use page::{Page, PageModel, Phase, Refused, Settled};
pub use region::{Region, Regions};

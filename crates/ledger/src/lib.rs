//! Ledger collaborator for the custody view layer.
//!
//! The ledger is the single shared mutable resource: it serializes and
//! validates every state transition. This crate defines how the view layer
//! talks to it and nothing about ledger semantics beyond what is needed to
//! drive the pages:
//!
//! * [`Ledger`]: query by filter, fetch by contract id, exercise a choice.
//! * [`LedgerExt`]: typed wrappers decoding payloads into [`Template`]s.
//! * [`Dispatcher`]: exercises a [`Choice`] against a [`Resolved`] contract.
//! * [`MemoryLedger`]: in-process ledger with JSON snapshots, used by the CLI
//!   and tests.
//!
//! [`Template`]: custody_primitives::Template

pub mod choice;
pub mod dispatch;
pub mod error;
pub mod filter;
mod ledger;
pub mod memory;

pub use choice::Choice;
pub use dispatch::{Dispatcher, Exercised, Resolved};
pub use error::{LedgerError, Result};
pub use filter::Filter;
pub use ledger::{ExerciseResult, Ledger, LedgerExt, RawContract};
pub use memory::{MemoryLedger, MemorySnapshot};

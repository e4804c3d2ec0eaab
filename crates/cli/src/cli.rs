use std::path::PathBuf;

use clap::{Parser, Subcommand};
use custody_primitives::{Decimal, Party};

#[derive(Parser, Debug)]
#[command(name = "custody")]
#[command(about = "Browse and act on custody ledger contracts")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file
	#[arg(long, short = 'c', value_name = "PATH", default_value = "custody.toml")]
	pub config: PathBuf,

	/// Act as this party instead of the configured one
	#[arg(long)]
	pub party: Option<Party>,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// List the party's asset accounts with their balances
	Accounts,
	/// List pending transfers and account invites
	Pending {
		/// Show requests sent by the party instead of addressed to it
		#[arg(long)]
		outbound: bool,
	},
	/// Open a page link and show its resolved state
	Open {
		/// Page link, e.g. `/pending-transfer?contractId=...`
		url: String,
	},
	/// Open a page link and run one of its actions
	Act {
		/// Page link
		url: String,
		/// accept, reject, cancel, send or invite
		action: String,
		/// Receiving party for send and invite
		#[arg(long)]
		recipient: Option<Party>,
		/// Amount to send
		#[arg(long)]
		amount: Option<Decimal>,
	},
	/// Rewrite a page link in canonical form
	Link {
		/// Page link
		url: String,
		/// Read the link as written by older pages, where `null` is a word
		#[arg(long)]
		legacy: bool,
	},
}

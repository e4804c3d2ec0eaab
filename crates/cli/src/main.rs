//! `custody` binary.
//!
//! Reads `custody.toml`, loads the ledger snapshot, runs one command against
//! it and writes the snapshot back after an accepted action.

mod app;
mod cli;
mod config;
mod render;
mod store;

use std::process::ExitCode;

use app::Session;
use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use custody_primitives::Direction;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();

	let config = match Config::load(&cli.config) {
		Ok(config) => config,
		Err(error) => {
			eprintln!("custody: {error}");
			return Ok(ExitCode::from(2));
		}
	};
	setup_tracing(&config.log_filter);

	let party = cli.party.unwrap_or_else(|| config.party.clone());
	info!(%party, auth = %config.auth, snapshot = %config.snapshot.display(), "starting custody");

	let ledger = store::load(&config.snapshot)?;
	let mut session = Session::new(party, config.admin_party.clone(), ledger);

	let output = match cli.command {
		Command::Accounts => session.accounts().await?,
		Command::Pending { outbound } => session.pending(Direction::from_inbound(!outbound)).await?,
		Command::Open { url } => session.open(&url).await?,
		Command::Act {
			url,
			action,
			recipient,
			amount,
		} => {
			let output = session.act(&url, &action, recipient, amount).await?;
			store::save(&config.snapshot, &session.ledger)?;
			output
		}
		Command::Link { url, legacy } => app::canonical_link(&url, legacy)?,
	};
	println!("{output}");
	Ok(ExitCode::SUCCESS)
}

fn setup_tracing(filter: &str) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();
}

//! Ledger snapshot persistence between invocations.

use std::path::Path;

use anyhow::Context;
use custody_ledger::{MemoryLedger, MemorySnapshot};
use tracing::{debug, info};

/// Loads the snapshot at `path`. A missing file yields an empty ledger.
pub fn load(path: &Path) -> anyhow::Result<MemoryLedger> {
	let text = match std::fs::read_to_string(path) {
		Ok(text) => text,
		Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
			info!(path = %path.display(), "no ledger snapshot, starting empty");
			return Ok(MemoryLedger::new());
		}
		Err(error) => return Err(error).with_context(|| format!("reading ledger snapshot {}", path.display())),
	};
	let snapshot: MemorySnapshot =
		serde_json::from_str(&text).with_context(|| format!("parsing ledger snapshot {}", path.display()))?;
	debug!(path = %path.display(), contracts = snapshot.contracts.len(), "ledger snapshot loaded");
	Ok(MemoryLedger::from_snapshot(snapshot))
}

/// Writes the ledger back to `path`.
pub fn save(path: &Path, ledger: &MemoryLedger) -> anyhow::Result<()> {
	let snapshot = ledger.snapshot();
	let text = serde_json::to_string_pretty(&snapshot)?;
	std::fs::write(path, text).with_context(|| format!("writing ledger snapshot {}", path.display()))?;
	debug!(path = %path.display(), contracts = snapshot.contracts.len(), "ledger snapshot saved");
	Ok(())
}

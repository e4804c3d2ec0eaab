//! `custody.toml` loading.
//!
//! ```toml
//! party = "alice"
//! admin_party = "custodian"
//!
//! [auth]
//! provider = "insecure"   # or "hub"
//!
//! [ledger]
//! snapshot = "ledger.json"
//!
//! [log]
//! filter = "custody=debug,info"
//! ```
//!
//! Relative paths are resolved against the directory of the config file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use custody_primitives::Party;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading the configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The file is not valid TOML or does not match the schema.
	#[error("invalid configuration in {path}: {error}")]
	Toml {
		/// Path to the offending file.
		path: PathBuf,
		/// The underlying parse error.
		error: toml::de::Error,
	},

	/// `auth.provider` names no supported provider.
	#[error("unknown auth provider {0:?} (expected \"insecure\" or \"hub\")")]
	UnknownAuthProvider(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// How the party identity is established. Token handling itself lives
/// outside this binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProvider {
	/// Party name taken as-is.
	Insecure,
	/// Identity issued by a hosted ledger.
	Hub,
}

impl FromStr for AuthProvider {
	type Err = ConfigError;

	fn from_str(name: &str) -> Result<Self> {
		match name {
			"insecure" => Ok(Self::Insecure),
			"hub" => Ok(Self::Hub),
			other => Err(ConfigError::UnknownAuthProvider(other.to_string())),
		}
	}
}

impl fmt::Display for AuthProvider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Insecure => "insecure",
			Self::Hub => "hub",
		})
	}
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
	party: Party,
	#[serde(default)]
	admin_party: Option<Party>,
	#[serde(default)]
	auth: RawAuth,
	#[serde(default)]
	ledger: RawLedger,
	#[serde(default)]
	log: RawLog,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAuth {
	#[serde(default = "default_provider")]
	provider: String,
}

impl Default for RawAuth {
	fn default() -> Self {
		Self {
			provider: default_provider(),
		}
	}
}

fn default_provider() -> String {
	"insecure".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLedger {
	#[serde(default = "default_snapshot")]
	snapshot: PathBuf,
}

impl Default for RawLedger {
	fn default() -> Self {
		Self {
			snapshot: default_snapshot(),
		}
	}
}

fn default_snapshot() -> PathBuf {
	PathBuf::from("ledger.json")
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLog {
	#[serde(default)]
	filter: Option<String>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub party: Party,
	/// Issuer whose `ET` accounts offer an airdrop request. Defaults to `party`.
	pub admin_party: Party,
	pub auth: AuthProvider,
	/// Ledger snapshot file, resolved against the config directory.
	pub snapshot: PathBuf,
	/// `EnvFilter` directives; `RUST_LOG` takes precedence.
	pub log_filter: String,
}

pub const DEFAULT_LOG_FILTER: &str = "warn";

impl Config {
	pub fn load(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&text, path)
	}

	/// Parses `text` as if read from `path`.
	pub fn parse(text: &str, path: &Path) -> Result<Self> {
		let raw: RawConfig = toml::from_str(text).map_err(|error| ConfigError::Toml {
			path: path.to_path_buf(),
			error,
		})?;
		let auth = raw.auth.provider.parse()?;
		let base = path.parent().unwrap_or_else(|| Path::new(""));
		Ok(Self {
			admin_party: raw.admin_party.unwrap_or_else(|| raw.party.clone()),
			party: raw.party,
			auth,
			snapshot: base.join(raw.ledger.snapshot),
			log_filter: raw.log.filter.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
		})
	}
}

//! User configuration.
//!
//! Read from `<config dir>/encinfo/config.toml` unless `--config` names a
//! file. Every key is optional; command-line flags win over the file.

use std::path::{Path, PathBuf};

use encinfo_status::DEFAULT_WARN_CONFIDENCE;
use serde::Deserialize;
use thiserror::Error;

const FILE_NAME: &str = "config.toml";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The file is not valid TOML or does not match the expected keys.
	#[error("invalid config {path}: {error}")]
	Parse {
		/// Path to the malformed file.
		path: PathBuf,
		/// The underlying parse error.
		error: toml::de::Error,
	},
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Encoding assumed for files that declare none.
	pub default_encoding: String,
	/// Candidate confidence at which a mismatching label turns into a warning.
	pub warn_confidence: u8,
	/// Print the encoding menu under each label.
	pub show_candidates: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			default_encoding: "UTF-8".to_owned(),
			warn_confidence: DEFAULT_WARN_CONFIDENCE,
			show_candidates: false,
		}
	}
}

/// Default config file location, if the platform has a config directory.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("encinfo").join(FILE_NAME))
}

/// Loads the config at `explicit`, or at [`default_path`] if `None`.
///
/// A missing default file yields the defaults. A file named explicitly must
/// exist.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
	if let Some(path) = explicit {
		return load_file(path);
	}
	match default_path() {
		Some(path) if path.exists() => load_file(&path),
		_ => {
			tracing::debug!("no config file, using defaults");
			Ok(Config::default())
		}
	}
}

fn load_file(path: &Path) -> Result<Config, ConfigError> {
	let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
		path: path.to_path_buf(),
		error,
	})?;
	let config = toml::from_str(&content).map_err(|error| ConfigError::Parse {
		path: path.to_path_buf(),
		error,
	})?;
	tracing::debug!(path = %path.display(), "loaded config");
	Ok(config)
}

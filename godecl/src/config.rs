// SPDX-FileCopyrightText: 2026 LunNova
//
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "godecl.toml";

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Format {
	#[default]
	Text,
	Json,
}

impl FromStr for Format {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"text" => Ok(Format::Text),
			"json" => Ok(Format::Json),
			other => Err(format!("unknown format {other:?}, expected `text` or `json`")),
		}
	}
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub format: Format,
	pub flatten: bool,
	pub allow_undefined: bool,
	/// File extensions picked up when walking directories
	pub extensions: Vec<String>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			format: Format::Text,
			flatten: false,
			allow_undefined: false,
			extensions: vec!["go".to_string()],
		}
	}
}

impl Config {
	pub fn load(path: &Path) -> Result<Config> {
		let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
		toml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))
	}

	/// An explicit path must exist; otherwise `godecl.toml` is used if present.
	pub fn discover(explicit: Option<&Path>) -> Result<Config> {
		if let Some(path) = explicit {
			return Config::load(path);
		}
		let default_path = Path::new(CONFIG_FILE_NAME);
		if default_path.is_file() {
			tracing::debug!(path = %default_path.display(), "loading config");
			Config::load(default_path)
		} else {
			Ok(Config::default())
		}
	}

	#[must_use]
	pub fn matches_extension(&self, path: &Path) -> bool {
		path.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
	}
}

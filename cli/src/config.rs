use std::{error::Error, path::Path};

use serde::{Deserialize, Serialize};

/// Settings that can be kept in a TOML file instead of being passed as flags.
/// Flags given on the command line win over the file.
#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
	pub size: Option<usize>,
	pub key: Option<String>,
	pub cell_width: Option<usize>,
	pub color: Option<bool>,
}

impl FileConfig {
	pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
		let text = std::fs::read_to_string(path).map_err(|e| format!("Could not read {}: {}", path.display(), e))?;
		Self::parse(&text)
	}

	pub fn parse(text: &str) -> Result<Self, Box<dyn Error>> {
		Ok(toml::from_str(text)?)
	}
}

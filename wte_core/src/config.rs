use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::LocaleAliasTable;
use crate::WteError;
use crate::WteResult;
use crate::scanner::DEFAULT_MAX_NESTING_DEPTH;

/// Default maximum input size in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["wte.toml", ".wte.toml", ".config/wte.toml"];

/// Configuration loaded from a `wte.toml` file.
///
/// ```toml
/// default_locale = "en"
/// max_file_size = 10485760
/// max_nesting_depth = 512
///
/// [locales.en]
/// namespaces = ["File", "Image"]
/// alt_params = ["alt"]
/// magic_words = ["thumb", "thumbnail", "frameless", "left", "right", "center", "none"]
///
/// [locales.ar]
/// namespaces = ["ملف", "صورة", "File"]
/// alt_params = ["بديل", "alt"]
/// ```
#[derive(Debug, Deserialize)]
pub struct WteConfig {
	/// Locale used when none is given on the command line.
	#[serde(default)]
	pub default_locale: Option<String>,
	/// Alias tables keyed by language code.
	#[serde(default)]
	pub locales: BTreeMap<String, LocaleAliasTable>,
	/// Maximum input size in bytes. Larger inputs are rejected before
	/// scanning. Defaults to 10 MB.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
	/// Maximum template or link nesting depth accepted before editing.
	#[serde(default = "default_max_nesting_depth")]
	pub max_nesting_depth: usize,
}

impl Default for WteConfig {
	fn default() -> Self {
		Self {
			default_locale: None,
			locales: BTreeMap::new(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
		}
	}
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

fn default_max_nesting_depth() -> usize {
	DEFAULT_MAX_NESTING_DEPTH
}

impl WteConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> WteResult<Option<WteConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %config_path.display(), locales = config.locales.len(), "loaded config");

		Ok(Some(config))
	}

	pub fn parse(content: &str) -> WteResult<WteConfig> {
		toml::from_str(content).map_err(|e| WteError::ConfigParse(e.to_string()))
	}

	/// The alias table for `code`.
	pub fn locale(&self, code: &str) -> WteResult<&LocaleAliasTable> {
		self.locales.get(code).ok_or_else(|| {
			WteError::UnknownLocale {
				code: code.to_string(),
				available: self.available_locales(),
			}
		})
	}

	/// Comma separated list of configured locale codes, for messages.
	pub fn available_locales(&self) -> String {
		if self.locales.is_empty() {
			return "none".to_string();
		}

		self.locales.keys().cloned().collect::<Vec<_>>().join(", ")
	}
}

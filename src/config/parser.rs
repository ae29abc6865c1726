use crate::config::settings::{MemorySettings, SettingsStore};
use crate::config::types::default_settings;
use crate::error::{Bot2HumanError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Raw contents of a settings file: a TOML table of string values.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct SettingsFile(BTreeMap<String, toml::Value>);

/// Parse a settings file from the given path.
pub fn parse_settings_file(path: &Path) -> Result<MemorySettings> {
	let content =
		std::fs::read_to_string(path).map_err(|source| Bot2HumanError::SettingsRead {
			path: path.to_path_buf(),
			source,
		})?;

	parse_settings_str(&content, path)
}

/// Parse settings from a string (useful for testing).
///
/// Dotted keys may be written quoted (`"nick_content_re.0" = ...`) or bare
/// (`nick_content_re.0 = ...`); bare ones arrive as nested tables and are
/// flattened back into dotted keys.
pub fn parse_settings_str(content: &str, path: &Path) -> Result<MemorySettings> {
	let file: SettingsFile =
		toml::from_str(content).map_err(|source| Bot2HumanError::SettingsParse {
			path: path.to_path_buf(),
			source,
		})?;

	let mut settings = MemorySettings::new();
	for (key, value) in file.0 {
		flatten_into(&mut settings, key, value)?;
	}
	Ok(settings)
}

fn flatten_into(settings: &mut MemorySettings, key: String, value: toml::Value) -> Result<()> {
	match value {
		toml::Value::String(s) => {
			settings.set(&key, &s);
			Ok(())
		}
		toml::Value::Table(table) => {
			for (child, value) in table {
				flatten_into(settings, format!("{key}.{child}"), value)?;
			}
			Ok(())
		}
		other => Err(Bot2HumanError::SettingsValue {
			key,
			message: format!("expected a string, found {}", other.type_str()),
		}),
	}
}

/// Default settings file location: `<config_dir>/bot2human/settings.toml`.
pub fn default_settings_path() -> Result<PathBuf> {
	let config_dir = dirs::config_dir().ok_or(Bot2HumanError::ConfigDirectoryNotFound)?;
	Ok(config_dir.join("bot2human").join("settings.toml"))
}

/// Render a commented settings file holding every default.
pub fn generate_settings_template() -> Result<String> {
	let defaults: BTreeMap<String, String> = default_settings()
		.into_iter()
		.map(|(k, v)| (k, v.to_string()))
		.collect();

	let body =
		toml::to_string(&defaults).map_err(|source| Bot2HumanError::SettingsSerialize { source })?;

	Ok(format!(
		"# bot2human settings\n\
		 #\n\
		 # bot_nicks: space-separated nicknames of relay bots, e.g. \"teleboto toxsync\"\n\
		 # nick_content_re.N: regexes with named groups `nick` and `text`, tried in order.\n\
		 # Add nick_content_re.3, .4, ... for more; set one to \"\" to disable it.\n\n\
		 {body}"
	))
}

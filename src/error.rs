use std::path::PathBuf;

/// Library-level structured errors for bot2human.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum Bot2HumanError {
	#[error("Failed to read settings file: {path}")]
	SettingsRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse settings file: {path}")]
	SettingsParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to serialize settings")]
	SettingsSerialize {
		#[source]
		source: toml::ser::Error,
	},

	#[error("Invalid value for setting {key}: {message}")]
	SettingsValue { key: String, message: String },

	#[error("Invalid regex pattern in {key}: {pattern}")]
	InvalidPattern {
		key: String,
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Pattern in {key} has no named capture group '{group}': {pattern}")]
	MissingCaptureGroup {
		key: String,
		pattern: String,
		group: &'static str,
	},

	#[error("Message line is missing its {field}")]
	MissingField { field: &'static str },

	#[error("Failed to resolve config directory")]
	ConfigDirectoryNotFound,
}

impl Bot2HumanError {
	/// True for errors raised while compiling extraction patterns.
	pub fn is_pattern_error(&self) -> bool {
		matches!(
			self,
			Bot2HumanError::InvalidPattern { .. } | Bot2HumanError::MissingCaptureGroup { .. }
		)
	}
}

/// Result type alias using Bot2HumanError.
pub type Result<T> = std::result::Result<T, Bot2HumanError>;

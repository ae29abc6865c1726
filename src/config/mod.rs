//! Configuration loading and reloading for bot2human.
//!
//! This module handles:
//! - Recognized setting keys and their built-in defaults
//! - The settings backend trait and TOML settings files
//! - Building validated rewrite snapshots and swapping them in atomically

pub mod parser;
pub mod settings;
pub mod store;
pub mod types;

pub use parser::{
	default_settings_path, generate_settings_template, parse_settings_file, parse_settings_str,
};
pub use settings::{MemorySettings, SettingsStore, initialize_defaults};
pub use store::{ConfigStore, load_rewrite_config};
pub use types::{
	BOT_NICKS_KEY, DEFAULT_PATTERNS, PATTERN_KEY_PREFIX, RewriteConfig, default_settings,
	pattern_key,
};

//! Host integration for bot2human.
//!
//! This module handles:
//! - Registration metadata shown by the host at load time
//! - The incoming-message hook (always returns a line)
//! - The settings-change hook and its status code

use crate::config::{ConfigStore, RewriteConfig, SettingsStore, initialize_defaults};
use crate::error::Result;
use crate::rules::rewrite_line;
use std::fmt;
use std::sync::Arc;

/// Informational metadata presented to the host on registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptInfo {
	pub name: &'static str,
	pub author: &'static str,
	pub version: &'static str,
	pub license: &'static str,
	pub description: &'static str,
}

impl ScriptInfo {
	/// Authors as listed in the package metadata.
	pub fn authors(&self) -> impl Iterator<Item = &'static str> {
		self.author.split(':').filter(|a| !a.is_empty())
	}
}

impl fmt::Display for ScriptInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let authors: Vec<&str> = self.authors().collect();
		write!(
			f,
			"{} {} by {} ({}): {}",
			self.name,
			self.version,
			authors.join(" & "),
			self.license,
			self.description
		)
	}
}

pub const SCRIPT_INFO: ScriptInfo = ScriptInfo {
	name: env!("CARGO_PKG_NAME"),
	author: env!("CARGO_PKG_AUTHORS"),
	version: env!("CARGO_PKG_VERSION"),
	license: env!("CARGO_PKG_LICENSE"),
	description: env!("CARGO_PKG_DESCRIPTION"),
};

/// Status returned to the host from callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
	Ok,
	Error,
}

/// The plugin as the host sees it: settings plus the live rewrite snapshot.
#[derive(Debug)]
pub struct Bot2Human<S: SettingsStore> {
	settings: S,
	store: ConfigStore,
}

impl<S: SettingsStore> Bot2Human<S> {
	/// Install missing defaults into `settings` and load the first snapshot.
	pub fn new(mut settings: S) -> Result<Self> {
		initialize_defaults(&mut settings);
		let store = ConfigStore::new();
		store.reload(&settings)?;
		Ok(Self { settings, store })
	}

	/// Registration metadata.
	pub fn register() -> ScriptInfo {
		SCRIPT_INFO
	}

	/// Incoming-message hook. Returns the rewritten line, or `raw` as-is.
	pub fn on_privmsg(&self, raw: &str) -> String {
		let config = self.store.snapshot();
		rewrite_line(raw, &config).into_string()
	}

	/// Settings-change hook. Reloads everything regardless of `key`.
	///
	/// A rejected reload is logged and reported as [`ReturnCode::Error`]; the
	/// previous configuration stays active.
	pub fn on_config_changed(&self, key: &str) -> ReturnCode {
		match self.store.on_setting_changed(key, &self.settings) {
			Ok(_) => ReturnCode::Ok,
			Err(_) => ReturnCode::Error,
		}
	}

	/// Write a setting the way the host would, then fire the change hook.
	pub fn set_option(&mut self, key: &str, value: &str) -> ReturnCode {
		self.settings.set(key, value);
		self.on_config_changed(key)
	}

	pub fn settings(&self) -> &S {
		&self.settings
	}

	pub fn snapshot(&self) -> Arc<RewriteConfig> {
		self.store.snapshot()
	}
}

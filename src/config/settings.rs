use crate::config::types::default_settings;
use std::collections::BTreeMap;

/// Key/value settings backend owned by the host.
///
/// All values are strings. The host persists them; this crate only reads,
/// and writes defaults on first run.
pub trait SettingsStore {
	/// Current value for `key`, if one is set.
	fn get(&self, key: &str) -> Option<String>;

	/// Store `value` under `key`, replacing any existing value.
	fn set(&mut self, key: &str, value: &str);

	/// Whether a value is present for `key`.
	fn is_set(&self, key: &str) -> bool {
		self.get(key).is_some()
	}
}

/// In-memory settings backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettings {
	values: BTreeMap<String, String>,
}

impl MemorySettings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Iterate over all set values in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl SettingsStore for MemorySettings {
	fn get(&self, key: &str) -> Option<String> {
		self.values.get(key).cloned()
	}

	fn set(&mut self, key: &str, value: &str) {
		self.values.insert(key.to_string(), value.to_string());
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemorySettings {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			values: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

/// Write the built-in default for every recognized key that has no value yet.
///
/// Never overwrites a user value. Returns the keys that were installed.
pub fn initialize_defaults<S: SettingsStore + ?Sized>(settings: &mut S) -> Vec<String> {
	let mut installed = Vec::new();
	for (key, default) in default_settings() {
		if !settings.is_set(&key) {
			tracing::debug!(key = %key, "installing default setting");
			settings.set(&key, default);
			installed.push(key);
		}
	}
	installed
}

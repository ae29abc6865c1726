use crate::config::settings::SettingsStore;
use crate::config::types::{BOT_NICKS_KEY, DEFAULT_PATTERNS, RewriteConfig, pattern_key};
use crate::error::Result;
use crate::rules::ExtractionPattern;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Build a validated rewrite configuration from raw settings.
///
/// Patterns are read from `nick_content_re.0` upwards. The default indices are
/// always consulted (falling back to the built-in pattern if unset); past them,
/// reading continues while consecutive keys are set. Empty pattern values are
/// skipped.
pub fn load_rewrite_config<S: SettingsStore + ?Sized>(settings: &S) -> Result<RewriteConfig> {
	let relays = RewriteConfig::parse_relays(&settings.get(BOT_NICKS_KEY).unwrap_or_default());

	let mut patterns = Vec::new();
	for index in 0.. {
		let key = pattern_key(index);
		let value = match (settings.get(&key), DEFAULT_PATTERNS.get(index)) {
			(Some(value), _) => value,
			(None, Some(default)) => default.to_string(),
			(None, None) => break,
		};

		if value.is_empty() {
			tracing::debug!(key = %key, "skipping disabled pattern");
			continue;
		}

		patterns.push(ExtractionPattern::compile(&key, &value)?);
	}

	Ok(RewriteConfig { relays, patterns })
}

/// Holder of the current rewrite snapshot.
///
/// Readers grab an `Arc` to a complete snapshot; reloads build a new one and
/// swap it in, or leave the old one in place on error.
#[derive(Debug, Default)]
pub struct ConfigStore {
	current: ArcSwap<RewriteConfig>,
}

impl ConfigStore {
	/// Create a store holding an empty configuration (nothing is rewritten).
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a store from an already validated configuration.
	pub fn with_config(config: RewriteConfig) -> Self {
		Self {
			current: ArcSwap::from_pointee(config),
		}
	}

	/// The current snapshot.
	pub fn snapshot(&self) -> Arc<RewriteConfig> {
		self.current.load_full()
	}

	/// Rebuild the snapshot from `settings` and swap it in.
	///
	/// All or nothing: on error the previous snapshot stays current.
	pub fn reload<S: SettingsStore + ?Sized>(&self, settings: &S) -> Result<Arc<RewriteConfig>> {
		let config = match load_rewrite_config(settings) {
			Ok(config) => Arc::new(config),
			Err(e) => {
				tracing::error!(error = %e, "rejected settings reload, keeping previous configuration");
				return Err(e);
			}
		};

		tracing::info!(
			relays = config.active_relays().count(),
			patterns = config.patterns.len(),
			"loaded rewrite configuration"
		);
		self.current.store(Arc::clone(&config));
		Ok(config)
	}

	/// Change hook: any setting change triggers a full reload.
	pub fn on_setting_changed<S: SettingsStore + ?Sized>(
		&self,
		key: &str,
		settings: &S,
	) -> Result<Arc<RewriteConfig>> {
		tracing::debug!(key, "setting changed");
		self.reload(settings)
	}
}

use crate::rules::ExtractionPattern;
use std::collections::BTreeSet;

/// Setting key holding the space-separated relay bot nicknames.
pub const BOT_NICKS_KEY: &str = "bot_nicks";

/// Prefix shared by the indexed extraction pattern keys (`nick_content_re.0`, ...).
pub const PATTERN_KEY_PREFIX: &str = "nick_content_re.";

/// Built-in extraction patterns, in evaluation order.
///
/// Each pattern captures the bridged sender as `nick` and the message body as `text`.
pub const DEFAULT_PATTERNS: [&str; 3] = [
	r"\[(?P<nick>.+?)\] (?P<text>.*)",
	r"\((?P<nick>.+?)\) (?P<text>.*)",
	r"<(?P<nick>.+?)> (?P<text>.*)",
];

/// Build the settings key for the pattern at `index`.
pub fn pattern_key(index: usize) -> String {
	format!("{PATTERN_KEY_PREFIX}{index}")
}

/// Every recognized setting with its built-in default, in the fixed default key order.
pub fn default_settings() -> Vec<(String, &'static str)> {
	let mut defaults: Vec<(String, &'static str)> = DEFAULT_PATTERNS
		.iter()
		.enumerate()
		.map(|(i, pattern)| (pattern_key(i), *pattern))
		.collect();
	defaults.push((BOT_NICKS_KEY.to_string(), ""));
	defaults
}

/// Immutable, validated rewrite configuration.
///
/// A new value is built on every reload and swapped in whole; nothing mutates
/// a snapshot after construction.
#[derive(Debug, Clone, Default)]
pub struct RewriteConfig {
	/// Nicknames of bots that relay messages for other users.
	pub relays: BTreeSet<String>,

	/// Compiled extraction patterns. First match wins.
	pub patterns: Vec<ExtractionPattern>,
}

impl RewriteConfig {
	/// Split a raw `bot_nicks` value into a relay set.
	///
	/// Splits on single spaces, so an empty value yields a set holding one
	/// empty entry.
	pub fn parse_relays(raw: &str) -> BTreeSet<String> {
		raw.split(' ').map(str::to_string).collect()
	}

	/// Whether `nick` belongs to a configured relay bot.
	///
	/// The empty nickname never counts as a relay, even though an unset
	/// `bot_nicks` leaves an empty entry in the set.
	pub fn is_relay(&self, nick: &str) -> bool {
		!nick.is_empty() && self.relays.contains(nick)
	}

	/// Relay nicknames with the empty placeholder entry filtered out.
	pub fn active_relays(&self) -> impl Iterator<Item = &str> {
		self.relays
			.iter()
			.map(String::as_str)
			.filter(|nick| !nick.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pattern_key() {
		assert_eq!(pattern_key(0), "nick_content_re.0");
		assert_eq!(pattern_key(12), "nick_content_re.12");
	}

	#[test]
	fn test_default_settings_order() {
		let keys: Vec<String> = default_settings().into_iter().map(|(k, _)| k).collect();
		assert_eq!(
			keys,
			vec![
				"nick_content_re.0",
				"nick_content_re.1",
				"nick_content_re.2",
				"bot_nicks"
			]
		);
	}

	#[test]
	fn test_parse_relays_empty_value() {
		let relays = RewriteConfig::parse_relays("");
		assert_eq!(relays.len(), 1);
		assert!(relays.contains(""));
	}

	#[test]
	fn test_parse_relays_space_separated() {
		let relays = RewriteConfig::parse_relays("teleboto toxsync tg2arch");
		assert_eq!(relays.len(), 3);
		assert!(relays.contains("toxsync"));
	}

	#[test]
	fn test_empty_nick_is_never_a_relay() {
		let config = RewriteConfig {
			relays: RewriteConfig::parse_relays(""),
			patterns: Vec::new(),
		};
		assert!(!config.is_relay(""));
		assert!(!config.is_relay("alice"));
		assert_eq!(config.active_relays().count(), 0);
	}
}

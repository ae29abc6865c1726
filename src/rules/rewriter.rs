use crate::config::types::RewriteConfig;
use crate::message::{ParsedMessage, parse_line};
use crate::rules::matcher::find_extraction;

/// Outcome of running a message through the rewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteResult<'a> {
	/// The original line, passed through untouched.
	Unchanged(&'a str),

	/// A rebuilt line attributed to the bridged sender.
	Rewritten(String),
}

impl RewriteResult<'_> {
	pub fn as_str(&self) -> &str {
		match self {
			RewriteResult::Unchanged(line) => *line,
			RewriteResult::Rewritten(line) => line.as_str(),
		}
	}

	pub fn is_rewritten(&self) -> bool {
		matches!(self, RewriteResult::Rewritten(_))
	}

	pub fn into_string(self) -> String {
		match self {
			RewriteResult::Unchanged(line) => line.to_string(),
			RewriteResult::Rewritten(line) => line,
		}
	}
}

/// Rewrite a message from a relay bot so it appears to come from the real sender.
///
/// Messages from anyone other than a configured relay, and relay messages
/// that no pattern extracts from, come back unchanged.
///
/// The relay nickname is replaced as a plain substring of the sender address.
/// A relay name that also occurs in the user or host part is replaced there
/// as well.
pub fn rewrite<'a>(message: &ParsedMessage<'a>, config: &RewriteConfig) -> RewriteResult<'a> {
	if !config.is_relay(message.nick) {
		return RewriteResult::Unchanged(message.raw);
	}

	let Some((pattern, extraction)) = find_extraction(&config.patterns, message.text) else {
		tracing::trace!(relay = message.nick, "no pattern matched relay message");
		return RewriteResult::Unchanged(message.raw);
	};

	tracing::debug!(
		relay = message.nick,
		nick = %extraction.identity,
		pattern = %pattern.key,
		"rewriting relayed message"
	);

	let host = message.host.replace(message.nick, &extraction.identity);
	RewriteResult::Rewritten(format_line(
		&host,
		message.command,
		message.channel,
		extraction.content,
	))
}

/// Parse and rewrite a raw line. Lines that fail to parse pass through.
pub fn rewrite_line<'a>(raw: &'a str, config: &RewriteConfig) -> RewriteResult<'a> {
	match parse_line(raw) {
		Ok(message) => rewrite(&message, config),
		Err(e) => {
			tracing::debug!(error = %e, "passing through unparsable line");
			RewriteResult::Unchanged(raw)
		}
	}
}

/// Assemble a line in `:<host> <command> <channel> <text>` form.
pub fn format_line(host: &str, command: &str, channel: &str, text: &str) -> String {
	format!(":{host} {command} {channel} {text}")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::DEFAULT_PATTERNS;
	use crate::rules::matcher::compile_patterns;

	fn config_with(relays: &str, patterns: &[&str]) -> RewriteConfig {
		let keys: Vec<String> = (0..patterns.len())
			.map(|i| format!("nick_content_re.{i}"))
			.collect();
		RewriteConfig {
			relays: RewriteConfig::parse_relays(relays),
			patterns: compile_patterns(
				keys.iter()
					.map(String::as_str)
					.zip(patterns.iter().copied()),
			)
			.unwrap(),
		}
	}

	fn default_config(relays: &str) -> RewriteConfig {
		config_with(relays, &DEFAULT_PATTERNS)
	}

	#[test]
	fn test_rewrite_bracket_form() {
		let config = default_config("relaybot");
		let line = ":relaybot!bot@bridge.example PRIVMSG #chat :[alice] hello world";

		let result = rewrite_line(line, &config);

		assert!(result.is_rewritten());
		assert_eq!(
			result.as_str(),
			":alice!bot@bridge.example PRIVMSG #chat hello world"
		);
	}

	#[test]
	fn test_rewrite_paren_form_normalizes_whitespace() {
		let config = default_config("relaybot");
		let line = ":relaybot!bot@bridge.example PRIVMSG #chat :(bob smith) hi";

		let result = rewrite_line(line, &config);

		assert_eq!(
			result.as_str(),
			":bob_smith!bot@bridge.example PRIVMSG #chat hi"
		);
	}

	#[test]
	fn test_rewrite_angle_form() {
		let config = default_config("teleboto toxsync");
		let line = ":toxsync!t@host PRIVMSG #arch :<carol> hey";

		let result = rewrite_line(line, &config);

		assert_eq!(result.as_str(), ":carol!t@host PRIVMSG #arch hey");
	}

	#[test]
	fn test_non_relay_passes_through() {
		let config = default_config("relaybot");
		let line = ":alice!a@host PRIVMSG #chat :[mallory] spoofed";

		assert_eq!(rewrite_line(line, &config), RewriteResult::Unchanged(line));
	}

	#[test]
	fn test_relay_without_match_passes_through() {
		let config = default_config("relaybot");
		let line = ":relaybot!bot@host PRIVMSG #chat :just text";

		assert_eq!(rewrite_line(line, &config), RewriteResult::Unchanged(line));
	}

	#[test]
	fn test_default_empty_relays_never_rewrite() {
		let config = default_config("");
		for line in [
			":relaybot!bot@host PRIVMSG #chat :[alice] hello",
			":alice!a@host PRIVMSG #chat :(bob) hi",
		] {
			assert_eq!(rewrite_line(line, &config), RewriteResult::Unchanged(line));
		}
	}

	#[test]
	fn test_rewrite_output_is_stable() {
		let config = default_config("relaybot");
		let line = ":relaybot!bot@host PRIVMSG #chat :[alice] [nested] text";

		let first = rewrite_line(line, &config).into_string();
		let second = rewrite_line(&first, &config);

		assert_eq!(first, ":alice!bot@host PRIVMSG #chat [nested] text");
		assert_eq!(second, RewriteResult::Unchanged(first.as_str()));
	}

	#[test]
	fn test_first_pattern_wins_on_overlap() {
		let config = config_with(
			"relaybot",
			&[
				r"(?P<nick>\w+): (?P<text>.*)",
				r"(?P<text>(?P<nick>\w+).*)",
			],
		);
		let line = ":relaybot!bot@host PRIVMSG #chat :dave: hello";

		let result = rewrite_line(line, &config);

		assert_eq!(result.as_str(), ":dave!bot@host PRIVMSG #chat hello");
	}

	#[test]
	fn test_empty_content_still_terminates() {
		let config = config_with(
			"relaybot",
			&[r"\[(?P<nick>.+?)\](?P<text>)", r"(?P<nick>\w+)(?P<text>.*)"],
		);
		let line = ":relaybot!bot@host PRIVMSG #chat :[erin] trailing";

		let result = rewrite_line(line, &config);

		assert_eq!(result.as_str(), ":erin!bot@host PRIVMSG #chat ");
	}

	#[test]
	fn test_relay_name_replaced_everywhere_in_host() {
		let config = default_config("relay");
		let line = ":relay!relay@relay.example PRIVMSG #chat :[frank] hi";

		let result = rewrite_line(line, &config);

		assert_eq!(
			result.as_str(),
			":frank!frank@frank.example PRIVMSG #chat hi"
		);
	}

	#[test]
	fn test_rewrite_with_extra_spaces_before_text() {
		let config = default_config("relaybot");
		let line = ":relaybot!bot@host PRIVMSG #chat   :[alice] hi";

		let result = rewrite_line(line, &config);

		assert_eq!(result.as_str(), ":alice!bot@host PRIVMSG #chat hi");
	}

	#[test]
	fn test_unparsable_line_passes_through() {
		let config = default_config("relaybot");
		let line = "PING :server.example";

		assert_eq!(rewrite_line(line, &config), RewriteResult::Unchanged(line));
	}

	#[test]
	fn test_rewrite_parsed_message_directly() {
		let config = default_config("relaybot");
		let message = ParsedMessage {
			raw: "ignored",
			host: "relaybot!r@h",
			nick: "relaybot",
			command: "PRIVMSG",
			channel: "#c",
			text: "[gina] ok",
		};

		assert_eq!(
			rewrite(&message, &config),
			RewriteResult::Rewritten(":gina!r@h PRIVMSG #c ok".to_string())
		);
	}

	#[test]
	fn test_format_line() {
		assert_eq!(
			format_line("a!b@c", "PRIVMSG", "#x", "hello"),
			":a!b@c PRIVMSG #x hello"
		);
	}
}

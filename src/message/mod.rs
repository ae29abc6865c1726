//! Incoming chat line parsing.
//!
//! This module handles:
//! - Splitting a raw `PRIVMSG`-style line into sender, command, target and text
//! - Reporting absent fields as [`Bot2HumanError::MissingField`]
//!
//! The parser is lenient in the same way chat clients are: the trailing text
//! does not need a leading `:`, and everything after the target is the text.

use crate::error::{Bot2HumanError, Result};

/// A parsed chat line. Fields borrow from the raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedMessage<'a> {
	/// The complete line as received.
	pub raw: &'a str,

	/// Full sender address, `nick!user@host`, without the leading `:`.
	pub host: &'a str,

	/// Sender nickname (the part of `host` before `!` or `@`).
	pub nick: &'a str,

	/// Command, e.g. `PRIVMSG`.
	pub command: &'a str,

	/// Channel or target nickname.
	pub channel: &'a str,

	/// Message text with any leading `:` removed.
	pub text: &'a str,
}

/// Parse a raw line into its fields.
pub fn parse_line(raw: &str) -> Result<ParsedMessage<'_>> {
	let mut rest = raw.trim_end_matches(['\r', '\n']);

	// IRCv3 message tags are not part of the rewritten line.
	if rest.starts_with('@') {
		rest = rest
			.split_once(' ')
			.map(|(_, after)| after.trim_start_matches(' '))
			.ok_or(Bot2HumanError::MissingField { field: "prefix" })?;
	}

	let rest = rest
		.strip_prefix(':')
		.ok_or(Bot2HumanError::MissingField { field: "prefix" })?;
	let (host, rest) = rest
		.split_once(' ')
		.ok_or(Bot2HumanError::MissingField { field: "command" })?;

	let nick = host.split(['!', '@']).next().unwrap_or_default();
	if nick.is_empty() {
		return Err(Bot2HumanError::MissingField { field: "nick" });
	}

	let rest = rest.trim_start_matches(' ');
	let (command, rest) = rest
		.split_once(' ')
		.ok_or(Bot2HumanError::MissingField { field: "channel" })?;
	if command.is_empty() {
		return Err(Bot2HumanError::MissingField { field: "command" });
	}

	let rest = rest.trim_start_matches(' ');
	let (channel, text) = rest.split_once(' ').unwrap_or((rest, ""));
	if channel.is_empty() {
		return Err(Bot2HumanError::MissingField { field: "channel" });
	}

	let text = text.trim_start_matches(' ');
	let text = text.strip_prefix(':').unwrap_or(text);

	Ok(ParsedMessage {
		raw,
		host,
		nick,
		command,
		channel,
		text,
	})
}

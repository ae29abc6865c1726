use crate::error::{Bot2HumanError, Result};
use regex::Regex;

/// Capture group holding the bridged sender's nickname.
pub const IDENTITY_GROUP: &str = "nick";

/// Capture group holding the bridged message body.
pub const CONTENT_GROUP: &str = "text";

/// A compiled pattern that recovers the real sender and text from relayed text.
#[derive(Debug, Clone)]
pub struct ExtractionPattern {
	/// Settings key the pattern was loaded from (for diagnostics).
	pub key: String,

	/// Compiled regex with `nick` and `text` named groups.
	pub regex: Regex,
}

/// Identity and content pulled out of a relayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<'t> {
	/// Sender nickname with whitespace replaced by underscores.
	pub identity: String,

	/// Message body. May be empty.
	pub content: &'t str,
}

impl ExtractionPattern {
	/// Compile a pattern, rejecting it unless both named groups exist.
	pub fn compile(key: &str, pattern: &str) -> Result<Self> {
		let regex = Regex::new(pattern).map_err(|source| Bot2HumanError::InvalidPattern {
			key: key.to_string(),
			pattern: pattern.to_string(),
			source,
		})?;

		for group in [IDENTITY_GROUP, CONTENT_GROUP] {
			if !regex.capture_names().flatten().any(|name| name == group) {
				return Err(Bot2HumanError::MissingCaptureGroup {
					key: key.to_string(),
					pattern: pattern.to_string(),
					group,
				});
			}
		}

		Ok(ExtractionPattern {
			key: key.to_string(),
			regex,
		})
	}

	pub fn as_str(&self) -> &str {
		self.regex.as_str()
	}

	/// Match against the start of `text` and pull out identity and content.
	///
	/// The match must begin at offset 0. A match in which either group did
	/// not participate is treated as no match.
	pub fn extract<'t>(&self, text: &'t str) -> Option<Extraction<'t>> {
		let caps = self.regex.captures(text)?;
		if caps.get(0)?.start() != 0 {
			return None;
		}

		let identity = caps.name(IDENTITY_GROUP)?.as_str();
		let content = caps.name(CONTENT_GROUP)?.as_str();

		Some(Extraction {
			identity: normalize_identity(identity),
			content,
		})
	}
}

/// Replace every whitespace character with `_` so the identity is a single token.
pub fn normalize_identity(identity: &str) -> String {
	identity
		.chars()
		.map(|c| if c.is_whitespace() { '_' } else { c })
		.collect()
}

/// Compile patterns in order, failing on the first bad one.
pub fn compile_patterns<'a, I>(patterns: I) -> Result<Vec<ExtractionPattern>>
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	patterns
		.into_iter()
		.map(|(key, pattern)| ExtractionPattern::compile(key, pattern))
		.collect()
}

/// Find the first pattern that extracts from `text`.
pub fn find_extraction<'p, 't>(
	patterns: &'p [ExtractionPattern],
	text: &'t str,
) -> Option<(&'p ExtractionPattern, Extraction<'t>)> {
	patterns
		.iter()
		.find_map(|pattern| pattern.extract(text).map(|extraction| (pattern, extraction)))
}

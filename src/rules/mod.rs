//! Relay message matching and rewriting for bot2human.
//!
//! This module handles:
//! - Compiling and validating extraction patterns
//! - Extracting the real sender and text from relayed messages
//! - Rebuilding the line with the real sender in place of the relay bot

pub mod matcher;
pub mod rewriter;

pub use matcher::{
	CONTENT_GROUP, Extraction, ExtractionPattern, IDENTITY_GROUP, compile_patterns,
	find_extraction, normalize_identity,
};
pub use rewriter::{RewriteResult, format_line, rewrite, rewrite_line};

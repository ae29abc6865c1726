//! Bot2Human - rewrite relay bot messages so bridged users look like real senders.
//!
//! Channels bridged to other chat networks often carry messages from one bot
//! nickname with the real author embedded in the text, e.g. `[alice] hello`.
//! This library provides the core functionality for undoing that, including:
//! - Settings keys, defaults and TOML settings files
//! - Validated, atomically swapped rewrite configuration snapshots
//! - Extraction pattern matching and line rewriting
//! - A host adapter with message and settings-change hooks
//!
//! # Example
//!
//! ```
//! use bot2human::config::MemorySettings;
//! use bot2human::host::Bot2Human;
//!
//! let settings: MemorySettings = [("bot_nicks", "relaybot")].into_iter().collect();
//! let plugin = Bot2Human::new(settings).unwrap();
//!
//! let line = plugin.on_privmsg(":relaybot!bot@bridge PRIVMSG #chat :[alice] hello world");
//! assert_eq!(line, ":alice!bot@bridge PRIVMSG #chat hello world");
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod message;
pub mod rules;

pub use error::{Bot2HumanError, Result};

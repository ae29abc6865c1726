use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bot2human::config::{
	BOT_NICKS_KEY, MemorySettings, SettingsStore, default_settings_path,
	generate_settings_template, parse_settings_file,
};
use bot2human::host::Bot2Human;

#[derive(Parser)]
#[command(name = "bot2human")]
#[command(
	author,
	version,
	about = "Rewrite relay bot chat lines so bridged users appear as real senders"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Settings file (defaults to <config dir>/bot2human/settings.toml)
	#[arg(long, short, global = true, value_name = "FILE")]
	settings: Option<PathBuf>,

	/// Space-separated relay bot nicknames, overriding the bot_nicks setting
	#[arg(long, global = true, value_name = "NICKS")]
	bot_nicks: Option<String>,

	/// Increase log verbosity (-v for info, -vv for debug)
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Rewrite lines read from stdin, writing results to stdout
	Filter,
	/// Rewrite the given lines and print the results
	Rewrite {
		/// Raw chat lines, e.g. ":bot!b@host PRIVMSG #chan :[nick] text"
		#[arg(required = true)]
		lines: Vec<String>,
	},
	/// Settings management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display effective settings and compiled patterns
	Show,
	/// Check the settings for errors without rewriting anything
	Validate,
	/// Write a settings file holding the defaults
	Init {
		/// Overwrite an existing settings file
		#[arg(long)]
		force: bool,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_logging(verbose: u8) {
	use tracing_subscriber::{EnvFilter, fmt};

	let default = match verbose {
		0 => "bot2human=warn",
		1 => "bot2human=info",
		_ => "bot2human=debug",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

	fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(io::stderr)
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	let settings_path = cli.settings.as_deref();
	let bot_nicks = cli.bot_nicks.as_deref();

	match cli.command {
		Commands::Filter => handle_filter(settings_path, bot_nicks),
		Commands::Rewrite { lines } => handle_rewrite(settings_path, bot_nicks, &lines),
		Commands::Config { action } => match action {
			ConfigAction::Show => handle_config_show(settings_path, bot_nicks),
			ConfigAction::Validate => handle_config_validate(settings_path, bot_nicks),
			ConfigAction::Init { force } => handle_config_init(settings_path, force),
		},
	}
}

/// Resolve where settings come from: the explicit path, or the default file if it exists.
fn resolve_settings_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
	if let Some(path) = explicit {
		return Ok(Some(path.to_path_buf()));
	}

	let path = default_settings_path().context("Failed to locate default settings file")?;
	Ok(path.exists().then_some(path))
}

fn load_settings(explicit: Option<&Path>, bot_nicks: Option<&str>) -> Result<MemorySettings> {
	let mut settings = match resolve_settings_path(explicit)? {
		Some(path) => parse_settings_file(&path)
			.with_context(|| format!("Failed to load settings from {}", path.display()))?,
		None => MemorySettings::new(),
	};

	if let Some(nicks) = bot_nicks {
		settings.set(BOT_NICKS_KEY, nicks);
	}

	Ok(settings)
}

fn load_plugin(explicit: Option<&Path>, bot_nicks: Option<&str>) -> Result<Bot2Human<MemorySettings>> {
	let settings = load_settings(explicit, bot_nicks)?;
	Bot2Human::new(settings).context("Failed to compile rewrite configuration")
}

fn handle_filter(explicit: Option<&Path>, bot_nicks: Option<&str>) -> Result<ExitCode> {
	let plugin = load_plugin(explicit, bot_nicks)?;

	let mut stdin = io::stdin().lock();
	let mut stdout = io::stdout().lock();
	let mut buf = Vec::new();
	loop {
		buf.clear();
		let read = stdin
			.read_until(b'\n', &mut buf)
			.context("Failed to read from stdin")?;
		if read == 0 {
			break;
		}

		let line = strip_line_ending(&buf);
		let written = match std::str::from_utf8(line) {
			Ok(line) => writeln!(stdout, "{}", plugin.on_privmsg(line)),
			Err(_) => {
				// Not UTF-8 (e.g. latin-1 from a legacy client): pass it through as-is.
				tracing::debug!("passing through non-UTF-8 line");
				stdout.write_all(line).and_then(|()| stdout.write_all(b"\n"))
			}
		};
		written.context("Failed to write to stdout")?;
	}
	stdout.flush().context("Failed to write to stdout")?;

	Ok(ExitCode::SUCCESS)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
	let line = line.strip_suffix(b"\n").unwrap_or(line);
	line.strip_suffix(b"\r").unwrap_or(line)
}

fn handle_rewrite(
	explicit: Option<&Path>,
	bot_nicks: Option<&str>,
	lines: &[String],
) -> Result<ExitCode> {
	let plugin = load_plugin(explicit, bot_nicks)?;

	for line in lines {
		println!("{}", plugin.on_privmsg(line));
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(explicit: Option<&Path>, bot_nicks: Option<&str>) -> Result<ExitCode> {
	let source = resolve_settings_path(explicit)?;
	let plugin = load_plugin(explicit, bot_nicks)?;

	match source {
		Some(path) => println!("# Source: {}", path.display()),
		None => println!("# Source: built-in defaults"),
	}
	for (key, value) in plugin.settings().iter() {
		println!("{key} = {value:?}");
	}
	println!();

	let config = plugin.snapshot();
	let relays: Vec<&str> = config.active_relays().collect();
	if relays.is_empty() {
		println!("Relay bots: (none, rewriting disabled)");
	} else {
		println!("Relay bots: {}", relays.join(" "));
	}

	println!("Patterns (first match wins):");
	for (i, pattern) in config.patterns.iter().enumerate() {
		println!("  {}. {}: {}", i + 1, pattern.key, pattern.as_str());
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(explicit: Option<&Path>, bot_nicks: Option<&str>) -> Result<ExitCode> {
	match load_plugin(explicit, bot_nicks) {
		Ok(plugin) => {
			let config = plugin.snapshot();
			println!(
				"Settings are valid: {} relay bot(s), {} pattern(s)",
				config.active_relays().count(),
				config.patterns.len()
			);
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {e:#}");
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_config_init(explicit: Option<&Path>, force: bool) -> Result<ExitCode> {
	let path = match explicit {
		Some(path) => path.to_path_buf(),
		None => default_settings_path().context("Failed to locate default settings file")?,
	};

	if path.exists() && !force {
		anyhow::bail!(
			"{} already exists. Use --force to overwrite.",
			path.display()
		);
	}

	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent)
			.with_context(|| format!("Failed to create {}", parent.display()))?;
	}

	let template = generate_settings_template().context("Failed to render settings template")?;
	std::fs::write(&path, template)
		.with_context(|| format!("Failed to write {}", path.display()))?;

	println!("Created {}", path.display());
	Ok(ExitCode::SUCCESS)
}

// SPDX-FileCopyrightText: 2026 LunNova
//
// SPDX-License-Identifier: MIT

//! Lexer, parser and resolver for Go type declarations.
//!
//! ```
//! let file = godecl::parse("package p\ntype pair struct { a, b int }\n").unwrap();
//! let env = godecl::TypeEnv::build(&file, &Default::default()).unwrap();
//! assert_eq!(env.fields("pair").unwrap().len(), 2);
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod report;
pub mod token;
pub mod types;

pub use error::Error;
pub use parser::parse;
pub use types::{ResolveOptions, TypeEnv};

use anyhow::{Context, Result};
use argh::FromArgs;
use config::{Config, Format};
use report::FileReport;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(FromArgs, Debug)]
/// Parse Go type declarations and report their resolved structure
pub struct Args {
	/// output format: text or json (default: text, or the config value)
	#[argh(option)]
	pub format: Option<Format>,

	/// list the leaf fields of nested structs
	#[argh(switch)]
	pub flatten: bool,

	/// print the token stream instead of declarations
	#[argh(switch)]
	pub tokens: bool,

	/// treat unknown type names as opaque instead of failing
	#[argh(switch)]
	pub allow_undefined: bool,

	/// process matching files in directories recursively
	#[argh(switch, short = 'r')]
	pub recursive: bool,

	/// config file (default: ./godecl.toml if present)
	#[argh(option)]
	pub config: Option<PathBuf>,

	/// log debug output to stderr
	#[argh(switch, short = 'v')]
	pub verbose: bool,

	/// files or directories to process (defaults to current directory)
	#[argh(positional)]
	pub paths: Vec<PathBuf>,
}

/// Config file values with command-line overrides applied.
struct Settings {
	format: Format,
	flatten: bool,
	options: ResolveOptions,
	config: Config,
}

impl Settings {
	fn new(args: &Args, config: Config) -> Self {
		Self {
			format: args.format.unwrap_or(config.format),
			flatten: args.flatten || config.flatten,
			options: ResolveOptions {
				allow_undefined: args.allow_undefined || config.allow_undefined,
			},
			config,
		}
	}
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
	use tracing_subscriber::EnvFilter;
	let default = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	// a subscriber may already be installed when run() is called more than once
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}

fn read_source(path: &Path) -> Result<String> {
	std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn process_file(path: &Path, settings: &Settings, tokens_only: bool) -> Result<Option<FileReport>> {
	debug!(path = %path.display(), "processing");
	let source = read_source(path)?;
	let located = |err: Error| anyhow::anyhow!("{}:{err}", path.display());

	if tokens_only {
		let tokens = lexer::tokenize(&source).map_err(located)?;
		print!("{}", report::render_tokens(&tokens));
		return Ok(None);
	}

	let file = parse(&source).map_err(located)?;
	let env = TypeEnv::build(&file, &settings.options).map_err(located)?;
	info!(path = %path.display(), types = env.len(), "resolved");
	Ok(Some(FileReport::new(path, &file, &env, settings.flatten)))
}

fn collect_files(args: &Args, config: &Config) -> Vec<PathBuf> {
	let paths = if args.paths.is_empty() {
		vec![PathBuf::from(".")]
	} else {
		args.paths.clone()
	};

	let mut files = Vec::new();
	for path in paths {
		if args.recursive && path.is_dir() {
			files.extend(
				walkdir::WalkDir::new(&path)
					.sort_by_file_name()
					.into_iter()
					.filter_map(std::result::Result::ok)
					.filter(|e| e.file_type().is_file() && config.matches_extension(e.path()))
					.map(walkdir::DirEntry::into_path),
			);
		} else if path.is_file() {
			files.push(path);
		} else if path.is_dir() {
			eprintln!("Skipping directory {} (use --recursive to process directories)", path.display());
		} else {
			eprintln!("Path does not exist: {}", path.display());
		}
	}
	files
}

/// Run godecl with the given command-line arguments.
pub fn run(args: &[&str]) -> i32 {
	let parsed = match Args::from_args(&["godecl"], args) {
		Ok(args) => args,
		Err(early_exit) => {
			println!("{}", early_exit.output);
			return i32::from(early_exit.status.is_err());
		}
	};
	init_logging(parsed.verbose);

	match run_with_args(&parsed) {
		Ok(code) => code,
		Err(err) => {
			eprintln!("Error: {err:?}");
			1
		}
	}
}

/// Run godecl with parsed arguments.
pub fn run_with_args(args: &Args) -> Result<i32> {
	let config = Config::discover(args.config.as_deref())?;
	let files = collect_files(args, &config);
	let settings = Settings::new(args, config);

	if files.is_empty() {
		eprintln!("No .{} files found to process", settings.config.extensions.join("/."));
		return Ok(1);
	}

	let mut reports = Vec::new();
	let mut failures = 0;
	for path in &files {
		match process_file(path, &settings, args.tokens) {
			Ok(Some(report)) => {
				if settings.format == Format::Text {
					print!("{}", report::render_text(&report));
				}
				reports.push(report);
			}
			Ok(None) => {}
			Err(err) => {
				eprintln!("Error: {err:#}");
				failures += 1;
			}
		}
	}

	if settings.format == Format::Json && !args.tokens {
		println!("{}", report::render_json(&reports)?);
	}

	if failures > 0 {
		eprintln!("{failures} of {} file(s) failed", files.len());
		Ok(1)
	} else {
		Ok(0)
	}
}

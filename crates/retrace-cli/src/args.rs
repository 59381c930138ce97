// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use retrace_config::CliOverrides;

/// retrace - resolve stack traces to original source locations.
#[derive(Parser, Debug)]
#[command(
	name = "retrace",
	about = "Resolve runtime stack traces through source maps",
	version
)]
pub struct Args {
	/// Emit logs as JSON lines on stderr
	#[arg(long, global = true)]
	pub log_json: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Resolve a stack trace read from FILE or stdin
	Resolve(ResolveArgs),

	/// Print the effective configuration as TOML
	Config(OverrideArgs),

	/// Show version and build information
	Version,
}

#[derive(ClapArgs, Debug)]
pub struct ResolveArgs {
	/// File containing the trace; reads stdin when omitted or `-`
	pub file: Option<PathBuf>,

	/// Print the resolved frames as JSON instead of trace text
	#[arg(long)]
	pub json: bool,

	#[command(flatten)]
	pub overrides: OverrideArgs,
}

impl ResolveArgs {
	/// The input file, or `None` for stdin.
	pub fn input_file(&self) -> Option<&PathBuf> {
		self.file.as_ref().filter(|p| p.as_os_str() != "-")
	}
}

/// Flags that override configuration files and `RETRACE_*` variables.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct OverrideArgs {
	/// Trace dialect: `uni` (browser-style) or `uts` (compiler diagnostics)
	#[arg(long)]
	pub preset: Option<String>,

	/// Base URL or directory the source maps are published under
	#[arg(long)]
	pub base: Option<String>,

	/// uni-app application id (recorded in config, not used in map URLs)
	#[arg(long)]
	pub app_id: Option<String>,

	/// uni-app platform, e.g. `app` or `mp-weixin`
	#[arg(long)]
	pub platform: Option<String>,

	/// uni-app release version the maps were built for
	#[arg(long)]
	pub app_version: Option<String>,

	/// Root of the UTS plugin sources (recorded in config, not used in map URLs)
	#[arg(long)]
	pub source_root: Option<String>,

	/// Source map download timeout in seconds
	#[arg(long)]
	pub timeout_secs: Option<u64>,

	/// Log filter used when RUST_LOG is unset
	#[arg(long)]
	pub log_level: Option<String>,
}

impl From<OverrideArgs> for CliOverrides {
	fn from(args: OverrideArgs) -> Self {
		CliOverrides {
			preset: args.preset,
			base: args.base,
			app_id: args.app_id,
			platform: args.platform,
			version: args.app_version,
			source_root: args.source_root,
			timeout_secs: args.timeout_secs,
			log_level: args.log_level,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn test_cli_definition_is_valid() {
		Args::command().debug_assert();
	}

	#[test]
	fn test_resolve_with_overrides() {
		let args = Args::try_parse_from([
			"retrace",
			"resolve",
			"trace.txt",
			"--json",
			"--preset",
			"uni",
			"--base",
			"https://maps.example.com",
			"--platform",
			"app",
			"--app-version",
			"1.0.0",
		])
		.unwrap();

		let Command::Resolve(resolve) = args.command else {
			panic!("expected resolve");
		};
		assert!(resolve.json);
		assert_eq!(resolve.input_file(), Some(&PathBuf::from("trace.txt")));

		let overrides = CliOverrides::from(resolve.overrides);
		assert_eq!(overrides.preset.as_deref(), Some("uni"));
		assert_eq!(overrides.version.as_deref(), Some("1.0.0"));
		assert_eq!(overrides.platform.as_deref(), Some("app"));
	}

	#[test]
	fn test_resolve_reads_stdin_by_default() {
		let args = Args::try_parse_from(["retrace", "resolve"]).unwrap();
		let Command::Resolve(resolve) = args.command else {
			panic!("expected resolve");
		};
		assert_eq!(resolve.input_file(), None);

		let args = Args::try_parse_from(["retrace", "resolve", "-"]).unwrap();
		let Command::Resolve(resolve) = args.command else {
			panic!("expected resolve");
		};
		assert_eq!(resolve.input_file(), None);
	}

	#[test]
	fn test_global_log_json_flag() {
		let args = Args::try_parse_from(["retrace", "config", "--log-json"]).unwrap();
		assert!(args.log_json);
		assert!(matches!(args.command, Command::Config(_)));
	}

	#[test]
	fn test_invalid_timeout_is_rejected() {
		assert!(Args::try_parse_from(["retrace", "resolve", "--timeout-secs", "soon"]).is_err());
	}
}

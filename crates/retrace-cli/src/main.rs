// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! retrace command-line binary.

use anyhow::{Context, Result};
use clap::Parser;
use retrace_config::{CliOverrides, RetraceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
mod commands;
mod version;

use args::{Args, Command};

/// Install the stderr subscriber. stdout carries only command output.
fn init_tracing(config: &RetraceConfig, json: bool) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| config.logging.level.clone().into());
	let registry = tracing_subscriber::registry().with(filter);

	if json {
		registry
			.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
			.init();
	} else {
		registry
			.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
			.init();
	}
}

fn load_config(overrides: CliOverrides) -> Result<RetraceConfig> {
	retrace_config::load_config_with_cli(overrides).context("failed to load configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	match args.command {
		Command::Version => {
			println!("{}", version::format_version_info());
		}
		Command::Config(overrides) => {
			let config = load_config(overrides.into())?;
			init_tracing(&config, args.log_json);
			print!("{}", config.to_toml()?);
		}
		Command::Resolve(resolve) => {
			let input = resolve.input_file().cloned();
			let config = load_config(resolve.overrides.into())?;
			init_tracing(&config, args.log_json);

			let raw = commands::read_input(input.as_deref()).await?;
			let output = commands::resolve(&config, &raw, resolve.json).await?;
			println!("{output}");
		}
	}

	Ok(())
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for retrace.
//!
//! This crate provides:
//! - XDG Base Directory compliant path resolution
//! - Layered configuration from multiple sources
//! - TOML configuration file parsing
//! - Environment variable overrides
//! - Configuration validation

pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::ConfigRegistry;
pub use runtime::RetraceConfig;
pub use sections::{FetchConfig, LoggingConfig, PresetKind, UniConfig, UtsConfig};
pub use sources::{CliOverrides, ConfigSource, Precedence};

fn default_registry(paths: &PathsConfig) -> ConfigRegistry {
	let mut registry = ConfigRegistry::new();

	registry.register(Box::new(sources::DefaultsSource));
	registry.register(Box::new(sources::FileSource::user(paths)));
	if let Ok(ws) = sources::FileSource::workspace() {
		registry.register(Box::new(ws));
	}
	registry.register(Box::new(sources::EnvSource));

	registry
}

/// Load configuration from all sources with default precedence.
pub fn load_config() -> Result<RetraceConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;
	default_registry(&paths).load(paths)
}

/// Load configuration with CLI overrides.
pub fn load_config_with_cli(cli: CliOverrides) -> Result<RetraceConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;
	let mut registry = default_registry(&paths);
	registry.register(Box::new(sources::CliSource::new(cli)));
	registry.load(paths)
}

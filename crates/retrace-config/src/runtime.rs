// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fully resolved configuration.

use serde::Serialize;
use tracing::info;

use crate::error::ConfigError;
use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::sections::{FetchConfig, LoggingConfig, PresetKind, UniConfig, UtsConfig, DEFAULT_PRESET};

/// Effective configuration after all layers are merged and validated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RetraceConfig {
	pub preset: PresetKind,
	pub uni: UniConfig,
	pub uts: UtsConfig,
	pub fetch: FetchConfig,
	pub logging: LoggingConfig,
	#[serde(skip)]
	pub paths: PathsConfig,
}

impl RetraceConfig {
	/// Finalize a merged layer, applying defaults and validation.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Result<Self, ConfigError> {
		let preset = match layer.preset.as_deref() {
			Some(name) => name.parse()?,
			None => DEFAULT_PRESET,
		};

		let config = Self {
			preset,
			uni: layer.uni.unwrap_or_default().finalize(),
			uts: layer.uts.unwrap_or_default().finalize(),
			fetch: layer.fetch.unwrap_or_default().finalize(),
			logging: layer.logging.unwrap_or_default().finalize(),
			paths,
		};
		config.validate()?;

		info!(
			preset = %config.preset,
			timeout_secs = config.fetch.timeout_secs,
			"configuration loaded"
		);
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.fetch.timeout_secs == 0 {
			return Err(ConfigError::invalid_value(
				"fetch.timeout_secs",
				"must be greater than zero",
			));
		}
		if self.logging.level.trim().is_empty() {
			return Err(ConfigError::validation("logging.level must not be empty"));
		}
		Ok(())
	}

	/// Render the effective configuration as TOML.
	pub fn to_toml(&self) -> Result<String, ConfigError> {
		Ok(toml::to_string_pretty(self)?)
	}
}

impl Default for RetraceConfig {
	fn default() -> Self {
		Self {
			preset: DEFAULT_PRESET,
			uni: UniConfig::default(),
			uts: UtsConfig::default(),
			fetch: FetchConfig::default(),
			logging: LoggingConfig::default(),
			paths: PathsConfig::default(),
		}
	}
}

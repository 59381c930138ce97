// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files, environment and CLI flags.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ConfigLayer;
use crate::paths::{workspace_config_path, PathsConfig};
use crate::sections::{FetchConfigLayer, LoggingConfigLayer, UniConfigLayer, UtsConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	UserFile = 20,
	WorkspaceFile = 30,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
///
/// Returns an empty layer; defaults are applied when the merged layer is
/// finalized.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is an empty layer.
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
}

impl FileSource {
	pub fn new(path: impl Into<PathBuf>, precedence: Precedence) -> Self {
		Self {
			path: path.into(),
			precedence,
		}
	}

	/// `~/.config/retrace/config.toml`
	pub fn user(paths: &PathsConfig) -> Self {
		Self::new(&paths.user_config_file, Precedence::UserFile)
	}

	/// `./.retrace/config.toml`
	pub fn workspace() -> Result<Self, ConfigError> {
		Ok(Self::new(workspace_config_path()?, Precedence::WorkspaceFile))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		match self.precedence {
			Precedence::WorkspaceFile => "workspace-file",
			_ => "user-file",
		}
	}

	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: RETRACE_<SECTION>_<FIELD>, plus RETRACE_PRESET and
/// RETRACE_LOG_LEVEL.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_from_env(|name| std::env::var(name).ok())
	}
}

fn load_from_env(lookup: impl Fn(&str) -> Option<String>) -> Result<ConfigLayer, ConfigError> {
	let var = |name: &str| lookup(name).filter(|s| !s.is_empty());

	let timeout_secs = match var("RETRACE_FETCH_TIMEOUT_SECS") {
		Some(v) => Some(v.parse().map_err(|_| {
			ConfigError::invalid_value(
				"RETRACE_FETCH_TIMEOUT_SECS",
				format!("invalid u64 value '{v}'"),
			)
		})?),
		None => None,
	};

	Ok(ConfigLayer {
		preset: var("RETRACE_PRESET"),
		uni: Some(UniConfigLayer {
			base: var("RETRACE_UNI_BASE"),
			app_id: var("RETRACE_UNI_APP_ID"),
			platform: var("RETRACE_UNI_PLATFORM"),
			version: var("RETRACE_UNI_VERSION"),
		}),
		uts: Some(UtsConfigLayer {
			base: var("RETRACE_UTS_BASE"),
			source_root: var("RETRACE_UTS_SOURCE_ROOT"),
		}),
		fetch: Some(FetchConfigLayer { timeout_secs }),
		logging: Some(LoggingConfigLayer {
			level: var("RETRACE_LOG_LEVEL"),
		}),
	})
}

/// Values given on the command line. Unset flags leave lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
	pub preset: Option<String>,
	pub base: Option<String>,
	pub app_id: Option<String>,
	pub platform: Option<String>,
	pub version: Option<String>,
	pub source_root: Option<String>,
	pub timeout_secs: Option<u64>,
	pub log_level: Option<String>,
}

/// Command-line override source.
///
/// `base` applies to the section of the preset in effect on the command line,
/// or to both sections when no preset flag was given.
pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let o = self.overrides.clone();
		let preset = o.preset.as_deref().map(|p| p.trim().to_ascii_lowercase());
		let base_for = |name: &str| match preset.as_deref() {
			Some(p) if p != name => None,
			_ => o.base.clone(),
		};

		Ok(ConfigLayer {
			uni: Some(UniConfigLayer {
				base: base_for("uni"),
				app_id: o.app_id,
				platform: o.platform,
				version: o.version,
			}),
			uts: Some(UtsConfigLayer {
				base: base_for("uts"),
				source_root: o.source_root,
			}),
			fetch: Some(FetchConfigLayer {
				timeout_secs: o.timeout_secs,
			}),
			logging: Some(LoggingConfigLayer { level: o.log_level }),
			preset: o.preset,
		})
	}
}

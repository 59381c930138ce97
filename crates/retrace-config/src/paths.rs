// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Relative path of the per-project config file.
const WORKSPACE_CONFIG: &str = ".retrace/config.toml";

/// Resolved XDG paths for retrace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// User config file: ~/.config/retrace/config.toml
	pub user_config_file: PathBuf,
}

impl PathsConfig {
	/// Paths rooted at an explicit config home.
	pub fn from_config_home(config_home: &Path) -> Self {
		Self {
			user_config_file: config_home.join("retrace/config.toml"),
		}
	}

	/// Get the config directory (parent of user_config_file)
	pub fn config_dir(&self) -> PathBuf {
		self
			.user_config_file
			.parent()
			.map(|p| p.to_path_buf())
			.unwrap_or_else(|| self.user_config_file.clone())
	}
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			user_config_file: PathBuf::from("~/.config/retrace/config.toml"),
		}
	}
}

/// Resolve XDG paths according to the Base Directory Specification.
///
/// Uses XDG_CONFIG_HOME if set, otherwise ~/.config.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".config"));

	tracing::debug!(config_home = %config_home.display(), "resolved XDG paths");

	Ok(PathsConfig::from_config_home(&config_home))
}

/// Get the workspace config file path from current directory.
pub fn workspace_config_path() -> Result<PathBuf, ConfigError> {
	let cwd = std::env::current_dir()?;
	Ok(cwd.join(WORKSPACE_CONFIG))
}

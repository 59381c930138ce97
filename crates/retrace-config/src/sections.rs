// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections: a partial layer and its resolved form for each.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const DEFAULT_PRESET: PresetKind = PresetKind::Uni;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Which trace dialect to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
	/// Browser-style JavaScript traces from uni-app builds.
	Uni,
	/// UTS compiler diagnostics.
	Uts,
}

impl PresetKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Uni => "uni",
			Self::Uts => "uts",
		}
	}
}

impl fmt::Display for PresetKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for PresetKind {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"uni" => Ok(Self::Uni),
			"uts" => Ok(Self::Uts),
			other => Err(ConfigError::invalid_value(
				"preset",
				format!("unknown preset '{other}', expected 'uni' or 'uts'"),
			)),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UniConfigLayer {
	pub base: Option<String>,
	pub app_id: Option<String>,
	pub platform: Option<String>,
	pub version: Option<String>,
}

impl UniConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.base.is_some() {
			self.base = other.base;
		}
		if other.app_id.is_some() {
			self.app_id = other.app_id;
		}
		if other.platform.is_some() {
			self.platform = other.platform;
		}
		if other.version.is_some() {
			self.version = other.version;
		}
	}

	pub fn finalize(self) -> UniConfig {
		UniConfig {
			base: self.base.unwrap_or_default(),
			app_id: self.app_id.unwrap_or_default(),
			platform: self.platform.unwrap_or_default(),
			version: self.version.unwrap_or_default(),
		}
	}
}

/// Where uni-app source maps are published.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UniConfig {
	pub base: String,
	pub app_id: String,
	pub platform: String,
	pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UtsConfigLayer {
	pub base: Option<String>,
	pub source_root: Option<String>,
}

impl UtsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.base.is_some() {
			self.base = other.base;
		}
		if other.source_root.is_some() {
			self.source_root = other.source_root;
		}
	}

	pub fn finalize(self) -> UtsConfig {
		UtsConfig {
			base: self.base.unwrap_or_default(),
			source_root: self.source_root.unwrap_or_default(),
		}
	}
}

/// Where UTS compiler source maps are published.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UtsConfig {
	pub base: String,
	pub source_root: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchConfigLayer {
	pub timeout_secs: Option<u64>,
}

impl FetchConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	pub fn finalize(self) -> FetchConfig {
		FetchConfig {
			timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchConfig {
	/// Per-request timeout for source map downloads.
	pub timeout_secs: u64,
}

impl FetchConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}

impl Default for FetchConfig {
	fn default() -> Self {
		FetchConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfigLayer {
	pub level: Option<String>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.level.is_some() {
			self.level = other.level;
		}
	}

	pub fn finalize(self) -> LoggingConfig {
		LoggingConfig {
			level: self.level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
	/// Filter directive used when RUST_LOG is unset.
	pub level: String,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		LoggingConfigLayer::default().finalize()
	}
}

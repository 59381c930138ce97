// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use tracing::debug;

use crate::error::ConfigError;
use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::runtime::RetraceConfig;
use crate::sources::ConfigSource;

/// Ordered set of configuration sources.
#[derive(Default)]
pub struct ConfigRegistry {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, source: Box<dyn ConfigSource>) {
		self.sources.push(source);
	}

	/// Merge every source in precedence order and finalize the result.
	pub fn load(mut self, paths: PathsConfig) -> Result<RetraceConfig, ConfigError> {
		self.sources.sort_by_key(|s| s.precedence());

		let mut merged = ConfigLayer::default();
		for source in &self.sources {
			debug!(source = source.name(), "loading configuration source");
			merged.merge(source.load()?);
		}

		RetraceConfig::from_layer(merged, paths)
	}
}

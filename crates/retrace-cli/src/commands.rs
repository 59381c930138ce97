// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subcommand implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use retrace::{
	resolve_frames_with, resolve_trace_with, DefaultLoader, ResolutionPreset, SourceMapCache,
	UniPreset, UtsPreset,
};
use retrace_config::{PresetKind, RetraceConfig};
use tokio::io::AsyncReadExt;
use tracing::{debug, instrument, warn};

/// Build the preset selected by the configuration.
pub fn build_preset(config: &RetraceConfig) -> Box<dyn ResolutionPreset> {
	match config.preset {
		PresetKind::Uni => Box::new(UniPreset::new(
			config.uni.base.clone(),
			config.uni.app_id.clone(),
			config.uni.platform.clone(),
			config.uni.version.clone(),
		)),
		PresetKind::Uts => Box::new(UtsPreset::new(
			config.uts.base.clone(),
			config.uts.source_root.clone(),
		)),
	}
}

/// Read the whole trace from `file`, or from stdin when `None`.
pub async fn read_input(file: Option<&Path>) -> Result<String> {
	match file {
		Some(path) => tokio::fs::read_to_string(path)
			.await
			.with_context(|| format!("failed to read trace from {}", path.display())),
		None => {
			let mut text = String::new();
			tokio::io::stdin()
				.read_to_string(&mut text)
				.await
				.context("failed to read trace from stdin")?;
			Ok(text)
		}
	}
}

/// Resolve `raw` and render either trace text or the frames as JSON.
#[instrument(skip_all, fields(preset = %config.preset, json = json))]
pub async fn resolve(config: &RetraceConfig, raw: &str, json: bool) -> Result<String> {
	let client = retrace_fetch::new_client_with_timeout(config.fetch.timeout())
		.context("failed to build HTTP client")?;
	let cache = SourceMapCache::new(Arc::new(DefaultLoader::new(client)));
	let preset = build_preset(config);

	let output = render(preset.as_ref(), &cache, raw, json).await?;
	debug!(cached_maps = cache.len(), "resolution finished");
	Ok(output)
}

/// Render with an explicit preset and cache. A trace that cannot be parsed
/// yields the raw text, or an empty JSON array.
pub async fn render(
	preset: &dyn ResolutionPreset,
	cache: &SourceMapCache,
	raw: &str,
	json: bool,
) -> Result<String> {
	if !json {
		return Ok(resolve_trace_with(raw, preset, cache).await);
	}

	let frames = match resolve_frames_with(raw, preset, cache).await {
		Ok(trace) => trace.frames,
		Err(err) => {
			warn!(error = %err, "failed to parse stack trace, printing no frames");
			Vec::new()
		}
	};
	serde_json::to_string_pretty(&frames).context("failed to serialize frames")
}

#[cfg(test)]
mod tests {
	use super::*;
	use retrace::{FormatOptions, Trace, TraceError};
	use std::io::Write;

	struct RejectingPreset;

	impl ResolutionPreset for RejectingPreset {
		fn parse(&self, _raw: &str) -> Result<Trace, TraceError> {
			Err(TraceError::parse("unsupported dialect"))
		}

		fn format(&self, _trace: &Trace, _options: &FormatOptions) -> Result<String, TraceError> {
			Ok(String::new())
		}

		fn build_source_map_url(&self, _file: &str, _file_name: &str) -> String {
			String::new()
		}
	}

	const BAR_MAP: &str = r#"{
		"version": 3,
		"sources": ["uni-app:///app/id/src/Bar.kt"],
		"names": [],
		"mappings": ";;;;;;;;;KAEC"
	}"#;

	fn uts_config(base: &str) -> RetraceConfig {
		let mut config = RetraceConfig::default();
		config.preset = PresetKind::Uts;
		config.uts.base = base.to_string();
		config
	}

	#[test]
	fn test_build_preset_uses_selected_section() {
		let mut config = RetraceConfig::default();
		config.uni.base = "https://maps".to_string();
		config.uni.platform = "app".to_string();
		config.uni.version = "1.0.0".to_string();

		let preset = build_preset(&config);
		assert_eq!(
			preset.build_source_map_url("app-service.js", "app-service.js"),
			"https://maps/1.0.0/.sourcemap/app/app-service.js.map"
		);

		let preset = build_preset(&uts_config("/maps"));
		assert_eq!(preset.build_source_map_url("/x/bar.kt", "bar.kt"), "/maps/bar.kt.map");
	}

	#[tokio::test]
	async fn test_read_input_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "garbage text").unwrap();

		let text = read_input(Some(file.path())).await.unwrap();
		assert_eq!(text, "garbage text");
	}

	#[tokio::test]
	async fn test_read_input_missing_file_names_path() {
		let err = read_input(Some(Path::new("/nonexistent/trace.txt")))
			.await
			.unwrap_err();
		assert!(err.to_string().contains("/nonexistent/trace.txt"));
	}

	#[tokio::test]
	async fn test_resolve_against_local_maps() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("bar.kt.map"), BAR_MAP).unwrap();
		let config = uts_config(&dir.path().display().to_string());
		let raw = "e: [foo]/path/to/bar.kt:(10, 5): type mismatch";

		let text = resolve(&config, raw, false).await.unwrap();
		assert_eq!(text, "e: [foo]src/Bar.kt: (3, 1): type mismatch");

		let json = resolve(&config, raw, true).await.unwrap();
		let frames: serde_json::Value = serde_json::from_str(&json).unwrap();
		assert_eq!(frames[0]["fileRelative"], "src/Bar.kt");
		assert_eq!(frames[0]["line"], 3);
		assert_eq!(frames[0]["callee"], "foo");
	}

	#[tokio::test]
	async fn test_resolve_passes_garbage_through() {
		let config = uts_config("/nonexistent");
		let text = resolve(&config, "garbage text", false).await.unwrap();
		assert_eq!(text, "garbage text");
	}

	#[tokio::test]
	async fn test_unparseable_trace_is_not_an_error() {
		let client = retrace_fetch::new_client().unwrap();
		let cache = SourceMapCache::new(Arc::new(DefaultLoader::new(client)));

		let json = render(&RejectingPreset, &cache, "garbage text", true).await.unwrap();
		assert_eq!(json, "[]");

		let text = render(&RejectingPreset, &cache, "garbage text", false).await.unwrap();
		assert_eq!(text, "garbage text");
	}
}

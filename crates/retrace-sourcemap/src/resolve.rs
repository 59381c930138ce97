// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Turn a generated position into the display fields of a resolved frame.

use retrace_core::{split_file_name, ResolvedLocation};
use tracing::trace;

use crate::error::Result;
use crate::sourcemap::SourceMap;

/// Number of leading path segments that source maps use for the synthetic
/// `scheme:`, host and app-id prefix, e.g. `uni-app:///<host>/<app-id>/...`.
const SYNTHETIC_PREFIX_SEGMENTS: usize = 3;

/// Position in generated code: 1-indexed line, 0-indexed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedPosition {
	pub line: u32,
	pub column: u32,
}

impl GeneratedPosition {
	pub fn new(line: u32, column: u32) -> Self {
		Self { line, column }
	}
}

/// Strip the synthetic prefix from a source path.
///
/// Empty segments are ignored, so `uni-app:///app/id/src/Bar.kt` becomes
/// `src/Bar.kt`. When nothing is left, the final segment is returned.
pub fn strip_source_prefix(source: &str) -> String {
	let segments: Vec<&str> = source.split('/').filter(|s| !s.is_empty()).collect();
	match segments.get(SYNTHETIC_PREFIX_SEGMENTS..) {
		Some(rest) if !rest.is_empty() => rest.join("/"),
		_ => segments.last().map(|s| s.to_string()).unwrap_or_default(),
	}
}

/// Look up `position` in a decoded map and derive the resolved frame fields.
pub fn resolve_position(
	map: &SourceMap,
	position: GeneratedPosition,
) -> Result<Option<ResolvedLocation>> {
	let Some(original) = map.lookup(position.line, position.column)? else {
		trace!(
			line = position.line,
			column = position.column,
			"no mapping covers position"
		);
		return Ok(None);
	};

	if original.source.is_empty() {
		return Ok(None);
	}

	let source_path = strip_source_prefix(&original.source);
	let (_, file_name) = split_file_name(&original.source);
	let file_short = source_path
		.strip_suffix(file_name)
		.map(|dir| dir.trim_end_matches('/').to_string())
		.unwrap_or_default();

	Ok(Some(ResolvedLocation {
		file_name: file_name.to_string(),
		source_path,
		file_short,
		line: original.line,
		column: original.column,
		source_line: original.source_line,
		source: original.source,
	}))
}

/// Decode `map_content` and resolve `position` against it.
pub fn resolve(map_content: &str, position: GeneratedPosition) -> Result<Option<ResolvedLocation>> {
	let map = SourceMap::parse(map_content)?;
	resolve_position(&map, position)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SourceMapError;

	fn bar_map() -> &'static str {
		// Generated 10:5 maps to original line 3, column 1.
		r#"{
			"version": 3,
			"sources": ["uni-app:///app/id/src/Bar.kt"],
			"sourcesContent": ["package app\n\nfun bar() = 1\n"],
			"names": [],
			"mappings": ";;;;;;;;;KAEC"
		}"#
	}

	#[test]
	fn resolves_and_strips_synthetic_prefix() {
		let resolved = resolve(bar_map(), GeneratedPosition::new(10, 5))
			.unwrap()
			.unwrap();

		assert_eq!(resolved.source, "uni-app:///app/id/src/Bar.kt");
		assert_eq!(resolved.source_path, "src/Bar.kt");
		assert_eq!(resolved.file_short, "src");
		assert_eq!(resolved.file_name, "Bar.kt");
		assert_eq!(resolved.line, 3);
		assert_eq!(resolved.column, 1);
		assert_eq!(resolved.source_line.as_deref(), Some("fun bar() = 1"));
	}

	#[test]
	fn later_column_uses_greatest_lower_bound() {
		let resolved = resolve(bar_map(), GeneratedPosition::new(10, 40))
			.unwrap()
			.unwrap();
		assert_eq!(resolved.line, 3);
	}

	#[test]
	fn unmapped_line_is_none() {
		assert!(resolve(bar_map(), GeneratedPosition::new(2, 0))
			.unwrap()
			.is_none());
	}

	#[test]
	fn invalid_content_is_an_error() {
		assert!(matches!(
			resolve("", GeneratedPosition::new(1, 0)),
			Err(SourceMapError::InvalidJson(_))
		));
	}

	#[test]
	fn strip_source_prefix_cases() {
		assert_eq!(strip_source_prefix("uni-app:///app/id/src/Bar.kt"), "src/Bar.kt");
		assert_eq!(
			strip_source_prefix("uni-app:///node_modules/@sentry/browser/esm/helpers.js"),
			"browser/esm/helpers.js"
		);
		assert_eq!(strip_source_prefix("src/index.ts"), "index.ts");
		assert_eq!(strip_source_prefix(""), "");
	}

	#[test]
	fn short_source_has_empty_file_short() {
		let json = r#"{"version": 3, "sources": ["index.ts"], "names": [], "mappings": "AAAA"}"#;
		let resolved = resolve(json, GeneratedPosition::new(1, 0)).unwrap().unwrap();
		assert_eq!(resolved.source_path, "index.ts");
		assert_eq!(resolved.file_short, "");
		assert_eq!(resolved.file_name, "index.ts");
	}
}

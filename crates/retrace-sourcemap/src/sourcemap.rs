// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source map parsing and position lookup.
//!
//! Implements the regular and indexed forms of the Source Map v3 format.

use serde::Deserialize;

use crate::error::{Result, SourceMapError};
use crate::vlq::{decode_vlq_mappings, DecodedMappings};

/// Raw regular source map JSON structure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSourceMap {
	version: u32,
	#[serde(default)]
	file: Option<String>,
	#[serde(default)]
	source_root: Option<String>,
	#[serde(default)]
	sources: Vec<Option<String>>,
	#[serde(default)]
	sources_content: Option<Vec<Option<String>>>,
	#[serde(default)]
	names: Vec<String>,
	mappings: String,
}

#[derive(Debug, Deserialize)]
struct RawOffset {
	line: u32,
	column: u32,
}

#[derive(Debug, Deserialize)]
struct RawSection {
	offset: RawOffset,
	#[serde(default)]
	map: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIndexedSourceMap {
	version: u32,
	#[serde(default)]
	file: Option<String>,
	sections: Vec<RawSection>,
}

/// Parsed regular source map ready for lookups.
#[derive(Debug, Clone)]
pub struct ParsedSourceMap {
	/// Generated file name.
	pub file: Option<String>,
	/// Root path prepended to source filenames.
	pub source_root: Option<String>,
	/// Original source file paths. `None` entries are legal but unusable.
	pub sources: Vec<Option<String>>,
	/// Optional embedded source content for each source file.
	pub sources_content: Vec<Option<String>>,
	/// Original identifiers (function/variable names).
	pub names: Vec<String>,
	mappings: DecodedMappings,
}

/// Original position information from a source map lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPosition {
	/// Original source file path, with `sourceRoot` applied.
	pub source: String,
	/// Line in the original source (1-indexed).
	pub line: u32,
	/// Column in the original source (0-indexed).
	pub column: u32,
	/// Original identifier name if available.
	pub name: Option<String>,
	/// The original source line, if the map embeds `sourcesContent`.
	pub source_line: Option<String>,
}

impl ParsedSourceMap {
	fn from_raw(raw: RawSourceMap) -> Result<Self> {
		if raw.version != 3 {
			return Err(SourceMapError::InvalidVersion(raw.version));
		}

		Ok(Self {
			mappings: decode_vlq_mappings(&raw.mappings)?,
			file: raw.file,
			source_root: raw.source_root,
			sources: raw.sources,
			sources_content: raw.sources_content.unwrap_or_default(),
			names: raw.names,
		})
	}

	/// Parse a regular source map from JSON bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self> {
		Self::from_raw(serde_json::from_slice(data)?)
	}

	/// Lookup the original position for a generated line and column.
	///
	/// Lines are 1-indexed (as displayed in stack traces), columns are 0-indexed.
	/// Returns `None` when no mapping with a source covers the position.
	pub fn lookup(&self, line: u32, column: u32) -> Result<Option<OriginalPosition>> {
		let Some(line_0indexed) = line.checked_sub(1) else {
			return Ok(None);
		};
		self.lookup_0indexed(line_0indexed, column)
	}

	fn lookup_0indexed(&self, line: u32, column: u32) -> Result<Option<OriginalPosition>> {
		let Some(original) = self
			.mappings
			.find(line, column)
			.and_then(|mapping| mapping.original)
		else {
			return Ok(None);
		};

		let index = original.source_index as usize;
		let source = match self.sources.get(index) {
			Some(Some(source)) => source,
			Some(None) => return Ok(None),
			None => return Err(SourceMapError::InvalidSourceIndex(original.source_index)),
		};

		let source_line = self
			.sources_content
			.get(index)
			.and_then(Option::as_deref)
			.and_then(|content| content.lines().nth(original.line as usize))
			.map(str::to_string);

		let name = original
			.name_index
			.and_then(|idx| self.names.get(idx as usize).cloned());

		Ok(Some(OriginalPosition {
			source: self.resolve_source_path(source),
			line: original.line + 1,
			column: original.column,
			name,
			source_line,
		}))
	}

	/// Resolve a source path with the source root if present.
	fn resolve_source_path(&self, source: &str) -> String {
		match &self.source_root {
			Some(root) if !root.is_empty() => {
				let root = root.trim_end_matches('/');
				format!("{root}/{source}")
			}
			_ => source.to_string(),
		}
	}

	/// Check if this source map has embedded source content.
	pub fn has_sources_content(&self) -> bool {
		self.sources_content.iter().any(Option::is_some)
	}

	/// Get the number of mappings in this source map.
	pub fn mapping_count(&self) -> usize {
		self.mappings.len()
	}
}

/// A section of an indexed source map, positioned at a generated offset.
#[derive(Debug, Clone)]
struct Section {
	line: u32,
	column: u32,
	map: ParsedSourceMap,
}

/// Indexed source map: a list of regular maps placed at generated offsets.
#[derive(Debug, Clone)]
pub struct IndexedSourceMap {
	pub file: Option<String>,
	sections: Vec<Section>,
}

impl IndexedSourceMap {
	fn from_raw(raw: RawIndexedSourceMap) -> Result<Self> {
		if raw.version != 3 {
			return Err(SourceMapError::InvalidVersion(raw.version));
		}

		let mut sections = Vec::with_capacity(raw.sections.len());
		for (idx, section) in raw.sections.into_iter().enumerate() {
			let map = section.map.ok_or(SourceMapError::MissingSectionMap(idx))?;
			sections.push(Section {
				line: section.offset.line,
				column: section.offset.column,
				map: ParsedSourceMap::from_raw(serde_json::from_value(map)?)?,
			});
		}
		sections.sort_by_key(|s| (s.line, s.column));

		Ok(Self {
			file: raw.file,
			sections,
		})
	}

	/// Lookup with the same conventions as [`ParsedSourceMap::lookup`].
	pub fn lookup(&self, line: u32, column: u32) -> Result<Option<OriginalPosition>> {
		let Some(line) = line.checked_sub(1) else {
			return Ok(None);
		};

		let idx = self
			.sections
			.partition_point(|s| (s.line, s.column) <= (line, column));
		let Some(section) = idx.checked_sub(1).map(|i| &self.sections[i]) else {
			return Ok(None);
		};

		let relative_column = if line == section.line {
			column - section.column
		} else {
			column
		};
		section
			.map
			.lookup_0indexed(line - section.line, relative_column)
	}

	pub fn section_count(&self) -> usize {
		self.sections.len()
	}
}

/// Any decoded source map.
#[derive(Debug, Clone)]
pub enum SourceMap {
	Regular(ParsedSourceMap),
	Indexed(IndexedSourceMap),
}

impl SourceMap {
	/// Parse a regular or indexed source map from JSON bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self> {
		let value: serde_json::Value = serde_json::from_slice(data)?;
		if value.get("sections").is_some() {
			Ok(Self::Indexed(IndexedSourceMap::from_raw(serde_json::from_value(
				value,
			)?)?))
		} else {
			Ok(Self::Regular(ParsedSourceMap::from_raw(serde_json::from_value(
				value,
			)?)?))
		}
	}

	/// Parse a source map from a JSON string.
	pub fn parse(data: &str) -> Result<Self> {
		Self::from_bytes(data.as_bytes())
	}

	/// Lookup the original position of a 1-indexed line and 0-indexed column.
	pub fn lookup(&self, line: u32, column: u32) -> Result<Option<OriginalPosition>> {
		match self {
			Self::Regular(map) => map.lookup(line, column),
			Self::Indexed(map) => map.lookup(line, column),
		}
	}
}

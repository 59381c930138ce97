// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Base64 VLQ decoder for source map mappings.
//!
//! Source maps store generated-to-original position pairs as delta-encoded
//! Base64 VLQ segments. This module turns the `mappings` string into a sorted
//! table that supports greatest-lower-bound lookups.

use crate::error::{Result, SourceMapError};

/// Decode a Base64 character to its 6-bit value.
fn decode_char(ch: u8) -> Result<i64> {
	let value = match ch {
		b'A'..=b'Z' => ch - b'A',
		b'a'..=b'z' => ch - b'a' + 26,
		b'0'..=b'9' => ch - b'0' + 52,
		b'+' => 62,
		b'/' => 63,
		_ => return Err(SourceMapError::InvalidVlqChar(ch as char)),
	};
	Ok(i64::from(value))
}

/// Decode a VLQ-encoded segment into its signed values.
///
/// A segment holds 1, 4 or 5 values: generated column, then optionally source
/// index, original line, original column and name index.
pub fn decode_vlq_segment(segment: &str) -> Result<Vec<i64>> {
	let mut values = Vec::with_capacity(5);
	let mut value = 0i64;
	let mut shift = 0u32;

	for ch in segment.bytes() {
		let digit = decode_char(ch)?;

		let continuation = digit & 0b10_0000 != 0;
		value += (digit & 0b01_1111) << shift;
		shift += 5;

		if shift > 35 {
			return Err(SourceMapError::VlqOverflow);
		}

		if !continuation {
			// Lowest bit carries the sign.
			let negated = value & 1 != 0;
			value >>= 1;
			values.push(if negated { -value } else { value });
			value = 0;
			shift = 0;
		}
	}

	Ok(values)
}

/// Original-side half of a mapping segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalSegment {
	/// Index into the sources array.
	pub source_index: u32,
	/// Line in the original file (0-indexed).
	pub line: u32,
	/// Column in the original file (0-indexed).
	pub column: u32,
	/// Optional index into the names array.
	pub name_index: Option<u32>,
}

/// A single decoded mapping segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
	/// Line in the generated file (0-indexed).
	pub generated_line: u32,
	/// Column in the generated file (0-indexed).
	pub generated_column: u32,
	/// `None` for one-field segments, which mark generated code with no source.
	pub original: Option<OriginalSegment>,
}

/// Decoded mappings sorted by generated line, then generated column.
#[derive(Debug, Clone, Default)]
pub struct DecodedMappings {
	mappings: Vec<Mapping>,
}

impl DecodedMappings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, mapping: Mapping) {
		self.mappings.push(mapping);
	}

	fn sort(&mut self) {
		self.mappings
			.sort_by_key(|m| (m.generated_line, m.generated_column));
	}

	/// Find the closest mapping at or before `column` on generated `line`.
	///
	/// Both arguments are 0-indexed.
	pub fn find(&self, line: u32, column: u32) -> Option<&Mapping> {
		let line_start = self
			.mappings
			.partition_point(|m| m.generated_line < line);
		let line_end = self
			.mappings
			.partition_point(|m| m.generated_line <= line);

		let line_mappings = self.mappings.get(line_start..line_end)?;
		let idx = line_mappings.partition_point(|m| m.generated_column <= column);

		idx.checked_sub(1).map(|i| &line_mappings[i])
	}

	pub fn len(&self) -> usize {
		self.mappings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.mappings.is_empty()
	}
}

fn to_u32(value: i64) -> u32 {
	u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Decode a `mappings` string into a sorted lookup table.
///
/// Lines are separated by `;` and segments by `,`. The generated column resets
/// on every line; all other fields are deltas across the whole string.
pub fn decode_vlq_mappings(mappings: &str) -> Result<DecodedMappings> {
	let mut result = DecodedMappings::new();

	let mut prev_source = 0i64;
	let mut prev_original_line = 0i64;
	let mut prev_original_column = 0i64;
	let mut prev_name = 0i64;

	for (generated_line, line) in mappings.split(';').enumerate() {
		let generated_line = u32::try_from(generated_line).unwrap_or(u32::MAX);
		let mut generated_column = 0i64;

		for segment in line.split(',') {
			if segment.is_empty() {
				continue;
			}

			let values = decode_vlq_segment(segment)?;
			let Some(first) = values.first() else {
				continue;
			};
			generated_column += first;

			let original = if values.len() >= 4 {
				prev_source += values[1];
				prev_original_line += values[2];
				prev_original_column += values[3];

				let name_index = values.get(4).map(|delta| {
					prev_name += delta;
					to_u32(prev_name)
				});

				Some(OriginalSegment {
					source_index: to_u32(prev_source),
					line: to_u32(prev_original_line),
					column: to_u32(prev_original_column),
					name_index,
				})
			} else {
				None
			};

			result.add(Mapping {
				generated_line,
				generated_column: to_u32(generated_column),
				original,
			});
		}
	}

	result.sort();
	Ok(result)
}

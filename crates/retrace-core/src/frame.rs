// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stack frame and trace types.

use serde::{Deserialize, Serialize};

/// A single call-site entry in a stack trace.
///
/// Before resolution `file`, `line` and `column` describe the generated
/// (compiled) location. [`StackFrame::apply_resolution`] replaces them with the
/// original source location and leaves every other field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
	/// Function or symbol name. May be empty.
	pub callee: String,
	/// Path as found in the trace, with forward slashes.
	pub file: String,
	/// Final path segment.
	pub file_name: String,
	/// Directory part of the path, before `file_name`.
	pub file_short: String,
	/// Path without any URL scheme or host.
	pub file_relative: String,
	pub line: Option<u32>,
	pub column: Option<u32>,
	/// Diagnostic text attached to the frame (compiler diagnostics only).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_message: Option<String>,
	/// Original source text for the resolved line, when the map embeds it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_line: Option<String>,
	/// Raw trimmed input line this frame was parsed from.
	#[serde(default)]
	pub before_parse: String,
	#[serde(default)]
	pub is_native: bool,
	#[serde(default)]
	pub is_third_party: bool,
	#[serde(default)]
	pub is_index: bool,
}

impl StackFrame {
	/// Whether the frame carries a usable path or position.
	pub fn has_location(&self) -> bool {
		!self.file.is_empty() || self.line.is_some() || self.column.is_some()
	}

	/// Replace the generated location with a resolved original location.
	pub fn apply_resolution(&mut self, resolved: &ResolvedLocation) {
		self.file = resolved.source.clone();
		self.line = Some(resolved.line);
		self.column = Some(resolved.column);
		self.file_short = resolved.file_short.clone();
		self.file_relative = resolved.source_path.clone();
		self.file_name = resolved.file_name.clone();
		if resolved.source_line.is_some() {
			self.source_line = resolved.source_line.clone();
		}
	}
}

/// Original source position found for a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
	/// Source path exactly as the source map names it.
	pub source: String,
	/// Source path with the synthetic scheme/host/app-id prefix removed.
	pub source_path: String,
	/// Directory part of `source_path`.
	pub file_short: String,
	/// Final segment of `source`.
	pub file_name: String,
	/// 1-based original line, 0 when the map has none.
	pub line: u32,
	/// 0-based original column, 0 when the map has none.
	pub column: u32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_line: Option<String>,
}

/// An ordered sequence of frames plus the raw text they were parsed from.
///
/// Formatters need the raw text because some dialects wrap the frames in a
/// leading error-name line and a trailing message line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
	pub frames: Vec<StackFrame>,
	#[serde(skip)]
	pub raw: String,
}

impl Trace {
	pub fn new(frames: Vec<StackFrame>, raw: impl Into<String>) -> Self {
		Self {
			frames,
			raw: raw.into(),
		}
	}

	/// First line of the raw text.
	pub fn first_line(&self) -> &str {
		self.raw.split('\n').next().unwrap_or_default()
	}

	/// Last line of the raw text.
	pub fn last_line(&self) -> &str {
		self.raw.rsplit('\n').next().unwrap_or_default()
	}

	pub fn line_count(&self) -> usize {
		self.raw.split('\n').count()
	}

	pub fn len(&self) -> usize {
		self.frames.len()
	}

	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}
}

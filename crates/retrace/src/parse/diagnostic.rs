// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Compiler diagnostics of the form `e: [callee]path:(line, col): message`.

use std::sync::LazyLock;

use regex::Regex;
use retrace_core::{nix_slashes, split_file_name, strip_url_origin, StackFrame};

use super::parse_position;

static DIAGNOSTIC_LINE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"e: \[(.+)\](.+): (.+)").unwrap());
// Same shape, but the path ends at the first `(line, col)` group so that
// messages containing `: ` stay whole.
static POSITIONED_LINE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"e: \[(.+)\](.+?:.*?\(\d+.+?\d+\)): (.+)").unwrap()
});
static PATH_LINE_COLUMN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(.+):.*\((\d+).+?(\d+)\)").unwrap());

/// Whether a line has the outer `e: [callee]path: message` shape.
pub fn is_diagnostic_line(line: &str) -> bool {
	DIAGNOSTIC_LINE.is_match(line.trim())
}

fn parse_line(line: &str) -> Option<StackFrame> {
	let caps = POSITIONED_LINE
		.captures(line)
		.or_else(|| DIAGNOSTIC_LINE.captures(line))?;
	let callee = caps.get(1).map_or("", |m| m.as_str());
	let location = caps.get(2).map_or("", |m| m.as_str());
	let message = caps.get(3).map_or("", |m| m.as_str());

	let mut frame = StackFrame {
		callee: callee.to_string(),
		error_message: Some(message.to_string()),
		before_parse: line.to_string(),
		..StackFrame::default()
	};

	// The outer shape matched but the position did not: keep the frame bare.
	let Some(inner) = PATH_LINE_COLUMN.captures(location) else {
		return Some(frame);
	};

	let file = nix_slashes(inner.get(1).map_or("", |m| m.as_str()));
	let (file_short, file_name) = split_file_name(&file);
	frame.file_short = file_short.to_string();
	frame.file_name = file_name.to_string();
	frame.file_relative = strip_url_origin(&file).to_string();
	frame.line = parse_position(inner.get(2).map(|m| m.as_str()));
	frame.column = parse_position(inner.get(3).map(|m| m.as_str()));
	frame.file = file;

	Some(frame)
}

/// Parse compiler diagnostic text into frames.
///
/// Lines that do not have the outer diagnostic shape are dropped. A line with
/// the outer shape but no recognizable `path:(line, col)` still yields a frame,
/// with empty path and position fields.
pub fn parse_compiler_diagnostics(text: &str) -> Vec<StackFrame> {
	text.lines().map(str::trim).filter_map(parse_line).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn parses_diagnostic_line() {
		let frames = parse_compiler_diagnostics("e: [foo]/path/to/bar.kt:(10, 5): type mismatch");

		assert_eq!(frames.len(), 1);
		let frame = &frames[0];
		assert_eq!(frame.callee, "foo");
		assert_eq!(frame.file, "/path/to/bar.kt");
		assert_eq!(frame.file_short, "/path/to");
		assert_eq!(frame.file_name, "bar.kt");
		assert_eq!(frame.line, Some(10));
		assert_eq!(frame.column, Some(5));
		assert_eq!(frame.error_message.as_deref(), Some("type mismatch"));
	}

	#[test]
	fn normalizes_windows_separators() {
		let frames = parse_compiler_diagnostics(
			r"e: [UTSAndroid]C:\work\uni_modules\demo\index.kt:(7, 12): Unresolved reference: foo",
		);

		assert_eq!(frames.len(), 1);
		assert_eq!(frames[0].file, "C:/work/uni_modules/demo/index.kt");
		assert_eq!(frames[0].file_short, "C:/work/uni_modules/demo");
		assert_eq!(frames[0].file_name, "index.kt");
		assert_eq!(frames[0].line, Some(7));
		assert_eq!(frames[0].column, Some(12));
		assert_eq!(
			frames[0].error_message.as_deref(),
			Some("Unresolved reference: foo")
		);
	}

	#[test]
	fn keeps_frame_when_position_is_missing() {
		let frames = parse_compiler_diagnostics("e: [cb]somewhere: something failed");

		assert_eq!(frames.len(), 1);
		assert_eq!(frames[0].callee, "cb");
		assert_eq!(frames[0].file, "");
		assert_eq!(frames[0].file_name, "");
		assert_eq!(frames[0].line, None);
		assert_eq!(frames[0].column, None);
		assert_eq!(frames[0].error_message.as_deref(), Some("something failed"));
		assert!(!frames[0].has_location());
	}

	#[test]
	fn drops_non_diagnostic_lines() {
		assert!(parse_compiler_diagnostics("garbage text").is_empty());

		let text = "error: compilation failed\n\ne: [a]/x/a.kt:(1, 1): one\n\ne: [b]/x/b.kt:(2, 2): two\nFAILURE";
		let frames = parse_compiler_diagnostics(text);
		assert_eq!(frames.len(), 2);
		assert_eq!(frames[0].callee, "a");
		assert_eq!(frames[1].callee, "b");
	}

	#[test]
	fn diagnostic_line_detection() {
		assert!(is_diagnostic_line("  e: [a]/x/a.kt:(1, 1): one"));
		assert!(!is_diagnostic_line("FAILURE: Build failed"));
	}

	#[test]
	fn reparses_formatted_output() {
		let frames = parse_compiler_diagnostics("e: [foo]src/Bar.kt: (3, 1): type mismatch");
		assert_eq!(frames[0].file, "src/Bar.kt");
		assert_eq!(frames[0].file_short, "src");
		assert_eq!(frames[0].line, Some(3));
		assert_eq!(frames[0].column, Some(1));
		assert_eq!(frames[0].error_message.as_deref(), Some("type mismatch"));
	}

	proptest! {
		#[test]
		fn keeps_diagnostic_order(lines in prop::collection::vec((1u32..5000, 1u32..200), 0..30)) {
			let text = lines
				.iter()
				.enumerate()
				.map(|(i, (line, column))| format!("e: [f{i}]/src/m{i}.kt:({line}, {column}): msg {i}"))
				.collect::<Vec<_>>()
				.join("\n\n");
			let frames = parse_compiler_diagnostics(&text);

			prop_assert_eq!(frames.len(), lines.len());
			for (i, frame) in frames.iter().enumerate() {
				prop_assert_eq!(frame.callee.clone(), format!("f{i}"));
				prop_assert_eq!(frame.line, Some(lines[i].0));
				prop_assert_eq!(frame.column, Some(lines[i].1));
			}
		}
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use retrace_core::{StackFrame, Trace};

use crate::parse::is_diagnostic_line;

fn render_frame(frame: &StackFrame) -> String {
	if !frame.has_location() {
		return frame.before_parse.clone();
	}

	let line = frame.line.map(|n| n.to_string()).unwrap_or_default();
	let column = frame.column.map(|n| n.to_string()).unwrap_or_default();
	format!(
		"e: [{}]{}/{}: ({line}, {column}): {}",
		frame.callee,
		frame.file_short,
		frame.file_name,
		frame.error_message.as_deref().unwrap_or_default()
	)
}

/// Render frames as compiler diagnostics, one `e: [...]` line per frame.
///
/// The raw first line is kept above the frames unless it is itself a
/// diagnostic. The raw last line of a multi-line trace is kept below them,
/// after a blank line, when it is a trailing message rather than a diagnostic.
pub fn format_compiler_diagnostics(trace: &Trace) -> String {
	let mut lines = Vec::with_capacity(trace.len() + 3);

	let first_line = trace.first_line();
	if !first_line.contains("e:") && !first_line.trim().is_empty() {
		lines.push(first_line.to_string());
	}

	lines.extend(trace.frames.iter().map(render_frame));

	let last_line = trace.last_line();
	if trace.line_count() > 1 && !last_line.trim().is_empty() && !is_diagnostic_line(last_line) {
		lines.push(String::new());
		lines.push(last_line.to_string());
	}

	lines.join("\n")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parse::parse_compiler_diagnostics;

	fn trace(raw: &str) -> Trace {
		Trace::new(parse_compiler_diagnostics(raw), raw)
	}

	#[test]
	fn rerenders_unresolved_frame() {
		let out = format_compiler_diagnostics(&trace("e: [foo]/path/to/bar.kt:(10, 5): type mismatch"));
		assert_eq!(out, "e: [foo]/path/to/bar.kt: (10, 5): type mismatch");
	}

	#[test]
	fn keeps_header_and_trailing_message() {
		let raw = "error: uts compile failed\ne: [a]/x/a.kt:(1, 2): one\n\ne: [b]/x/b.kt:(3, 4): two\nFAILURE: Build failed with an exception.";
		let out = format_compiler_diagnostics(&trace(raw));

		assert_eq!(
			out,
			"error: uts compile failed\n\
			 e: [a]/x/a.kt: (1, 2): one\n\
			 e: [b]/x/b.kt: (3, 4): two\n\
			 \n\
			 FAILURE: Build failed with an exception."
		);
	}

	#[test]
	fn garbage_passes_through() {
		assert_eq!(format_compiler_diagnostics(&trace("garbage text")), "garbage text");
		assert_eq!(
			format_compiler_diagnostics(&trace("garbage text\nmore garbage")),
			"garbage text\n\nmore garbage"
		);
	}

	#[test]
	fn bare_frame_is_rendered_verbatim() {
		let out = format_compiler_diagnostics(&trace("e: [cb]somewhere: something failed"));
		assert_eq!(out, "e: [cb]somewhere: something failed");
	}

	#[test]
	fn resolved_frame_uses_directory_and_name() {
		let mut t = trace("e: [foo]/path/to/bar.kt:(10, 5): type mismatch");
		t.frames[0].file_short = "src".to_string();
		t.frames[0].file_name = "Bar.kt".to_string();
		t.frames[0].line = Some(3);
		t.frames[0].column = Some(1);

		assert_eq!(
			format_compiler_diagnostics(&t),
			"e: [foo]src/Bar.kt: (3, 1): type mismatch"
		);
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tabular rendering of browser-style traces.

use retrace_core::{StackFrame, Trace};

use super::ColumnWidths;

const DELIMITER: &str = "  ";
const ELLIPSIS: char = '…';

/// Keep the start of `s`, marking a cut with a trailing ellipsis.
fn trim_end(s: &str, max: usize) -> String {
	if s.chars().count() <= max {
		return s.to_string();
	}
	let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
	out.push(ELLIPSIS);
	out
}

/// Keep the end of `s`, marking a cut with a leading ellipsis.
fn trim_start(s: &str, max: usize) -> String {
	let count = s.chars().count();
	if count <= max {
		return s.to_string();
	}
	let keep = max.saturating_sub(1);
	let mut out = String::from(ELLIPSIS);
	out.extend(s.chars().skip(count - keep));
	out
}

fn row(frame: &StackFrame, widths: &ColumnWidths) -> [String; 3] {
	let location = match (frame.file_relative.is_empty(), frame.line) {
		(true, _) => String::new(),
		(false, Some(line)) => format!("{}:{line}", frame.file_relative),
		(false, None) => frame.file_relative.clone(),
	};
	let source = frame.source_line.as_deref().unwrap_or_default().trim();

	[
		format!("at {}", trim_end(&frame.callee, widths.callee)),
		trim_start(&location, widths.file),
		trim_end(source, widths.source_line),
	]
}

fn render_table(rows: &[[String; 3]]) -> Vec<String> {
	let mut widths = [0usize; 3];
	for row in rows {
		for (width, cell) in widths.iter_mut().zip(row) {
			*width = (*width).max(cell.chars().count());
		}
	}

	rows
		.iter()
		.map(|row| {
			let line = row
				.iter()
				.zip(widths)
				.map(|(cell, width)| format!("{cell:<width$}"))
				.collect::<Vec<_>>()
				.join(DELIMITER);
			line.trim_end().to_string()
		})
		.collect()
}

/// Whether a trace's first line looks like a stack line rather than a message.
fn is_stack_line(line: &str) -> bool {
	line.split_whitespace().any(|word| word == "at")
}

/// Render a browser-style trace as an aligned table.
///
/// A first line without the `at` token is the error message and is kept
/// verbatim above the table.
pub fn format_browser_table(trace: &Trace, widths: &ColumnWidths) -> String {
	let mut lines = Vec::with_capacity(trace.len() + 1);

	let first_line = trace.first_line();
	if !is_stack_line(first_line) {
		lines.push(first_line.to_string());
	}

	let rows: Vec<[String; 3]> = trace.frames.iter().map(|f| row(f, widths)).collect();
	lines.extend(render_table(&rows));

	lines.join("\n")
}

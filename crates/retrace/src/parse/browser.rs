// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Browser-style stack traces (V8, SpiderMonkey, JavaScriptCore).

use std::sync::LazyLock;

use regex::Regex;
use retrace_core::{nix_slashes, split_file_name, strip_url_origin, StackFrame};

use super::parse_position;

static EVAL_FRAME: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"at (.+) \(eval at .+ \((.+)\), .+\)").unwrap());
static CALL_FRAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"at (.+) \((.+)\)").unwrap());
static AT_SIGN_FRAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.*)@(.*)").unwrap());
static BARE_FRAME: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(at\s+)*(.+):(\d+):(\d+)").unwrap());
static FILE_LINE_COLUMN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(.*):(\d+):(\d+)").unwrap());
static FILE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.*):(\d+)").unwrap());

/// File, line and column as found in the text.
#[derive(Default)]
struct Location<'a> {
	file: Option<&'a str>,
	line: Option<&'a str>,
	column: Option<&'a str>,
}

fn split_location(location: &str) -> Location<'_> {
	if let Some(caps) = FILE_LINE_COLUMN.captures(location) {
		return Location {
			file: caps.get(1).map(|m| m.as_str()),
			line: caps.get(2).map(|m| m.as_str()),
			column: caps.get(3).map(|m| m.as_str()),
		};
	}
	if let Some(caps) = FILE_LINE.captures(location) {
		return Location {
			file: caps.get(1).map(|m| m.as_str()),
			line: caps.get(2).map(|m| m.as_str()),
			column: None,
		};
	}
	Location::default()
}

fn parse_line(line: &str) -> Option<StackFrame> {
	let called = EVAL_FRAME
		.captures(line)
		.or_else(|| CALL_FRAME.captures(line))
		.or_else(|| {
			if line.starts_with("at ") {
				None
			} else {
				AT_SIGN_FRAME.captures(line)
			}
		});

	let (callee, mut is_native, location) = if let Some(caps) = called {
		let callee = caps.get(1).map_or("", |m| m.as_str());
		let location = caps.get(2).map_or("", |m| m.as_str());
		(callee, location == "native", split_location(location))
	} else if let Some(caps) = BARE_FRAME.captures(line) {
		let location = Location {
			file: caps.get(2).map(|m| m.as_str()),
			line: caps.get(3).map(|m| m.as_str()),
			column: caps.get(4).map(|m| m.as_str()),
		};
		("", false, location)
	} else {
		return None;
	};

	let raw_file = location.file.unwrap_or_default();
	if !callee.is_empty() && raw_file.is_empty() && callee.split('.').next() == Some("Array") {
		is_native = true;
	}

	let file = nix_slashes(raw_file);
	let file_relative = strip_url_origin(&file).to_string();
	let (file_short, file_name) = split_file_name(&file_relative);

	Some(StackFrame {
		callee: callee.to_string(),
		file_short: file_short.to_string(),
		file_name: file_name.to_string(),
		is_third_party: file.contains("node_modules/"),
		file_relative: file_relative.clone(),
		line: parse_position(location.line),
		column: parse_position(location.column),
		before_parse: line.to_string(),
		is_native,
		file,
		..StackFrame::default()
	})
}

/// Parse browser-style stack trace text into frames.
///
/// Recognizes `at callee (file:line:col)`, `at file:line:col`, eval frames
/// and the `callee@file:line:col` form. Other lines, such as the leading
/// error message, are dropped.
pub fn parse_browser_stack(text: &str) -> Vec<StackFrame> {
	text.lines().map(str::trim).filter_map(parse_line).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn parses_v8_frames() {
		let trace = "TypeError: Cannot read property 'x' of undefined\n    at Object.onLoad (app-service.js:120:17)\n    at http://127.0.0.1:8080/pages/index/index.js:3:9";
		let frames = parse_browser_stack(trace);

		assert_eq!(frames.len(), 2);

		assert_eq!(frames[0].callee, "Object.onLoad");
		assert_eq!(frames[0].file, "app-service.js");
		assert_eq!(frames[0].file_name, "app-service.js");
		assert_eq!(frames[0].file_short, "");
		assert_eq!(frames[0].line, Some(120));
		assert_eq!(frames[0].column, Some(17));
		assert_eq!(frames[0].before_parse, "at Object.onLoad (app-service.js:120:17)");

		assert_eq!(frames[1].callee, "");
		assert_eq!(frames[1].file, "http://127.0.0.1:8080/pages/index/index.js");
		assert_eq!(frames[1].file_relative, "pages/index/index.js");
		assert_eq!(frames[1].file_short, "pages/index");
		assert_eq!(frames[1].file_name, "index.js");
		assert_eq!(frames[1].line, Some(3));
		assert_eq!(frames[1].column, Some(9));
	}

	#[test]
	fn parses_at_sign_frames() {
		let frames = parse_browser_stack("onLoad@webpack:///src/pages/index.vue:42:7\n@app-service.js:5");

		assert_eq!(frames.len(), 2);
		assert_eq!(frames[0].callee, "onLoad");
		assert_eq!(frames[0].file, "webpack:///src/pages/index.vue");
		assert_eq!(frames[0].file_relative, "src/pages/index.vue");
		assert_eq!(frames[0].line, Some(42));
		assert_eq!(frames[1].callee, "");
		assert_eq!(frames[1].line, Some(5));
		assert_eq!(frames[1].column, None);
	}

	#[test]
	fn parses_eval_frames() {
		let frames = parse_browser_stack(
			"at eval (eval at compile (vendor.js:10:3), <anonymous>:1:1)",
		);
		assert_eq!(frames.len(), 1);
		assert_eq!(frames[0].callee, "eval");
		assert_eq!(frames[0].file, "vendor.js");
		assert_eq!(frames[0].line, Some(10));
		assert_eq!(frames[0].column, Some(3));
	}

	#[test]
	fn classifies_native_and_third_party_frames() {
		let frames = parse_browser_stack(
			"at Array.forEach (native)\nat run (/app/node_modules/lib/index.js:1:2)\nat main (C:\\app\\main.js:4:4)",
		);

		assert_eq!(frames.len(), 3);
		assert!(frames[0].is_native);
		assert_eq!(frames[0].file, "");
		assert!(!frames[0].is_third_party);
		assert!(frames[1].is_third_party);
		assert!(!frames[1].is_native);
		assert_eq!(frames[2].file, "C:/app/main.js");
	}

	#[test]
	fn drops_message_and_blank_lines() {
		let frames = parse_browser_stack("Error: boom\n\nsomething else entirely");
		assert!(frames.is_empty());
	}

	proptest! {
		#[test]
		fn keeps_frame_order(names in prop::collection::vec("[a-zA-Z_][a-zA-Z0-9_]{0,12}", 1..20)) {
			let text = names
				.iter()
				.enumerate()
				.map(|(i, name)| format!("    at {name} (bundle.js:{}:1)", i + 1))
				.collect::<Vec<_>>()
				.join("\n");
			let frames = parse_browser_stack(&text);

			prop_assert_eq!(frames.len(), names.len());
			for (i, frame) in frames.iter().enumerate() {
				prop_assert_eq!(&frame.callee, &names[i]);
				prop_assert_eq!(frame.line, Some(i as u32 + 1));
			}
		}

		#[test]
		fn never_panics(text in "\\PC*") {
			let _ = parse_browser_stack(&text);
		}
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Parsers that turn raw trace text into ordered frames.
//!
//! Each parser keeps the input order and emits one frame per recognized line.
//! Lines a parser does not recognize are dropped.

mod browser;
mod diagnostic;

pub use browser::parse_browser_stack;
pub use diagnostic::{is_diagnostic_line, parse_compiler_diagnostics};

/// Parse a decimal line or column number. Zero and garbage become `None`.
fn parse_position(raw: Option<&str>) -> Option<u32> {
	raw.and_then(|s| s.parse::<u32>().ok()).filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_position_rejects_zero_and_garbage() {
		assert_eq!(parse_position(Some("12")), Some(12));
		assert_eq!(parse_position(Some("0")), None);
		assert_eq!(parse_position(Some("x")), None);
		assert_eq!(parse_position(None), None);
	}
}

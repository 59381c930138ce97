// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Formatters that render (possibly resolved) frames back to trace text.

mod diagnostic;
mod table;

pub use diagnostic::format_compiler_diagnostics;
pub use table::format_browser_table;

/// Maximum widths of the browser table columns, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
	pub callee: usize,
	pub file: usize,
	pub source_line: usize,
}

impl ColumnWidths {
	/// Widths large enough that real traces are never truncated.
	pub const UNCAPPED: Self = Self {
		callee: 999,
		file: 999,
		source_line: 999,
	};
}

impl Default for ColumnWidths {
	fn default() -> Self {
		Self::UNCAPPED
	}
}

/// Options passed to a preset's formatter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
	pub max_column_widths: ColumnWidths,
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolve runtime stack traces back to original source locations.
//!
//! A [`ResolutionPreset`] knows how to parse one trace dialect, where the
//! source maps for it live, and how to render the result. The resolver parses
//! the raw text, fetches each frame's source map through a shared
//! [`SourceMapCache`], rewrites the frames that can be mapped and formats the
//! trace again.
//!
//! # Example
//!
//! ```no_run
//! use retrace::{resolve_trace, UtsPreset};
//!
//! # async fn run() {
//! let preset = UtsPreset::new("https://maps.example.com/uts", "");
//! let text = resolve_trace("e: [foo]/path/to/bar.kt:(10, 5): type mismatch", &preset).await;
//! println!("{text}");
//! # }
//! ```
//!
//! Resolution never fails: if the trace cannot be parsed or formatted the raw
//! text is returned unchanged.

pub mod format;
pub mod parse;
pub mod preset;
pub mod resolve;

pub use format::{format_browser_table, format_compiler_diagnostics, ColumnWidths, FormatOptions};
pub use parse::{is_diagnostic_line, parse_browser_stack, parse_compiler_diagnostics};
pub use preset::{ResolutionPreset, UniPreset, UtsPreset};
pub use resolve::{resolve_frame, resolve_frames_with, resolve_trace, resolve_trace_with, Unresolved};
pub use retrace_core::{ResolvedLocation, StackFrame, Trace, TraceError};
pub use retrace_fetch::{DefaultLoader, FileLoader, HttpLoader, SourceLoader, SourceMapCache};

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Drives parsing, per-frame source map resolution and formatting.

use std::panic::{self, AssertUnwindSafe};

use futures::future::join_all;
use retrace_core::{ResolvedLocation, StackFrame, Trace, TraceError};
use retrace_fetch::SourceMapCache;
use retrace_sourcemap::{resolve, GeneratedPosition, SourceMapError};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::format::{ColumnWidths, FormatOptions};
use crate::preset::ResolutionPreset;

/// Why a single frame kept its generated location.
#[derive(Debug, Error)]
pub enum Unresolved {
	#[error("preset has no source map for this frame")]
	NoSourceMapUrl,

	#[error("building the source map URL panicked")]
	UrlPanicked,

	#[error("frame has no line number")]
	MissingPosition,

	#[error("source map {url} is empty or could not be fetched")]
	EmptySourceMap { url: String },

	#[error("source map {url} is invalid: {source}")]
	InvalidSourceMap {
		url: String,
		#[source]
		source: SourceMapError,
	},

	#[error("source map {url} has no mapping for {line}:{column}")]
	NoMapping { url: String, line: u32, column: u32 },
}

/// Run a preset step, turning a panic into a [`TraceError::Panicked`].
fn guarded<T>(
	stage: &'static str,
	f: impl FnOnce() -> retrace_core::Result<T>,
) -> retrace_core::Result<T> {
	panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or(Err(TraceError::Panicked(stage)))
}

/// Resolve one frame against its source map.
pub async fn resolve_frame<P>(
	frame: &StackFrame,
	preset: &P,
	cache: &SourceMapCache,
) -> Result<ResolvedLocation, Unresolved>
where
	P: ResolutionPreset + ?Sized,
{
	let url = panic::catch_unwind(AssertUnwindSafe(|| {
		preset.build_source_map_url(&frame.file, &frame.file_name)
	}))
	.map_err(|_| Unresolved::UrlPanicked)?;
	if url.is_empty() {
		return Err(Unresolved::NoSourceMapUrl);
	}

	let line = frame.line.ok_or(Unresolved::MissingPosition)?;
	let column = frame.column.unwrap_or(0);

	let content = cache.fetch(&url).await;
	if content.is_empty() {
		return Err(Unresolved::EmptySourceMap { url });
	}

	match resolve(&content, GeneratedPosition::new(line, column)) {
		Ok(Some(location)) => Ok(location),
		Ok(None) => Err(Unresolved::NoMapping { url, line, column }),
		Err(source) => Err(Unresolved::InvalidSourceMap { url, source }),
	}
}

/// Resolve a raw trace using the process-wide source map cache.
///
/// Never fails: if the trace cannot be parsed or formatted, the raw text is
/// returned unchanged.
pub async fn resolve_trace<P>(raw: &str, preset: &P) -> String
where
	P: ResolutionPreset + ?Sized,
{
	resolve_trace_with(raw, preset, SourceMapCache::global()).await
}

/// Parse a raw trace and resolve every frame concurrently.
///
/// Frames whose map is missing, empty, invalid or has no mapping keep their
/// generated location. Frame order is always the parse order.
pub async fn resolve_frames_with<P>(
	raw: &str,
	preset: &P,
	cache: &SourceMapCache,
) -> retrace_core::Result<Trace>
where
	P: ResolutionPreset + ?Sized,
{
	let mut trace = guarded("parsing", || preset.parse(raw))?;
	trace.raw = raw.to_string();

	let outcomes = join_all(
		trace
			.frames
			.iter()
			.enumerate()
			.map(|(index, frame)| async move { (index, resolve_frame(frame, preset, cache).await) }),
	)
	.await;

	let mut resolved = 0usize;
	for (index, outcome) in outcomes {
		match outcome {
			Ok(location) => {
				trace.frames[index].apply_resolution(&location);
				resolved += 1;
			}
			Err(reason) => debug!(index, reason = %reason, "frame left unresolved"),
		}
	}
	info!(frames = trace.len(), resolved, "resolved stack trace");

	Ok(trace)
}

/// Resolve a raw trace using the given cache.
#[instrument(skip_all, fields(bytes = raw.len()))]
pub async fn resolve_trace_with<P>(raw: &str, preset: &P, cache: &SourceMapCache) -> String
where
	P: ResolutionPreset + ?Sized,
{
	let trace = match resolve_frames_with(raw, preset, cache).await {
		Ok(trace) => trace,
		Err(err) => {
			warn!(error = %err, "failed to parse stack trace, returning it unchanged");
			return raw.to_string();
		}
	};

	let options = FormatOptions {
		max_column_widths: ColumnWidths::UNCAPPED,
	};
	match guarded("formatting", || preset.format(&trace, &options)) {
		Ok(text) => text,
		Err(err) => {
			warn!(error = %err, "failed to format stack trace, returning it unchanged");
			raw.to_string()
		}
	}
}

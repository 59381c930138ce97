// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for trace parsing and formatting.

use thiserror::Error;

/// Errors a preset can report while parsing or formatting a trace.
///
/// These never reach the caller of the resolution entry point; they only
/// select the fallback that returns the raw trace unchanged.
#[derive(Debug, Error)]
pub enum TraceError {
	#[error("failed to parse stack trace: {0}")]
	Parse(String),

	#[error("failed to format stack trace: {0}")]
	Format(String),

	#[error("preset panicked while {0} the trace")]
	Panicked(&'static str),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl TraceError {
	pub fn parse(msg: impl Into<String>) -> Self {
		Self::Parse(msg.into())
	}

	pub fn format(msg: impl Into<String>) -> Self {
		Self::Format(msg.into())
	}
}

/// Result type for trace operations.
pub type Result<T> = std::result::Result<T, TraceError>;

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for source map decoding.

use thiserror::Error;

/// Errors that can occur while decoding or querying a source map.
#[derive(Debug, Error)]
pub enum SourceMapError {
	#[error("Invalid source map JSON: {0}")]
	InvalidJson(#[from] serde_json::Error),

	#[error("Invalid source map version: expected 3, got {0}")]
	InvalidVersion(u32),

	#[error("Invalid VLQ character: {0}")]
	InvalidVlqChar(char),

	#[error("VLQ value overflows 32 bits")]
	VlqOverflow,

	#[error("Invalid source index: {0}")]
	InvalidSourceIndex(u32),

	#[error("Indexed source map section {0} has no embedded map")]
	MissingSectionMap(usize),
}

pub type Result<T> = std::result::Result<T, SourceMapError>;

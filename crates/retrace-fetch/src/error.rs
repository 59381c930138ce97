// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading source map content.
///
/// The cache turns every one of these into empty content.
#[derive(Debug, Error)]
pub enum FetchError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("server returned {status} for {url}")]
	Status { url: String, status: u16 },

	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

pub type Result<T> = std::result::Result<T, FetchError>;

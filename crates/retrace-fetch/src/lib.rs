// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source map fetching for retrace.
//!
//! This crate provides:
//! - A pre-configured HTTP client with a consistent User-Agent header
//! - Loaders that read source map text over HTTP or from the local filesystem
//! - A process-wide cache that shares in-flight fetches between callers

mod cache;
mod client;
mod error;
mod loader;

pub use cache::SourceMapCache;
pub use client::{builder, new_client, new_client_with_timeout, user_agent};
pub use error::{FetchError, Result};
pub use loader::{is_network_url, DefaultLoader, FileLoader, HttpLoader, SourceLoader};

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for source-mapped stack trace resolution.
//!
//! This crate provides the types shared by the parsers, formatters, source map
//! resolver and fetcher that make up `retrace`.
//!
//! # Overview
//!
//! - [`StackFrame`]: one call-site entry parsed from raw trace text
//! - [`Trace`]: the ordered frames plus the raw text they came from
//! - [`ResolvedLocation`]: an original source position found in a source map
//! - Path helpers used to derive the short, relative and file-name forms of a path

pub mod error;
pub mod frame;
pub mod path;

pub use error::{Result, TraceError};
pub use frame::{ResolvedLocation, StackFrame, Trace};
pub use path::{nix_slashes, split_file_name, strip_url_origin};

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source map decoding and position resolution for retrace.
//!
//! This crate provides functionality for:
//! - Parsing Source Map v3 documents, both regular and indexed (`sections`)
//! - Decoding Base64 VLQ mappings
//! - Looking up the original position of a generated line and column
//! - Deriving the display paths used when a stack frame is resolved
//!
//! # Example
//!
//! ```
//! use retrace_sourcemap::{resolve, GeneratedPosition};
//!
//! let map = r#"{
//!     "version": 3,
//!     "sources": ["uni-app:///app/id/src/Bar.kt"],
//!     "names": [],
//!     "mappings": ";;;;;;;;;KAEC"
//! }"#;
//!
//! let resolved = resolve(map, GeneratedPosition::new(10, 5)).unwrap().unwrap();
//! assert_eq!(resolved.source_path, "src/Bar.kt");
//! assert_eq!(resolved.file_short, "src");
//! assert_eq!(resolved.line, 3);
//! assert_eq!(resolved.column, 1);
//! ```

pub mod error;
pub mod resolve;
pub mod sourcemap;
pub mod vlq;

pub use error::{Result, SourceMapError};
pub use resolve::{resolve, resolve_position, strip_source_prefix, GeneratedPosition};
pub use sourcemap::{IndexedSourceMap, OriginalPosition, ParsedSourceMap, SourceMap};
pub use vlq::{decode_vlq_mappings, decode_vlq_segment, DecodedMappings, Mapping, OriginalSegment};

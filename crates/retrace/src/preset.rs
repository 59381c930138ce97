// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Presets bundle a parser, a formatter and a source map URL convention for
//! one trace dialect.

use retrace_core::{Result, Trace};

use crate::format::{format_browser_table, format_compiler_diagnostics, FormatOptions};
use crate::parse::{parse_browser_stack, parse_compiler_diagnostics};

/// Parse, format and source map URL building for one trace dialect.
pub trait ResolutionPreset: Send + Sync {
	/// Parse raw trace text into ordered frames.
	fn parse(&self, raw: &str) -> Result<Trace>;

	/// Render a (possibly resolved) trace back to text.
	fn format(&self, trace: &Trace, options: &FormatOptions) -> Result<String>;

	/// Source map URL or path for a generated file. Empty means no map.
	fn build_source_map_url(&self, file: &str, file_name: &str) -> String;
}

/// Preset for compiled JavaScript traces from uni-app builds.
///
/// Maps live at `{base}/{version}/.sourcemap/{platform}/{file stem}.js.map`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniPreset {
	pub base: String,
	/// Carried for callers; map URLs do not depend on it.
	pub app_id: String,
	pub platform: String,
	pub version: String,
}

impl UniPreset {
	pub fn new(
		base: impl Into<String>,
		app_id: impl Into<String>,
		platform: impl Into<String>,
		version: impl Into<String>,
	) -> Self {
		Self {
			base: base.into(),
			app_id: app_id.into(),
			platform: platform.into(),
			version: version.into(),
		}
	}
}

impl ResolutionPreset for UniPreset {
	fn parse(&self, raw: &str) -> Result<Trace> {
		Ok(Trace::new(parse_browser_stack(raw), raw))
	}

	fn format(&self, trace: &Trace, options: &FormatOptions) -> Result<String> {
		Ok(format_browser_table(trace, &options.max_column_widths))
	}

	fn build_source_map_url(&self, file: &str, _file_name: &str) -> String {
		if self.platform.is_empty() || self.version.is_empty() {
			return String::new();
		}
		let stem = file.split('.').next().unwrap_or_default();
		format!(
			"{}/{}/.sourcemap/{}/{stem}.js.map",
			self.base, self.version, self.platform
		)
	}
}

/// Preset for UTS compiler diagnostics.
///
/// Maps live at `{base}/{file_name}.map`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtsPreset {
	pub base: String,
	/// Root of the plugin sources on the build machine, e.g.
	/// `/wgtRoot/__UNI__E070870/nativeplugins/DCloud-UTSPlugin/android/src/`.
	/// Carried for callers; map URLs do not depend on it.
	pub source_root: String,
}

impl UtsPreset {
	pub fn new(base: impl Into<String>, source_root: impl Into<String>) -> Self {
		Self {
			base: base.into(),
			source_root: source_root.into(),
		}
	}
}

impl ResolutionPreset for UtsPreset {
	fn parse(&self, raw: &str) -> Result<Trace> {
		Ok(Trace::new(parse_compiler_diagnostics(raw), raw))
	}

	fn format(&self, trace: &Trace, _options: &FormatOptions) -> Result<String> {
		Ok(format_compiler_diagnostics(trace))
	}

	fn build_source_map_url(&self, _file: &str, file_name: &str) -> String {
		if file_name.is_empty() {
			return String::new();
		}
		format!("{}/{file_name}.map", self.base)
	}
}

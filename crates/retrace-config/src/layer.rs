// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration produced by one source.

use serde::{Deserialize, Serialize};

use crate::sections::{FetchConfigLayer, LoggingConfigLayer, UniConfigLayer, UtsConfigLayer};

/// One layer of configuration. Every field is optional; a later layer only
/// overrides the fields it sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
	/// Preset name. Kept as text so an unknown name is reported by validation
	/// with the layer that set it already merged.
	pub preset: Option<String>,
	pub uni: Option<UniConfigLayer>,
	pub uts: Option<UtsConfigLayer>,
	pub fetch: Option<FetchConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: impl FnOnce(&mut T, T)) {
	match (base.as_mut(), other) {
		(Some(existing), Some(incoming)) => merge(existing, incoming),
		(None, Some(incoming)) => *base = Some(incoming),
		(_, None) => {}
	}
}

impl ConfigLayer {
	pub fn merge(&mut self, other: ConfigLayer) {
		if other.preset.is_some() {
			self.preset = other.preset;
		}
		merge_section(&mut self.uni, other.uni, UniConfigLayer::merge);
		merge_section(&mut self.uts, other.uts, UtsConfigLayer::merge);
		merge_section(&mut self.fetch, other.fetch, FetchConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}

	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

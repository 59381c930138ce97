// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Path helpers shared by the frame parsers and the source map resolver.

/// Replace Windows path separators with forward slashes.
pub fn nix_slashes(path: &str) -> String {
	path.replace('\\', "/")
}

/// Split a `/`-separated path into its directory part and final segment.
///
/// A path without any separator is all file name.
///
/// ```
/// use retrace_core::split_file_name;
///
/// assert_eq!(split_file_name("/path/to/bar.kt"), ("/path/to", "bar.kt"));
/// assert_eq!(split_file_name("bar.kt"), ("", "bar.kt"));
/// ```
pub fn split_file_name(path: &str) -> (&str, &str) {
	match path.rsplit_once('/') {
		Some((dir, name)) => (dir, name),
		None => ("", path),
	}
}

/// Drop a leading `scheme://host` from a URL-shaped path.
///
/// `http://127.0.0.1:8080/pages/index.js` becomes `pages/index.js`. Anything
/// that is not URL-shaped is returned as-is.
pub fn strip_url_origin(path: &str) -> &str {
	let Some((scheme, rest)) = path.split_once("://") else {
		return path;
	};
	if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '+') {
		return path;
	}
	match rest.split_once('/') {
		Some((_, tail)) => tail,
		None => "",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nix_slashes_converts_backslashes() {
		assert_eq!(nix_slashes(r"C:\work\src\Bar.kt"), "C:/work/src/Bar.kt");
		assert_eq!(nix_slashes("/already/unix"), "/already/unix");
	}

	#[test]
	fn split_file_name_keeps_leading_slash_in_dir() {
		assert_eq!(split_file_name("/a/b/c.js"), ("/a/b", "c.js"));
		assert_eq!(split_file_name("/c.js"), ("", "c.js"));
	}

	#[test]
	fn strip_url_origin_handles_hosts_and_plain_paths() {
		assert_eq!(
			strip_url_origin("http://127.0.0.1:8080/pages/index.js"),
			"pages/index.js"
		);
		assert_eq!(strip_url_origin("uni-app:///app/id/src/Bar.kt"), "app/id/src/Bar.kt");
		assert_eq!(strip_url_origin("app-service.js"), "app-service.js");
		assert_eq!(strip_url_origin("https://example.com"), "");
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Creates a new HTTP client with the standard retrace User-Agent header.
///
/// No request timeout is set; a hanging server stalls only the frame whose
/// map is being fetched. Use [`new_client_with_timeout`] to bound it.
pub fn new_client() -> reqwest::Result<Client> {
	builder().build()
}

/// Creates a new HTTP client builder with the standard User-Agent header.
///
/// # Example
/// ```ignore
/// let client = retrace_fetch::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a new HTTP client with a custom timeout and the standard User-Agent.
pub fn new_client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
	builder().timeout(timeout).build()
}

/// Returns the standard User-Agent string.
///
/// Format: `retrace/{version}/{os}-{arch}`
pub fn user_agent() -> String {
	format!(
		"retrace/{}/{}-{}",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}

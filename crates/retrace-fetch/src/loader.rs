// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loaders that read raw source map text.

use std::path::PathBuf;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::{FetchError, Result};

static NETWORK_URL_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^[a-z]+:").unwrap());

/// Whether `url` starts with a scheme and should be fetched over the network.
pub fn is_network_url(url: &str) -> bool {
	NETWORK_URL_REGEX.is_match(url)
}

/// Reads source map text given a URL or path.
#[async_trait]
pub trait SourceLoader: Send + Sync {
	async fn load(&self, url: &str) -> Result<String>;
}

/// Fetches source maps with an HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpLoader {
	client: Client,
}

impl HttpLoader {
	pub fn new(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl SourceLoader for HttpLoader {
	#[instrument(skip(self))]
	async fn load(&self, url: &str) -> Result<String> {
		let response = self.client.get(url).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(FetchError::Status {
				url: url.to_string(),
				status: status.as_u16(),
			});
		}
		let body = response.text().await?;
		debug!(bytes = body.len(), "fetched source map");
		Ok(body)
	}
}

/// Reads source maps from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

#[async_trait]
impl SourceLoader for FileLoader {
	#[instrument(skip(self))]
	async fn load(&self, url: &str) -> Result<String> {
		let path = PathBuf::from(url);
		tokio::fs::read_to_string(&path)
			.await
			.map_err(|source| FetchError::Io { path, source })
	}
}

/// Sends URLs with a scheme to [`HttpLoader`] and everything else to [`FileLoader`].
#[derive(Debug, Clone)]
pub struct DefaultLoader {
	http: HttpLoader,
	file: FileLoader,
}

impl DefaultLoader {
	pub fn new(client: Client) -> Self {
		Self {
			http: HttpLoader::new(client),
			file: FileLoader,
		}
	}
}

#[async_trait]
impl SourceLoader for DefaultLoader {
	async fn load(&self, url: &str) -> Result<String> {
		if is_network_url(url) {
			self.http.load(url).await
		} else {
			self.file.load(url).await
		}
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Process-wide source map cache.

use std::collections::HashMap;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, LazyLock, Mutex};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, warn};

use crate::client::new_client;
use crate::loader::{DefaultLoader, SourceLoader};

type SharedFetch = Shared<BoxFuture<'static, Arc<str>>>;

static GLOBAL: LazyLock<SourceMapCache> = LazyLock::new(|| {
	let client = new_client().unwrap_or_else(|err| {
		warn!(error = %err, "failed to build HTTP client, using defaults");
		reqwest::Client::new()
	});
	SourceMapCache::new(Arc::new(DefaultLoader::new(client)))
});

/// Cache of source map content keyed by URL.
///
/// Each entry holds a shared future, so callers that ask for a URL while it is
/// still being fetched wait on the same fetch. A completed future yields its
/// content immediately. Entries are created on first miss and never evicted.
/// Failed fetches are cached as empty content.
pub struct SourceMapCache {
	loader: Arc<dyn SourceLoader>,
	entries: Mutex<HashMap<String, SharedFetch>>,
}

impl SourceMapCache {
	pub fn new(loader: Arc<dyn SourceLoader>) -> Self {
		Self {
			loader,
			entries: Mutex::new(HashMap::new()),
		}
	}

	/// The process-wide cache backed by [`DefaultLoader`].
	pub fn global() -> &'static SourceMapCache {
		&GLOBAL
	}

	/// Fetch the content for `url`, sharing any in-flight or finished fetch.
	///
	/// Never fails: any load error or loader panic yields empty content.
	pub async fn fetch(&self, url: &str) -> Arc<str> {
		let fetch = {
			let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
			entries
				.entry(url.to_string())
				.or_insert_with(|| {
					debug!(url = %url, "source map cache miss");
					self.start_fetch(url)
				})
				.clone()
		};
		fetch.await
	}

	fn start_fetch(&self, url: &str) -> SharedFetch {
		let loader = Arc::clone(&self.loader);
		let url = url.to_string();
		async move {
			match AssertUnwindSafe(loader.load(&url)).catch_unwind().await {
				Ok(Ok(content)) => Arc::from(content),
				Ok(Err(err)) => {
					warn!(url = %url, error = %err, "failed to load source map");
					Arc::from("")
				}
				Err(_) => {
					warn!(url = %url, "source map loader panicked");
					Arc::from("")
				}
			}
		}
		.boxed()
		.shared()
	}

	/// Whether `url` has an entry, pending or complete.
	pub fn contains(&self, url: &str) -> bool {
		self.entries
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.contains_key(url)
	}

	pub fn len(&self) -> usize {
		self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl fmt::Debug for SourceMapCache {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SourceMapCache")
			.field("entries", &self.len())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{FetchError, Result};
	use async_trait::async_trait;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::time::Duration;

	struct CountingLoader {
		calls: AtomicUsize,
		delay: Duration,
	}

	impl CountingLoader {
		fn new(delay: Duration) -> Self {
			Self {
				calls: AtomicUsize::new(0),
				delay,
			}
		}

		fn calls(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}
	}

	#[async_trait]
	impl SourceLoader for CountingLoader {
		async fn load(&self, url: &str) -> Result<String> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			tokio::time::sleep(self.delay).await;
			if url.contains("missing") {
				return Err(FetchError::Status {
					url: url.to_string(),
					status: 404,
				});
			}
			Ok(format!("content of {url}"))
		}
	}

	#[tokio::test]
	async fn concurrent_fetches_share_one_load() {
		let loader = Arc::new(CountingLoader::new(Duration::from_millis(20)));
		let cache = SourceMapCache::new(loader.clone());

		let (a, b) = tokio::join!(cache.fetch("a.js.map"), cache.fetch("a.js.map"));

		assert_eq!(loader.calls(), 1);
		assert_eq!(&*a, "content of a.js.map");
		assert!(Arc::ptr_eq(&a, &b));
	}

	#[tokio::test]
	async fn completed_fetch_is_reused() {
		let loader = Arc::new(CountingLoader::new(Duration::ZERO));
		let cache = SourceMapCache::new(loader.clone());

		cache.fetch("a.js.map").await;
		cache.fetch("a.js.map").await;
		cache.fetch("b.js.map").await;

		assert_eq!(loader.calls(), 2);
		assert_eq!(cache.len(), 2);
		assert!(cache.contains("b.js.map"));
	}

	#[tokio::test]
	async fn failed_fetch_resolves_empty_and_stays_cached() {
		let loader = Arc::new(CountingLoader::new(Duration::ZERO));
		let cache = SourceMapCache::new(loader.clone());

		let first = cache.fetch("missing.js.map").await;
		let second = cache.fetch("missing.js.map").await;

		assert!(first.is_empty());
		assert!(second.is_empty());
		assert_eq!(loader.calls(), 1);
	}

	#[tokio::test]
	async fn entry_exists_while_pending() {
		let loader = Arc::new(CountingLoader::new(Duration::from_millis(50)));
		let cache = Arc::new(SourceMapCache::new(loader.clone()));

		let background = {
			let cache = Arc::clone(&cache);
			tokio::spawn(async move { cache.fetch("slow.js.map").await })
		};
		tokio::time::sleep(Duration::from_millis(10)).await;

		assert!(cache.contains("slow.js.map"));
		let content = cache.fetch("slow.js.map").await;
		assert_eq!(&*background.await.unwrap(), &*content);
		assert_eq!(loader.calls(), 1);
	}

	struct PanickingLoader {
		calls: AtomicUsize,
	}

	#[async_trait]
	impl SourceLoader for PanickingLoader {
		async fn load(&self, url: &str) -> Result<String> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			panic!("loader blew up on {url}");
		}
	}

	#[tokio::test]
	async fn panicking_loader_resolves_empty_and_stays_cached() {
		let loader = Arc::new(PanickingLoader {
			calls: AtomicUsize::new(0),
		});
		let cache = SourceMapCache::new(loader.clone());

		let first = cache.fetch("boom.js.map").await;
		let second = cache.fetch("boom.js.map").await;

		assert!(first.is_empty());
		assert!(second.is_empty());
		assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn global_cache_is_a_singleton() {
		assert!(std::ptr::eq(SourceMapCache::global(), SourceMapCache::global()));
	}
}

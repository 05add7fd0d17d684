//! DocType descriptor cache using moka
//!
//! Descriptors are fetched at most once per name: concurrent callers for a
//! name that is still loading wait on the same in-flight fetch. Failures
//! reach every waiter and are not cached, so a later call retries.

use crate::backend::Backend;
use crate::config::CacheConfig;
use crate::error::BackendError;
use desk_meta::DocType;
use futures::future::join_all;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Outcome of [`MetadataCache::preload`]
#[derive(Debug, Clone, Default)]
pub struct PreloadReport {
    /// Names that are now cached
    pub loaded: Vec<String>,
    /// Names that failed, with the reason
    pub failed: Vec<(String, BackendError)>,
}

impl PreloadReport {
    /// Every requested descriptor loaded
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Descriptor cache keyed by DocType name
#[derive(Debug, Clone)]
pub struct MetadataCache {
    backend: Arc<dyn Backend>,
    inner: Cache<String, Arc<DocType>>,
    fetches: Arc<AtomicU64>,
}

impl MetadataCache {
    /// Create unbounded cache over `backend`
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_config(backend, &CacheConfig::default())
    }

    /// Create cache sized by `config`
    #[must_use]
    pub fn with_config(backend: Arc<dyn Backend>, config: &CacheConfig) -> Self {
        let mut builder = Cache::builder();
        if let Some(capacity) = config.metadata_capacity {
            builder = builder.max_capacity(capacity);
        }
        Self {
            backend,
            inner: builder.build(),
            fetches: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get descriptor, fetching it on first use
    ///
    /// The fetch runs on its own task: if the caller is dropped while it is
    /// in flight the descriptor still lands in the cache.
    ///
    /// # Errors
    /// The backend failure, shared by every caller waiting on the same fetch
    pub async fn get(&self, doctype: &str) -> Result<Arc<DocType>, BackendError> {
        if let Some(hit) = self.inner.get(doctype).await {
            tracing::debug!(doctype, "metadata cache hit");
            return Ok(hit);
        }

        let this = self.clone();
        let name = doctype.to_string();
        match tokio::spawn(async move { this.fetch_coalesced(name).await }).await {
            Ok(result) => result,
            Err(err) => Err(BackendError::transport(format!(
                "metadata fetch for {doctype} did not complete: {err}"
            ))),
        }
    }

    async fn fetch_coalesced(&self, name: String) -> Result<Arc<DocType>, BackendError> {
        let backend = Arc::clone(&self.backend);
        let fetches = Arc::clone(&self.fetches);
        let doctype = name.clone();

        self.inner
            .try_get_with(name, async move {
                fetches.fetch_add(1, Ordering::SeqCst);
                tracing::info!(doctype = %doctype, "fetching doctype");
                match backend.fetch_doctype(&doctype).await {
                    Ok(descriptor) => Ok(Arc::new(descriptor)),
                    Err(err) => {
                        tracing::error!(doctype = %doctype, error = %err, "failed to load doctype");
                        Err(err)
                    }
                }
            })
            .await
            .map_err(|err: Arc<BackendError>| (*err).clone())
    }

    /// Load several descriptors independently
    ///
    /// Never fails as a whole; per-name failures are listed in the report.
    pub async fn preload<I, S>(&self, doctypes: I) -> PreloadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = doctypes
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        let results = join_all(names.iter().map(|name| self.get(name))).await;

        let mut report = PreloadReport::default();
        for (name, result) in names.into_iter().zip(results) {
            match result {
                Ok(_) => report.loaded.push(name),
                Err(err) => {
                    tracing::warn!(doctype = %name, error = %err, "preload failed");
                    report.failed.push((name, err));
                }
            }
        }
        report
    }

    /// Cached descriptor without fetching
    #[inline]
    pub async fn peek(&self, doctype: &str) -> Option<Arc<DocType>> {
        self.inner.get(doctype).await
    }

    /// Drop one descriptor
    #[inline]
    pub async fn invalidate(&self, doctype: &str) {
        self.inner.invalidate(doctype).await;
    }

    /// Drop every descriptor
    #[inline]
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Number of backend fetches issued so far
    #[inline]
    #[must_use]
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }
}

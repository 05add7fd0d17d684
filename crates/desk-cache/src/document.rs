//! Write-through document cache
//!
//! Holds the canonical in-memory copy of each document keyed by
//! `doctype:name`, plus the "active" document a form is looking at.
//!
//! Every write to a key is stamped from one monotonic clock. A fetch records
//! the clock value when it starts and is applied only if no save, delete or
//! clear for that key happened after it started, so a slow fetch can never
//! clobber a newer write-through.

use crate::backend::Backend;
use crate::error::{BackendError, CacheError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use desk_meta::{DocKey, DocStatus, Document};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type FetchResult = Result<Arc<Document>, BackendError>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// Cached value for one key; `doc` is `None` after a delete
#[derive(Debug, Clone)]
struct Slot {
    doc: Option<Arc<Document>>,
    seq: u64,
}

struct Inner {
    backend: Arc<dyn Backend>,
    slots: DashMap<DocKey, Slot>,
    inflight: DashMap<DocKey, (u64, SharedFetch)>,
    active: RwLock<Option<Arc<Document>>>,
    clock: AtomicU64,
    cleared_at: AtomicU64,
    fetches: AtomicU64,
}

impl Inner {
    fn next_seq(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn cached(&self, key: &DocKey) -> Option<Arc<Document>> {
        self.slots.get(key).and_then(|slot| slot.doc.clone())
    }

    fn set_active(&self, doc: Option<Arc<Document>>) {
        *self.active.write() = doc;
    }

    /// Store a fetch result unless a newer write for the key exists
    ///
    /// A delete that landed during the fetch wins: the caller gets
    /// `NotFound` rather than the deleted record.
    fn apply_fetch(&self, key: &DocKey, started: u64, fetched: Arc<Document>) -> FetchResult {
        if started <= self.cleared_at.load(Ordering::SeqCst) {
            tracing::debug!(%key, "cache cleared during fetch, result not stored");
            return Ok(fetched);
        }

        let applied = match self.slots.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                if slot.seq >= started {
                    tracing::warn!(%key, "discarding stale fetch result");
                    return slot
                        .doc
                        .clone()
                        .ok_or_else(|| BackendError::document_not_found(&key.doctype, &key.name));
                }
                slot.doc = Some(Arc::clone(&fetched));
                slot.seq = started;
                fetched
            }
            Entry::Vacant(entry) => {
                entry.insert(Slot {
                    doc: Some(Arc::clone(&fetched)),
                    seq: started,
                });
                fetched
            }
        };

        // A clear that raced the insert above wins.
        if started <= self.cleared_at.load(Ordering::SeqCst) {
            self.slots.remove_if(key, |_, slot| slot.seq == started);
        }
        Ok(applied)
    }

    /// Replace the entry with an authoritative record and make it active
    fn write_through(&self, key: DocKey, doc: Document) -> Arc<Document> {
        let doc = Arc::new(doc);
        let seq = self.next_seq();
        tracing::debug!(%key, seq, "write-through");
        self.slots.insert(
            key,
            Slot {
                doc: Some(Arc::clone(&doc)),
                seq,
            },
        );
        self.set_active(Some(Arc::clone(&doc)));
        doc
    }

    /// Join the in-flight fetch for `key`, or start one
    fn fetch(self: &Arc<Self>, key: DocKey) -> SharedFetch {
        match self.inflight.entry(key) {
            Entry::Occupied(entry) => {
                tracing::debug!(key = %entry.key(), "joining in-flight fetch");
                entry.get().1.clone()
            }
            Entry::Vacant(entry) => {
                let started = self.next_seq();
                let inner = Arc::clone(self);
                let key = entry.key().clone();

                let task = tokio::spawn(async move {
                    inner.fetches.fetch_add(1, Ordering::SeqCst);
                    tracing::info!(%key, "fetching document");
                    let result = inner
                        .backend
                        .fetch_document(&key.doctype, &key.name)
                        .await
                        .and_then(|doc| inner.apply_fetch(&key, started, Arc::new(doc)));
                    if let Err(err) = &result {
                        tracing::error!(%key, error = %err, "failed to load document");
                    }
                    inner.inflight.remove_if(&key, |_, (seq, _)| *seq == started);
                    result
                });

                let shared = async move {
                    task.await.unwrap_or_else(|err| {
                        Err(BackendError::transport(format!(
                            "document fetch did not complete: {err}"
                        )))
                    })
                }
                .boxed()
                .shared();
                entry.insert((started, shared.clone()));
                shared
            }
        }
    }
}

/// Status change requested from the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusAction {
    Submit,
    Cancel,
}

impl StatusAction {
    fn target(self) -> DocStatus {
        match self {
            Self::Submit => DocStatus::Submitted,
            Self::Cancel => DocStatus::Cancelled,
        }
    }
}

/// Document cache keyed by `doctype:name`
///
/// Cheap to clone; clones share the same entries.
#[derive(Clone)]
pub struct DocumentCache {
    inner: Arc<Inner>,
}

impl DocumentCache {
    /// Create empty cache over `backend`
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                slots: DashMap::new(),
                inflight: DashMap::new(),
                active: RwLock::new(None),
                clock: AtomicU64::new(0),
                cleared_at: AtomicU64::new(0),
                fetches: AtomicU64::new(0),
            }),
        }
    }

    /// Load a document and make it active
    ///
    /// A cache hit returns immediately; a miss fetches once per key no
    /// matter how many callers are waiting.
    ///
    /// # Errors
    /// The backend failure of the shared fetch
    pub async fn load(&self, doctype: &str, name: &str) -> Result<Arc<Document>, CacheError> {
        let key = DocKey::new(doctype, name);
        if let Some(doc) = self.inner.cached(&key) {
            tracing::debug!(%key, "document cache hit");
            self.inner.set_active(Some(Arc::clone(&doc)));
            return Ok(doc);
        }

        let doc = self.inner.fetch(key).await?;
        self.inner.set_active(Some(Arc::clone(&doc)));
        Ok(doc)
    }

    /// Fetch a document from the backend even if it is cached
    ///
    /// Joins a fetch already in flight for the key. The result replaces the
    /// entry unless a newer write landed meanwhile, and becomes active.
    ///
    /// # Errors
    /// The backend failure of the fetch
    pub async fn refresh(&self, doctype: &str, name: &str) -> Result<Arc<Document>, CacheError> {
        let doc = self.inner.fetch(DocKey::new(doctype, name)).await?;
        self.inner.set_active(Some(Arc::clone(&doc)));
        Ok(doc)
    }

    /// Create (no name) or update (named) a document
    ///
    /// On success the server's record replaces the cache entry and becomes
    /// active. On failure the cache is left untouched.
    ///
    /// # Errors
    /// - `CacheError::Backend` when the backend refuses or fails
    /// - `CacheError::UnnamedResult` when the server's record has no name
    pub async fn save(&self, doc: &Document) -> Result<Arc<Document>, CacheError> {
        tracing::info!(
            doctype = %doc.doctype,
            name = doc.name.as_deref().unwrap_or("<new>"),
            "saving document"
        );
        let saved = self.inner.backend.persist_document(doc).await.map_err(|err| {
            tracing::warn!(doctype = %doc.doctype, error = %err, "save failed");
            CacheError::from(err)
        })?;
        let key = saved.key().ok_or_else(|| CacheError::UnnamedResult {
            doctype: saved.doctype.clone(),
        })?;
        Ok(self.inner.write_through(key, saved))
    }

    /// Delete a document; clears the active pointer if it was active
    ///
    /// # Errors
    /// The backend failure; the cache entry is kept
    pub async fn delete(&self, doctype: &str, name: &str) -> Result<(), CacheError> {
        let key = DocKey::new(doctype, name);
        self.inner
            .backend
            .delete_document(doctype, name)
            .await
            .map_err(|err| {
                tracing::warn!(%key, error = %err, "delete failed");
                CacheError::from(err)
            })?;

        let seq = self.inner.next_seq();
        self.inner.slots.insert(key.clone(), Slot { doc: None, seq });

        let mut active = self.inner.active.write();
        if active.as_ref().and_then(|doc| doc.key()).as_ref() == Some(&key) {
            *active = None;
        }
        tracing::info!(%key, "document deleted");
        Ok(())
    }

    /// Submit a draft document (status 0 → 1)
    ///
    /// # Errors
    /// - `CacheError::InvalidTransition` if the cached copy is not a draft
    /// - `CacheError::Backend` when the backend refuses or fails
    pub async fn submit(&self, doctype: &str, name: &str) -> Result<Arc<Document>, CacheError> {
        self.change_status(doctype, name, StatusAction::Submit).await
    }

    /// Cancel a document (status → 2)
    ///
    /// # Errors
    /// - `CacheError::InvalidTransition` if the cached copy is already cancelled
    /// - `CacheError::Backend` when the backend refuses or fails
    pub async fn cancel(&self, doctype: &str, name: &str) -> Result<Arc<Document>, CacheError> {
        self.change_status(doctype, name, StatusAction::Cancel).await
    }

    async fn change_status(
        &self,
        doctype: &str,
        name: &str,
        action: StatusAction,
    ) -> Result<Arc<Document>, CacheError> {
        let key = DocKey::new(doctype, name);
        let to = action.target();
        if let Some(current) = self.inner.cached(&key) {
            if !current.docstatus.can_transition_to(to) {
                return Err(CacheError::InvalidTransition {
                    key,
                    from: current.docstatus,
                    to,
                });
            }
        }

        let backend = &self.inner.backend;
        let result = match action {
            StatusAction::Submit => backend.submit_document(doctype, name).await,
            StatusAction::Cancel => backend.cancel_document(doctype, name).await,
        };
        let mut doc = result.map_err(|err| {
            tracing::warn!(%key, ?action, error = %err, "status change failed");
            CacheError::from(err)
        })?;

        doc.docstatus = to;
        if doc.name.is_none() {
            doc.name = Some(key.name.clone());
        }
        tracing::info!(%key, status = %to, "document status changed");
        Ok(self.inner.write_through(key, doc))
    }

    /// Cached document without fetching
    #[must_use]
    pub fn peek(&self, doctype: &str, name: &str) -> Option<Arc<Document>> {
        self.inner.cached(&DocKey::new(doctype, name))
    }

    /// Document most recently loaded or written
    #[must_use]
    pub fn active(&self) -> Option<Arc<Document>> {
        self.inner.active.read().clone()
    }

    /// Replace the active pointer
    pub fn set_active(&self, doc: Option<Arc<Document>>) {
        self.inner.set_active(doc);
    }

    /// Number of cached documents
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .slots
            .iter()
            .filter(|slot| slot.doc.is_some())
            .count()
    }

    /// No documents cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and the active pointer
    ///
    /// Fetches still in flight complete for their callers but are not stored.
    pub fn clear(&self) {
        let seq = self.inner.next_seq();
        self.inner.cleared_at.store(seq, Ordering::SeqCst);
        self.inner.slots.clear();
        self.inner.set_active(None);
        tracing::debug!("document cache cleared");
    }

    /// Number of backend fetches issued so far
    #[must_use]
    pub fn fetch_count(&self) -> u64 {
        self.inner.fetches.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for DocumentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentCache")
            .field("backend", &self.inner.backend)
            .field("len", &self.len())
            .field("inflight", &self.inner.inflight.len())
            .field(
                "active",
                &self.active().and_then(|doc| doc.key()).map(|key| key.to_string()),
            )
            .finish()
    }
}

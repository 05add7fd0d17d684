//! Testing utilities for the desk workspace
//!
//! Shared test backend, fixtures, and setup helpers.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

mod fixtures;
mod memory;

pub use fixtures::{column_break, field, item_doctype, item_groups, section, todo_doctype};
pub use memory::{MemoryBackend, Op};

use desk_cache::{Backend, DocumentCache, MetadataCache};
use std::sync::Arc;

/// Fresh caches over a shared in-memory backend
pub fn setup_caches(backend: MemoryBackend) -> (Arc<MemoryBackend>, MetadataCache, DocumentCache) {
    let backend = Arc::new(backend);
    let shared: Arc<dyn Backend> = backend.clone();
    (
        backend,
        MetadataCache::new(shared.clone()),
        DocumentCache::new(shared),
    )
}

/// Backend seeded with the `Todo` and `Item` fixtures
pub fn seeded_backend() -> MemoryBackend {
    let backend = MemoryBackend::new()
        .with_doctype(todo_doctype())
        .with_doctype(item_doctype());
    for group in item_groups() {
        backend.insert_document(group);
    }
    backend
}

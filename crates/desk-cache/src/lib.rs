//! Desk Cache
//!
//! Client-side caches that back the form engine.
//!
//! # Architecture
//!
//! ```text
//! FormController ──► MetadataCache ──► Backend::fetch_doctype      (single-flight per DocType)
//!        │
//!        └─────────► DocumentCache ──► Backend::fetch_document     (single-flight per doctype:name)
//!                                  ──► Backend::persist/submit/... (write-through on success)
//! ```
//!
//! Both caches are explicit objects built from an `Arc<dyn Backend>`; there
//! is no global state, so each test can start from a fresh pair.
//!
//! # Example
//!
//! ```rust,ignore
//! use desk_cache::{DocumentCache, MetadataCache};
//!
//! # async fn example(backend: std::sync::Arc<dyn desk_cache::Backend>) -> Result<(), Box<dyn std::error::Error>> {
//! let metadata = MetadataCache::new(backend.clone());
//! let documents = DocumentCache::new(backend);
//!
//! let item = metadata.get("Item").await?;
//! let doc = documents.load("Item", "ITM-1").await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod backend;
pub mod config;
pub mod document;
pub mod error;
pub mod metadata;

pub use backend::{Backend, FileRef, FileUpload, LinkCandidate, LinkQuery};
pub use config::CacheConfig;
pub use document::DocumentCache;
pub use error::{BackendError, CacheError, FieldRejection};
pub use metadata::{MetadataCache, PreloadReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

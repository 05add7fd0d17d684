//! Collaborator interface to the document server
//!
//! The caches and the form engine never talk to the network directly; they
//! call a [`Backend`]. Transport, authentication and timeouts live behind
//! this trait.

use crate::error::BackendError;
use async_trait::async_trait;
use desk_meta::{DocType, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

/// Query for link-field candidates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkQuery {
    /// Free-text search
    pub txt: Option<String>,
    /// Field filters
    pub filters: Map<String, Value>,
    /// Maximum number of candidates
    pub page_length: usize,
}

impl LinkQuery {
    /// Query returning at most `page_length` candidates
    #[inline]
    #[must_use]
    pub fn page(page_length: usize) -> Self {
        Self {
            page_length,
            ..Self::default()
        }
    }

    /// With search text
    #[must_use]
    pub fn with_text(mut self, txt: impl Into<String>) -> Self {
        self.txt = Some(txt.into());
        self
    }

    /// With a field filter
    #[must_use]
    pub fn with_filter(mut self, fieldname: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(fieldname.into(), value.into());
        self
    }
}

/// Summary of a document that a link field may point at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkCandidate {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LinkCandidate {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// With an extra summary field
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Display label: `title`, then `full_name`, then `name`
    #[must_use]
    pub fn label(&self) -> &str {
        ["title", "full_name"]
            .iter()
            .filter_map(|key| self.extra.get(*key).and_then(Value::as_str))
            .find(|label| !label.is_empty())
            .unwrap_or(self.name.as_str())
    }
}

/// A file picked by the user, before upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            bytes,
        }
    }

    /// With MIME type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Whether the MIME type marks an image
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ty| ty.starts_with("image/"))
    }
}

/// Reference to an uploaded file; this, not the bytes, becomes the field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    #[serde(alias = "file_url")]
    pub url: String,
    #[serde(default, alias = "file_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Remote operations the engine depends on
///
/// `persist_document` creates when the document has no name and updates
/// otherwise. All failures are reported as [`BackendError`].
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Fetch a DocType descriptor
    async fn fetch_doctype(&self, name: &str) -> Result<DocType, BackendError>;

    /// Fetch one document
    async fn fetch_document(&self, doctype: &str, name: &str) -> Result<Document, BackendError>;

    /// Create or update a document, returning the server's record
    async fn persist_document(&self, doc: &Document) -> Result<Document, BackendError>;

    /// Delete a document
    async fn delete_document(&self, doctype: &str, name: &str) -> Result<(), BackendError>;

    /// Submit a draft document
    async fn submit_document(&self, doctype: &str, name: &str) -> Result<Document, BackendError>;

    /// Cancel a document
    async fn cancel_document(&self, doctype: &str, name: &str) -> Result<Document, BackendError>;

    /// Candidate targets for a link field
    async fn search_link_targets(
        &self,
        doctype: &str,
        query: &LinkQuery,
    ) -> Result<Vec<LinkCandidate>, BackendError>;

    /// Upload a file, optionally attached to a document
    async fn upload_file(
        &self,
        file: &FileUpload,
        doctype: Option<&str>,
        docname: Option<&str>,
    ) -> Result<FileRef, BackendError>;
}

//! Read-only backend over a directory of JSON fixtures
//!
//! ```text
//! DIR/doctype/<DocType>.json   descriptor
//! DIR/<DocType>/<name>.json    document
//! ```
//!
//! Documents may omit `doctype` and `name`; they are filled in from the
//! path. Every mutation fails with `PermissionDenied`.

use async_trait::async_trait;
use desk_cache::{Backend, BackendError, FileRef, FileUpload, LinkCandidate, LinkQuery};
use desk_meta::{DocType, Document};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};

const READ_ONLY: &str = "fixture backend is read-only";

/// Backend reading fixtures from disk
#[derive(Debug, Clone)]
pub struct FixtureBackend {
    root: PathBuf,
}

impl FixtureBackend {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn doctype_path(&self, name: &str) -> Option<PathBuf> {
        is_plain_segment(name).then(|| self.root.join("doctype").join(format!("{name}.json")))
    }

    fn document_dir(&self, doctype: &str) -> Option<PathBuf> {
        is_plain_segment(doctype).then(|| self.root.join(doctype))
    }

    fn document_path(&self, doctype: &str, name: &str) -> Option<PathBuf> {
        let dir = self.document_dir(doctype)?;
        is_plain_segment(name).then(|| dir.join(format!("{name}.json")))
    }
}

/// A single path component that cannot climb out of the fixture root
fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}

async fn read_json<T: DeserializeOwned>(
    path: &Path,
    missing: impl FnOnce() -> BackendError,
) -> Result<T, BackendError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(missing()),
        Err(err) => {
            return Err(BackendError::transport(format!(
                "cannot read {}: {err}",
                path.display()
            )))
        }
    };
    serde_json::from_slice(&bytes).map_err(|err| {
        BackendError::transport(format!("invalid fixture {}: {err}", path.display()))
    })
}

#[async_trait]
impl Backend for FixtureBackend {
    async fn fetch_doctype(&self, name: &str) -> Result<DocType, BackendError> {
        let missing = || BackendError::not_found(format!("DocType {name}"));
        let path = self.doctype_path(name).ok_or_else(missing)?;
        tracing::debug!(path = %path.display(), "reading doctype fixture");
        read_json(&path, missing).await
    }

    async fn fetch_document(&self, doctype: &str, name: &str) -> Result<Document, BackendError> {
        let missing = || BackendError::document_not_found(doctype, name);
        let path = self.document_path(doctype, name).ok_or_else(missing)?;
        tracing::debug!(path = %path.display(), "reading document fixture");

        let mut raw: Value = read_json(&path, missing).await?;
        if let Value::Object(map) = &mut raw {
            map.entry("doctype")
                .or_insert_with(|| Value::String(doctype.to_string()));
            map.entry("name")
                .or_insert_with(|| Value::String(name.to_string()));
        }
        serde_json::from_value(raw).map_err(|err| {
            BackendError::transport(format!("invalid fixture {}: {err}", path.display()))
        })
    }

    async fn persist_document(&self, _doc: &Document) -> Result<Document, BackendError> {
        Err(BackendError::PermissionDenied(READ_ONLY.to_string()))
    }

    async fn delete_document(&self, _doctype: &str, _name: &str) -> Result<(), BackendError> {
        Err(BackendError::PermissionDenied(READ_ONLY.to_string()))
    }

    async fn submit_document(&self, _doctype: &str, _name: &str) -> Result<Document, BackendError> {
        Err(BackendError::PermissionDenied(READ_ONLY.to_string()))
    }

    async fn cancel_document(&self, _doctype: &str, _name: &str) -> Result<Document, BackendError> {
        Err(BackendError::PermissionDenied(READ_ONLY.to_string()))
    }

    async fn search_link_targets(
        &self,
        doctype: &str,
        query: &LinkQuery,
    ) -> Result<Vec<LinkCandidate>, BackendError> {
        let Some(dir) = self.document_dir(doctype) else {
            return Ok(Vec::new());
        };
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(BackendError::transport(format!(
                    "cannot list {}: {err}",
                    dir.display()
                )))
            }
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| BackendError::transport(err.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();

        let needle = query.txt.as_deref().unwrap_or_default().to_lowercase();
        let mut candidates = Vec::new();
        for name in names
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(query.page_length)
        {
            let doc = self.fetch_document(doctype, &name).await?;
            let mut candidate = LinkCandidate::new(name);
            for key in ["title", "full_name"] {
                if let Some(label) = doc.get(key).and_then(Value::as_str) {
                    candidate = candidate.with(key, label);
                }
            }
            candidates.push(candidate);
        }
        Ok(candidates)
    }

    async fn upload_file(
        &self,
        _file: &FileUpload,
        _doctype: Option<&str>,
        _docname: Option<&str>,
    ) -> Result<FileRef, BackendError> {
        Err(BackendError::PermissionDenied(READ_ONLY.to_string()))
    }
}

//! In-memory backend with call counting, fetch gating and failure injection

use async_trait::async_trait;
use desk_cache::{Backend, BackendError, FileRef, FileUpload, LinkCandidate, LinkQuery};
use desk_meta::{DocKey, DocStatus, DocType, Document};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Notify;

/// Backend operations, for counting and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    FetchDocType,
    FetchDocument,
    Persist,
    Delete,
    Submit,
    Cancel,
    Search,
    Upload,
}

#[derive(Debug)]
pub struct MemoryBackend {
    doctypes: Mutex<HashMap<String, DocType>>,
    documents: Mutex<BTreeMap<DocKey, Document>>,
    calls: Mutex<HashMap<Op, usize>>,
    failures: Mutex<HashMap<Op, VecDeque<BackendError>>>,
    uploads: Mutex<Vec<FileUpload>>,
    gate_open: AtomicBool,
    gate: Notify,
    next_id: AtomicU64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            doctypes: Mutex::new(HashMap::new()),
            documents: Mutex::new(BTreeMap::new()),
            calls: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            uploads: Mutex::new(Vec::new()),
            gate_open: AtomicBool::new(true),
            gate: Notify::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_doctype(self, doctype: DocType) -> Self {
        self.insert_doctype(doctype);
        self
    }

    pub fn with_document(self, doc: Document) -> Self {
        self.insert_document(doc);
        self
    }

    pub fn insert_doctype(&self, doctype: DocType) {
        self.doctypes.lock().insert(doctype.name.clone(), doctype);
    }

    /// Store a named document as the server's copy
    pub fn insert_document(&self, doc: Document) {
        let key = doc.key().expect("stored documents must be named");
        self.documents.lock().insert(key, doc);
    }

    /// Server's copy of a document
    pub fn stored(&self, doctype: &str, name: &str) -> Option<Document> {
        self.documents.lock().get(&DocKey::new(doctype, name)).cloned()
    }

    /// Number of calls made for `op`
    pub fn calls(&self, op: Op) -> usize {
        self.calls.lock().get(&op).copied().unwrap_or(0)
    }

    /// Make the next call of `op` fail with `err`
    pub fn fail_next(&self, op: Op, err: BackendError) {
        self.failures.lock().entry(op).or_default().push_back(err);
    }

    /// Files received by `upload_file`
    pub fn uploads(&self) -> Vec<FileUpload> {
        self.uploads.lock().clone()
    }

    /// Hold descriptor and document fetches until [`open_gate`](Self::open_gate)
    pub fn close_gate(&self) {
        self.gate_open.store(false, Ordering::SeqCst);
    }

    /// Release held fetches
    pub fn open_gate(&self) {
        self.gate_open.store(true, Ordering::SeqCst);
        self.gate.notify_waiters();
    }

    async fn pass_gate(&self) {
        loop {
            let notified = self.gate.notified();
            if self.gate_open.load(Ordering::SeqCst) {
                return;
            }
            notified.await;
        }
    }

    fn enter(&self, op: Op) -> Result<(), BackendError> {
        *self.calls.lock().entry(op).or_default() += 1;
        match self.failures.lock().get_mut(&op).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn change_status(
        &self,
        doctype: &str,
        name: &str,
        to: DocStatus,
    ) -> Result<Document, BackendError> {
        let mut documents = self.documents.lock();
        let doc = documents
            .get_mut(&DocKey::new(doctype, name))
            .ok_or_else(|| BackendError::document_not_found(doctype, name))?;
        if !doc.docstatus.can_transition_to(to) {
            return Err(BackendError::rejected(format!(
                "cannot move {doctype} {name} from {} to {to}",
                doc.docstatus
            )));
        }
        doc.docstatus = to;
        Ok(doc.clone())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn fetch_doctype(&self, name: &str) -> Result<DocType, BackendError> {
        self.enter(Op::FetchDocType)?;
        self.pass_gate().await;
        self.doctypes
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| BackendError::not_found(format!("DocType {name}")))
    }

    async fn fetch_document(&self, doctype: &str, name: &str) -> Result<Document, BackendError> {
        self.enter(Op::FetchDocument)?;
        self.pass_gate().await;
        self.stored(doctype, name)
            .ok_or_else(|| BackendError::document_not_found(doctype, name))
    }

    async fn persist_document(&self, doc: &Document) -> Result<Document, BackendError> {
        self.enter(Op::Persist)?;
        let mut documents = self.documents.lock();
        let saved = match &doc.name {
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let name = format!("{}-{id:04}", doc.doctype.to_uppercase().replace(' ', "-"));
                Document::new(doc.doctype.clone())
                    .with_name(name)
                    .with_fields(doc.fields.clone())
            }
            Some(name) => {
                let key = DocKey::new(doc.doctype.clone(), name.clone());
                let existing = documents
                    .get(&key)
                    .ok_or_else(|| BackendError::document_not_found(&doc.doctype, name))?;
                if !existing.is_editable() {
                    return Err(BackendError::rejected(format!(
                        "cannot update {} document {key}",
                        existing.docstatus
                    )));
                }
                Document {
                    docstatus: existing.docstatus,
                    ..doc.clone()
                }
            }
        };
        let key = saved.key().expect("saved document is named");
        documents.insert(key, saved.clone());
        Ok(saved)
    }

    async fn delete_document(&self, doctype: &str, name: &str) -> Result<(), BackendError> {
        self.enter(Op::Delete)?;
        self.documents
            .lock()
            .remove(&DocKey::new(doctype, name))
            .map(|_| ())
            .ok_or_else(|| BackendError::document_not_found(doctype, name))
    }

    async fn submit_document(&self, doctype: &str, name: &str) -> Result<Document, BackendError> {
        self.enter(Op::Submit)?;
        self.change_status(doctype, name, DocStatus::Submitted)
    }

    async fn cancel_document(&self, doctype: &str, name: &str) -> Result<Document, BackendError> {
        self.enter(Op::Cancel)?;
        self.change_status(doctype, name, DocStatus::Cancelled)
    }

    async fn search_link_targets(
        &self,
        doctype: &str,
        query: &LinkQuery,
    ) -> Result<Vec<LinkCandidate>, BackendError> {
        self.enter(Op::Search)?;
        let needle = query.txt.as_deref().unwrap_or_default().to_lowercase();
        Ok(self
            .documents
            .lock()
            .values()
            .filter(|doc| doc.doctype == doctype)
            .filter_map(|doc| doc.name.as_ref().map(|name| (name, doc)))
            .filter(|(name, _)| name.to_lowercase().contains(&needle))
            .take(query.page_length)
            .map(|(name, doc)| {
                let mut candidate = LinkCandidate::new(name.clone());
                for key in ["title", "full_name"] {
                    if let Some(Value::String(label)) = doc.get(key) {
                        candidate = candidate.with(key, label.clone());
                    }
                }
                candidate
            })
            .collect())
    }

    async fn upload_file(
        &self,
        file: &FileUpload,
        _doctype: Option<&str>,
        _docname: Option<&str>,
    ) -> Result<FileRef, BackendError> {
        self.enter(Op::Upload)?;
        self.uploads.lock().push(file.clone());
        Ok(FileRef {
            url: format!("/files/{}", file.filename),
            name: Some(file.filename.clone()),
        })
    }
}

//! Form controller
//!
//! One [`FormController`] drives one form: it loads the descriptor and the
//! document through the shared caches, keeps the draft values and their
//! validation errors, and saves through the document cache.
//!
//! Side effects the form starts (link option loads) run on a `JoinSet`
//! owned by the controller and are aborted when it is disposed or dropped.

use crate::config::FormConfig;
use crate::defaults;
use crate::error::{FieldErrors, FormError};
use crate::layout;
use crate::link::{self, LinkOptions};
use crate::schema::ValidationSchema;
use crate::state::{validate_transition, FormMode, FormState};
use crate::visibility;
use crate::widget::{self, Interpretation, MountEffect, RawInput, RenderedField, Widget};
use dashmap::DashMap;
use desk_cache::{
    Backend, BackendError, CacheConfig, CacheError, DocumentCache, FileUpload, MetadataCache,
};
use desk_meta::{DocStatus, DocType, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;
use ulid::Ulid;

/// Unique identifier of a form instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormId(pub Ulid);

impl FormId {
    /// Generate new form ID
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Services shared by every form of a client
#[derive(Debug, Clone)]
pub struct FormContext {
    pub metadata: MetadataCache,
    pub documents: DocumentCache,
    pub backend: Arc<dyn Backend>,
    pub config: FormConfig,
}

impl FormContext {
    /// Fresh caches over `backend` with default configuration
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_config(backend, &CacheConfig::default(), FormConfig::default())
    }

    /// Fresh caches over `backend`
    #[must_use]
    pub fn with_config(backend: Arc<dyn Backend>, cache: &CacheConfig, config: FormConfig) -> Self {
        Self {
            metadata: MetadataCache::with_config(Arc::clone(&backend), cache),
            documents: DocumentCache::new(Arc::clone(&backend)),
            backend,
            config,
        }
    }

    /// Context over existing caches
    #[must_use]
    pub fn from_parts(
        backend: Arc<dyn Backend>,
        metadata: MetadataCache,
        documents: DocumentCache,
        config: FormConfig,
    ) -> Self {
        Self {
            metadata,
            documents,
            backend,
            config,
        }
    }
}

/// A section with the fields currently shown in it
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleSection {
    pub label: String,
    pub fields: Vec<RenderedField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusChange {
    Submit,
    Cancel,
}

impl StatusChange {
    fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Cancel => "cancel",
        }
    }
}

type SaveHook = Box<dyn Fn(&Document) + Send + Sync>;

/// Controller for one form instance
pub struct FormController {
    id: FormId,
    ctx: FormContext,
    doctype_name: String,
    docname: Option<String>,
    mode: FormMode,
    state: watch::Sender<FormState>,
    doctype: Option<Arc<DocType>>,
    schema: ValidationSchema,
    document: Option<Arc<Document>>,
    /// Values the draft started from; edits are measured against these
    baseline: Map<String, Value>,
    draft: Map<String, Value>,
    errors: FieldErrors,
    /// Form-level message from the last failed operation
    message: Option<String>,
    link_options: Arc<DashMap<String, LinkOptions>>,
    tasks: JoinSet<()>,
    on_save: Option<SaveHook>,
}

impl FormController {
    /// Create a form in `Loading` state; call [`load`](Self::load) next
    ///
    /// `docname` is ignored in create mode.
    #[must_use]
    pub fn new(
        ctx: FormContext,
        doctype: impl Into<String>,
        docname: Option<&str>,
        mode: FormMode,
    ) -> Self {
        let (state, _) = watch::channel(FormState::Loading);
        Self {
            id: FormId::new(),
            ctx,
            doctype_name: doctype.into(),
            docname: docname
                .filter(|_| mode.loads_document())
                .map(str::to_string),
            mode,
            state,
            doctype: None,
            schema: ValidationSchema::default(),
            document: None,
            baseline: Map::new(),
            draft: Map::new(),
            errors: FieldErrors::new(),
            message: None,
            link_options: Arc::new(DashMap::new()),
            tasks: JoinSet::new(),
            on_save: None,
        }
    }

    /// Create and load a form
    ///
    /// # Errors
    /// See [`load`](Self::load)
    pub async fn open(
        ctx: FormContext,
        doctype: impl Into<String>,
        docname: Option<&str>,
        mode: FormMode,
    ) -> Result<Self, FormError> {
        let mut form = Self::new(ctx, doctype, docname, mode);
        form.load().await?;
        Ok(form)
    }

    /// Load the descriptor and, outside create mode, the document
    ///
    /// May be called in any state to start over; unsaved edits are
    /// discarded. On failure the form is left `Failed` with a message.
    ///
    /// # Errors
    /// - `FormError::Metadata` if the descriptor cannot be loaded
    /// - `FormError::Document` if the document cannot be loaded
    pub async fn load(&mut self) -> Result<(), FormError> {
        self.load_from(false).await
    }

    /// Like [`load`](Self::load), but fetches the descriptor and document
    /// from the backend even when they are cached
    ///
    /// # Errors
    /// See [`load`](Self::load)
    pub async fn reload(&mut self) -> Result<(), FormError> {
        self.load_from(true).await
    }

    async fn load_from(&mut self, fresh: bool) -> Result<(), FormError> {
        self.set_state(FormState::Loading);
        if fresh {
            self.ctx.metadata.invalidate(&self.doctype_name).await;
        }
        tracing::debug!(
            form = %self.id,
            doctype = %self.doctype_name,
            mode = %self.mode,
            fresh,
            "loading form"
        );

        let doctype = match self.ctx.metadata.get(&self.doctype_name).await {
            Ok(doctype) => doctype,
            Err(source) => {
                let err = FormError::Metadata {
                    doctype: self.doctype_name.clone(),
                    source,
                };
                return Err(self.fail(err));
            }
        };

        let document = match self.docname.clone() {
            Some(name) => {
                let documents = &self.ctx.documents;
                let loaded = if fresh {
                    documents.refresh(&self.doctype_name, &name).await
                } else {
                    documents.load(&self.doctype_name, &name).await
                };
                match loaded {
                    Ok(doc) => Some(doc),
                    Err(err) => return Err(self.fail(FormError::Document(err))),
                }
            }
            None => None,
        };

        self.schema = ValidationSchema::compile(&doctype);
        self.reset_values(&doctype, document.as_deref());
        self.document = document;
        self.doctype = Some(Arc::clone(&doctype));
        self.message = None;
        self.transition(FormState::Ready)?;
        self.start_link_loads(&doctype);

        tracing::info!(form = %self.id, doctype = %self.doctype_name, "form ready");
        Ok(())
    }

    fn fail(&mut self, err: FormError) -> FormError {
        tracing::error!(form = %self.id, error = %err, "form failed to load");
        self.tasks.abort_all();
        self.link_options.clear();
        self.doctype = None;
        self.document = None;
        self.schema = ValidationSchema::default();
        self.baseline.clear();
        self.draft.clear();
        self.errors.clear();
        self.message = Some(err.to_string());
        self.set_state(FormState::Failed);
        err
    }

    fn set_state(&self, to: FormState) {
        let from = self.state.send_replace(to);
        if from != to {
            tracing::debug!(form = %self.id, %from, %to, "form state changed");
        }
    }

    fn transition(&self, to: FormState) -> Result<(), FormError> {
        validate_transition(self.state(), to)?;
        self.set_state(to);
        Ok(())
    }

    /// Make sure the form accepts edits, leaving `Saved` for `Ready`
    fn begin_edit(&self) -> Result<(), FormError> {
        match self.state() {
            FormState::Ready => Ok(()),
            FormState::Saved => self.transition(FormState::Ready),
            other => Err(FormError::not_ready(other)),
        }
    }

    fn loaded(&self) -> Result<Arc<DocType>, FormError> {
        self.doctype
            .clone()
            .ok_or_else(|| FormError::not_ready(self.state()))
    }

    fn reset_values(&mut self, doctype: &DocType, document: Option<&Document>) {
        self.baseline = defaults::initial_values(doctype, document);
        self.draft = self.baseline.clone();
        self.errors.clear();
    }

    fn adopt(&mut self, doctype: &DocType, doc: Arc<Document>) {
        self.docname = doc.name.clone();
        self.reset_values(doctype, Some(&doc));
        self.document = Some(doc);
    }

    fn start_link_loads(&mut self, doctype: &DocType) {
        self.tasks.abort_all();
        self.link_options.clear();
        if !self.ctx.config.load_link_options {
            return;
        }

        for field in doctype.value_fields() {
            let Some(MountEffect::LoadLinkOptions { target }) =
                Widget::for_field(field).and_then(|widget| widget.mount_effect())
            else {
                continue;
            };

            let fieldname = field.fieldname.clone();
            self.link_options
                .insert(fieldname.clone(), LinkOptions::Loading);

            let backend = Arc::clone(&self.ctx.backend);
            let options = Arc::clone(&self.link_options);
            let page_length = self.ctx.config.link_page_length;
            let form = self.id;
            self.tasks.spawn(async move {
                let state = match link::fetch_link_options(backend.as_ref(), &target, page_length)
                    .await
                {
                    Ok(loaded) => LinkOptions::Loaded(loaded),
                    Err(err) => {
                        tracing::warn!(%form, %fieldname, error = %err, "failed to load link options");
                        LinkOptions::Failed(err.to_string())
                    }
                };
                options.insert(fieldname, state);
            });
        }
    }

    /// Form instance ID
    #[inline]
    #[must_use]
    pub fn id(&self) -> FormId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> FormState {
        *self.state.borrow()
    }

    /// Receiver that observes every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Loaded descriptor
    #[must_use]
    pub fn doctype(&self) -> Option<&DocType> {
        self.doctype.as_deref()
    }

    /// Document as last loaded or saved
    #[must_use]
    pub fn document(&self) -> Option<&Arc<Document>> {
        self.document.as_ref()
    }

    /// Name of the document, once it has one
    #[must_use]
    pub fn docname(&self) -> Option<&str> {
        self.docname.as_deref()
    }

    /// Current draft values
    #[must_use]
    pub fn values(&self) -> &Map<String, Value> {
        &self.draft
    }

    #[must_use]
    pub fn value(&self, fieldname: &str) -> Option<&Value> {
        self.draft.get(fieldname)
    }

    /// Validation and upload errors by field
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Form-level message from the last failed load or save
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Draft differs from the loaded or saved values
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft != self.baseline
    }

    /// Candidate state of a link field
    #[must_use]
    pub fn link_options(&self, fieldname: &str) -> LinkOptions {
        self.link_options
            .get(fieldname)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Called with the server's record after every successful save
    pub fn on_save(&mut self, hook: impl Fn(&Document) + Send + Sync + 'static) {
        self.on_save = Some(Box::new(hook));
    }

    /// Set a field value
    ///
    /// With `validate_on_change` the field's error is refreshed right away.
    ///
    /// # Errors
    /// - `FormError::ReadOnly` in view mode, or for a read-only or
    ///   display-only field
    /// - `FormError::UnknownField` if the descriptor has no such value field
    /// - `FormError::NotReady` while loading, failed or submitting
    pub fn set_value(&mut self, fieldname: &str, value: impl Into<Value>) -> Result<(), FormError> {
        if self.mode.is_view_only() {
            return Err(FormError::ReadOnly);
        }
        let doctype = self.loaded()?;
        let field = doctype
            .field(fieldname)
            .filter(|field| field.holds_value())
            .ok_or_else(|| FormError::UnknownField(fieldname.to_string()))?;
        if field.read_only || field.fieldtype.is_display_only() {
            return Err(FormError::ReadOnly);
        }
        self.begin_edit()?;

        let value = value.into();
        if self.ctx.config.validate_on_change {
            match self.schema.validate_field(fieldname, &value) {
                Ok(()) => {
                    self.errors.remove(fieldname);
                }
                Err(message) => self.errors.insert(fieldname, message),
            }
        } else {
            self.errors.remove(fieldname);
        }
        self.draft.insert(fieldname.to_string(), value);
        Ok(())
    }

    /// Feed a raw input event to a field's widget
    ///
    /// Disabled fields ignore input. Attachment fields upload the file and
    /// store its URL; a failed upload only marks that field.
    ///
    /// # Errors
    /// - `FormError::UnknownField` if the descriptor has no such value field
    /// - `FormError::Upload` if an attachment upload fails
    /// - any error of [`set_value`](Self::set_value)
    pub async fn input(&mut self, fieldname: &str, input: RawInput) -> Result<(), FormError> {
        let doctype = self.loaded()?;
        let value = self.draft.get(fieldname).cloned().unwrap_or(Value::Null);
        let rendered = doctype
            .field(fieldname)
            .and_then(|field| widget::render(field, &value, self.mode.is_view_only()))
            .ok_or_else(|| FormError::UnknownField(fieldname.to_string()))?;

        match rendered.interpret(input) {
            Interpretation::Ignore => {
                tracing::trace!(form = %self.id, fieldname, "input ignored");
                Ok(())
            }
            Interpretation::Change(value) => self.set_value(fieldname, value),
            Interpretation::Upload(file) => self.upload(fieldname, file).await,
        }
    }

    async fn upload(&mut self, fieldname: &str, file: FileUpload) -> Result<(), FormError> {
        self.begin_edit()?;
        let backend = Arc::clone(&self.ctx.backend);
        let result = backend
            .upload_file(&file, Some(self.doctype_name.as_str()), self.docname.as_deref())
            .await;

        match result {
            Ok(uploaded) => {
                tracing::info!(form = %self.id, fieldname, url = %uploaded.url, "file uploaded");
                self.set_value(fieldname, uploaded.url)
            }
            Err(source) => {
                tracing::warn!(form = %self.id, fieldname, error = %source, "upload failed");
                self.errors
                    .insert(fieldname, format!("Upload failed: {source}"));
                Err(FormError::Upload {
                    fieldname: fieldname.to_string(),
                    source,
                })
            }
        }
    }

    /// Sections with their visible fields rendered, empty sections omitted
    #[must_use]
    pub fn visible_sections(&self) -> Vec<VisibleSection> {
        let Some(doctype) = &self.doctype else {
            return Vec::new();
        };
        let view_only = self.mode.is_view_only();

        layout::group(&doctype.fields)
            .into_iter()
            .filter_map(|section| {
                let fields: Vec<RenderedField> = section
                    .fields
                    .into_iter()
                    .filter(|field| visibility::is_visible(field, &self.draft))
                    .filter_map(|field| {
                        let value = self.draft.get(&field.fieldname).unwrap_or(&Value::Null);
                        let mut rendered = widget::render(field, value, view_only)?;
                        rendered.error = self
                            .errors
                            .get(&field.fieldname)
                            .map(str::to_string)
                            .or_else(|| {
                                self.link_options
                                    .get(&field.fieldname)
                                    .and_then(|entry| entry.error())
                            });
                        Some(rendered)
                    })
                    .collect();
                (!fields.is_empty()).then(|| VisibleSection {
                    label: section.label,
                    fields,
                })
            })
            .collect()
    }

    /// Validate the draft and save it
    ///
    /// On success the draft is replaced by the server's record and a new
    /// document switches the form to edit mode. On failure the draft is
    /// kept, the form returns to `Ready` and the error is recorded.
    ///
    /// # Errors
    /// - `FormError::Invalid` with every failing field; nothing is sent
    /// - `FormError::Save` if the server refuses or cannot be reached
    /// - `FormError::ReadOnly` in view mode
    /// - `FormError::NotReady` while loading, failed or already submitting
    pub async fn submit(&mut self) -> Result<Arc<Document>, FormError> {
        if self.mode.is_view_only() {
            return Err(FormError::ReadOnly);
        }
        let doctype = self.loaded()?;
        self.begin_edit()?;

        if let Err(errors) = self.schema.validate(&self.draft) {
            tracing::debug!(form = %self.id, failing = errors.len(), "validation failed");
            self.errors = errors.clone();
            return Err(FormError::Invalid(errors));
        }
        self.errors.clear();
        self.message = None;
        self.transition(FormState::Submitting)?;

        let outgoing = self.outgoing_document();
        match self.ctx.documents.save(&outgoing).await {
            Ok(saved) => {
                self.transition(FormState::Saved)?;
                self.adopt(&doctype, Arc::clone(&saved));
                if self.mode == FormMode::Create {
                    self.mode = FormMode::Edit;
                }
                if let Some(hook) = &self.on_save {
                    hook(saved.as_ref());
                }
                tracing::info!(
                    form = %self.id,
                    doctype = %self.doctype_name,
                    name = self.docname.as_deref().unwrap_or_default(),
                    "document saved"
                );
                Ok(saved)
            }
            Err(err) => {
                tracing::warn!(form = %self.id, error = %err, "save failed");
                self.record_failure(&err);
                Err(FormError::Save(err))
            }
        }
    }

    fn record_failure(&mut self, err: &CacheError) {
        self.set_state(FormState::SaveFailed);
        if let CacheError::Backend(BackendError::ValidationRejected { fields, .. }) = err {
            for rejection in fields {
                self.errors
                    .insert(rejection.fieldname.clone(), rejection.message.clone());
            }
        }
        self.message = Some(err.to_string());
        self.set_state(FormState::Ready);
    }

    /// Stored document with the draft values laid over it
    fn outgoing_document(&self) -> Document {
        let mut doc = match &self.document {
            Some(current) => Document::clone(current),
            None => Document::new(self.doctype_name.clone()),
        };
        for (fieldname, value) in &self.draft {
            doc.fields.insert(fieldname.clone(), value.clone());
        }
        doc
    }

    /// Discard unsaved edits and their errors
    pub fn cancel(&mut self) {
        self.draft = self.baseline.clone();
        self.errors.clear();
        self.message = None;
        tracing::debug!(form = %self.id, "edits discarded");
    }

    /// Whether the document may be submitted now
    ///
    /// Needs a submittable DocType, a saved draft with no pending edits and
    /// an editable form.
    #[must_use]
    pub fn can_submit_document(&self) -> bool {
        self.lifecycle_allowed(DocStatus::Draft) && !self.is_dirty()
    }

    /// Whether the document may be cancelled now
    #[must_use]
    pub fn can_cancel_document(&self) -> bool {
        self.lifecycle_allowed(DocStatus::Submitted)
    }

    fn lifecycle_allowed(&self, status: DocStatus) -> bool {
        !self.mode.is_view_only()
            && self.state().accepts_edits()
            && self.doctype.as_ref().is_some_and(|d| d.is_submittable)
            && self
                .document
                .as_ref()
                .is_some_and(|doc| doc.name.is_some() && doc.docstatus == status)
    }

    /// Submit the saved document (Draft → Submitted)
    ///
    /// # Errors
    /// - `FormError::NoDocument` before the first save
    /// - `FormError::Lifecycle` if the cache or server refuses
    pub async fn submit_document(&mut self) -> Result<Arc<Document>, FormError> {
        self.change_status(StatusChange::Submit).await
    }

    /// Cancel the saved document (→ Cancelled)
    ///
    /// # Errors
    /// - `FormError::NoDocument` before the first save
    /// - `FormError::Lifecycle` if the cache or server refuses
    pub async fn cancel_document(&mut self) -> Result<Arc<Document>, FormError> {
        self.change_status(StatusChange::Cancel).await
    }

    async fn change_status(&mut self, change: StatusChange) -> Result<Arc<Document>, FormError> {
        if self.mode.is_view_only() {
            return Err(FormError::ReadOnly);
        }
        let doctype = self.loaded()?;
        let name = self.docname.clone().ok_or(FormError::NoDocument)?;
        self.begin_edit()?;
        self.transition(FormState::Submitting)?;

        let documents = &self.ctx.documents;
        let result = match change {
            StatusChange::Submit => documents.submit(&self.doctype_name, &name).await,
            StatusChange::Cancel => documents.cancel(&self.doctype_name, &name).await,
        };

        match result {
            Ok(doc) => {
                self.transition(FormState::Saved)?;
                self.adopt(&doctype, Arc::clone(&doc));
                self.message = None;
                tracing::info!(form = %self.id, %name, status = %doc.docstatus, "document status changed");
                Ok(doc)
            }
            Err(source) => {
                tracing::warn!(form = %self.id, %name, action = change.as_str(), error = %source, "status change failed");
                self.record_failure(&source);
                Err(FormError::Lifecycle {
                    action: change.as_str(),
                    source,
                })
            }
        }
    }

    /// Delete the saved document; the form starts over as a new document
    ///
    /// # Errors
    /// - `FormError::NoDocument` before the first save
    /// - `FormError::Lifecycle` if the server refuses
    pub async fn delete_document(&mut self) -> Result<(), FormError> {
        if self.mode.is_view_only() {
            return Err(FormError::ReadOnly);
        }
        let doctype = self.loaded()?;
        let name = self.docname.clone().ok_or(FormError::NoDocument)?;
        self.begin_edit()?;

        if let Err(source) = self.ctx.documents.delete(&self.doctype_name, &name).await {
            self.message = Some(source.to_string());
            return Err(FormError::Lifecycle {
                action: "delete",
                source,
            });
        }

        self.document = None;
        self.docname = None;
        self.mode = FormMode::Create;
        self.reset_values(&doctype, None);
        self.message = None;
        tracing::info!(form = %self.id, doctype = %self.doctype_name, %name, "document deleted");
        Ok(())
    }

    /// Heading for the form
    ///
    /// `New <DocType>` until the document is saved, then the title field's
    /// value or the document name.
    #[must_use]
    pub fn title(&self) -> String {
        let label = self
            .doctype
            .as_ref()
            .map_or(self.doctype_name.as_str(), |doctype| doctype.display_label());
        let Some(name) = &self.docname else {
            return format!("New {label}");
        };
        let title = self
            .doctype
            .as_ref()
            .and_then(|doctype| doctype.title_field.as_deref())
            .and_then(|field| self.draft.get(field))
            .and_then(Value::as_str)
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(name.as_str());
        format!("{label}: {title}")
    }

    /// Status badge: `Not Saved` with pending edits, else the status of a
    /// submittable document
    #[must_use]
    pub fn status_label(&self) -> Option<&'static str> {
        if self.document.is_some() && self.is_dirty() {
            return Some("Not Saved");
        }
        let submittable = self.doctype.as_ref().is_some_and(|d| d.is_submittable);
        self.document
            .as_ref()
            .filter(|_| submittable)
            .map(|doc| doc.docstatus.label())
    }

    /// Wait for every side effect started so far
    pub async fn settle(&mut self) {
        while let Some(result) = self.tasks.join_next().await {
            if let Err(err) = result {
                if !err.is_cancelled() {
                    tracing::warn!(form = %self.id, error = %err, "form side effect failed");
                }
            }
        }
    }

    /// Abort side effects and release the form
    pub fn dispose(mut self) {
        self.tasks.abort_all();
        tracing::debug!(form = %self.id, "form disposed");
    }
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("id", &self.id)
            .field("doctype", &self.doctype_name)
            .field("docname", &self.docname)
            .field("mode", &self.mode)
            .field("state", &self.state())
            .field("dirty", &self.is_dirty())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_ids_are_unique() {
        let a = FormId::new();
        let b = FormId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 26);
    }
}

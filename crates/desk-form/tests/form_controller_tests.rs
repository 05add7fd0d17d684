//! Form controller behavior against the in-memory backend

use desk_cache::{Backend, BackendError, CacheError, FieldRejection, FileUpload};
use desk_form::{
    FormConfig, FormContext, FormController, FormError, FormMode, FormState, LinkOption,
    LinkOptions, RawInput,
};
use desk_meta::{DocStatus, DocType, Document, FieldType};
use desk_test_utils::{field, seeded_backend, setup_caches, MemoryBackend, Op};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn context_with(backend: MemoryBackend, config: FormConfig) -> (Arc<MemoryBackend>, FormContext) {
    let (backend, metadata, documents) = setup_caches(backend);
    let shared: Arc<dyn Backend> = backend.clone();
    (backend, FormContext::from_parts(shared, metadata, documents, config))
}

fn context(backend: MemoryBackend) -> (Arc<MemoryBackend>, FormContext) {
    context_with(backend, FormConfig::default())
}

fn existing_item() -> Document {
    Document::new("Item")
        .with_name("ITM-1")
        .with_field("item_code", "WID-1")
        .with_field("item_name", "Widget")
        .with_field("is_stock_item", 0)
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

fn section_fields(form: &FormController) -> Vec<(String, Vec<String>)> {
    form.visible_sections()
        .into_iter()
        .map(|section| {
            (
                section.label,
                section.fields.into_iter().map(|f| f.fieldname).collect(),
            )
        })
        .collect()
}

#[tokio::test]
async fn todo_requires_title_then_saves_with_defaults() {
    let (backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx.clone(), "Todo", None, FormMode::Create)
        .await
        .unwrap();
    assert_eq!(form.state(), FormState::Ready);
    assert_eq!(form.value("title"), Some(&json!("")));
    assert_eq!(form.value("active"), Some(&json!(false)));

    let err = form.submit().await.unwrap_err();
    assert_eq!(
        err.field_errors().and_then(|errors| errors.get("title")),
        Some("Title is required")
    );
    assert_eq!(form.errors().get("title"), Some("Title is required"));
    assert_eq!(form.state(), FormState::Ready);
    assert_eq!(backend.calls(Op::Persist), 0);

    form.set_value("title", "Widget").unwrap();
    assert!(form.errors().is_empty());
    let saved = form.submit().await.unwrap();

    assert_eq!(saved.get("title"), Some(&json!("Widget")));
    assert_eq!(saved.get("active"), Some(&json!(false)));
    let name = saved.name.clone().unwrap();
    let cached = ctx.documents.peek("Todo", &name).unwrap();
    assert_eq!(cached.get("active"), Some(&json!(false)));
    assert!(Arc::ptr_eq(&ctx.documents.active().unwrap(), &saved));

    assert_eq!(form.state(), FormState::Saved);
    assert_eq!(form.mode(), FormMode::Edit);
    assert_eq!(form.docname(), Some(name.as_str()));
    assert!(!form.is_dirty());
    assert_eq!(form.title(), format!("Todo: {name}"));
}

#[tokio::test]
async fn failed_save_keeps_draft_and_returns_to_ready() {
    let (backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx.clone(), "Todo", None, FormMode::Create)
        .await
        .unwrap();
    form.set_value("title", "Widget").unwrap();
    let draft = form.values().clone();

    backend.fail_next(Op::Persist, BackendError::transport("connection reset"));
    let err = form.submit().await.unwrap_err();

    assert!(matches!(err, FormError::Save(_)));
    assert!(err.is_retryable());
    assert_eq!(form.state(), FormState::Ready);
    assert_eq!(form.values(), &draft);
    assert_eq!(form.message(), Some("transport error: connection reset"));
    assert!(ctx.documents.is_empty());
    assert_eq!(form.mode(), FormMode::Create);

    form.submit().await.unwrap();
    assert_eq!(backend.calls(Op::Persist), 2);
    assert_eq!(form.message(), None);
}

#[tokio::test]
async fn server_rejection_marks_fields() {
    let (backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx, "Todo", None, FormMode::Create)
        .await
        .unwrap();
    form.set_value("title", "Widget").unwrap();

    backend.fail_next(
        Op::Persist,
        BackendError::ValidationRejected {
            message: "duplicate title".to_string(),
            fields: vec![FieldRejection {
                fieldname: "title".to_string(),
                message: "Title already exists".to_string(),
            }],
        },
    );
    let err = form.submit().await.unwrap_err();

    assert!(!err.is_retryable());
    assert_eq!(form.errors().get("title"), Some("Title already exists"));
    assert_eq!(form.message(), Some("rejected by server: duplicate title"));
    assert_eq!(form.state(), FormState::Ready);
}

#[tokio::test]
async fn state_changes_are_observable() {
    let (_backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx, "Todo", None, FormMode::Create)
        .await
        .unwrap();
    let mut states = form.subscribe();
    assert_eq!(*states.borrow_and_update(), FormState::Ready);

    form.set_value("title", "Widget").unwrap();
    form.submit().await.unwrap();

    assert!(states.has_changed().unwrap());
    assert_eq!(*states.borrow_and_update(), FormState::Saved);
}

#[tokio::test]
async fn edit_mode_starts_from_document_values() {
    let (backend, ctx) = context(seeded_backend().with_document(existing_item()));
    let form = FormController::open(ctx, "Item", Some("ITM-1"), FormMode::Edit)
        .await
        .unwrap();

    assert_eq!(form.value("item_code"), Some(&json!("WID-1")));
    // stored value wins over the descriptor default
    assert_eq!(form.value("is_stock_item"), Some(&json!(0)));
    // fields the document lacks fall back to zero values
    assert_eq!(form.value("opening_stock"), Some(&json!(0)));
    assert_eq!(form.value("stock_uom"), Some(&json!("")));
    assert!(form.value("col_1").is_none());
    assert!(!form.is_dirty());
    assert_eq!(form.title(), "Item: ITM-1");
    assert_eq!(form.status_label(), Some("Draft"));
    assert_eq!(backend.calls(Op::FetchDocument), 1);
}

#[tokio::test]
async fn sections_and_conditional_fields_follow_the_draft() {
    let (_backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx, "Item", None, FormMode::Create)
        .await
        .unwrap();
    assert_eq!(form.value("is_stock_item"), Some(&json!(true)));

    assert_eq!(
        section_fields(&form),
        vec![
            (
                "Main".to_string(),
                strings(&["item_code", "item_name", "item_group", "stock_uom"])
            ),
            (
                "Inventory".to_string(),
                strings(&["is_stock_item", "opening_stock", "valuation_rate"])
            ),
            (
                "Details".to_string(),
                strings(&["image", "launched_on", "created_by"])
            ),
        ]
    );

    form.input("is_stock_item", RawInput::Checked(false))
        .await
        .unwrap();
    assert_eq!(form.value("is_stock_item"), Some(&json!(false)));
    let sections = section_fields(&form);
    assert_eq!(sections[1].1, strings(&["is_stock_item", "valuation_rate"]));
}

#[tokio::test]
async fn depends_on_flag_toggles_visibility() {
    let doctype = DocType::new(
        "Flagged",
        vec![
            field("enable_flag", "Enable", FieldType::Check),
            field("x", "X", FieldType::Data).with_depends_on("eval:enable_flag"),
        ],
    );
    let (_backend, ctx) = context(MemoryBackend::new().with_doctype(doctype));
    let mut form = FormController::open(ctx, "Flagged", None, FormMode::Create)
        .await
        .unwrap();

    let visible = |form: &FormController| -> Vec<String> {
        section_fields(form)
            .into_iter()
            .flat_map(|(_, fields)| fields)
            .collect()
    };
    assert_eq!(visible(&form), vec!["enable_flag".to_string()]);

    form.set_value("enable_flag", 1).unwrap();
    assert_eq!(
        visible(&form),
        vec!["enable_flag".to_string(), "x".to_string()]
    );

    form.set_value("enable_flag", 0).unwrap();
    assert_eq!(visible(&form), vec!["enable_flag".to_string()]);
}

#[tokio::test]
async fn required_int_is_waived_when_read_only() {
    let doctype = DocType::new(
        "Counter",
        vec![
            field("qty", "Qty", FieldType::Int).required(),
            field("locked", "Locked", FieldType::Int).required().read_only(),
        ],
    );
    let (_backend, ctx) = context(MemoryBackend::new().with_doctype(doctype));
    let mut form = FormController::open(ctx, "Counter", None, FormMode::Create)
        .await
        .unwrap();

    form.set_value("qty", "").unwrap();
    assert_eq!(form.errors().get("qty"), Some("Qty is required"));
    assert_eq!(form.errors().get("locked"), None);

    let err = form.submit().await.unwrap_err();
    let errors = err.field_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("qty"), Some("Qty is required"));

    form.input("qty", RawInput::Text("7".to_string())).await.unwrap();
    assert_eq!(form.value("qty"), Some(&json!(7)));
    form.submit().await.unwrap();
}

#[tokio::test]
async fn read_only_and_display_fields_refuse_values() {
    let doctype = DocType::new(
        "Counter",
        vec![
            field("qty", "Qty", FieldType::Int),
            field("locked", "Locked", FieldType::Int).read_only(),
            field("notes", "Notes", FieldType::Html),
        ],
    );
    let (_backend, ctx) = context(
        seeded_backend()
            .with_doctype(doctype)
            .with_document(existing_item()),
    );

    let mut counter = FormController::open(ctx.clone(), "Counter", None, FormMode::Create)
        .await
        .unwrap();
    assert!(matches!(
        counter.set_value("locked", 5),
        Err(FormError::ReadOnly)
    ));
    assert!(matches!(
        counter.set_value("notes", "<b>hi</b>"),
        Err(FormError::ReadOnly)
    ));
    assert_eq!(counter.value("locked"), Some(&json!(0)));
    counter.set_value("qty", 3).unwrap();

    let mut item = FormController::open(ctx, "Item", Some("ITM-1"), FormMode::Edit)
        .await
        .unwrap();
    assert!(matches!(
        item.set_value("created_by", "mallory"),
        Err(FormError::ReadOnly)
    ));
    assert_eq!(item.value("created_by"), Some(&json!("")));
    assert!(!item.is_dirty());
}

#[tokio::test]
async fn view_mode_disables_every_field() {
    let (backend, ctx) = context(seeded_backend().with_document(existing_item()));
    let mut form = FormController::open(ctx, "Item", Some("ITM-1"), FormMode::View)
        .await
        .unwrap();

    assert!(form
        .visible_sections()
        .iter()
        .flat_map(|section| &section.fields)
        .all(|field| field.disabled));

    form.input("item_name", RawInput::Text("Changed".to_string()))
        .await
        .unwrap();
    assert_eq!(form.value("item_name"), Some(&json!("Widget")));
    assert!(matches!(
        form.set_value("item_name", "Changed"),
        Err(FormError::ReadOnly)
    ));
    assert!(matches!(form.submit().await, Err(FormError::ReadOnly)));
    assert_eq!(backend.calls(Op::Persist), 0);
}

#[tokio::test]
async fn link_options_load_when_ready() {
    let (backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx, "Item", None, FormMode::Create)
        .await
        .unwrap();
    form.settle().await;

    let options = form.link_options("item_group");
    assert_eq!(options.options().len(), 3);
    assert!(options.options().contains(&LinkOption {
        value: "Products".to_string(),
        label: "Products group".to_string(),
    }));
    assert_eq!(backend.calls(Op::Search), 1);
    assert_eq!(form.link_options("item_name"), LinkOptions::Idle);
}

#[tokio::test]
async fn link_page_length_is_configurable() {
    let config = FormConfig::default().with_link_page_length(2);
    let (_backend, ctx) = context_with(seeded_backend(), config);
    let mut form = FormController::open(ctx, "Item", None, FormMode::Create)
        .await
        .unwrap();
    form.settle().await;
    assert_eq!(form.link_options("item_group").options().len(), 2);
}

#[tokio::test]
async fn link_option_failure_stays_on_the_field() {
    let (backend, ctx) = context(seeded_backend());
    backend.fail_next(Op::Search, BackendError::transport("timed out"));
    let mut form = FormController::open(ctx, "Item", None, FormMode::Create)
        .await
        .unwrap();
    form.settle().await;

    assert!(matches!(
        form.link_options("item_group"),
        LinkOptions::Failed(_)
    ));
    assert_eq!(form.state(), FormState::Ready);

    let group = form
        .visible_sections()
        .into_iter()
        .flat_map(|section| section.fields)
        .find(|field| field.fieldname == "item_group")
        .unwrap();
    assert_eq!(
        group.error.as_deref(),
        Some("Could not load options: transport error: timed out")
    );

    form.set_value("item_group", "Products").unwrap();
    assert_eq!(form.value("item_group"), Some(&json!("Products")));
}

#[tokio::test]
async fn link_options_can_be_switched_off() {
    let config = FormConfig::default().with_link_options(false);
    let (backend, ctx) = context_with(seeded_backend(), config);
    let mut form = FormController::open(ctx, "Item", None, FormMode::Create)
        .await
        .unwrap();
    form.settle().await;
    assert_eq!(backend.calls(Op::Search), 0);
    assert_eq!(form.link_options("item_group"), LinkOptions::Idle);
}

#[tokio::test]
async fn attachment_upload_stores_file_url() {
    let (backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx, "Item", None, FormMode::Create)
        .await
        .unwrap();

    let file = FileUpload::new("logo.png", vec![0x89, 0x50]).with_content_type("image/png");
    form.input("image", RawInput::File(file)).await.unwrap();

    assert_eq!(form.value("image"), Some(&json!("/files/logo.png")));
    assert_eq!(backend.uploads().len(), 1);
    assert!(form.is_dirty());
}

#[tokio::test]
async fn upload_failure_is_field_local() {
    let (backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx, "Item", None, FormMode::Create)
        .await
        .unwrap();
    backend.fail_next(Op::Upload, BackendError::transport("offline"));

    let file = FileUpload::new("logo.png", vec![1]);
    let err = form.input("image", RawInput::File(file)).await.unwrap_err();

    assert!(matches!(err, FormError::Upload { .. }));
    assert_eq!(
        form.errors().get("image"),
        Some("Upload failed: transport error: offline")
    );
    assert_eq!(form.value("image"), Some(&json!("")));
    assert_eq!(form.state(), FormState::Ready);

    form.set_value("item_code", "WID-2").unwrap();
    assert_eq!(form.value("item_code"), Some(&json!("WID-2")));
}

#[tokio::test]
async fn datetime_input_is_stored_in_wire_format() {
    let doctype = DocType::new(
        "Meeting",
        vec![field("starts_at", "Starts At", FieldType::Datetime)],
    );
    let (_backend, ctx) = context(MemoryBackend::new().with_doctype(doctype));
    let mut form = FormController::open(ctx, "Meeting", None, FormMode::Create)
        .await
        .unwrap();

    form.input("starts_at", RawInput::Text("2024-03-05T14:07".to_string()))
        .await
        .unwrap();
    assert_eq!(form.value("starts_at"), Some(&json!("2024-03-05 14:07:00")));

    let sections = form.visible_sections();
    let shown = &sections[0].fields[0];
    assert_eq!(shown.display, "2024-03-05T14:07");
}

#[tokio::test]
async fn submittable_document_lifecycle() {
    let (backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx.clone(), "Item", None, FormMode::Create)
        .await
        .unwrap();
    assert!(!form.can_submit_document());

    form.set_value("item_code", "WID-9").unwrap();
    let saved = form.submit().await.unwrap();
    assert_eq!(saved.docstatus, DocStatus::Draft);
    assert!(form.can_submit_document());
    assert!(!form.can_cancel_document());

    form.set_value("item_name", "Unsaved").unwrap();
    assert!(!form.can_submit_document());
    assert_eq!(form.status_label(), Some("Not Saved"));
    form.cancel();

    let submitted = form.submit_document().await.unwrap();
    assert_eq!(submitted.docstatus, DocStatus::Submitted);
    assert_eq!(form.status_label(), Some("Submitted"));
    assert!(form.can_cancel_document());

    let cancelled = form.cancel_document().await.unwrap();
    assert_eq!(cancelled.docstatus, DocStatus::Cancelled);
    let name = cancelled.name.clone().unwrap();
    assert_eq!(
        ctx.documents.peek("Item", &name).unwrap().docstatus,
        DocStatus::Cancelled
    );

    let err = form.submit_document().await.unwrap_err();
    assert!(matches!(
        err,
        FormError::Lifecycle {
            source: CacheError::InvalidTransition { .. },
            ..
        }
    ));
    assert_eq!(form.state(), FormState::Ready);
    assert_eq!(backend.calls(Op::Submit), 1);
}

#[tokio::test]
async fn status_change_before_first_save_is_refused() {
    let (_backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx, "Item", None, FormMode::Create)
        .await
        .unwrap();
    assert!(matches!(
        form.submit_document().await,
        Err(FormError::NoDocument)
    ));
    assert!(matches!(
        form.delete_document().await,
        Err(FormError::NoDocument)
    ));
}

#[tokio::test]
async fn delete_resets_to_a_new_document() {
    let (backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx.clone(), "Todo", None, FormMode::Create)
        .await
        .unwrap();
    form.set_value("title", "Temporary").unwrap();
    let saved = form.submit().await.unwrap();
    let name = saved.name.clone().unwrap();

    form.delete_document().await.unwrap();

    assert!(backend.stored("Todo", &name).is_none());
    assert!(ctx.documents.peek("Todo", &name).is_none());
    assert_eq!(form.mode(), FormMode::Create);
    assert_eq!(form.docname(), None);
    assert_eq!(form.value("title"), Some(&json!("")));
    assert_eq!(form.title(), "New Todo");
}

#[tokio::test]
async fn cancel_discards_edits() {
    let todo = Document::new("Todo")
        .with_name("TODO-1")
        .with_field("title", "Old")
        .with_field("active", true);
    let (_backend, ctx) = context(seeded_backend().with_document(todo));
    let mut form = FormController::open(ctx, "Todo", Some("TODO-1"), FormMode::Edit)
        .await
        .unwrap();

    form.set_value("title", "").unwrap();
    assert!(form.is_dirty());
    assert_eq!(form.status_label(), Some("Not Saved"));
    assert!(!form.errors().is_empty());

    form.cancel();
    assert_eq!(form.value("title"), Some(&json!("Old")));
    assert!(!form.is_dirty());
    assert!(form.errors().is_empty());
    assert_eq!(form.status_label(), None);
}

#[tokio::test]
async fn editing_an_existing_document_updates_it() {
    let todo = Document::new("Todo")
        .with_name("TODO-1")
        .with_field("title", "Old")
        .with_field("active", true)
        .with_field("modified", "2024-01-01 10:00:00");
    let (backend, ctx) = context(seeded_backend().with_document(todo));
    let mut form = FormController::open(ctx.clone(), "Todo", Some("TODO-1"), FormMode::Edit)
        .await
        .unwrap();

    form.set_value("title", "New").unwrap();
    let saved = form.submit().await.unwrap();

    assert_eq!(saved.name.as_deref(), Some("TODO-1"));
    let stored = backend.stored("Todo", "TODO-1").unwrap();
    assert_eq!(stored.get("title"), Some(&json!("New")));
    // server bookkeeping travels with the update
    assert_eq!(stored.get("modified"), Some(&json!("2024-01-01 10:00:00")));
    assert_eq!(ctx.documents.len(), 1);
    assert_eq!(backend.calls(Op::FetchDocument), 1);
}

#[tokio::test]
async fn save_hook_sees_server_record() {
    let (_backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx, "Todo", None, FormMode::Create)
        .await
        .unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    form.on_save(move |doc| {
        assert!(doc.name.is_some());
        seen.fetch_add(1, Ordering::SeqCst);
    });

    form.set_value("title", "Hooked").unwrap();
    form.submit().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_fields_and_layout_markers_are_rejected() {
    let (_backend, ctx) = context(seeded_backend());
    let mut form = FormController::open(ctx, "Item", None, FormMode::Create)
        .await
        .unwrap();
    assert!(matches!(
        form.set_value("nope", 1),
        Err(FormError::UnknownField(_))
    ));
    assert!(matches!(
        form.set_value("col_1", 1),
        Err(FormError::UnknownField(_))
    ));
}

#[tokio::test]
async fn unloaded_form_refuses_edits() {
    let (_backend, ctx) = context(seeded_backend());
    let mut form = FormController::new(ctx, "Todo", None, FormMode::Create);
    assert_eq!(form.state(), FormState::Loading);
    assert!(matches!(
        form.set_value("title", "x"),
        Err(FormError::NotReady {
            state: FormState::Loading
        })
    ));
    assert!(form.visible_sections().is_empty());
}

#[tokio::test]
async fn load_failure_leaves_form_failed_until_reloaded() {
    let (backend, ctx) = context(MemoryBackend::new());
    let mut form = FormController::new(ctx, "Todo", None, FormMode::Create);

    let err = form.load().await.unwrap_err();
    assert!(matches!(
        err,
        FormError::Metadata {
            source: BackendError::NotFound { .. },
            ..
        }
    ));
    assert_eq!(form.state(), FormState::Failed);
    assert_eq!(form.message(), Some("failed to load metadata for Todo: DocType Todo not found"));

    backend.insert_doctype(desk_test_utils::todo_doctype());
    form.load().await.unwrap();
    assert_eq!(form.state(), FormState::Ready);
    assert_eq!(form.message(), None);
}

#[tokio::test]
async fn failed_reload_drops_the_previous_form() {
    let (backend, ctx) = context(seeded_backend().with_document(existing_item()));
    let mut form = FormController::open(ctx, "Item", Some("ITM-1"), FormMode::Edit)
        .await
        .unwrap();
    form.settle().await;
    assert!(!form.visible_sections().is_empty());

    backend.fail_next(Op::FetchDocType, BackendError::transport("offline"));
    assert!(form.reload().await.is_err());

    assert_eq!(form.state(), FormState::Failed);
    assert!(form.doctype().is_none());
    assert!(form.document().is_none());
    assert!(form.visible_sections().is_empty());
    assert!(form.values().is_empty());
    assert_eq!(form.link_options("item_group"), LinkOptions::Idle);
    assert!(matches!(
        form.set_value("item_name", "x"),
        Err(FormError::NotReady {
            state: FormState::Failed
        })
    ));

    form.reload().await.unwrap();
    assert_eq!(form.state(), FormState::Ready);
    assert_eq!(form.value("item_name"), Some(&json!("Widget")));
}

#[tokio::test]
async fn missing_document_fails_the_form() {
    let (_backend, ctx) = context(seeded_backend());
    let mut form = FormController::new(ctx, "Item", Some("ITM-404"), FormMode::Edit);
    let err = form.load().await.unwrap_err();
    assert!(matches!(err, FormError::Document(_)));
    assert_eq!(form.state(), FormState::Failed);
}

#[tokio::test]
async fn forms_share_cached_descriptors() {
    let (backend, ctx) = context(seeded_backend());
    let a = FormController::open(ctx.clone(), "Todo", None, FormMode::Create)
        .await
        .unwrap();
    let b = FormController::open(ctx, "Todo", None, FormMode::Create)
        .await
        .unwrap();
    assert_ne!(a.id(), b.id());
    assert_eq!(backend.calls(Op::FetchDocType), 1);
    a.dispose();
    b.dispose();
}

#[tokio::test]
async fn reload_fetches_fresh_copies() {
    let (backend, ctx) = context(seeded_backend().with_document(existing_item()));
    let mut form = FormController::open(ctx, "Item", Some("ITM-1"), FormMode::Edit)
        .await
        .unwrap();
    form.set_value("item_name", "Local edit").unwrap();

    backend.insert_document(existing_item().with_field("item_name", "Server edit"));
    form.load().await.unwrap();
    // cached copy, edits discarded
    assert_eq!(form.value("item_name"), Some(&json!("Widget")));

    form.reload().await.unwrap();
    assert_eq!(form.value("item_name"), Some(&json!("Server edit")));
    assert_eq!(backend.calls(Op::FetchDocType), 2);
    assert_eq!(backend.calls(Op::FetchDocument), 2);
    assert_eq!(form.state(), FormState::Ready);
}

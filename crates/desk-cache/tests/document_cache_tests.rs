use desk_cache::{BackendError, CacheError};
use desk_meta::{DocStatus, Document};
use desk_test_utils::{seeded_backend, setup_caches, Op};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn widget(name: &str) -> Document {
    Document::new("Item")
        .with_name(name)
        .with_field("item_code", "W-1")
        .with_field("item_name", "Widget")
}

#[tokio::test]
async fn load_miss_fetches_then_hits() {
    let (backend, _, documents) = setup_caches(seeded_backend().with_document(widget("ITM-1")));

    let first = documents.load("Item", "ITM-1").await.unwrap();
    let second = documents.load("Item", "ITM-1").await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(backend.calls(Op::FetchDocument), 1);
    assert_eq!(documents.active().unwrap().name.as_deref(), Some("ITM-1"));
}

#[tokio::test]
async fn load_hit_sets_active() {
    let backend = seeded_backend()
        .with_document(widget("ITM-1"))
        .with_document(widget("ITM-2"));
    let (_, _, documents) = setup_caches(backend);

    documents.load("Item", "ITM-1").await.unwrap();
    documents.load("Item", "ITM-2").await.unwrap();
    documents.load("Item", "ITM-1").await.unwrap();

    assert_eq!(documents.active().unwrap().name.as_deref(), Some("ITM-1"));
}

#[tokio::test]
async fn concurrent_loads_share_one_fetch() {
    let (backend, _, documents) = setup_caches(seeded_backend().with_document(widget("ITM-1")));
    backend.close_gate();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let documents = documents.clone();
            tokio::spawn(async move { documents.load("Item", "ITM-1").await })
        })
        .collect();
    tokio::time::sleep(Duration::from_millis(20)).await;
    backend.open_gate();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().name.as_deref(), Some("ITM-1"));
    }
    assert_eq!(backend.calls(Op::FetchDocument), 1);
    assert_eq!(documents.fetch_count(), 1);
}

#[tokio::test]
async fn save_writes_through() {
    let (backend, _, documents) = setup_caches(seeded_backend().with_document(widget("ITM-1")));

    let edited = widget("ITM-1").with_field("item_name", "Gadget");
    let saved = documents.save(&edited).await.unwrap();
    assert_eq!(saved.get("item_name"), Some(&json!("Gadget")));

    let loaded = documents.load("Item", "ITM-1").await.unwrap();
    assert_eq!(loaded.get("item_name"), Some(&json!("Gadget")));
    assert_eq!(backend.calls(Op::FetchDocument), 0);
    assert!(Arc::ptr_eq(&documents.active().unwrap(), &loaded));
}

#[tokio::test]
async fn save_without_name_creates() {
    let (backend, _, documents) = setup_caches(seeded_backend());

    let draft = Document::new("Todo").with_field("title", "Write tests");
    let saved = documents.save(&draft).await.unwrap();

    let name = saved.name.clone().unwrap();
    assert!(backend.stored("Todo", &name).is_some());
    assert_eq!(documents.peek("Todo", &name).unwrap().get("title"), Some(&json!("Write tests")));
}

#[tokio::test]
async fn failed_save_leaves_entry_unchanged() {
    let (backend, _, documents) = setup_caches(seeded_backend().with_document(widget("ITM-1")));
    let before = documents.load("Item", "ITM-1").await.unwrap();

    backend.fail_next(Op::Persist, BackendError::transport("timeout"));
    let err = documents
        .save(&widget("ITM-1").with_field("item_name", "Broken"))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    let after = documents.peek("Item", "ITM-1").unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn stale_fetch_does_not_clobber_save() {
    let (backend, _, documents) = setup_caches(seeded_backend().with_document(widget("ITM-1")));
    backend.close_gate();

    let pending = tokio::spawn({
        let documents = documents.clone();
        async move { documents.load("Item", "ITM-1").await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    let saved = documents
        .save(&widget("ITM-1").with_field("item_name", "Fresh"))
        .await
        .unwrap();

    backend.open_gate();
    let loaded = pending.await.unwrap().unwrap();

    assert_eq!(loaded.get("item_name"), Some(&json!("Fresh")));
    let cached = documents.peek("Item", "ITM-1").unwrap();
    assert!(Arc::ptr_eq(&cached, &saved));
}

#[tokio::test]
async fn fetch_resolving_after_delete_does_not_resurrect() {
    let (backend, _, documents) = setup_caches(seeded_backend().with_document(widget("ITM-1")));
    backend.close_gate();

    let pending = tokio::spawn({
        let documents = documents.clone();
        async move { documents.load("Item", "ITM-1").await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(backend.calls(Op::FetchDocument), 1);

    documents.delete("Item", "ITM-1").await.unwrap();
    // the held read answers with the record as it was before the delete
    backend.insert_document(widget("ITM-1"));
    backend.open_gate();

    let err = pending.await.unwrap().unwrap_err();
    assert!(matches!(
        err,
        CacheError::Backend(BackendError::NotFound { .. })
    ));
    assert!(documents.peek("Item", "ITM-1").is_none());
    assert!(documents.active().is_none());
}

#[tokio::test]
async fn fetch_failure_propagates_and_caches_nothing() {
    let (backend, _, documents) = setup_caches(seeded_backend());
    backend.fail_next(Op::FetchDocument, BackendError::PermissionDenied("Item".into()));

    let err = documents.load("Item", "ITM-1").await.unwrap_err();
    assert_eq!(
        err,
        CacheError::Backend(BackendError::PermissionDenied("Item".into()))
    );
    assert!(documents.is_empty());
    assert!(documents.active().is_none());
}

#[tokio::test]
async fn delete_removes_entry_and_active() {
    let backend = seeded_backend()
        .with_document(widget("ITM-1"))
        .with_document(widget("ITM-2"));
    let (_, _, documents) = setup_caches(backend);

    documents.load("Item", "ITM-2").await.unwrap();
    documents.load("Item", "ITM-1").await.unwrap();

    documents.delete("Item", "ITM-2").await.unwrap();
    assert!(documents.peek("Item", "ITM-2").is_none());
    assert_eq!(documents.active().unwrap().name.as_deref(), Some("ITM-1"));

    documents.delete("Item", "ITM-1").await.unwrap();
    assert!(documents.active().is_none());
    assert!(documents.is_empty());
}

#[tokio::test]
async fn failed_delete_keeps_entry() {
    let (backend, _, documents) = setup_caches(seeded_backend().with_document(widget("ITM-1")));
    documents.load("Item", "ITM-1").await.unwrap();

    backend.fail_next(Op::Delete, BackendError::PermissionDenied("Item".into()));
    assert!(documents.delete("Item", "ITM-1").await.is_err());
    assert!(documents.peek("Item", "ITM-1").is_some());
    assert!(documents.active().is_some());
}

#[tokio::test]
async fn submit_and_cancel_transition_status() {
    let (_, _, documents) = setup_caches(seeded_backend().with_document(widget("ITM-1")));
    documents.load("Item", "ITM-1").await.unwrap();

    let submitted = documents.submit("Item", "ITM-1").await.unwrap();
    assert_eq!(submitted.docstatus, DocStatus::Submitted);
    assert_eq!(documents.peek("Item", "ITM-1").unwrap().docstatus, DocStatus::Submitted);

    let err = documents.submit("Item", "ITM-1").await.unwrap_err();
    assert!(matches!(err, CacheError::InvalidTransition { .. }));

    let cancelled = documents.cancel("Item", "ITM-1").await.unwrap();
    assert_eq!(cancelled.docstatus, DocStatus::Cancelled);
    assert!(Arc::ptr_eq(&documents.active().unwrap(), &cancelled));
}

#[tokio::test]
async fn failed_submit_keeps_draft() {
    let (backend, _, documents) = setup_caches(seeded_backend().with_document(widget("ITM-1")));
    documents.load("Item", "ITM-1").await.unwrap();

    backend.fail_next(Op::Submit, BackendError::rejected("missing valuation rate"));
    let err = documents.submit("Item", "ITM-1").await.unwrap_err();

    assert!(matches!(
        err.backend(),
        Some(BackendError::ValidationRejected { .. })
    ));
    assert_eq!(documents.peek("Item", "ITM-1").unwrap().docstatus, DocStatus::Draft);
}

#[tokio::test]
async fn clear_empties_entries_and_active() {
    let (backend, _, documents) = setup_caches(seeded_backend().with_document(widget("ITM-1")));
    documents.load("Item", "ITM-1").await.unwrap();

    documents.clear();
    assert!(documents.is_empty());
    assert!(documents.active().is_none());

    documents.load("Item", "ITM-1").await.unwrap();
    assert_eq!(backend.calls(Op::FetchDocument), 2);
}

#[tokio::test]
async fn fetch_in_flight_during_clear_is_not_stored() {
    let (backend, _, documents) = setup_caches(seeded_backend().with_document(widget("ITM-1")));
    backend.close_gate();

    let pending = tokio::spawn({
        let documents = documents.clone();
        async move { documents.load("Item", "ITM-1").await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    documents.clear();
    backend.open_gate();

    assert!(pending.await.unwrap().is_ok());
    assert!(documents.peek("Item", "ITM-1").is_none());
}

#[tokio::test]
async fn refresh_refetches_a_cached_document() {
    let (backend, _, documents) = setup_caches(seeded_backend().with_document(widget("ITM-1")));
    let first = documents.load("Item", "ITM-1").await.unwrap();

    backend.insert_document(widget("ITM-1").with_field("item_name", "Renamed"));
    let refreshed = documents.refresh("Item", "ITM-1").await.unwrap();

    assert!(!Arc::ptr_eq(&first, &refreshed));
    assert_eq!(refreshed.get("item_name"), Some(&json!("Renamed")));
    assert_eq!(backend.calls(Op::FetchDocument), 2);
    let cached = documents.peek("Item", "ITM-1").unwrap();
    assert!(Arc::ptr_eq(&cached, &refreshed));
}

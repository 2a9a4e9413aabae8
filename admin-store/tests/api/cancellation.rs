use std::time::Duration;

use admin_store::{AggregateStore, CollectionStore, ErrorKind, Reconcile};
use payloads::{Category, CategoryDraft, CategoryPatch, RecordId};
use test_helpers::fixtures::category_row;
use test_helpers::spawn_app;

#[tokio::test]
async fn torn_down_store_refuses_work() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed("services", [category_row(1, "Cleaning", "Active")]);
    let store = CollectionStore::<Category>::mount(&app.context()).await;
    let before = store.snapshot();
    let requests = app.db.requests().len();

    store.teardown();

    assert!(store.is_torn_down());
    let err = store.fetch_all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    let draft = CategoryDraft {
        name: "Painting".into(),
        ..Default::default()
    };
    assert!(store.create(&draft).await.unwrap_err().is_cancelled());
    assert!(store.delete(RecordId(1)).await.unwrap_err().is_cancelled());

    assert_eq!(app.db.requests().len(), requests);
    assert_eq!(store.snapshot(), before);
    Ok(())
}

#[tokio::test]
async fn teardown_cancels_pending_refetch() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed("services", [category_row(1, "Cleaning", "Inactive")]);
    let ctx = app.context_with(Reconcile::PatchThenRefetch {
        debounce: Duration::from_millis(100),
    });
    let store = CollectionStore::<Category>::mount(&ctx).await;

    let patch = CategoryPatch {
        status: Some("Active".into()),
        ..Default::default()
    };
    store.update(RecordId(1), &patch).await?;
    store.teardown();
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(app.db.requests_to("services/allNew").len(), 1);
    Ok(())
}

#[tokio::test]
async fn torn_down_aggregate_keeps_its_state() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let dashboard = AggregateStore::dashboard(&app.context());

    dashboard.teardown();
    let err = dashboard.fetch().await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(dashboard.data(), None);
    assert!(!dashboard.is_loading());
    assert!(app.db.requests().is_empty());
    Ok(())
}

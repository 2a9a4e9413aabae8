use std::time::Duration;

use admin_store::{CollectionStore, Phase, Reconcile};
use payloads::{Category, CategoryDraft, CategoryPatch, RecordId};
use serde_json::json;
use test_helpers::fixtures::{category_row, sub_service_row};
use test_helpers::spawn_app;

fn list_calls(app: &test_helpers::TestApp) -> usize {
    app.db.requests_to("services/allNew").len()
}

fn activate() -> CategoryPatch {
    CategoryPatch {
        status: Some("Active".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn refetch_policy_reloads_after_each_mutation() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed("services", [category_row(1, "Cleaning", "Inactive")]);
    app.seed("subservices", [sub_service_row(1, 1, "Sofa shampoo", "20")]);
    let ctx = app.context_with(Reconcile::Refetch);
    let store = CollectionStore::<Category>::mount(&ctx).await;
    assert_eq!(list_calls(&app), 1);

    // Changed by someone else in the meantime.
    app.db.update(
        "services",
        1,
        json!({"description": "Edited elsewhere"}).as_object().unwrap().clone(),
    )?;
    let updated = store.update(RecordId(1), &activate()).await?.unwrap();

    assert_eq!(list_calls(&app), 2);
    assert_eq!(updated.status, "Active");
    assert_eq!(updated.description, "Edited elsewhere");
    assert_eq!(store.get(RecordId(1)), Some(updated));
    Ok(())
}

#[tokio::test]
async fn refetch_policy_returns_server_copy_on_create() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed("services", [category_row(1, "Cleaning", "Active")]);
    let store = CollectionStore::<Category>::mount(
        &app.context_with(Reconcile::Refetch),
    )
    .await;

    let draft = CategoryDraft {
        name: "Painting".into(),
        status: "Active".into(),
        ..Default::default()
    };
    let created = store.create(&draft).await?;

    assert_eq!(list_calls(&app), 2);
    assert_eq!(created.id, RecordId(2));
    assert_eq!(store.items()[0], created);
    assert_eq!(store.len(), 2);
    Ok(())
}

#[tokio::test]
async fn patch_then_refetch_debounces_bursts() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed(
        "services",
        [category_row(2, "B", "Inactive"), category_row(1, "A", "Inactive")],
    );
    let debounce = Duration::from_millis(200);
    let ctx = app.context_with(Reconcile::PatchThenRefetch { debounce });
    let store = CollectionStore::<Category>::mount(&ctx).await;

    store.update(RecordId(1), &activate()).await?;
    store.update(RecordId(2), &activate()).await?;
    store.delete(RecordId(1)).await?;

    // Patched right away, refetched once the burst is over.
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(RecordId(2)).unwrap().status, "Active");
    assert_eq!(list_calls(&app), 1);

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(list_calls(&app), 2);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(RecordId(2)).unwrap().status, "Active");
    Ok(())
}

#[tokio::test]
async fn patch_policy_never_refetches() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed("services", [category_row(1, "A", "Inactive")]);
    let store = CollectionStore::<Category>::mount(&app.context()).await;

    store.update(RecordId(1), &activate()).await?;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(list_calls(&app), 1);
    Ok(())
}

#[tokio::test]
async fn list_read_before_update_does_not_undo_it() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed("services", [category_row(1, "Cleaning", "Inactive")]);
    let store = CollectionStore::<Category>::mount(&app.context()).await;

    app.db.delay_next_list(Duration::from_millis(300));
    let fetch = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_all().await }
    });
    // The list has read the table by now and is waiting to respond.
    tokio::time::sleep(Duration::from_millis(100)).await;
    store.update(RecordId(1), &activate()).await?;
    assert_eq!(store.get(RecordId(1)).unwrap().status, "Active");

    fetch.await??;

    assert_eq!(store.get(RecordId(1)).unwrap().status, "Active");
    assert_eq!(store.snapshot().phase, Phase::Ready);
    let row = app.db.row("services", 1)?.unwrap();
    assert_eq!(row["status"], json!("Active"));
    Ok(())
}

#[tokio::test]
async fn list_read_before_delete_does_not_restore_it() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed(
        "services",
        [
            category_row(2, "Plumbing", "Active"),
            category_row(1, "Cleaning", "Active"),
        ],
    );
    let store = CollectionStore::<Category>::mount(&app.context()).await;

    app.db.delay_next_list(Duration::from_millis(300));
    let fetch = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_all().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    store.delete(RecordId(1)).await?;
    fetch.await??;

    assert_eq!(store.get(RecordId(1)), None);
    assert_eq!(store.len(), 1);
    Ok(())
}

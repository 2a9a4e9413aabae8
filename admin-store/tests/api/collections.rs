use admin_store::{CollectionStore, ErrorKind, Phase, ToastType};
use payloads::{
    Category, CategoryDraft, CategoryPatch, ImageSource, RecordId, Upload,
};
use reqwest::StatusCode;
use serde_json::json;
use test_helpers::fixtures::{booking_row, category_row};
use test_helpers::{assert_store_status, spawn_app};

fn names(store: &CollectionStore<Category>) -> Vec<String> {
    store.items().into_iter().map(|c| c.name).collect()
}

#[tokio::test]
async fn mount_normalizes_rows() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed(
        "services",
        [
            json!({"service_id": 2, "service_name": "Plumbing", "status": 1}),
            json!({"service_id": 1, "service_name": "Cleaning"}),
        ],
    );

    let store = CollectionStore::<Category>::mount(&app.context()).await;

    let state = store.snapshot();
    assert_eq!(state.phase, Phase::Ready);
    assert_eq!(state.error, None);
    let items = state.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].status, "Active");
    assert_eq!(items[1].name, "Cleaning");
    assert_eq!(items[1].status, "Inactive");
    assert_eq!(items[1].description, "");
    assert_eq!(items[1].image, None);
    Ok(())
}

fn pending(id: i64, customer: &str, amount: &str) -> serde_json::Value {
    let at = "2025-01-01 09:00:00";
    booking_row(id, customer, "Cleaning", amount, "Pending", at)
}

#[tokio::test]
async fn duplicate_ids_are_collapsed() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed(
        "booking",
        [
            pending(1, "Hodan", "10"),
            pending(1, "Farah", "12"),
            pending(2, "Amina", "30"),
        ],
    );

    let store =
        CollectionStore::<payloads::Booking>::mount(&app.context()).await;

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(RecordId(1)).unwrap().customer_name, "Hodan");
    Ok(())
}

#[tokio::test]
async fn create_puts_new_record_first() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed(
        "services",
        [category_row(2, "B", "Active"), category_row(1, "A", "Active")],
    );
    let ctx = app.context();
    let store = CollectionStore::<Category>::mount(&ctx).await;

    let draft = CategoryDraft {
        name: "X".into(),
        description: "Newest".into(),
        status: "Active".into(),
        image: None,
    };
    let created = store.create(&draft).await?;

    assert_eq!(created.id, RecordId(3));
    assert_eq!(created.created_at.as_deref(), Some("2025-01-01 03:00:00"));
    assert_eq!(names(&store), ["X", "B", "A"]);

    let toast = ctx.toasts.last().unwrap();
    assert_eq!(toast.toast_type, ToastType::Success);
    assert_eq!(toast.message, "Category created successfully");

    let stored = app.db.row("services", 3)?.unwrap();
    assert_eq!(stored["service_name"], json!("X"));
    assert_eq!(stored["created_at"], json!("2025-01-01 03:00:00"));
    Ok(())
}

#[tokio::test]
async fn update_sends_only_changed_fields() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed("services", [category_row(1, "Cleaning", "Inactive")]);
    let store = CollectionStore::<Category>::mount(&app.context()).await;

    let patch = CategoryPatch {
        status: Some("Active".into()),
        ..Default::default()
    };
    let updated = store.update(RecordId(1), &patch).await?.unwrap();

    assert_eq!(updated.status, "Active");
    assert_eq!(updated.name, "Cleaning");
    assert_eq!(store.get(RecordId(1)), Some(updated));

    let request = app.db.last_request().unwrap();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "services/update/1");
    assert!(request.is_json());
    assert_eq!(request.json(), Some(json!({"status": "Active"})));
    Ok(())
}

#[tokio::test]
async fn new_upload_switches_to_multipart() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed("services", [category_row(1, "Cleaning", "Active")]);
    let store = CollectionStore::<Category>::mount(&app.context()).await;

    let patch = CategoryPatch {
        name: Some("Deep cleaning".into()),
        image: Some(ImageSource::Upload(Upload {
            file_name: "clean.png".into(),
            mime: "image/png".into(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        })),
        ..Default::default()
    };
    store.update(RecordId(1), &patch).await?;

    let request = app.db.last_request().unwrap();
    assert!(request.is_multipart());
    let parts = request.parts().await.unwrap();
    let image = parts.iter().find(|p| p.name == "image").unwrap();
    assert_eq!(image.file_name.as_deref(), Some("clean.png"));
    assert_eq!(image.data, [0x89, b'P', b'N', b'G']);

    let stored = app.db.row("services", 1)?.unwrap();
    assert_eq!(stored["service_name"], json!("Deep cleaning"));
    assert_eq!(stored["image"], json!("/uploads/clean.png"));

    // The new image's URL is only known after a refetch.
    assert_eq!(store.get(RecordId(1)).unwrap().image, None);
    store.refetch().await?;
    assert_eq!(
        store.get(RecordId(1)).unwrap().image.as_deref(),
        Some("/uploads/clean.png")
    );
    Ok(())
}

#[tokio::test]
async fn upload_file_name_keeps_semicolons() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed("services", [category_row(1, "Cleaning", "Active")]);
    let store = CollectionStore::<Category>::mount(&app.context()).await;

    let patch = CategoryPatch {
        image: Some(ImageSource::Upload(Upload {
            file_name: "a;b.png".into(),
            mime: "image/png".into(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        })),
        ..Default::default()
    };
    store.update(RecordId(1), &patch).await?;

    let parts = app.db.last_request().unwrap().parts().await.unwrap();
    let image = parts.iter().find(|p| p.name == "image").unwrap();
    assert_eq!(image.file_name.as_deref(), Some("a;b.png"));
    let stored = app.db.row("services", 1)?.unwrap();
    assert_eq!(stored["image"], json!("/uploads/a;b.png"));
    Ok(())
}

#[tokio::test]
async fn stored_image_stays_json() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed("services", [category_row(1, "Cleaning", "Active")]);
    let store = CollectionStore::<Category>::mount(&app.context()).await;

    let patch = CategoryPatch {
        image: Some(ImageSource::Stored("/uploads/old.png".into())),
        ..Default::default()
    };
    let updated = store.update(RecordId(1), &patch).await?.unwrap();

    assert!(app.db.last_request().unwrap().is_json());
    assert_eq!(updated.image.as_deref(), Some("/uploads/old.png"));
    Ok(())
}

#[tokio::test]
async fn delete_removes_record() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed(
        "services",
        [category_row(2, "B", "Active"), category_row(1, "A", "Active")],
    );
    let store = CollectionStore::<Category>::mount(&app.context()).await;

    store.delete(RecordId(1)).await?;

    assert_eq!(names(&store), ["B"]);
    let request = app.db.last_request().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "services/delete");
    assert_eq!(request.json(), Some(json!({"service_id": 1})));
    assert!(app.db.row("services", 1)?.is_none());
    Ok(())
}

#[tokio::test]
async fn delete_of_unknown_id_fails_and_keeps_items() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed(
        "services",
        [category_row(2, "B", "Active"), category_row(1, "A", "Active")],
    );
    let ctx = app.context();
    let store = CollectionStore::<Category>::mount(&ctx).await;

    let result = store.delete(RecordId(99)).await;

    assert_store_status(result, StatusCode::NOT_FOUND);
    assert_eq!(names(&store), ["B", "A"]);
    let toast = ctx.toasts.last().unwrap();
    assert_eq!(toast.toast_type, ToastType::Error);
    assert!(toast.message.starts_with("Failed to delete category: "));
    Ok(())
}

#[tokio::test]
async fn server_error_leaves_items_untouched() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed("services", [category_row(1, "Cleaning", "Inactive")]);
    let ctx = app.context();
    let store = CollectionStore::<Category>::mount(&ctx).await;
    let before = store.items();

    app.db.fail_next(500);
    let patch = CategoryPatch {
        status: Some("Active".into()),
        ..Default::default()
    };
    let err = store.update(RecordId(1), &patch).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Status(500));
    assert_eq!(store.items(), before);
    assert_eq!(
        ctx.toasts.last().unwrap().message,
        "Failed to update category: Injected failure"
    );
    assert_eq!(
        app.db.row("services", 1)?.unwrap()["status"],
        json!("Inactive")
    );
    Ok(())
}

#[tokio::test]
async fn failed_fetch_keeps_previous_items() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed("services", [category_row(1, "Cleaning", "Active")]);
    let ctx = app.context();
    let store = CollectionStore::<Category>::mount(&ctx).await;

    app.db.fail_next(503);
    let err = store.refetch().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Status(503));
    let state = store.snapshot();
    assert_eq!(state.phase, Phase::Failed);
    assert_eq!(state.error.as_deref(), Some("Injected failure"));
    assert_eq!(state.items().len(), 1);
    assert!(!store.is_loading());
    // Load failures are reported through state only.
    assert!(ctx.toasts.toasts().is_empty());

    store.refetch().await?;
    assert_eq!(store.error(), None);
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_records_error() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let config = admin_store::Config {
        api_url: "http://127.0.0.1:9".into(),
        toast_ms: None,
        ..Default::default()
    };
    let ctx = admin_store::StoreContext::new(&config, app.time_source.clone());

    let store = CollectionStore::<Category>::mount(&ctx).await;

    assert!(store.is_empty());
    assert_eq!(
        store.error().as_deref(),
        Some("Network error. Please check your connection.")
    );
    assert_eq!(store.fetch_all().await.unwrap_err().kind(), ErrorKind::Network);
    Ok(())
}

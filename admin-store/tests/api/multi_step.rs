//! Entities whose backend contract spans more than one request.

use admin_store::{CollectionStore, ErrorKind};
use payloads::{
    Notification, NotificationDraft, RecordId, Worker, WorkerDraft, WorkerPatch,
};
use serde_json::json;
use test_helpers::spawn_app;

fn abdi() -> WorkerDraft {
    WorkerDraft {
        name: "Abdi Warsame".into(),
        email: "abdi@example.com".into(),
        phone: "+252 61 555 0101".into(),
        password: "s3cret".into(),
        category_id: RecordId(1),
        experience: 4,
        available: true,
        status: "Active".into(),
        image: None,
    }
}

#[tokio::test]
async fn worker_create_makes_account_then_profile() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let store = CollectionStore::<Worker>::mount(&app.context()).await;

    let worker = store.create(&abdi()).await?;

    let requests: Vec<_> = app
        .db
        .requests()
        .into_iter()
        .filter(|r| r.method == "POST")
        .map(|r| r.path)
        .collect();
    assert_eq!(requests, ["user/add", "staff/addNew"]);

    let user = app.db.list("user")?;
    assert_eq!(user.len(), 1);
    assert_eq!(user[0]["role"], json!("staff"));
    assert_eq!(user[0]["email"], json!("abdi@example.com"));
    let user_id = user[0]["id"].as_i64().unwrap();

    let staff = app.db.row("staff", worker.staff_id.0)?.unwrap();
    assert_eq!(staff["staff_user_id"], json!(user_id));
    assert!(staff.get("password").is_none());

    assert_eq!(worker.user_id, Some(RecordId(user_id)));
    assert_eq!(worker.name, "Abdi Warsame");
    assert!(worker.available);
    assert_eq!(store.items(), [worker.clone()]);

    store.refetch().await?;
    let listed = store.get(worker.staff_id).unwrap();
    assert_eq!(listed.name, "Abdi Warsame");
    assert_eq!(listed.user_id, worker.user_id);
    Ok(())
}

#[tokio::test]
async fn failed_account_step_creates_nothing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let store = CollectionStore::<Worker>::mount(&app.context()).await;

    app.db.fail_next(422);
    let err = store.create(&abdi()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Status(422));
    assert!(app.db.requests_to("staff/addNew").is_empty());
    assert!(store.is_empty());
    Ok(())
}

#[tokio::test]
async fn worker_update_splits_account_fields() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let store = CollectionStore::<Worker>::mount(&app.context()).await;
    let worker = store.create(&abdi()).await?;
    let user_id = worker.user_id.unwrap();

    let patch = WorkerPatch {
        phone: Some("+252 61 555 0199".into()),
        experience: Some(6),
        ..Default::default()
    };
    let updated = store.update(worker.staff_id, &patch).await?.unwrap();

    let user_update = app.db.requests_to(&format!("user/update/{user_id}"));
    assert_eq!(user_update.len(), 1);
    assert_eq!(
        user_update[0].json(),
        Some(json!({"phone": "+252 61 555 0199"}))
    );
    let staff_update =
        app.db.requests_to(&format!("staff/updateNew/{}", worker.staff_id));
    assert_eq!(staff_update[0].json(), Some(json!({"experience": 6})));

    assert_eq!(updated.phone, "+252 61 555 0199");
    assert_eq!(updated.experience, 6);
    assert_eq!(updated.name, worker.name);
    Ok(())
}

#[tokio::test]
async fn worker_delete_removes_both_rows() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let store = CollectionStore::<Worker>::mount(&app.context()).await;
    let worker = store.create(&abdi()).await?;
    let user_id = worker.user_id.unwrap();

    store.delete(worker.staff_id).await?;

    assert!(store.is_empty());
    assert!(app.db.row("staff", worker.staff_id.0)?.is_none());
    assert!(app.db.row("user", user_id.0)?.is_none());
    let delete = &app.db.requests_to("staff/deleteNew")[0];
    assert_eq!(delete.json(), Some(json!({"staff_id": worker.staff_id.0})));
    Ok(())
}

#[tokio::test]
async fn notification_is_pushed_then_stored() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let ctx = app.context();
    let store = CollectionStore::<Notification>::mount(&ctx).await;

    let draft = NotificationDraft {
        title: "Eid offer".into(),
        message: "20% off all cleaning".into(),
        target: None,
    };
    let sent = store.create(&draft).await?;

    let paths: Vec<_> = app
        .db
        .requests()
        .into_iter()
        .filter(|r| r.method == "POST")
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, ["send/send-data-to-all", "notification/add"]);
    let push = &app.db.requests_to("send/")[0];
    assert_eq!(
        push.json(),
        Some(json!({"title": "Eid offer", "body": "20% off all cleaning"}))
    );

    assert_eq!(sent.message, "20% off all cleaning");
    assert_eq!(sent.target, "all");
    assert_eq!(store.items(), [sent]);
    assert_eq!(
        ctx.toasts.last().unwrap().message,
        "Notification created successfully"
    );
    Ok(())
}

#[tokio::test]
async fn failed_push_stores_nothing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let store = CollectionStore::<Notification>::mount(&app.context()).await;

    app.db.fail_next(502);
    let draft = NotificationDraft {
        title: "Eid offer".into(),
        message: "20% off".into(),
        target: None,
    };
    let err = store.create(&draft).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Status(502));
    assert!(app.db.requests_to("notification/add").is_empty());
    assert!(app.db.list("notification")?.is_empty());
    assert!(store.is_empty());
    Ok(())
}

use admin_store::CollectionStore;
use payloads::{Booking, RecordId, Worker};
use rust_decimal::dec;
use serde_json::{Value, json};
use test_helpers::fixtures::{booking_row, worker_rows};
use test_helpers::spawn_app;

/// A pending booking made at 10:00 on the given day of January 2025.
fn pending(
    id: i64,
    customer: &str,
    service: &str,
    amount: &str,
    day: u8,
) -> Value {
    let created_at = format!("2025-01-{day:02} 10:00:00");
    booking_row(id, customer, service, amount, "Pending", &created_at)
}

fn seed_bookings(app: &test_helpers::TestApp) {
    app.seed(
        "booking",
        [
            pending(3, "Amina", "Cleaning", "45.00", 3),
            pending(2, "Farah", "Plumbing", "30.00", 2),
            pending(1, "Hodan", "Cleaning", "20.00", 1),
        ],
    );
}

#[tokio::test]
async fn status_change_touches_one_booking() -> anyhow::Result<()> {
    let app = spawn_app().await;
    seed_bookings(&app);
    let store = CollectionStore::<Booking>::mount(&app.context()).await;
    let before = store.items();

    let updated = store.update_status(RecordId(2), "Confirmed").await?.unwrap();

    assert_eq!(updated.status, "Confirmed");
    assert_eq!(updated.customer_name, "Farah");
    assert_eq!(updated.amount, dec!(30));
    let after = store.items();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], updated);
    assert_eq!(after[2], before[2]);

    let request = app.db.last_request().unwrap();
    assert_eq!(request.path, "booking/updatestatus/2");
    assert_eq!(request.json(), Some(json!({"booking_status": "Confirmed"})));
    Ok(())
}

#[tokio::test]
async fn amount_change_uses_its_endpoint() -> anyhow::Result<()> {
    let app = spawn_app().await;
    seed_bookings(&app);
    let store = CollectionStore::<Booking>::mount(&app.context()).await;

    let updated = store.update_amount(RecordId(1), dec!(25.50)).await?.unwrap();

    assert_eq!(updated.amount, dec!(25.5));
    assert_eq!(updated.status, "Pending");
    let request = app.db.last_request().unwrap();
    assert_eq!(request.path, "booking/updateamountNew/1");
    assert_eq!(request.json(), Some(json!({"amount": 25.5})));
    Ok(())
}

#[tokio::test]
async fn assigning_a_worker() -> anyhow::Result<()> {
    let app = spawn_app().await;
    seed_bookings(&app);
    let (user, staff) = worker_rows(7, 40, "Abdi Warsame", 12, "4.6");
    app.seed("user", [user]);
    app.seed("staff", [staff]);
    let ctx = app.context();
    let bookings = CollectionStore::<Booking>::mount(&ctx).await;
    let workers = CollectionStore::<Worker>::mount(&ctx).await;
    let worker = workers.get(RecordId(7)).unwrap();
    assert_eq!(worker.name, "Abdi Warsame");

    let updated = bookings.assign_worker(RecordId(3), &worker).await?.unwrap();

    assert_eq!(updated.worker_id, Some(RecordId(7)));
    assert_eq!(updated.worker_name.as_deref(), Some("Abdi Warsame"));
    let request = app.db.last_request().unwrap();
    assert_eq!(request.path, "booking/assignWorker/3");
    assert_eq!(
        request.json(),
        Some(json!({"staff_id": 7, "staff_name": "Abdi Warsame"}))
    );

    bookings.refetch().await?;
    assert_eq!(bookings.get(RecordId(3)), Some(updated));
    Ok(())
}

#[tokio::test]
async fn update_of_unloaded_booking_reaches_server() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let store = CollectionStore::<Booking>::mount(&app.context()).await;
    seed_bookings(&app);

    let updated = store.update_status(RecordId(1), "Cancelled").await?;

    assert_eq!(updated, None);
    assert!(store.is_empty());
    assert_eq!(
        app.db.row("booking", 1)?.unwrap()["booking_status"],
        json!("Cancelled")
    );
    Ok(())
}

use admin_store::{
    AggregateStore, CollectionStore, ErrorKind, Phase, StoreContext,
};
use payloads::{
    AccountDeletionRequest, BlogPost, Booking, Category, Complaint,
    ContactMessage, Notification, Payment, PrivacySection, PromoCode, Resource,
    SubService, TeamMember, Testimonial, User, Worker,
};
use rust_decimal::dec;
use test_helpers::mock::DevDataset;
use test_helpers::spawn_app;

async fn loaded<E: Resource>(ctx: &StoreContext) -> usize {
    let store = CollectionStore::<E>::mount(ctx).await;
    assert_eq!(store.snapshot().phase, Phase::Ready, "{}", E::LABEL);
    store.len()
}

#[tokio::test]
async fn every_store_loads_demo_data() -> anyhow::Result<()> {
    let app = spawn_app().await;
    DevDataset::create(&app)?;
    let ctx = app.context();

    assert_eq!(loaded::<User>(&ctx).await, 6);
    assert_eq!(loaded::<Worker>(&ctx).await, 3);
    assert_eq!(loaded::<Category>(&ctx).await, 4);
    assert_eq!(loaded::<SubService>(&ctx).await, 4);
    assert_eq!(loaded::<Booking>(&ctx).await, 5);
    assert_eq!(loaded::<Payment>(&ctx).await, 2);
    assert_eq!(loaded::<PromoCode>(&ctx).await, 2);
    assert_eq!(loaded::<Complaint>(&ctx).await, 2);
    assert_eq!(loaded::<Notification>(&ctx).await, 1);
    assert_eq!(loaded::<Testimonial>(&ctx).await, 1);
    assert_eq!(loaded::<TeamMember>(&ctx).await, 1);
    assert_eq!(loaded::<BlogPost>(&ctx).await, 1);
    assert_eq!(loaded::<ContactMessage>(&ctx).await, 1);
    assert_eq!(loaded::<PrivacySection>(&ctx).await, 1);
    assert_eq!(loaded::<AccountDeletionRequest>(&ctx).await, 1);
    Ok(())
}

#[tokio::test]
async fn dashboard_counts_demo_data() -> anyhow::Result<()> {
    let app = spawn_app().await;
    DevDataset::create(&app)?;

    let dashboard = AggregateStore::dashboard(&app.context()).mounted().await;
    let stats = dashboard.data().unwrap();

    // Customers plus the workers' accounts.
    assert_eq!(stats.total_users, 6);
    assert_eq!(stats.total_workers, 3);
    assert_eq!(stats.active_workers, 3);
    assert_eq!(stats.available_workers, 3);
    assert_eq!(stats.total_categories, 4);
    assert_eq!(stats.total_bookings, 5);
    let by_status: Vec<_> = stats
        .bookings_by_status
        .iter()
        .map(|(status, count)| (status.as_str(), *count))
        .collect();
    assert_eq!(
        by_status,
        [("Cancelled", 1), ("Completed", 2), ("Confirmed", 1), ("Pending", 1)]
    );
    assert_eq!(stats.total_payments, 2);
    assert_eq!(stats.total_revenue, dec!(50));
    assert_eq!(stats.total_commission, dec!(7.5));
    assert_eq!(stats.open_complaints, 1);
    assert_eq!(stats.total_promo_codes, 2);
    assert_eq!(stats.active_promo_codes, 1);
    Ok(())
}

#[tokio::test]
async fn reports_break_down_bookings() -> anyhow::Result<()> {
    let app = spawn_app().await;
    DevDataset::create(&app)?;

    let reports = AggregateStore::reports(&app.context()).fetch().await?;

    assert_eq!(reports.total_bookings, 5);
    assert_eq!(reports.revenue_by_service["Cleaning"], dec!(110));
    assert_eq!(reports.revenue_by_service["Plumbing"], dec!(30));
    assert_eq!(reports.average_booking_amount, dec!(31));
    let completed = &reports.bookings_by_status["Completed"];
    assert_eq!(completed.count, 2);
    assert_eq!(completed.amount, dec!(50));
    assert_eq!(reports.total_revenue, dec!(50));
    assert_eq!(reports.platform_commission, dec!(7.5));
    assert_eq!(reports.payments_by_status["Paid"], 2);
    Ok(())
}

#[tokio::test]
async fn top_workers_and_recent_bookings() -> anyhow::Result<()> {
    let app = spawn_app().await;
    DevDataset::create(&app)?;
    let ctx = app.context();

    let top = AggregateStore::top_workers(&ctx, 2).fetch().await?;
    let names: Vec<_> = top.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, ["Sahra Jama", "Abdi Warsame"]);

    let recent = AggregateStore::recent_bookings(&ctx, 2).fetch().await?;
    let ids: Vec<_> = recent.iter().map(|b| b.id.0).collect();
    assert_eq!(ids, [5, 4]);
    Ok(())
}

#[tokio::test]
async fn one_failing_source_fails_the_aggregate() -> anyhow::Result<()> {
    let app = spawn_app().await;
    DevDataset::create(&app)?;
    let dashboard = AggregateStore::dashboard(&app.context());

    app.db.fail_next(500);
    let err = dashboard.fetch().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Status(500));
    let state = dashboard.snapshot();
    assert_eq!(state.phase, Phase::Failed);
    assert!(!state.data.is_fetched());
    assert_eq!(state.error.as_deref(), Some("Injected failure"));

    dashboard.refetch().await?;
    assert!(dashboard.data().is_some());
    assert_eq!(dashboard.error(), None);
    Ok(())
}

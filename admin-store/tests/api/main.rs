mod aggregates;
mod bookings;
mod cancellation;
mod collections;
mod multi_step;
mod reconcile;

use test_helpers::spawn_app;

#[tokio::test]
async fn health_check() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let response =
        reqwest::get(format!("{}/api/health_check", app.address())).await?;
    assert!(response.status().is_success());

    Ok(())
}
